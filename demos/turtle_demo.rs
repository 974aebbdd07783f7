//! Records a small branching structure and prints mesh statistics.
//!
//! ```text
//! cargo run --example turtle_demo                 # default resolution
//! cargo run --example turtle_demo -- 32 16 caps   # n, m, capped
//! RUST_LOG=gencyl=debug cargo run --example turtle_demo
//! ```

use std::f64::consts::FRAC_PI_6;

use gencyl::{Result, SamplingParams, Turtle};
use tracing::info;

/// Grows one branch of `depth` levels, tapering the radius as it goes.
fn branch(turtle: &mut Turtle, depth: u32, length: f64, scale: f64) -> Result<()> {
    turtle.set_scale(scale);
    turtle.begin_cylinder();
    for _ in 0..3 {
        turtle.move_forward(length / 3.0);
        turtle.pitch(0.1);
        turtle.add_point()?;
    }
    turtle.set_scale(scale * 0.7);
    turtle.end_cylinder()?;

    if depth == 0 {
        return Ok(());
    }
    for side in [-1.0, 1.0] {
        turtle.push_state();
        turtle.roll(side * FRAC_PI_6);
        turtle.yaw(side * 0.5);
        branch(turtle, depth - 1, length * 0.7, scale * 0.7)?;
        turtle.pop_state()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for gencyl.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("gencyl=info".parse().unwrap_or_default())
        .add_directive("turtle_demo=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let n = args.first().and_then(|s| s.parse().ok()).unwrap_or(16);
    let m = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(12);
    let capped = args.iter().any(|a| a == "caps");

    let mut turtle = Turtle::new()?;
    branch(&mut turtle, 3, 2.0, 1.0)?;

    let params = SamplingParams::default()
        .with_path_segments(n)
        .with_section_segments(m)
        .with_caps(capped);
    let mut mesh = turtle.get_mesh_with(params)?;
    mesh.sync_normals();

    info!(
        cylinders = turtle.cylinders().len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "done"
    );
    println!(
        "{} cylinders, {} vertices, {} triangles",
        turtle.cylinders().len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}
