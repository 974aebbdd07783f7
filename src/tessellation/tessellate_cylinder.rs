use tracing::{debug, trace};

use crate::error::{Result, TessellationError};
use crate::geometry::cross_section::CrossSection;
use crate::geometry::generalised_cylinder::GeneralisedCylinder;
use crate::geometry::shape_library::ShapeLibrary;
use crate::math::{Point2, Point3, TOLERANCE};

use super::tessellate_cap::{CapSide, TessellateCap};
use super::{MeshBuilder, SamplingParams};

/// Samples a generalised cylinder on a structured `(u, v)` grid.
///
/// Rings are placed at the path parameters returned by
/// [`GeneralisedCylinder::v_samples`], so every scale breakpoint gets its
/// own ring. Each ring carries `m + 1` vertices; the last one duplicates
/// the seam so UVs stay continuous.
pub struct TessellateCylinder<'a> {
    cylinder: &'a GeneralisedCylinder,
    params: SamplingParams,
}

impl<'a> TessellateCylinder<'a> {
    /// Creates a new `TessellateCylinder` operation.
    #[must_use]
    pub fn new(cylinder: &'a GeneralisedCylinder, params: SamplingParams) -> Self {
        Self { cylinder, params }
    }

    /// Emits the grid (and optional caps) into `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n < 1` or `m < 3`, if the cross-section's
    /// library shape is missing, or if a cap cannot be triangulated.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute<B: MeshBuilder>(&self, shapes: &ShapeLibrary, builder: &mut B) -> Result<()> {
        let n = self.params.path_segments;
        let m = self.params.section_segments;
        if n < 1 || m < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "need n >= 1 and m >= 3, got n = {n}, m = {m}"
            ))
            .into());
        }

        let v_samples = self.cylinder.v_samples(n);
        let u_domain = self.cylinder.cross_section().domain_u(shapes)?;
        let cols = m + 1;

        let mut grid = Vec::with_capacity(v_samples.len() * cols);
        let mut degenerate = 0usize;
        for &v in &v_samples {
            for iu in 0..cols {
                let u = if iu == m {
                    u_domain.t_max
                } else {
                    u_domain.t_min + u_domain.span() * iu as f64 / m as f64
                };
                let sample = self.cylinder.evaluate(shapes, u, v)?;
                if sample.normal.norm() < TOLERANCE {
                    trace!(u, v, "degenerate surface normal");
                    degenerate += 1;
                }
                grid.push(builder.add_vertex(
                    Point3::from(sample.position),
                    sample.normal,
                    Point2::new(u, v),
                ));
            }
        }

        let rings = v_samples.len();
        for iv in 0..rings.saturating_sub(1) {
            for iu in 0..m {
                let i00 = grid[iv * cols + iu];
                let i10 = grid[iv * cols + iu + 1];
                let i01 = grid[(iv + 1) * cols + iu];
                let i11 = grid[(iv + 1) * cols + iu + 1];
                builder.add_triangle([i00, i10, i11]);
                builder.add_triangle([i00, i11, i01]);
            }
        }

        debug!(rings, segments = m, degenerate, "cylinder tessellated");

        if self.params.capped {
            TessellateCap::new(self.cylinder, CapSide::Start, m).execute(shapes, builder)?;
            TessellateCap::new(self.cylinder, CapSide::End, m).execute(shapes, builder)?;
        }

        Ok(())
    }
}
