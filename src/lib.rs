pub mod error;
pub mod geometry;
pub mod math;
pub mod tessellation;
pub mod turtle;

pub use error::{GencylError, Result};
pub use tessellation::{MeshBuilder, SamplingParams, TriangleMesh};
pub use turtle::{Turtle, TurtleConfig, TurtleState};
