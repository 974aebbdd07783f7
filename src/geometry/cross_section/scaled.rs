use crate::error::Result;
use crate::geometry::interpolator::{Interpolate, Interpolator, InterpolatorDomain};
use crate::geometry::shape_library::{ShapeId, ShapeLibrary};
use crate::math::Vector3;

use super::CrossSection;

/// A library base shape uniformly scaled along the path.
///
/// `P(u, v) = shape(u) * scale(v)`; the derivatives follow the product
/// rule: `dP/du = shape'(u) * scale(v)` and `dP/dv = shape(u) * scale'(v)`.
#[derive(Debug, Clone)]
pub struct ScaleInterpCrossSec {
    shape: ShapeId,
    scale: Interpolator<f64>,
}

impl ScaleInterpCrossSec {
    /// Creates a cross-section from a library shape and a scale interpolator.
    #[must_use]
    pub fn new(shape: ShapeId, scale: Interpolator<f64>) -> Self {
        Self { shape, scale }
    }

    /// The referenced library shape.
    #[must_use]
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    /// The scale interpolator.
    #[must_use]
    pub fn scale(&self) -> &Interpolator<f64> {
        &self.scale
    }

    /// Domain of the scale parameter `v`.
    #[must_use]
    pub fn domain_v(&self) -> InterpolatorDomain {
        self.scale.domain()
    }
}

impl CrossSection for ScaleInterpCrossSec {
    fn position(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        let base = shapes.shape(self.shape)?;
        Ok(base.position(u) * self.scale.position(v))
    }

    fn derivative_u(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        let base = shapes.shape(self.shape)?;
        Ok(base.derivative(u) * self.scale.position(v))
    }

    fn derivative_v(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        let base = shapes.shape(self.shape)?;
        Ok(base.position(u) * self.scale.derivative(v))
    }

    fn domain_u(&self, shapes: &ShapeLibrary) -> Result<InterpolatorDomain> {
        Ok(shapes.shape(self.shape)?.domain())
    }
}
