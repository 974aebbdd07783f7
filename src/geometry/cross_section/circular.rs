use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::interpolator::InterpolatorDomain;
use crate::geometry::shape_library::ShapeLibrary;
use crate::math::{Vector3, TOLERANCE};

use super::CrossSection;

/// A constant circle of fixed radius.
///
/// `P(u) = radius * (cos(2 pi u), sin(2 pi u), 0)` for `u` in `[0, 1]`,
/// independent of `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularCrossSection {
    radius: f64,
}

impl CircularCrossSection {
    /// Creates a new circular cross-section.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(radius: f64) -> Result<Self> {
        if radius < TOLERANCE || !radius.is_finite() {
            return Err(GeometryError::Degenerate(
                "cross-section radius must be positive".into(),
            )
            .into());
        }
        Ok(Self { radius })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl CrossSection for CircularCrossSection {
    fn position(&self, _shapes: &ShapeLibrary, u: f64, _v: f64) -> Result<Vector3> {
        let (s, c) = (TAU * u).sin_cos();
        Ok(Vector3::new(self.radius * c, self.radius * s, 0.0))
    }

    fn derivative_u(&self, _shapes: &ShapeLibrary, u: f64, _v: f64) -> Result<Vector3> {
        let (s, c) = (TAU * u).sin_cos();
        let k = TAU * self.radius;
        Ok(Vector3::new(-k * s, k * c, 0.0))
    }

    fn derivative_v(&self, _shapes: &ShapeLibrary, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(Vector3::zeros())
    }

    fn domain_u(&self, _shapes: &ShapeLibrary) -> Result<InterpolatorDomain> {
        Ok(InterpolatorDomain::new(0.0, 1.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_has_constant_radius() {
        let cs = CircularCrossSection::new(0.1).unwrap();
        let shapes = ShapeLibrary::new();
        let ring = cs.cross_section(&shapes, 0.0, 16).unwrap();
        assert_eq!(ring.len(), 17);
        for p in &ring {
            assert_relative_eq!(p.norm(), 0.1, epsilon = 1e-12);
        }
        assert_relative_eq!(ring[0], ring[16], epsilon = 1e-12);
    }

    #[test]
    fn derivative_u_is_tangent() {
        let cs = CircularCrossSection::new(2.0).unwrap();
        let shapes = ShapeLibrary::new();
        let p = cs.position(&shapes, 0.0, 0.0).unwrap();
        let d = cs.derivative_u(&shapes, 0.0, 0.0).unwrap();
        assert_relative_eq!(p, Vector3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(d, Vector3::new(0.0, TAU * 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(cs.derivative_v(&shapes, 0.3, 5.0).unwrap(), Vector3::zeros());
    }

    #[test]
    fn invalid_radius() {
        assert!(CircularCrossSection::new(0.0).is_err());
        assert!(CircularCrossSection::new(-1.0).is_err());
    }
}
