mod circular;
mod scaled;

pub use circular::CircularCrossSection;
pub use scaled::ScaleInterpCrossSec;

use crate::error::Result;
use crate::geometry::interpolator::InterpolatorDomain;
use crate::geometry::shape_library::ShapeLibrary;
use crate::math::Vector3;

/// A cross-sectional boundary that may vary along the path.
///
/// Positions are offsets in the carrier's local `(x, y)` plane; the
/// generalised cylinder maps them into world space through
/// [`Carrier::orient`](crate::geometry::carrier::Carrier::orient).
/// `u` runs around the shape, `v` along the cross-section's own path
/// parameter.
pub trait CrossSection {
    /// Local offset at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced library shape is missing.
    fn position(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3>;

    /// Partial derivative with respect to `u`.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced library shape is missing.
    fn derivative_u(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3>;

    /// Partial derivative with respect to `v`.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced library shape is missing.
    fn derivative_v(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3>;

    /// Domain of the shape parameter `u`.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced library shape is missing.
    fn domain_u(&self, shapes: &ShapeLibrary) -> Result<InterpolatorDomain>;

    /// Samples the full ring at a fixed `v` with `m` segments (`m + 1` points).
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced library shape is missing.
    #[allow(clippy::cast_precision_loss)]
    fn cross_section(&self, shapes: &ShapeLibrary, v: f64, m: usize) -> Result<Vec<Vector3>> {
        let m = m.max(1);
        let domain = self.domain_u(shapes)?;
        (0..=m)
            .map(|i| {
                let u = if i == m {
                    domain.t_max
                } else {
                    domain.t_min + domain.span() * i as f64 / m as f64
                };
                self.position(shapes, u, v)
            })
            .collect()
    }
}

/// Which cross-section variant a turtle segment is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossSectionMode {
    /// Fixed-radius circle, independent of staged scales.
    Fixed,
    /// Selected library shape scaled by the staged scale values.
    #[default]
    ScaledInterpolator,
}

/// A circular or scaled-interpolator cross-section.
#[derive(Debug, Clone)]
pub enum CrossSectionCurve {
    /// Fixed-radius circle.
    Circular(CircularCrossSection),
    /// Library shape scaled along the path.
    Scaled(ScaleInterpCrossSec),
}

impl CrossSectionCurve {
    /// Returns the mode this cross-section was built for.
    #[must_use]
    pub fn mode(&self) -> CrossSectionMode {
        match self {
            Self::Circular(_) => CrossSectionMode::Fixed,
            Self::Scaled(_) => CrossSectionMode::ScaledInterpolator,
        }
    }
}

impl CrossSection for CrossSectionCurve {
    fn position(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        match self {
            Self::Circular(cs) => cs.position(shapes, u, v),
            Self::Scaled(cs) => cs.position(shapes, u, v),
        }
    }

    fn derivative_u(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        match self {
            Self::Circular(cs) => cs.derivative_u(shapes, u, v),
            Self::Scaled(cs) => cs.derivative_u(shapes, u, v),
        }
    }

    fn derivative_v(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<Vector3> {
        match self {
            Self::Circular(cs) => cs.derivative_v(shapes, u, v),
            Self::Scaled(cs) => cs.derivative_v(shapes, u, v),
        }
    }

    fn domain_u(&self, shapes: &ShapeLibrary) -> Result<InterpolatorDomain> {
        match self {
            Self::Circular(cs) => cs.domain_u(shapes),
            Self::Scaled(cs) => cs.domain_u(shapes),
        }
    }
}
