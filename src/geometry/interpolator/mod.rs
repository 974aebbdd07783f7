mod bezier;
mod linear;

pub use bezier::BezierInterpolator;
pub use linear::LinearInterpolator;

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use crate::error::{GeometryError, Result};
use crate::math::{almost_equal_ulps, clamp, Vector3, DEFAULT_MAX_ULPS};

/// Minimum number of control points any interpolator accepts.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Values that can be interpolated: a vector space over `f64`.
pub trait ControlPoint:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;
}

impl ControlPoint for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl ControlPoint for Vector3 {
    fn zero() -> Self {
        Vector3::zeros()
    }
}

/// Parameter domain of an interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatorDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl InterpolatorDomain {
    /// Creates a new interpolator domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Clamps `t` into the domain.
    #[must_use]
    pub fn clamp(&self, t: f64) -> f64 {
        clamp(t, self.t_min, self.span())
    }
}

/// Which family of piecewise curve an [`Interpolator`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolatorKind {
    /// Straight segments, C0 at the control points.
    Linear,
    /// Cubic Bezier segments with matching tangents, C1 at the control points.
    Bezier,
}

/// One-dimensional parametric curve through a sequence of control points.
///
/// The parameter runs over the index domain `[0, num_segments]`: control
/// point `i` sits at `t = i`. Out-of-range parameters are clamped, so
/// evaluation never fails.
pub trait Interpolate<T: ControlPoint> {
    /// Position on the curve at `t`.
    fn position(&self, t: f64) -> T;

    /// First derivative with respect to `t`.
    fn derivative(&self, t: f64) -> T;

    /// Second derivative with respect to `t`.
    fn second_derivative(&self, t: f64) -> T;

    /// The control points being interpolated.
    fn control_points(&self) -> &[T];

    /// Whether the last segment wraps back to the first control point.
    fn is_closed(&self) -> bool;

    /// Position, first and second derivative at `t`.
    fn get(&self, t: f64) -> (T, T, T) {
        (self.position(t), self.derivative(t), self.second_derivative(t))
    }

    /// Returns control point `index`, if present.
    fn control_point(&self, index: usize) -> Option<&T> {
        self.control_points().get(index)
    }

    /// Number of control points.
    fn num_control_points(&self) -> usize {
        self.control_points().len()
    }

    /// Number of piecewise segments.
    fn num_segments(&self) -> usize {
        let n = self.num_control_points();
        if self.is_closed() {
            n
        } else {
            n.saturating_sub(1)
        }
    }

    /// Parameter domain.
    #[allow(clippy::cast_precision_loss)]
    fn domain(&self) -> InterpolatorDomain {
        InterpolatorDomain::new(0.0, self.num_segments() as f64)
    }

    /// Samples the curve at `n + 1` evenly spaced parameters.
    ///
    /// A request for zero segments is raised to one, so the result always
    /// holds both endpoint evaluations. The returned buffer is freshly
    /// allocated; its length minus one is the segment count actually used.
    #[allow(clippy::cast_precision_loss)]
    fn approx(&self, n: usize) -> Vec<T> {
        let n = n.max(1);
        let domain = self.domain();
        (0..=n)
            .map(|i| {
                let t = if i == n {
                    domain.t_max
                } else {
                    domain.t_min + domain.span() * i as f64 / n as f64
                };
                self.position(t)
            })
            .collect()
    }
}

/// A linear or Bezier interpolator.
#[derive(Debug, Clone)]
pub enum Interpolator<T: ControlPoint> {
    /// Piecewise-linear interpolation.
    Linear(LinearInterpolator<T>),
    /// Piecewise cubic Bezier interpolation.
    Bezier(BezierInterpolator<T>),
}

impl<T: ControlPoint> Interpolator<T> {
    /// Creates a piecewise-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn linear(points: Vec<T>, closed: bool) -> Result<Self> {
        Ok(Self::Linear(LinearInterpolator::new(points, closed)?))
    }

    /// Creates a Bezier interpolator with automatically computed tangents.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn bezier(points: Vec<T>, closed: bool) -> Result<Self> {
        Ok(Self::Bezier(BezierInterpolator::new(points, closed)?))
    }

    /// Creates an interpolator of the given kind with automatic tangents.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn of_kind(kind: InterpolatorKind, points: Vec<T>, closed: bool) -> Result<Self> {
        match kind {
            InterpolatorKind::Linear => Self::linear(points, closed),
            InterpolatorKind::Bezier => Self::bezier(points, closed),
        }
    }

    /// Returns which curve family this interpolator uses.
    #[must_use]
    pub fn kind(&self) -> InterpolatorKind {
        match self {
            Self::Linear(_) => InterpolatorKind::Linear,
            Self::Bezier(_) => InterpolatorKind::Bezier,
        }
    }

    /// Replaces every control point.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given, or if a
    /// Bezier interpolator with explicit tangents receives a different
    /// number of points than it has tangents.
    pub fn set_control_points(&mut self, points: Vec<T>) -> Result<()> {
        match self {
            Self::Linear(inner) => inner.set_control_points(points),
            Self::Bezier(inner) => inner.set_control_points(points),
        }
    }

    /// Replaces control point `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_control_point(&mut self, index: usize, point: T) -> Result<()> {
        match self {
            Self::Linear(inner) => inner.set_control_point(index, point),
            Self::Bezier(inner) => inner.set_control_point(index, point),
        }
    }

    /// Opens or closes the curve.
    pub fn set_closed(&mut self, closed: bool) {
        match self {
            Self::Linear(inner) => inner.set_closed(closed),
            Self::Bezier(inner) => inner.set_closed(closed),
        }
    }
}

impl<T: ControlPoint> Interpolate<T> for Interpolator<T> {
    fn position(&self, t: f64) -> T {
        match self {
            Self::Linear(inner) => inner.position(t),
            Self::Bezier(inner) => inner.position(t),
        }
    }

    fn derivative(&self, t: f64) -> T {
        match self {
            Self::Linear(inner) => inner.derivative(t),
            Self::Bezier(inner) => inner.derivative(t),
        }
    }

    fn second_derivative(&self, t: f64) -> T {
        match self {
            Self::Linear(inner) => inner.second_derivative(t),
            Self::Bezier(inner) => inner.second_derivative(t),
        }
    }

    fn control_points(&self) -> &[T] {
        match self {
            Self::Linear(inner) => inner.control_points(),
            Self::Bezier(inner) => inner.control_points(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Linear(inner) => inner.is_closed(),
            Self::Bezier(inner) => inner.is_closed(),
        }
    }
}

/// Checks the minimum control point count.
pub(crate) fn validate_points<T>(points: &[T]) -> Result<()> {
    if points.len() < MIN_CONTROL_POINTS {
        return Err(GeometryError::TooFewControlPoints {
            required: MIN_CONTROL_POINTS,
            actual: points.len(),
        }
        .into());
    }
    Ok(())
}

/// Checks that `index` addresses an existing control point.
pub(crate) fn validate_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(GeometryError::IndexOutOfRange { index, len }.into());
    }
    Ok(())
}

/// Splits a parameter into `(segment, local)` with `local` in `[0, 1]`.
///
/// `t` is clamped into `[0, num_segments]` and snapped onto a knot when it
/// lies within a few ULPs of one; the last segment owns `t_max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn locate(t: f64, num_segments: usize) -> (usize, f64) {
    let t = clamp(t, 0.0, num_segments as f64);
    let knot = t.round();
    let t = if almost_equal_ulps(t, knot, DEFAULT_MAX_ULPS) { knot } else { t };
    let segment = (t.floor() as usize).min(num_segments.saturating_sub(1));
    (segment, t - segment as f64)
}
