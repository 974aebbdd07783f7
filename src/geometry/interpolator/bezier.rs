use crate::error::{GeometryError, Result};
use crate::math::clamp_index;

use super::{locate, validate_index, validate_points, ControlPoint, Interpolate};

/// How the Bezier handles at each control point are obtained.
#[derive(Debug, Clone, PartialEq)]
enum Tangents<T> {
    /// Catmull-Rom style handles derived from neighbouring points.
    Automatic,
    /// Caller-supplied `(incoming, outgoing)` handle offsets per point.
    Explicit(Vec<(T, T)>),
}

/// Piecewise cubic Bezier interpolation through the control points.
///
/// Segment `i` uses the Bezier polygon
/// `p[i], p[i] + out[i], p[i+1] - in[i+1], p[i+1]`, so the curve passes
/// through every control point. With automatic tangents the handles are
/// `(p[i+1] - p[i-1]) / 6`, giving C1 continuity; closed curves use
/// periodic neighbours, open curves one-sided differences at the ends.
#[derive(Debug, Clone)]
pub struct BezierInterpolator<T: ControlPoint> {
    points: Vec<T>,
    closed: bool,
    tangents: Tangents<T>,
    /// Cached `(incoming, outgoing)` handle offsets, one pair per point.
    handles: Vec<(T, T)>,
}

impl<T: ControlPoint> BezierInterpolator<T> {
    /// Creates a Bezier interpolator with automatically computed tangents.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn new(points: Vec<T>, closed: bool) -> Result<Self> {
        validate_points(&points)?;
        let mut interp = Self {
            points,
            closed,
            tangents: Tangents::Automatic,
            handles: Vec::new(),
        };
        interp.update_handles();
        Ok(interp)
    }

    /// Creates a Bezier interpolator with explicit `(incoming, outgoing)`
    /// handle offsets at every control point.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given or the
    /// number of tangent pairs differs from the number of points.
    pub fn with_tangents(points: Vec<T>, tangents: Vec<(T, T)>, closed: bool) -> Result<Self> {
        validate_points(&points)?;
        check_tangent_count(points.len(), tangents.len())?;
        let mut interp = Self {
            points,
            closed,
            tangents: Tangents::Explicit(tangents),
            handles: Vec::new(),
        };
        interp.update_handles();
        Ok(interp)
    }

    /// Returns `true` when the handles were supplied by the caller.
    #[must_use]
    pub fn has_explicit_tangents(&self) -> bool {
        matches!(self.tangents, Tangents::Explicit(_))
    }

    /// Replaces every control point.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given, or if
    /// the interpolator has explicit tangents and the point count changes.
    pub fn set_control_points(&mut self, points: Vec<T>) -> Result<()> {
        validate_points(&points)?;
        if let Tangents::Explicit(tangents) = &self.tangents {
            check_tangent_count(points.len(), tangents.len())?;
        }
        self.points = points;
        self.update_handles();
        Ok(())
    }

    /// Replaces control point `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_control_point(&mut self, index: usize, point: T) -> Result<()> {
        validate_index(index, self.points.len())?;
        self.points[index] = point;
        self.update_handles();
        Ok(())
    }

    /// Replaces the explicit handle offsets.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of pairs differs from the number of points.
    pub fn set_tangents(&mut self, tangents: Vec<(T, T)>) -> Result<()> {
        check_tangent_count(self.points.len(), tangents.len())?;
        self.tangents = Tangents::Explicit(tangents);
        self.update_handles();
        Ok(())
    }

    /// Opens or closes the curve.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        self.update_handles();
    }

    fn update_handles(&mut self) {
        self.handles = match &self.tangents {
            Tangents::Explicit(tangents) => tangents.clone(),
            Tangents::Automatic => self.automatic_handles(),
        };
    }

    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn automatic_handles(&self) -> Vec<(T, T)> {
        let n = self.points.len();
        let last = n as i64 - 1;
        let third = 1.0 / 3.0;
        (0..n)
            .map(|i| {
                let slope = if self.closed {
                    (self.points[(i + 1) % n] - self.points[(i + n - 1) % n]) * 0.5
                } else {
                    // One-sided at the ends, central inside.
                    let prev = clamp_index(i as i64 - 1, 0, last);
                    let next = clamp_index(i as i64 + 1, 0, last);
                    (self.points[next as usize] - self.points[prev as usize])
                        * (1.0 / (next - prev) as f64)
                };
                let handle = slope * third;
                (handle, handle)
            })
            .collect()
    }

    /// Bezier polygon of `segment`.
    fn polygon(&self, segment: usize) -> [T; 4] {
        let n = self.points.len();
        let next = (segment + 1) % n;
        let p0 = self.points[segment];
        let p3 = self.points[next];
        [p0, p0 + self.handles[segment].1, p3 - self.handles[next].0, p3]
    }
}

impl<T: ControlPoint> Interpolate<T> for BezierInterpolator<T> {
    fn position(&self, t: f64) -> T {
        let (segment, s) = locate(t, self.num_segments());
        let [b0, b1, b2, b3] = self.polygon(segment);
        let r = 1.0 - s;
        b0 * (r * r * r) + b1 * (3.0 * r * r * s) + b2 * (3.0 * r * s * s) + b3 * (s * s * s)
    }

    fn derivative(&self, t: f64) -> T {
        let (segment, s) = locate(t, self.num_segments());
        let [b0, b1, b2, b3] = self.polygon(segment);
        let r = 1.0 - s;
        ((b1 - b0) * (r * r) + (b2 - b1) * (2.0 * r * s) + (b3 - b2) * (s * s)) * 3.0
    }

    fn second_derivative(&self, t: f64) -> T {
        let (segment, s) = locate(t, self.num_segments());
        let [b0, b1, b2, b3] = self.polygon(segment);
        let first = b2 - b1 * 2.0 + b0;
        let second = b3 - b2 * 2.0 + b1;
        (first * (1.0 - s) + second * s) * 6.0
    }

    fn control_points(&self) -> &[T] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn check_tangent_count(points: usize, tangents: usize) -> Result<()> {
    if points != tangents {
        return Err(GeometryError::LengthMismatch {
            what: "bezier tangents",
            expected: points,
            actual: tangents,
        }
        .into());
    }
    Ok(())
}
