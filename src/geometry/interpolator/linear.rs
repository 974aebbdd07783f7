use crate::error::Result;

use super::{locate, validate_index, validate_points, ControlPoint, Interpolate};

/// Piecewise-linear interpolation between control points.
///
/// `P(t) = p[i] + (t - i) * (p[i+1] - p[i])` for `t` in `[i, i+1]`.
/// The derivative is constant per segment and the second derivative is
/// zero everywhere.
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: ControlPoint> {
    points: Vec<T>,
    closed: bool,
}

impl<T: ControlPoint> LinearInterpolator<T> {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn new(points: Vec<T>, closed: bool) -> Result<Self> {
        validate_points(&points)?;
        Ok(Self { points, closed })
    }

    /// Replaces every control point.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given.
    pub fn set_control_points(&mut self, points: Vec<T>) -> Result<()> {
        validate_points(&points)?;
        self.points = points;
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
        Ok(())
    }

    /// Opens or closes the curve.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    fn segment_ends(&self, segment: usize) -> (T, T) {
        let n = self.points.len();
        (self.points[segment], self.points[(segment + 1) % n])
    }
}

impl<T: ControlPoint> Interpolate<T> for LinearInterpolator<T> {
    fn position(&self, t: f64) -> T {
        let (segment, s) = locate(t, self.num_segments());
        let (a, b) = self.segment_ends(segment);
        a + (b - a) * s
    }

    fn derivative(&self, t: f64) -> T {
        let (segment, _) = locate(t, self.num_segments());
        let (a, b) = self.segment_ends(segment);
        b - a
    }

    fn second_derivative(&self, _t: f64) -> T {
        T::zero()
    }

    fn control_points(&self) -> &[T] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn midpoint_of_segment() {
        let interp = LinearInterpolator::new(vec![0.0, 10.0, 20.0], false).unwrap();
        assert_relative_eq!(interp.position(0.5), 5.0);
        assert_relative_eq!(interp.position(1.25), 12.5);
    }

    #[test]
    fn derivative_is_segment_difference() {
        let interp = LinearInterpolator::new(vec![0.0, 10.0, 4.0], false).unwrap();
        assert_relative_eq!(interp.derivative(0.3), 10.0);
        assert_relative_eq!(interp.derivative(1.7), -6.0);
        assert_relative_eq!(interp.second_derivative(1.7), 0.0);
    }

    #[test]
    fn closed_wraps_last_segment() {
        let interp = LinearInterpolator::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
            ],
            true,
        )
        .unwrap();
        assert_eq!(interp.num_segments(), 3);
        assert_relative_eq!(interp.position(2.5), Vector3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(interp.position(3.0), Vector3::zeros());
    }

    #[test]
    fn no_overshoot_between_points() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 0.0, 1.0], false).unwrap();
        for pt in interp.approx(30) {
            assert!((0.0..=1.0).contains(&pt));
        }
    }
}
