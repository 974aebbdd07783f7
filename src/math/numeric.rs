//! Scalar helpers shared by the interpolators.

/// Clamps `value` into `[min, min + range]`.
///
/// A negative `range` is treated as an empty interval and yields `min`.
#[must_use]
pub fn clamp(value: f64, min: f64, range: f64) -> f64 {
    if range <= 0.0 || value <= min {
        return min;
    }
    let max = min + range;
    if value >= max {
        max
    } else {
        value
    }
}

/// Integer variant of [`clamp`]: clamps `value` into `[min, min + range]`.
#[must_use]
pub fn clamp_index(value: i64, min: i64, range: i64) -> i64 {
    if range <= 0 {
        return min;
    }
    value.clamp(min, min + range)
}

/// Returns `true` when `a` and `b` are at most `max_ulps` representable
/// doubles apart.
///
/// Values on opposite sides of zero are compared through their distance to
/// zero, so `-0.0 == 0.0` and tiny values of opposite sign still compare equal
/// when their combined ULP distance is within budget. NaN never compares equal.
#[must_use]
pub fn almost_equal_ulps(a: f64, b: f64, max_ulps: u64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    #[allow(clippy::float_cmp)]
    if a == b {
        return true;
    }
    ordered_bits(a).abs_diff(ordered_bits(b)) <= max_ulps
}

/// Maps a double onto a monotonically ordered integer line
/// (twos-complement trick), so adjacent doubles differ by exactly one.
#[allow(clippy::cast_possible_wrap)]
fn ordered_bits(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_range() {
        assert!((clamp(0.5, 0.0, 1.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_below_and_above() {
        assert!((clamp(-3.0, 1.0, 2.0) - 1.0).abs() < f64::EPSILON);
        assert!((clamp(7.0, 1.0, 2.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_index_bounds() {
        assert_eq!(clamp_index(-1, 0, 4), 0);
        assert_eq!(clamp_index(9, 0, 4), 4);
        assert_eq!(clamp_index(2, 0, 4), 2);
        assert_eq!(clamp_index(5, 3, 0), 3);
    }

    #[test]
    fn ulps_adjacent_values() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 3);
        assert!(almost_equal_ulps(a, b, 5));
        assert!(!almost_equal_ulps(a, b, 2));
    }

    #[test]
    fn ulps_signed_zero() {
        assert!(almost_equal_ulps(0.0, -0.0, 0));
    }

    #[test]
    fn ulps_nan() {
        assert!(!almost_equal_ulps(f64::NAN, f64::NAN, 100));
    }

    #[test]
    fn ulps_far_apart() {
        assert!(!almost_equal_ulps(1.0, 1.0 + 1e-9, 5));
    }
}
