//! Decomposition of turtle frames into interpolable angles.
//!
//! A frame is a 4x4 transform whose columns are the local `right` (x),
//! `up` (y) and `forward` (z) axes followed by the translation. The
//! rotation part is factored as `R = Ry(alpha) * Rx(beta) * Rz(gamma)`,
//! which is the yaw/pitch/roll convention the turtle records with:
//! yaw turns about local Y, pitch about local X, roll about local Z.

use std::f64::consts::{PI, TAU};

use nalgebra::{Rotation3, Vector4};

use super::{Matrix3, Matrix4, Vector3, TOLERANCE};

/// Yaw/pitch/roll angles of a frame's orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAngles {
    /// Rotation about the world Y axis.
    pub alpha: f64,
    /// Rotation about the once-rotated X axis.
    pub beta: f64,
    /// Rotation about the resulting forward axis.
    pub gamma: f64,
}

impl FrameAngles {
    /// Creates a new set of angles.
    #[must_use]
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Extracts the angles from the rotation part of `frame`.
    ///
    /// Columns are normalized first, so a uniformly scaled frame
    /// decomposes to the same angles as its rigid counterpart. At the
    /// poles (forward parallel to Y) `alpha` is 0 and `gamma` absorbs the
    /// remaining twist.
    #[must_use]
    pub fn from_matrix(frame: &Matrix4) -> Self {
        let basis = normalized_basis(frame);
        let forward = basis.column(2);

        let beta = (-forward.y).clamp(-1.0, 1.0).asin();
        let alpha = if forward.x.abs() < TOLERANCE && forward.z.abs() < TOLERANCE {
            0.0
        } else {
            forward.x.atan2(forward.z)
        };

        let yaw_pitch = rot_y(alpha) * rot_x(beta);
        let roll = yaw_pitch.transpose() * basis;
        let gamma = roll[(1, 0)].atan2(roll[(0, 0)]);

        Self { alpha, beta, gamma }
    }

    /// Reconstructs the orthonormal basis `[right | up | forward]`.
    #[must_use]
    pub fn basis(&self) -> Matrix3 {
        rot_y(self.alpha) * rot_x(self.beta) * rot_z(self.gamma)
    }

    /// Partial derivatives of [`basis`](Self::basis) with respect to
    /// `alpha`, `beta` and `gamma`.
    #[must_use]
    pub fn basis_partials(&self) -> [Matrix3; 3] {
        let (ry, rx, rz) = (rot_y(self.alpha), rot_x(self.beta), rot_z(self.gamma));
        [
            d_rot_y(self.alpha) * rx * rz,
            ry * d_rot_x(self.beta) * rz,
            ry * rx * d_rot_z(self.gamma),
        ]
    }

    /// Shifts every angle by a multiple of `TAU` so that each lies within
    /// `PI` of the corresponding angle in `previous`.
    #[must_use]
    pub fn unwrapped_towards(&self, previous: &Self) -> Self {
        Self {
            alpha: unwrap_angle(previous.alpha, self.alpha),
            beta: unwrap_angle(previous.beta, self.beta),
            gamma: unwrap_angle(previous.gamma, self.gamma),
        }
    }

    /// The other angle triple describing the same rotation,
    /// `(alpha + PI, PI - beta, gamma + PI)`.
    #[must_use]
    pub fn alternate(&self) -> Self {
        Self {
            alpha: self.alpha + PI,
            beta: PI - self.beta,
            gamma: self.gamma + PI,
        }
    }

    /// Picks whichever of `self` and its [`alternate`](Self::alternate),
    /// once unwrapped, lies closer to `previous`.
    ///
    /// Following this along a sequence of frames keeps a pitch through the
    /// vertical from showing up as a half-turn jump in yaw and roll.
    #[must_use]
    pub fn nearest_to(&self, previous: &Self) -> Self {
        let direct = self.unwrapped_towards(previous);
        let flipped = self.alternate().unwrapped_towards(previous);
        if flipped.distance(previous) < direct.distance(previous) {
            flipped
        } else {
            direct
        }
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.alpha - other.alpha).abs()
            + (self.beta - other.beta).abs()
            + (self.gamma - other.gamma).abs()
    }
}

/// Returns `next` shifted by whole turns so `|result - previous| <= PI`.
#[must_use]
pub fn unwrap_angle(previous: f64, next: f64) -> f64 {
    let mut delta = (next - previous) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    previous + delta
}

/// Returns the translation column of `frame`.
#[must_use]
pub fn translation(frame: &Matrix4) -> Vector3 {
    Vector3::new(frame[(0, 3)], frame[(1, 3)], frame[(2, 3)])
}

/// Builds a frame from an orientation basis and a translation.
#[must_use]
pub fn compose(basis: &Matrix3, origin: &Vector3) -> Matrix4 {
    let mut frame = basis.to_homogeneous();
    frame.set_column(3, &Vector4::new(origin.x, origin.y, origin.z, 1.0));
    frame
}

/// Translation along the local forward axis.
#[must_use]
pub fn forward_step(distance: f64) -> Matrix4 {
    Matrix4::new_translation(&Vector3::new(0.0, 0.0, distance))
}

/// Rotation by `theta` radians about one of the local axes.
#[must_use]
pub fn local_rotation(axis: &nalgebra::Unit<Vector3>, theta: f64) -> Matrix4 {
    Rotation3::from_axis_angle(axis, theta).to_homogeneous()
}

fn normalized_basis(frame: &Matrix4) -> Matrix3 {
    let mut basis: Matrix3 = frame.fixed_view::<3, 3>(0, 0).into_owned();
    for i in 0..3 {
        let len = basis.column(i).norm();
        if len > TOLERANCE {
            let unit = basis.column(i) / len;
            basis.set_column(i, &unit);
        }
    }
    basis
}

fn rot_x(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

fn rot_y(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

fn rot_z(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

fn d_rot_x(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(0.0, 0.0, 0.0, 0.0, -s, -c, 0.0, c, -s)
}

fn d_rot_y(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(-s, 0.0, c, 0.0, 0.0, 0.0, -c, 0.0, -s)
}

fn d_rot_z(t: f64) -> Matrix3 {
    let (s, c) = t.sin_cos();
    Matrix3::new(-s, -c, 0.0, c, -s, 0.0, 0.0, 0.0, 0.0)
}
