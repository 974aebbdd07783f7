pub mod frame;
pub mod numeric;

pub use frame::FrameAngles;
pub use numeric::{almost_equal_ulps, clamp, clamp_index};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix, used for orientation bases.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default ULP budget for [`almost_equal_ulps`] at domain boundaries.
pub const DEFAULT_MAX_ULPS: u64 = 5;
