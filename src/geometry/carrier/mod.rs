mod bezier;
mod frame_track;
mod linear;

pub use bezier::BezierCarrier;
pub use frame_track::FrameTrack;
pub use linear::LinearCarrier;

use crate::error::Result;
use crate::geometry::interpolator::{Interpolator, InterpolatorDomain};
use crate::math::{Matrix4, Vector3};

/// A path with an orientation frame at every parameter, used as the spine
/// of a swept surface.
///
/// `orient(v, x, y)` is the path position at `v` offset by `x` along the
/// local right axis and `y` along the local up axis. The forward axis of
/// the frame is the local z axis.
pub trait Carrier {
    /// Position at path parameter `v` with in-plane offset `(x, y)`.
    fn orient(&self, v: f64, x: f64, y: f64) -> Vector3;

    /// Partial derivative of [`orient`](Self::orient) with respect to `v`.
    fn d_orient_dv(&self, v: f64, x: f64, y: f64) -> Vector3;

    /// Partial derivative of [`orient`](Self::orient) with respect to `x`.
    fn d_orient_dx(&self, v: f64, x: f64, y: f64) -> Vector3;

    /// Partial derivative of [`orient`](Self::orient) with respect to `y`.
    fn d_orient_dy(&self, v: f64, x: f64, y: f64) -> Vector3;

    /// The underlying translation interpolator.
    fn interpolator(&self) -> &Interpolator<Vector3>;

    /// Path parameter domain (the frame index range).
    fn domain(&self) -> InterpolatorDomain;
}

/// Which carrier variant a turtle segment is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CarrierMode {
    /// Smooth Bezier interpolation of the frames.
    #[default]
    Bezier,
    /// Piecewise-linear interpolation of the frames.
    Linear,
}

/// A linear or Bezier carrier curve.
#[derive(Debug, Clone)]
pub enum CarrierCurve {
    /// Piecewise-linear carrier.
    Linear(LinearCarrier),
    /// Smooth Bezier carrier.
    Bezier(BezierCarrier),
}

impl CarrierCurve {
    /// Builds a carrier of the given mode from reference frames.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given.
    pub fn new(mode: CarrierMode, frames: &[Matrix4]) -> Result<Self> {
        Ok(match mode {
            CarrierMode::Linear => Self::Linear(LinearCarrier::new(frames)?),
            CarrierMode::Bezier => Self::Bezier(BezierCarrier::new(frames)?),
        })
    }

    /// Returns the variant of this carrier.
    #[must_use]
    pub fn mode(&self) -> CarrierMode {
        match self {
            Self::Linear(_) => CarrierMode::Linear,
            Self::Bezier(_) => CarrierMode::Bezier,
        }
    }

    /// Rebuilds the carrier from a new frame buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given.
    pub fn set_control_points(&mut self, frames: &[Matrix4]) -> Result<()> {
        self.track_mut().set_frames(frames)
    }

    fn track(&self) -> &FrameTrack {
        match self {
            Self::Linear(c) => c.track(),
            Self::Bezier(c) => c.track(),
        }
    }

    fn track_mut(&mut self) -> &mut FrameTrack {
        match self {
            Self::Linear(c) => c.track_mut(),
            Self::Bezier(c) => c.track_mut(),
        }
    }
}

impl Carrier for CarrierCurve {
    fn orient(&self, v: f64, x: f64, y: f64) -> Vector3 {
        self.track().orient(v, x, y)
    }

    fn d_orient_dv(&self, v: f64, x: f64, y: f64) -> Vector3 {
        self.track().d_orient_dv(v, x, y)
    }

    fn d_orient_dx(&self, v: f64, _x: f64, _y: f64) -> Vector3 {
        self.track().d_orient_dx(v)
    }

    fn d_orient_dy(&self, v: f64, _x: f64, _y: f64) -> Vector3 {
        self.track().d_orient_dy(v)
    }

    fn interpolator(&self) -> &Interpolator<Vector3> {
        self.track().translation()
    }

    fn domain(&self) -> InterpolatorDomain {
        self.track().domain()
    }
}
