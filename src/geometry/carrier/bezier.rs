use crate::error::Result;
use crate::geometry::interpolator::InterpolatorKind;
use crate::math::Matrix4;

use super::FrameTrack;

/// Carrier curve with smooth Bezier translation and angles.
#[derive(Debug, Clone)]
pub struct BezierCarrier {
    track: FrameTrack,
}

impl BezierCarrier {
    /// Creates a Bezier carrier from reference frames.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given.
    pub fn new(frames: &[Matrix4]) -> Result<Self> {
        Ok(Self {
            track: FrameTrack::new(InterpolatorKind::Bezier, frames)?,
        })
    }

    /// The decomposed frame interpolators.
    #[must_use]
    pub fn track(&self) -> &FrameTrack {
        &self.track
    }

    pub(super) fn track_mut(&mut self) -> &mut FrameTrack {
        &mut self.track
    }
}
