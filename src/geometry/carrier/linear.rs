use crate::error::Result;
use crate::geometry::interpolator::InterpolatorKind;
use crate::math::Matrix4;

use super::FrameTrack;

/// Carrier curve with piecewise-linear translation and angles.
///
/// C0 at the recorded frames with no overshoot between them; used for
/// turtle segments recorded in linear carrier mode.
#[derive(Debug, Clone)]
pub struct LinearCarrier {
    track: FrameTrack,
}

impl LinearCarrier {
    /// Creates a linear carrier from reference frames.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given.
    pub fn new(frames: &[Matrix4]) -> Result<Self> {
        Ok(Self {
            track: FrameTrack::new(InterpolatorKind::Linear, frames)?,
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::interpolator::Interpolate;
    use crate::math::frame::forward_step;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn straight_run_is_linear_in_v() {
        let frames = [Matrix4::identity(), forward_step(2.0), forward_step(6.0)];
        let carrier = LinearCarrier::new(&frames).unwrap();
        let path = carrier.track().translation();
        assert_relative_eq!(path.position(0.5), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(path.position(1.5), Vector3::new(0.0, 0.0, 4.0));
        assert_relative_eq!(path.second_derivative(1.5), Vector3::zeros());
    }
}
