use crate::geometry::carrier::CarrierMode;
use crate::geometry::cross_section::CrossSectionMode;

/// Initial settings for a [`Turtle`](super::Turtle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleConfig {
    /// Carrier variant used for segments until changed.
    pub carrier_mode: CarrierMode,
    /// Cross-section variant used for segments until changed.
    pub cross_section_mode: CrossSectionMode,
    /// Radius of the circle used in [`CrossSectionMode::Fixed`].
    pub fixed_radius: f64,
    /// Scale staged on a fresh pen, consumed by the first `begin_cylinder`.
    pub initial_scale: Option<f64>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            carrier_mode: CarrierMode::Bezier,
            cross_section_mode: CrossSectionMode::ScaledInterpolator,
            fixed_radius: 0.1,
            initial_scale: Some(1.0),
        }
    }
}

impl TurtleConfig {
    /// Sets the initial carrier mode.
    #[must_use]
    pub fn with_carrier_mode(mut self, mode: CarrierMode) -> Self {
        self.carrier_mode = mode;
        self
    }

    /// Sets the initial cross-section mode.
    #[must_use]
    pub fn with_cross_section_mode(mut self, mode: CrossSectionMode) -> Self {
        self.cross_section_mode = mode;
        self
    }

    /// Sets the fixed circle radius.
    #[must_use]
    pub fn with_fixed_radius(mut self, radius: f64) -> Self {
        self.fixed_radius = radius;
        self
    }
}
