use crate::geometry::carrier::CarrierMode;
use crate::geometry::cross_section::CrossSectionMode;
use crate::geometry::shape_library::ShapeId;
use crate::math::Matrix4;

/// The pen state saved and restored by `push_state`/`pop_state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    /// Current frame; columns are right, up, forward and position.
    pub frame: Matrix4,
    /// Carrier variant the open segment is built with when it ends.
    pub carrier_mode: CarrierMode,
    /// Cross-section variant taken by the next `begin_cylinder`.
    pub cross_section_mode: CrossSectionMode,
    /// Library shape used by scaled cross-sections.
    pub current_cs: ShapeId,
    /// Scale staged for the next `add_point`/`end_cylinder`, if any.
    pub scale: Option<f64>,
}
