//! Turtle-style recorder that compiles pen movements into generalised
//! cylinders.
//!
//! A segment is opened with [`Turtle::begin_cylinder`], sampled with
//! [`Turtle::add_point`] and closed with [`Turtle::end_cylinder`]. Scales
//! staged with [`Turtle::set_scale`] become breakpoints of the segment's
//! scale interpolator at the frame where they are consumed.

mod config;
mod state;

pub use config::TurtleConfig;
pub use state::TurtleState;

use nalgebra::Unit;
use tracing::{debug, info, warn};

use crate::error::{LibraryError, Result, TurtleError};
use crate::geometry::carrier::{CarrierCurve, CarrierMode};
use crate::geometry::cross_section::{
    CircularCrossSection, CrossSectionCurve, CrossSectionMode, ScaleInterpCrossSec,
};
use crate::geometry::generalised_cylinder::{DomainBreakpoint, GeneralisedCylinder};
use crate::geometry::interpolator::{BezierInterpolator, Interpolator};
use crate::geometry::shape_library::{ShapeId, ShapeLibrary};
use crate::math::frame::{forward_step, local_rotation};
use crate::math::{Matrix4, Vector3};
use crate::tessellation::{SamplingParams, TessellateCylinder, TriangleMesh};

/// Scratch data of the segment between `begin_cylinder` and `end_cylinder`.
#[derive(Debug, Clone)]
struct Segment {
    cross_section_mode: CrossSectionMode,
    frames: Vec<Matrix4>,
    scales: Vec<f64>,
    domains: Vec<DomainBreakpoint>,
}

impl Segment {
    /// Consumes a staged scale as a breakpoint at the next frame index.
    fn flush_scale(&mut self, staged: &mut Option<f64>) {
        if self.cross_section_mode != CrossSectionMode::ScaledInterpolator {
            return;
        }
        if let Some(scale) = staged.take() {
            self.domains
                .push(DomainBreakpoint::new(self.frames.len(), self.scales.len()));
            self.scales.push(scale);
        }
    }
}

/// Records pen movements and compiles them into generalised cylinders.
#[derive(Debug, Clone)]
pub struct Turtle {
    config: TurtleConfig,
    state: TurtleState,
    stack: Vec<TurtleState>,
    shapes: ShapeLibrary,
    default_shape: ShapeId,
    segment: Option<Segment>,
    cylinders: Vec<GeneralisedCylinder>,
}

impl Turtle {
    /// Creates a turtle with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default library shape cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(TurtleConfig::default())
    }

    /// Creates a turtle with the given configuration.
    ///
    /// The pen starts at the identity frame. The shape library holds the
    /// default circular shape, which is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixed radius is not positive.
    pub fn with_config(config: TurtleConfig) -> Result<Self> {
        CircularCrossSection::new(config.fixed_radius)?;
        if let Some(value) = config.initial_scale.filter(|s| !is_valid_scale(*s)) {
            warn!(value, "ignoring non-positive initial scale");
        }
        let (shapes, default_shape) = ShapeLibrary::with_default_shape()?;
        Ok(Self {
            state: initial_state(&config, default_shape),
            config,
            stack: Vec::new(),
            shapes,
            default_shape,
            segment: None,
            cylinders: Vec::new(),
        })
    }

    /// Moves the pen `distance` along its forward axis.
    pub fn move_forward(&mut self, distance: f64) {
        self.state.frame *= forward_step(distance);
    }

    /// Rotates the pen about its up axis.
    pub fn yaw(&mut self, theta: f64) {
        self.rotate(Vector3::y_axis(), theta);
    }

    /// Rotates the pen about its right axis.
    pub fn pitch(&mut self, theta: f64) {
        self.rotate(Vector3::x_axis(), theta);
    }

    /// Rotates the pen about its forward axis.
    pub fn roll(&mut self, theta: f64) {
        self.rotate(Vector3::z_axis(), theta);
    }

    fn rotate(&mut self, axis: Unit<Vector3>, theta: f64) {
        self.state.frame *= local_rotation(&axis, theta);
    }

    /// Opens a new segment at the current frame.
    ///
    /// In scaled mode the first breakpoint `(0, 0)` takes the staged scale,
    /// or `1.0` when nothing is staged. A segment that is still open is
    /// discarded.
    pub fn begin_cylinder(&mut self) {
        if let Some(open) = self.segment.take() {
            warn!(frames = open.frames.len(), "discarding unfinished cylinder");
        }

        let mode = self.state.cross_section_mode;
        let mut segment = Segment {
            cross_section_mode: mode,
            frames: Vec::new(),
            scales: Vec::new(),
            domains: Vec::new(),
        };
        if mode == CrossSectionMode::ScaledInterpolator {
            segment.domains.push(DomainBreakpoint::new(0, 0));
            segment.scales.push(self.state.scale.take().unwrap_or(1.0));
        }
        segment.frames.push(self.state.frame);
        self.segment = Some(segment);
    }

    /// Records the current frame as a path sample.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::NoOpenCylinder`] outside a segment.
    pub fn add_point(&mut self) -> Result<()> {
        let segment = self.segment.as_mut().ok_or(TurtleError::NoOpenCylinder)?;
        segment.flush_scale(&mut self.state.scale);
        segment.frames.push(self.state.frame);
        Ok(())
    }

    /// Closes the segment and compiles it into a generalised cylinder.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::NoOpenCylinder`] outside a segment, or an
    /// error if the selected library shape no longer exists.
    pub fn end_cylinder(&mut self) -> Result<()> {
        let mut segment = self.segment.take().ok_or(TurtleError::NoOpenCylinder)?;
        segment.flush_scale(&mut self.state.scale);

        let cross_section = match segment.cross_section_mode {
            CrossSectionMode::ScaledInterpolator => {
                if segment.scales.len() == 1 {
                    segment
                        .domains
                        .push(DomainBreakpoint::new(segment.frames.len(), 1));
                    segment.scales.push(segment.scales[0]);
                }
                if !self.shapes.contains(self.state.current_cs) {
                    return Err(LibraryError::ShapeNotFound.into());
                }
                let scale = Interpolator::bezier(segment.scales, false)?;
                CrossSectionCurve::Scaled(ScaleInterpCrossSec::new(self.state.current_cs, scale))
            }
            CrossSectionMode::Fixed => {
                CrossSectionCurve::Circular(CircularCrossSection::new(self.config.fixed_radius)?)
            }
        };

        segment.frames.push(self.state.frame);
        let carrier = CarrierCurve::new(self.state.carrier_mode, &segment.frames)?;
        let cylinder =
            GeneralisedCylinder::new(carrier, cross_section, segment.frames, segment.domains)?;

        debug!(
            index = self.cylinders.len(),
            frames = cylinder.frames().len(),
            breakpoints = cylinder.domains().len(),
            carrier = ?self.state.carrier_mode,
            cross_section = ?cylinder.cross_section().mode(),
            "cylinder recorded"
        );
        self.cylinders.push(cylinder);
        Ok(())
    }

    /// Stages a scale for the next `add_point`/`end_cylinder`.
    ///
    /// Non-positive or non-finite values clear the staged scale.
    pub fn set_scale(&mut self, value: f64) {
        if is_valid_scale(value) {
            self.state.scale = Some(value);
        } else {
            warn!(value, "ignoring non-positive scale");
            self.state.scale = None;
        }
    }

    /// Saves the pen state.
    pub fn push_state(&mut self) {
        self.stack.push(self.state);
        debug!(depth = self.stack.len(), "state pushed");
    }

    /// Restores the most recently saved pen state.
    ///
    /// # Errors
    ///
    /// Returns [`TurtleError::StateStackUnderflow`] if nothing was saved.
    pub fn pop_state(&mut self) -> Result<()> {
        self.state = self.stack.pop().ok_or(TurtleError::StateStackUnderflow)?;
        debug!(depth = self.stack.len(), "state popped");
        Ok(())
    }

    /// Samples every recorded cylinder at resolution `(n, m)` into a new
    /// mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is invalid.
    pub fn get_mesh(&self, n: usize, m: usize) -> Result<TriangleMesh> {
        self.get_mesh_with(
            SamplingParams::default()
                .with_path_segments(n)
                .with_section_segments(m),
        )
    }

    /// Samples every recorded cylinder with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is invalid or a cap cannot be
    /// triangulated.
    pub fn get_mesh_with(&self, params: SamplingParams) -> Result<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        for cylinder in &self.cylinders {
            TessellateCylinder::new(cylinder, params).execute(&self.shapes, &mut mesh)?;
        }
        info!(
            cylinders = self.cylinders.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "mesh built"
        );
        Ok(mesh)
    }

    /// Adds a cross-section shape to the library.
    ///
    /// With `tangents` the shape is a Bezier curve through `points` with the
    /// given `(incoming, outgoing)` handle offsets; without, handles are
    /// derived from neighboring points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given or the tangent
    /// count differs from the point count.
    pub fn add_cross_section(
        &mut self,
        points: Vec<Vector3>,
        tangents: Option<Vec<(Vector3, Vector3)>>,
        closed: bool,
    ) -> Result<ShapeId> {
        let shape = match tangents {
            Some(tangents) => {
                Interpolator::Bezier(BezierInterpolator::with_tangents(points, tangents, closed)?)
            }
            None => Interpolator::bezier(points, closed)?,
        };
        let id = self.shapes.add(shape);
        debug!(shapes = self.shapes.len(), "cross-section added");
        Ok(id)
    }

    /// Selects the library shape for subsequent scaled segments.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::ShapeNotFound`] for an unknown id.
    pub fn set_cross_section(&mut self, id: ShapeId) -> Result<()> {
        if !self.shapes.contains(id) {
            return Err(LibraryError::ShapeNotFound.into());
        }
        self.state.current_cs = id;
        Ok(())
    }

    /// Selects the carrier variant used when segments close.
    pub fn set_carrier_mode(&mut self, mode: CarrierMode) {
        self.state.carrier_mode = mode;
    }

    /// Selects the cross-section variant for segments opened afterwards.
    pub fn set_cross_section_mode(&mut self, mode: CrossSectionMode) {
        self.state.cross_section_mode = mode;
    }

    /// Current pen frame.
    #[must_use]
    pub fn frame(&self) -> &Matrix4 {
        &self.state.frame
    }

    /// Current pen state.
    #[must_use]
    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    /// Recorded cylinders, in recording order.
    #[must_use]
    pub fn cylinders(&self) -> &[GeneralisedCylinder] {
        &self.cylinders
    }

    /// The cross-section library.
    #[must_use]
    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }

    /// Id of the built-in circular shape.
    #[must_use]
    pub fn default_shape(&self) -> ShapeId {
        self.default_shape
    }

    /// Number of saved states.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` between `begin_cylinder` and `end_cylinder`.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.segment.is_some()
    }

    /// Discards every recorded cylinder, the open segment and the state
    /// stack, and restores the initial pen state. Library shapes are kept.
    pub fn reset(&mut self) {
        debug!(cylinders = self.cylinders.len(), "turtle reset");
        self.cylinders.clear();
        self.segment = None;
        self.stack.clear();
        self.state = initial_state(&self.config, self.default_shape);
    }
}

fn initial_state(config: &TurtleConfig, shape: ShapeId) -> TurtleState {
    TurtleState {
        frame: Matrix4::identity(),
        carrier_mode: config.carrier_mode,
        cross_section_mode: config.cross_section_mode,
        current_cs: shape,
        scale: config.initial_scale.filter(|s| is_valid_scale(*s)),
    }
}

fn is_valid_scale(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::error::GencylError;
    use crate::geometry::carrier::Carrier;
    use crate::geometry::cross_section::CrossSection;
    use crate::geometry::interpolator::Interpolate;
    use crate::math::frame::translation;
    use approx::assert_relative_eq;

    fn ring_radius(turtle: &Turtle, cylinder: usize, v: f64) -> f64 {
        let cyl = &turtle.cylinders()[cylinder];
        let sample = cyl.evaluate(turtle.shapes(), 0.0, v).unwrap();
        let centre = cyl.carrier().orient(v, 0.0, 0.0);
        (sample.position - centre).norm()
    }

    #[test]
    fn pen_moves_along_its_forward_axis() {
        let mut t = Turtle::new().unwrap();
        t.move_forward(2.0);
        assert_relative_eq!(translation(t.frame()), Vector3::new(0.0, 0.0, 2.0));
        t.yaw(FRAC_PI_2);
        t.move_forward(1.0);
        assert_relative_eq!(translation(t.frame()), Vector3::new(1.0, 0.0, 2.0), epsilon = 1e-12);
        t.pitch(FRAC_PI_2);
        t.move_forward(1.0);
        assert_relative_eq!(translation(t.frame()), Vector3::new(1.0, -1.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn roll_keeps_forward_axis() {
        let mut t = Turtle::new().unwrap();
        t.roll(0.7);
        t.move_forward(1.0);
        assert_relative_eq!(translation(t.frame()), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn push_pop_restores_frame_exactly() {
        let mut t = Turtle::new().unwrap();
        t.yaw(0.3);
        t.move_forward(1.5);
        let before = *t.state();
        t.push_state();
        t.pitch(1.1);
        t.move_forward(4.0);
        t.roll(-0.2);
        t.set_scale(3.0);
        t.pop_state().unwrap();
        assert_eq!(*t.state(), before);
        assert_eq!(t.stack_depth(), 0);
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut t = Turtle::new().unwrap();
        assert!(matches!(
            t.pop_state(),
            Err(GencylError::Turtle(TurtleError::StateStackUnderflow))
        ));
    }

    #[test]
    fn segment_operations_need_an_open_cylinder() {
        let mut t = Turtle::new().unwrap();
        assert!(matches!(
            t.add_point(),
            Err(GencylError::Turtle(TurtleError::NoOpenCylinder))
        ));
        assert!(t.end_cylinder().is_err());
        assert!(t.cylinders().is_empty());
    }

    #[test]
    fn staged_scales_become_breakpoints() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.set_scale(2.0);
        t.add_point().unwrap();
        t.move_forward(1.0);
        t.set_scale(1.0);
        t.end_cylinder().unwrap();

        let cyl = &t.cylinders()[0];
        assert_eq!(cyl.frames().len(), 3);
        // The fresh pen's staged 1.0 seeds the first breakpoint.
        assert_eq!(
            cyl.domains(),
            &[
                DomainBreakpoint::new(0, 0),
                DomainBreakpoint::new(1, 1),
                DomainBreakpoint::new(2, 2),
            ]
        );
        let CrossSectionCurve::Scaled(cs) = cyl.cross_section() else {
            panic!("expected a scaled cross-section");
        };
        assert_eq!(cs.scale().control_points(), &[1.0, 2.0, 1.0]);
        assert_relative_eq!(ring_radius(&t, 0, 0.0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(ring_radius(&t, 0, 1.0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(ring_radius(&t, 0, 2.0), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn unscaled_segment_duplicates_its_breakpoint() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();

        let cyl = &t.cylinders()[0];
        assert_eq!(
            cyl.domains(),
            &[DomainBreakpoint::new(0, 0), DomainBreakpoint::new(1, 1)]
        );
        for v in [0.0, 0.25, 0.5, 1.0] {
            assert_relative_eq!(ring_radius(&t, 0, v), 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn staged_scale_is_consumed_once() {
        let mut t = Turtle::new().unwrap();
        t.set_scale(2.0);
        t.begin_cylinder();
        assert_eq!(t.state().scale, None);
        t.add_point().unwrap();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        let cyl = &t.cylinders()[0];
        assert_eq!(cyl.domains().len(), 2);
        assert_relative_eq!(ring_radius(&t, 0, 2.0), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn fixed_mode_uses_a_circle() {
        let config = TurtleConfig::default()
            .with_cross_section_mode(CrossSectionMode::Fixed)
            .with_fixed_radius(0.25);
        let mut t = Turtle::with_config(config).unwrap();
        t.set_scale(5.0);
        t.begin_cylinder();
        t.move_forward(2.0);
        t.end_cylinder().unwrap();

        let cyl = &t.cylinders()[0];
        assert!(cyl.domains().is_empty());
        assert_eq!(cyl.cross_section().mode(), CrossSectionMode::Fixed);
        assert_relative_eq!(ring_radius(&t, 0, 0.5), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn carrier_mode_is_honoured() {
        let mut t = Turtle::new().unwrap();
        t.set_carrier_mode(CarrierMode::Linear);
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        t.set_carrier_mode(CarrierMode::Bezier);
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        assert_eq!(t.cylinders()[0].carrier().mode(), CarrierMode::Linear);
        assert_eq!(t.cylinders()[1].carrier().mode(), CarrierMode::Bezier);
    }

    #[test]
    fn branches_start_from_saved_frame() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        for angle in [0.5, -0.5] {
            t.push_state();
            t.begin_cylinder();
            t.yaw(angle);
            t.move_forward(1.0);
            t.end_cylinder().unwrap();
            t.pop_state().unwrap();
        }
        assert_eq!(t.cylinders().len(), 3);
        let start = t.cylinders()[0].frames().last().unwrap();
        for cyl in &t.cylinders()[1..] {
            assert_eq!(cyl.frames()[0], *start);
        }
        assert_relative_eq!(translation(t.frame()), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn mesh_is_deterministic() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.yaw(0.4);
        t.set_scale(1.5);
        t.add_point().unwrap();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();

        let a = t.get_mesh(8, 6).unwrap();
        let b = t.get_mesh(8, 6).unwrap();
        assert_eq!(a, b);
        assert!(a.triangle_count() >= 8 * 6 * 2);
        assert_eq!(a.vertex_count() % 7, 0);
    }

    #[test]
    fn mesh_concatenates_cylinders() {
        let mut t = Turtle::new().unwrap();
        for _ in 0..2 {
            t.begin_cylinder();
            t.move_forward(1.0);
            t.end_cylinder().unwrap();
        }
        let mut single = TriangleMesh::new();
        t.cylinders()[0].create_mesh(t.shapes(), &mut single, 4, 5).unwrap();
        let mesh = t.get_mesh(4, 5).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * single.vertex_count());
        assert_eq!(mesh.triangle_count(), 2 * single.triangle_count());
    }

    #[test]
    fn capped_mesh_has_more_triangles() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        let open = t.get_mesh(4, 8).unwrap();
        let capped = t
            .get_mesh_with(
                SamplingParams::default()
                    .with_path_segments(4)
                    .with_section_segments(8)
                    .with_caps(true),
            )
            .unwrap();
        assert!(capped.triangle_count() > open.triangle_count());
    }

    #[test]
    fn custom_cross_section_is_used() {
        let mut t = Turtle::new().unwrap();
        let square = vec![
            Vector3::new(0.2, 0.0, 0.0),
            Vector3::new(0.0, 0.2, 0.0),
            Vector3::new(-0.2, 0.0, 0.0),
            Vector3::new(0.0, -0.2, 0.0),
        ];
        let id = t.add_cross_section(square, None, true).unwrap();
        assert_eq!(t.shapes().len(), 2);
        t.set_cross_section(id).unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();

        let CrossSectionCurve::Scaled(cs) = t.cylinders()[0].cross_section() else {
            panic!("expected a scaled cross-section");
        };
        assert_eq!(cs.shape(), id);
        let ring = cs.cross_section(t.shapes(), 0.0, 4).unwrap();
        assert_relative_eq!(ring[1], Vector3::new(0.0, 0.2, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn cross_section_tangent_count_is_checked() {
        let mut t = Turtle::new().unwrap();
        let points = vec![Vector3::x(), Vector3::y(), -Vector3::x()];
        let tangents = vec![(Vector3::y(), Vector3::y())];
        assert!(t.add_cross_section(points, Some(tangents), true).is_err());
        assert_eq!(t.shapes().len(), 1);
    }

    #[test]
    fn unknown_cross_section_is_rejected() {
        let mut t = Turtle::new().unwrap();
        let before = t.state().current_cs;
        assert!(matches!(
            t.set_cross_section(ShapeId::default()),
            Err(GencylError::Library(LibraryError::ShapeNotFound))
        ));
        assert_eq!(t.state().current_cs, before);
    }

    #[test]
    fn reset_discards_recording_but_keeps_library() {
        let mut t = Turtle::new().unwrap();
        let id = t
            .add_cross_section(vec![Vector3::x(), Vector3::y(), -Vector3::x()], None, true)
            .unwrap();
        t.push_state();
        t.move_forward(2.0);
        t.begin_cylinder();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();
        t.begin_cylinder();
        t.reset();

        assert!(t.cylinders().is_empty());
        assert_eq!(t.stack_depth(), 0);
        assert!(!t.is_recording());
        assert_eq!(*t.frame(), Matrix4::identity());
        assert_eq!(t.state().scale, Some(1.0));
        assert!(t.shapes().contains(id));
        assert_eq!(t.get_mesh(4, 4).unwrap().vertex_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(Turtle::with_config(TurtleConfig::default().with_fixed_radius(0.0)).is_err());
    }

    #[test]
    fn invalid_initial_scale_falls_back_to_unit() {
        let ring_radius = |config: TurtleConfig| {
            let mut t = Turtle::with_config(config).unwrap();
            t.begin_cylinder();
            t.move_forward(1.0);
            t.end_cylinder().unwrap();
            let CrossSectionCurve::Scaled(cs) = t.cylinders()[0].cross_section() else {
                panic!("expected a scaled cross-section");
            };
            cs.cross_section(t.shapes(), 0.0, 4).unwrap()[0].norm()
        };
        let unit = ring_radius(TurtleConfig::default());
        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let config = TurtleConfig {
                initial_scale: Some(bad),
                ..TurtleConfig::default()
            };
            assert_eq!(Turtle::with_config(config).unwrap().state().scale, None);
            assert_relative_eq!(ring_radius(config), unit, epsilon = 1e-12);
        }
    }

    #[test]
    fn carrier_passes_through_recorded_positions() {
        let mut t = Turtle::new().unwrap();
        t.begin_cylinder();
        t.move_forward(1.0);
        t.yaw(0.6);
        t.add_point().unwrap();
        t.move_forward(1.0);
        t.pitch(-0.4);
        t.add_point().unwrap();
        t.move_forward(1.0);
        t.end_cylinder().unwrap();

        let cyl = &t.cylinders()[0];
        assert_relative_eq!(cyl.carrier().domain().t_max, 3.0);
        for (i, frame) in cyl.frames().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let v = i as f64;
            let origin = cyl.carrier().orient(v, 0.0, 0.0);
            assert_relative_eq!(origin, translation(frame), epsilon = 1e-9);
        }
    }
}
