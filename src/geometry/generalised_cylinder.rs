use crate::error::{GeometryError, Result};
use crate::geometry::carrier::{Carrier, CarrierCurve};
use crate::geometry::cross_section::{CrossSection, CrossSectionCurve};
use crate::geometry::interpolator::{Interpolate, InterpolatorDomain};
use crate::geometry::shape_library::ShapeLibrary;
use crate::math::{Matrix4, Vector3, TOLERANCE};
use crate::tessellation::{MeshBuilder, SamplingParams, TessellateCylinder};

/// Correspondence between a recorded frame and an entry of the scale array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainBreakpoint {
    /// Index into the frame history (a carrier parameter).
    pub frame_index: usize,
    /// Index into the scale array (a cross-section parameter).
    pub scale_index: usize,
}

impl DomainBreakpoint {
    /// Creates a new breakpoint.
    #[must_use]
    pub fn new(frame_index: usize, scale_index: usize) -> Self {
        Self {
            frame_index,
            scale_index,
        }
    }
}

/// Position and normal of the swept surface at one `(u, v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// World-space position.
    pub position: Vector3,
    /// Unit normal, or the raw cross product when the tangents degenerate.
    pub normal: Vector3,
    /// Partial derivative along the cross-section parameter.
    pub d_u: Vector3,
    /// Partial derivative along the path parameter.
    pub d_v: Vector3,
}

/// A cross-section swept along a carrier curve.
///
/// Immutable after construction. The breakpoint list maps carrier
/// parameters (frame indices) to cross-section parameters (scale
/// indices); between breakpoints the map is linear.
#[derive(Debug, Clone)]
pub struct GeneralisedCylinder {
    carrier: CarrierCurve,
    cross_section: CrossSectionCurve,
    frames: Vec<Matrix4>,
    domains: Vec<DomainBreakpoint>,
}

impl GeneralisedCylinder {
    /// Creates a new generalised cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame history does not match the carrier,
    /// if the breakpoints are not monotonically non-decreasing, or if a
    /// breakpoint refers past the frame history or the scale array.
    pub fn new(
        carrier: CarrierCurve,
        cross_section: CrossSectionCurve,
        frames: Vec<Matrix4>,
        domains: Vec<DomainBreakpoint>,
    ) -> Result<Self> {
        let expected = carrier.interpolator().num_control_points();
        if frames.len() != expected {
            return Err(GeometryError::LengthMismatch {
                what: "frame history",
                expected,
                actual: frames.len(),
            }
            .into());
        }

        for pair in domains.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.frame_index < a.frame_index || b.scale_index < a.scale_index {
                return Err(GeometryError::Degenerate(
                    "domain breakpoints must be non-decreasing".into(),
                )
                .into());
            }
        }

        if let Some(last) = domains.last() {
            if last.frame_index >= frames.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index: last.frame_index,
                    len: frames.len(),
                }
                .into());
            }
            if let CrossSectionCurve::Scaled(cs) = &cross_section {
                let scales = cs.scale().num_control_points();
                if last.scale_index >= scales {
                    return Err(GeometryError::IndexOutOfRange {
                        index: last.scale_index,
                        len: scales,
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            carrier,
            cross_section,
            frames,
            domains,
        })
    }

    /// The carrier curve.
    #[must_use]
    pub fn carrier(&self) -> &CarrierCurve {
        &self.carrier
    }

    /// The cross-section.
    #[must_use]
    pub fn cross_section(&self) -> &CrossSectionCurve {
        &self.cross_section
    }

    /// The frame history the carrier was built from.
    #[must_use]
    pub fn frames(&self) -> &[Matrix4] {
        &self.frames
    }

    /// The domain breakpoints.
    #[must_use]
    pub fn domains(&self) -> &[DomainBreakpoint] {
        &self.domains
    }

    /// Path parameter domain.
    #[must_use]
    pub fn domain_v(&self) -> InterpolatorDomain {
        self.carrier.domain()
    }

    /// Maps a carrier parameter to the cross-section parameter, returning
    /// the mapped value and its derivative with respect to `v`.
    ///
    /// Outside the breakpoint range the first/last scale index is held.
    /// Without breakpoints the carrier parameter is passed through.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn section_parameter(&self, v: f64) -> (f64, f64) {
        let (Some(first), Some(last)) = (self.domains.first(), self.domains.last()) else {
            return (v, 1.0);
        };
        if v <= first.frame_index as f64 {
            return (first.scale_index as f64, 0.0);
        }
        if v >= last.frame_index as f64 {
            return (last.scale_index as f64, 0.0);
        }
        for pair in self.domains.windows(2) {
            let (f0, f1) = (pair[0].frame_index as f64, pair[1].frame_index as f64);
            if v > f1 || f1 - f0 < TOLERANCE {
                continue;
            }
            let (s0, s1) = (pair[0].scale_index as f64, pair[1].scale_index as f64);
            let slope = (s1 - s0) / (f1 - f0);
            return (s0 + slope * (v - f0), slope);
        }
        (last.scale_index as f64, 0.0)
    }

    /// Path parameters of the sample rings for roughly `n` segments.
    ///
    /// Every breakpoint inside the domain gets its own ring; the `n`
    /// segments are distributed over the spans between breakpoints in
    /// proportion to their length, with at least one segment per span.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn v_samples(&self, n: usize) -> Vec<f64> {
        let domain = self.domain_v();
        let n = n.max(1);

        let mut knots = vec![domain.t_min];
        for bp in &self.domains {
            let f = bp.frame_index as f64;
            if f > domain.t_min + TOLERANCE && f < domain.t_max - TOLERANCE {
                knots.push(f);
            }
        }
        knots.push(domain.t_max);
        knots.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

        let total = domain.span();
        let mut samples = Vec::with_capacity(n + knots.len());
        for span in knots.windows(2) {
            let (a, b) = (span[0], span[1]);
            let steps = if total > TOLERANCE {
                ((n as f64 * (b - a) / total).round() as usize).max(1)
            } else {
                1
            };
            for i in 0..steps {
                samples.push(a + (b - a) * i as f64 / steps as f64);
            }
        }
        samples.push(domain.t_max);
        samples
    }

    /// Evaluates the swept surface at cross-section parameter `u` and path
    /// parameter `v`.
    ///
    /// The normal is `dS/du x dS/dv`, normalized unless its length is
    /// below tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the cross-section's library shape is missing.
    pub fn evaluate(&self, shapes: &ShapeLibrary, u: f64, v: f64) -> Result<SurfaceSample> {
        let (w, dw) = self.section_parameter(v);
        let local = self.cross_section.position(shapes, u, w)?;
        let local_du = self.cross_section.derivative_u(shapes, u, w)?;
        let local_dw = self.cross_section.derivative_v(shapes, u, w)?;

        let (x, y) = (local.x, local.y);
        let along_x = self.carrier.d_orient_dx(v, x, y);
        let along_y = self.carrier.d_orient_dy(v, x, y);

        let position = self.carrier.orient(v, x, y);
        let d_u = along_x * local_du.x + along_y * local_du.y;
        let d_v = self.carrier.d_orient_dv(v, x, y)
            + along_x * (local_dw.x * dw)
            + along_y * (local_dw.y * dw);

        let cross = d_u.cross(&d_v);
        let len = cross.norm();
        let normal = if len > TOLERANCE { cross / len } else { cross };

        Ok(SurfaceSample {
            position,
            normal,
            d_u,
            d_v,
        })
    }

    /// Samples the surface on an `n x m` grid into `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution is invalid or the cross-section's
    /// library shape is missing.
    pub fn create_mesh<B: MeshBuilder>(
        &self,
        shapes: &ShapeLibrary,
        builder: &mut B,
        n: usize,
        m: usize,
    ) -> Result<()> {
        let params = SamplingParams::default()
            .with_path_segments(n)
            .with_section_segments(m);
        TessellateCylinder::new(self, params).execute(shapes, builder)
    }
}
