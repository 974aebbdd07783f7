use crate::error::Result;
use crate::geometry::interpolator::{
    Interpolate, Interpolator, InterpolatorDomain, InterpolatorKind,
};
use crate::math::frame::{translation, FrameAngles};
use crate::math::{Matrix3, Matrix4, Vector3};

/// Reference frames decomposed into one translation and three angle
/// interpolators.
///
/// Interpolating the decomposed angles instead of raw matrix entries keeps
/// the reconstructed basis orthonormal at every parameter.
#[derive(Debug, Clone)]
pub struct FrameTrack {
    kind: InterpolatorKind,
    translation: Interpolator<Vector3>,
    alpha: Interpolator<f64>,
    beta: Interpolator<f64>,
    gamma: Interpolator<f64>,
}

impl FrameTrack {
    /// Decomposes `frames` and builds interpolators of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given.
    pub fn new(kind: InterpolatorKind, frames: &[Matrix4]) -> Result<Self> {
        let (origins, alphas, betas, gammas) = decompose(frames);
        Ok(Self {
            kind,
            translation: Interpolator::of_kind(kind, origins, false)?,
            alpha: Interpolator::of_kind(kind, alphas, false)?,
            beta: Interpolator::of_kind(kind, betas, false)?,
            gamma: Interpolator::of_kind(kind, gammas, false)?,
        })
    }

    /// Rebuilds every interpolator from a new frame buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two frames are given; the track is
    /// left unchanged in that case.
    pub fn set_frames(&mut self, frames: &[Matrix4]) -> Result<()> {
        *self = Self::new(self.kind, frames)?;
        Ok(())
    }

    /// The translation interpolator.
    #[must_use]
    pub fn translation(&self) -> &Interpolator<Vector3> {
        &self.translation
    }

    /// Parameter domain, shared by all four interpolators.
    #[must_use]
    pub fn domain(&self) -> InterpolatorDomain {
        self.translation.domain()
    }

    /// Interpolated angles at `v`.
    #[must_use]
    pub fn angles(&self, v: f64) -> FrameAngles {
        FrameAngles::new(
            self.alpha.position(v),
            self.beta.position(v),
            self.gamma.position(v),
        )
    }

    /// Orthonormal basis `[right | up | forward]` at `v`.
    #[must_use]
    pub fn basis(&self, v: f64) -> Matrix3 {
        self.angles(v).basis()
    }

    /// Derivative of [`basis`](Self::basis) with respect to `v`.
    #[must_use]
    pub fn basis_derivative(&self, v: f64) -> Matrix3 {
        let [da, db, dc] = self.angles(v).basis_partials();
        da * self.alpha.derivative(v) + db * self.beta.derivative(v) + dc * self.gamma.derivative(v)
    }

    pub(crate) fn orient(&self, v: f64, x: f64, y: f64) -> Vector3 {
        let basis = self.basis(v);
        self.translation.position(v) + basis.column(0) * x + basis.column(1) * y
    }

    pub(crate) fn d_orient_dv(&self, v: f64, x: f64, y: f64) -> Vector3 {
        let d_basis = self.basis_derivative(v);
        self.translation.derivative(v) + d_basis.column(0) * x + d_basis.column(1) * y
    }

    pub(crate) fn d_orient_dx(&self, v: f64) -> Vector3 {
        self.basis(v).column(0).into_owned()
    }

    pub(crate) fn d_orient_dy(&self, v: f64) -> Vector3 {
        self.basis(v).column(1).into_owned()
    }
}

/// Splits frames into origins and unwrapped yaw/pitch/roll sequences.
///
/// Each frame after the first takes whichever equivalent angle triple is
/// nearest its predecessor, so pitching through the vertical stays a pure
/// pitch.
fn decompose(frames: &[Matrix4]) -> (Vec<Vector3>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut origins = Vec::with_capacity(frames.len());
    let mut alphas = Vec::with_capacity(frames.len());
    let mut betas = Vec::with_capacity(frames.len());
    let mut gammas = Vec::with_capacity(frames.len());

    let mut previous: Option<FrameAngles> = None;
    for frame in frames {
        let raw = FrameAngles::from_matrix(frame);
        let angles = match &previous {
            Some(prev) => raw.nearest_to(prev),
            None => raw,
        };
        origins.push(translation(frame));
        alphas.push(angles.alpha);
        betas.push(angles.beta);
        gammas.push(angles.gamma);
        previous = Some(angles);
    }

    (origins, alphas, betas, gammas)
}
