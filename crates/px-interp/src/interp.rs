use px_core::Error;

use crate::cast::{Cast1D, Cast2D};
use crate::coverage::{Coverage, Transition};
use crate::kernel::Algorithm;
use crate::pbcc::PbccMode;
use crate::tar::TransitionRestriction;

/// Frozen interpolation configuration: kernel, optional corrections, and the
/// target-to-source cast, together with the dimensions they were derived
/// for.
///
/// Built with `init_resize` (axis-aligned scaling) or `init_transformation`
/// (affine mapping), then refined with `init_functions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Interp {
    algorithm: Algorithm,
    pbcc: PbccMode,
    tar: Option<TransitionRestriction>,
    cast: Cast2D,
    orig_width: usize,
    orig_height: usize,
    target_width: usize,
    target_height: usize,
}

impl Interp {
    /// Axis-aligned resize with the centre-aligned "proper" cast on both
    /// axes.
    pub fn init_resize(
        orig_width: usize,
        orig_height: usize,
        target_width: usize,
        target_height: usize,
    ) -> Result<Self, Error> {
        let cast_x = Cast1D::proper(orig_width, target_width);
        let cast_y = Cast1D::proper(orig_height, target_height);
        Self::init_resize_with_casts(
            orig_width,
            orig_height,
            target_width,
            target_height,
            cast_x,
            cast_y,
        )
    }

    /// Axis-aligned resize with caller-chosen per-axis casts.
    pub fn init_resize_with_casts(
        orig_width: usize,
        orig_height: usize,
        target_width: usize,
        target_height: usize,
        cast_x: Cast1D,
        cast_y: Cast1D,
    ) -> Result<Self, Error> {
        Self::with_cast(
            orig_width,
            orig_height,
            target_width,
            target_height,
            Cast2D::per_axis(cast_x, cast_y),
        )
    }

    /// Affine resampling through an arbitrary 2D cast (rotation, combined
    /// scale and rotation).
    pub fn init_transformation(
        orig_width: usize,
        orig_height: usize,
        target_width: usize,
        target_height: usize,
        cast: Cast2D,
    ) -> Result<Self, Error> {
        Self::with_cast(orig_width, orig_height, target_width, target_height, cast)
    }

    fn with_cast(
        orig_width: usize,
        orig_height: usize,
        target_width: usize,
        target_height: usize,
        cast: Cast2D,
    ) -> Result<Self, Error> {
        if orig_width == 0 || orig_height == 0 || target_width == 0 || target_height == 0 {
            return Err(Error::ZeroDimension);
        }
        Ok(Self {
            algorithm: Algorithm::default(),
            pbcc: PbccMode::default(),
            tar: None,
            cast,
            orig_width,
            orig_height,
            target_width,
            target_height,
        })
    }

    /// Selects the kernel, the coefficient correction, and (when
    /// `transition_reduction` is given, in target pixels) the transition
    /// band restriction.
    pub fn init_functions(
        &mut self,
        algorithm: Algorithm,
        pbcc: PbccMode,
        transition_reduction: Option<f32>,
    ) -> &mut Self {
        self.algorithm = algorithm;
        self.pbcc = pbcc;
        self.tar = transition_reduction.map(|tau| {
            TransitionRestriction::new(
                tau,
                self.orig_width,
                self.orig_height,
                self.target_width,
                self.target_height,
            )
        });
        self
    }

    /// Coverage mask for matrix casts; `None` for plain axis-aligned
    /// resizes, which always cover the whole target.
    pub fn coverage(&self, transition: Transition) -> Option<Coverage> {
        self.cast
            .inverse_matrix()
            .map(|inverse| Coverage::new(inverse, self.orig_width, self.orig_height, transition))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn pbcc(&self) -> PbccMode {
        self.pbcc
    }

    pub fn tar(&self) -> Option<&TransitionRestriction> {
        self.tar.as_ref()
    }

    pub fn cast(&self) -> &Cast2D {
        &self.cast
    }

    pub fn orig_width(&self) -> usize {
        self.orig_width
    }

    pub fn orig_height(&self) -> usize {
        self.orig_height
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }
}
