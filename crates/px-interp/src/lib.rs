//! Casting functions and interpolation kernels for the pixel-resample
//! engine.
//!
//! ## Coordinate Casts
//! A cast maps a target pixel index to a fractional source coordinate:
//! per-axis ("proper" centre-aligned or "fast" edge-to-edge, optionally
//! buffered), or through an inverse affine matrix with half-pixel
//! correction.
//!
//! ## Kernels
//! All kernels are two-point in 1D; the 2x2 kernel is the outer product of
//! the per-axis weights. On top of the plain kernel sit two optional
//! reshaping stages: transition area restriction remaps the fractional
//! offsets before the kernel runs, proximity-based coefficient correction
//! reweights the 2x2 matrix after it.

mod cast;
mod coverage;
mod interp;
mod kernel;
mod pbcc;
mod tar;

pub use cast::{Cast1D, Cast2D};
pub use coverage::{Coverage, Transition};
pub use interp::Interp;
pub use kernel::{Algorithm, split};
pub use pbcc::{PbccMode, correct as pbcc_correct};
pub use tar::TransitionRestriction;
