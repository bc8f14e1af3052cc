//! Umbrella crate for the `pixel-resample` workspace.
//!
//! Re-exports the image buffer and transform algebra, the interpolation
//! toolkit, and the resampling pipeline.

pub use px_core::*;
pub use px_interp::*;
pub use px_resample::*;
