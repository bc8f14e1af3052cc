//! The pixel-resample resampling pipeline.
//!
//! A `Resizer` couples a source buffer, a target buffer, and an
//! interpolation setup, validates them at `optimize` time, and then executes
//! the per-pixel pipeline serially or partitioned across target columns.
//! `bake` optionally precomputes each target pixel's four source taps so
//! repeated resizes only replay the weighted accumulation.

mod cache;
mod resizer;

pub use cache::{CoefficientCache, Tap};
pub use resizer::{Execution, Resizer};
