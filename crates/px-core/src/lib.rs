//! Foundational primitives for the pixel-resample engine.
//!
//! ## Sample Buffers
//! Images are interleaved `(x, y, channel)` sample grids. Reads clamp every
//! index (edge extension), writes outside the buffer are dropped; both
//! policies let a 2x2 interpolation window sit on the image border without
//! special casing.
//!
//! ## Transformations
//! `Affine2` is a six-scalar 2D affine map; `TransformSetup` assembles a
//! forward/inverse pair plus the enclosing target canvas from a declarative
//! description (expansion, translation, scaling, rotation).

mod affine;
mod error;
mod geom;
mod image;
mod transform;

pub use affine::Affine2;
pub use error::Error;
pub use geom::{Point2f, Vec2f};
pub use image::Image;
pub use transform::{TransformPair, TransformSetup};
