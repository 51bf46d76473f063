//! Unframed bit-packed value types shared by many record kinds.
//!
//! None of these carry a length header of their own: the enclosing record's
//! frame accounts for them. Their layouts are context-sensitive (the alpha
//! channel appears only when [`Context::transparent`](crate::coder::Context)
//! is set) and mix sub-byte fields with explicit byte-alignment boundaries.

mod bounds;
mod color;
mod color_transform;
mod coord_transform;

pub use bounds::Bounds;
pub use color::Color;
pub use color_transform::ColorTransform;
pub use coord_transform::CoordTransform;
