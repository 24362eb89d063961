//! Shared value types: colors, model transforms, viewport size.
//!
//! # Invariants
//! - All types here are plain values; copying one never aliases another.
//! - Transforms compose by post-multiplication.

mod color;
mod transform;
mod viewport;

pub use color::{Color, ColorError};
pub use transform::Transform;
pub use viewport::Viewport;

pub fn crate_info() -> &'static str {
    "blockfield-common v0.1.0"
}
