//! Scene nodes and the draw backend seam.
//!
//! A [`SceneNode`] is a solid with a model matrix, a color and a material.
//! Nodes are built fresh every frame and submitted through a [`FramePass`]
//! to any [`DrawBackend`]. The crate ships one backend, [`RecordingBackend`],
//! which keeps draw calls in memory.
//!
//! # Invariants
//! - `begin_frame` is called once before any draw of that frame.
//! - A node's model matrix is a value copy of its parent's at construction.
//! - Solids without texture coordinates are only ever drawn in flat color.
//! - Inconsistent geometry is never handed to the backend.

mod backend;
mod clock;
mod light;
mod material;
mod node;
mod pass;
mod recording;

pub use backend::{BackendError, DrawBackend, DrawCall, FrameUniforms};
pub use clock::{FrameClock, FrameTime};
pub use light::PointLight;
pub use material::{MaterialSelector, UnknownMaterial};
pub use node::{RenderError, SceneNode};
pub use pass::{FramePass, PassStats};
pub use recording::{DrawRecord, RecordingBackend};

pub fn crate_info() -> &'static str {
    "blockfield-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
