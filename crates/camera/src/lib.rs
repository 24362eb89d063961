//! First-person camera: eye/at/up state, movement, panning, derived matrices.
//!
//! # Invariants
//! - `at - eye` is never zero.
//! - Movement translates eye and at together; panning moves only `at`.
//! - Matrices are recomputed explicitly, never updated incrementally.

mod camera;
mod command;

pub use camera::{Camera, CameraConfig, CameraError};
pub use command::{CameraCommand, DRAG_PAN_SCALE, parse_script};

pub fn crate_info() -> &'static str {
    "blockfield-camera v0.1.0"
}
