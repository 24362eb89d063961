//! Terrain: a procedurally generated field of blocks culled per frame.
//!
//! # Invariants
//! - Heights are generated once and never change.
//! - Every height lies in `0..=max_height`; zero cells are never drawn.
//! - Culling runs on world-space cell positions, before any bob offset.
//!
//! Culling is a linear scan over the grid with a distance test followed by a
//! view-cone test. There is no spatial index.

mod cull;
mod field;
mod render;

pub use cull::{CullSettings, Visibility, classify, is_visible};
pub use field::{
    MAX_CELLS, MAX_HEIGHT_LIMIT, TerrainConfig, TerrainError, TerrainField, sample_height,
};
pub use render::VisibleCell;

pub fn crate_info() -> &'static str {
    "blockfield-terrain v0.1.0"
}
