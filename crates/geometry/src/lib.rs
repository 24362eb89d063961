//! Geometry provider: triangle lists for the built-in solids.
//!
//! # Invariants
//! - Tables are built once by [`GeometryLibrary::new`] and never mutated by rendering.
//! - A solid either supplies UVs and normals for every vertex or not at all.

mod library;
mod mesh;
pub mod shapes;
mod solid;

pub use library::GeometryLibrary;
pub use mesh::{Geometry, GeometryError};
pub use solid::SolidType;

pub fn crate_info() -> &'static str {
    "blockfield-geometry v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("geometry"));
    }
}
