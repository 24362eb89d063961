use crate::mesh::Geometry;
use crate::shapes;
use crate::solid::SolidType;

/// Immutable table of triangle lists, one per [`SolidType`].
///
/// Built once up front and handed to renderers by reference. Nothing is
/// computed lazily and nothing is global.
#[derive(Debug, Clone)]
pub struct GeometryLibrary {
    tables: [Geometry; SolidType::COUNT],
}

impl Default for GeometryLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryLibrary {
    /// Build the tables for every built-in solid.
    pub fn new() -> Self {
        let tables = SolidType::ALL.map(|solid| match solid {
            SolidType::Cube => shapes::cube(),
            SolidType::Pyramid4 => shapes::pyramid4(),
            SolidType::Octahedron => shapes::octahedron(),
            SolidType::Icosahedron => shapes::icosahedron(),
            SolidType::Sphere => shapes::sphere(),
        });
        let library = Self { tables };
        tracing::debug!(
            triangles = library.total_triangles(),
            "geometry library built"
        );
        library
    }

    pub fn get(&self, solid: SolidType) -> &Geometry {
        &self.tables[solid.index()]
    }

    /// Swap in a custom mesh for a solid, returning the previous one.
    ///
    /// The replacement is validated at render time, not here.
    pub fn replace(&mut self, solid: SolidType, geometry: Geometry) -> Geometry {
        std::mem::replace(&mut self.tables[solid.index()], geometry)
    }

    pub fn total_triangles(&self) -> usize {
        self.tables.iter().map(Geometry::triangle_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn every_builtin_table_is_valid() {
        let library = GeometryLibrary::new();
        for solid in SolidType::ALL {
            assert_eq!(library.get(solid).validate(), Ok(()), "{solid}");
        }
    }

    #[test]
    fn builtin_capabilities_match_solid_flags() {
        let library = GeometryLibrary::new();
        for solid in SolidType::ALL {
            let g = library.get(solid);
            assert_eq!(g.uvs().is_some(), solid.supports_uvs(), "{solid}");
            assert_eq!(g.normals().is_some(), solid.supports_normals(), "{solid}");
        }
    }

    #[test]
    fn replace_returns_previous_table() {
        let mut library = GeometryLibrary::new();
        let custom = Geometry::flat(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        let old = library.replace(SolidType::Pyramid4, custom.clone());
        assert_eq!(old.triangle_count(), 6);
        assert_eq!(library.get(SolidType::Pyramid4), &custom);
    }

    #[test]
    fn total_triangles_sums_all_tables() {
        assert_eq!(GeometryLibrary::new().total_triangles(), 12 + 6 + 8 + 20 + 400);
    }
}
