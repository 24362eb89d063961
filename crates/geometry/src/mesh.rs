use glam::{Vec2, Vec3};

/// Errors from inconsistent geometry tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("position count {positions} is not a whole number of triangles")]
    PartialTriangle { positions: usize },
    #[error(
        "attribute counts disagree: {positions} positions, {uvs:?} uvs, {normals:?} normals"
    )]
    AttributeMismatch {
        positions: usize,
        uvs: Option<usize>,
        normals: Option<usize>,
    },
}

/// A non-indexed triangle list: every three positions form one triangle.
///
/// Texture coordinates and normals, when present, are per vertex and must
/// line up one-to-one with `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    uvs: Option<Vec<Vec2>>,
    normals: Option<Vec<Vec3>>,
}

impl Geometry {
    /// Position-only triangle list.
    pub fn flat(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            uvs: None,
            normals: None,
        }
    }

    /// Assemble a triangle list from its parts. No validation happens here;
    /// see [`Geometry::validate`].
    pub fn from_parts(
        positions: Vec<Vec3>,
        uvs: Option<Vec<Vec2>>,
        normals: Option<Vec<Vec3>>,
    ) -> Self {
        Self {
            positions,
            uvs,
            normals,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> Option<&[Vec2]> {
        self.uvs.as_deref()
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterate the triangles as slices of three positions.
    pub fn triangles(&self) -> impl Iterator<Item = &[Vec3]> {
        self.positions.chunks_exact(3)
    }

    /// Check that the attribute arrays describe the same vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let positions = self.positions.len();
        if positions % 3 != 0 {
            return Err(GeometryError::PartialTriangle { positions });
        }
        let uvs = self.uvs.as_ref().map(Vec::len);
        let normals = self.normals.as_ref().map(Vec::len);
        let mismatched = |count: Option<usize>| count.is_some_and(|c| c != positions);
        if mismatched(uvs) || mismatched(normals) {
            return Err(GeometryError::AttributeMismatch {
                positions,
                uvs,
                normals,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn flat_geometry_is_valid() {
        let g = Geometry::flat(triangle());
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.triangle_count(), 1);
        assert!(g.uvs().is_none());
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let g = Geometry::flat(vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(
            g.validate(),
            Err(GeometryError::PartialTriangle { positions: 2 })
        );
    }

    #[test]
    fn short_uv_array_is_rejected() {
        let g = Geometry::from_parts(triangle(), Some(vec![Vec2::ZERO; 2]), None);
        assert_eq!(
            g.validate(),
            Err(GeometryError::AttributeMismatch {
                positions: 3,
                uvs: Some(2),
                normals: None,
            })
        );
    }

    #[test]
    fn long_normal_array_is_rejected() {
        let g = Geometry::from_parts(
            triangle(),
            Some(vec![Vec2::ZERO; 3]),
            Some(vec![Vec3::Z; 6]),
        );
        assert!(matches!(
            g.validate(),
            Err(GeometryError::AttributeMismatch { normals: Some(6), .. })
        ));
    }

    #[test]
    fn triangles_iterates_in_threes() {
        let mut positions = triangle();
        positions.extend(triangle());
        let g = Geometry::flat(positions);
        assert_eq!(g.triangles().count(), 2);
        assert!(g.triangles().all(|t| t.len() == 3));
    }
}
