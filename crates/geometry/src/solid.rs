use serde::{Deserialize, Serialize};

/// The closed set of primitive solids a scene node can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolidType {
    Cube,
    Pyramid4,
    Octahedron,
    Icosahedron,
    Sphere,
}

impl SolidType {
    pub const COUNT: usize = 5;

    pub const ALL: [SolidType; Self::COUNT] = [
        SolidType::Cube,
        SolidType::Pyramid4,
        SolidType::Octahedron,
        SolidType::Icosahedron,
        SolidType::Sphere,
    ];

    /// Slot of this solid in a geometry table.
    pub const fn index(self) -> usize {
        match self {
            SolidType::Cube => 0,
            SolidType::Pyramid4 => 1,
            SolidType::Octahedron => 2,
            SolidType::Icosahedron => 3,
            SolidType::Sphere => 4,
        }
    }

    /// Whether this solid's mesh carries texture coordinates.
    /// Solids without them only render in flat-color mode.
    pub const fn supports_uvs(self) -> bool {
        matches!(self, SolidType::Cube | SolidType::Sphere)
    }

    pub const fn supports_normals(self) -> bool {
        matches!(self, SolidType::Cube | SolidType::Sphere)
    }

    pub const fn name(self) -> &'static str {
        match self {
            SolidType::Cube => "cube",
            SolidType::Pyramid4 => "pyramid4",
            SolidType::Octahedron => "octahedron",
            SolidType::Icosahedron => "icosahedron",
            SolidType::Sphere => "sphere",
        }
    }
}

impl std::fmt::Display for SolidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
