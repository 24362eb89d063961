//! Builders for the built-in solids. Each runs once, from `GeometryLibrary::new`.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::mesh::Geometry;

/// Corner texture coordinates for every cube face, matching the corner order
/// used in [`cube`].
const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Unit cube centered at the origin with per-face UVs and outward normals.
pub fn cube() -> Geometry {
    // Corners of each face, counter-clockwise seen from outside.
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-0.5, -0.5, 0.5),
                Vec3::new(0.5, -0.5, 0.5),
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(-0.5, 0.5, 0.5),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(0.5, -0.5, -0.5),
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(-0.5, 0.5, -0.5),
                Vec3::new(0.5, 0.5, -0.5),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(0.5, -0.5, 0.5),
                Vec3::new(0.5, -0.5, -0.5),
                Vec3::new(0.5, 0.5, -0.5),
                Vec3::new(0.5, 0.5, 0.5),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(-0.5, -0.5, 0.5),
                Vec3::new(-0.5, 0.5, 0.5),
                Vec3::new(-0.5, 0.5, -0.5),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-0.5, 0.5, 0.5),
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(0.5, 0.5, -0.5),
                Vec3::new(-0.5, 0.5, -0.5),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(0.5, -0.5, -0.5),
                Vec3::new(0.5, -0.5, 0.5),
                Vec3::new(-0.5, -0.5, 0.5),
            ],
        ),
    ];

    let mut positions = Vec::with_capacity(36);
    let mut uvs = Vec::with_capacity(36);
    let mut normals = Vec::with_capacity(36);
    for (normal, corners) in faces {
        for i in [0, 1, 2, 0, 2, 3] {
            positions.push(corners[i]);
            uvs.push(FACE_UVS[i]);
            normals.push(normal);
        }
    }
    Geometry::from_parts(positions, Some(uvs), Some(normals))
}

/// Square-based pyramid: four sides meeting at `(0, 0.5, 0)` plus a two-triangle base.
pub fn pyramid4() -> Geometry {
    let apex = Vec3::new(0.0, 0.5, 0.0);
    let (l, r) = (-0.5, 0.5);
    let y = -0.5;
    Geometry::flat(vec![
        // front
        Vec3::new(l, y, l),
        apex,
        Vec3::new(r, y, l),
        // back
        Vec3::new(l, y, r),
        apex,
        Vec3::new(r, y, r),
        // left
        apex,
        Vec3::new(l, y, r),
        Vec3::new(l, y, l),
        // right
        apex,
        Vec3::new(r, y, r),
        Vec3::new(r, y, l),
        // base
        Vec3::new(l, y, l),
        Vec3::new(r, y, r),
        Vec3::new(l, y, r),
        Vec3::new(l, y, l),
        Vec3::new(r, y, r),
        Vec3::new(r, y, l),
    ])
}

/// Two pyramids joined at the equator, apexes at `y = ±0.5`.
pub fn octahedron() -> Geometry {
    // Close to 1/(2*sqrt(2)), kept at three decimals.
    const E: f32 = 0.354;
    let mut positions = Vec::with_capacity(24);
    for apex in [Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, -0.5, 0.0)] {
        positions.extend([
            Vec3::new(-E, 0.0, -E),
            apex,
            Vec3::new(E, 0.0, -E),
            Vec3::new(-E, 0.0, E),
            apex,
            Vec3::new(E, 0.0, E),
            apex,
            Vec3::new(-E, 0.0, E),
            Vec3::new(-E, 0.0, -E),
            apex,
            Vec3::new(E, 0.0, E),
            Vec3::new(E, 0.0, -E),
        ]);
    }
    Geometry::flat(positions)
}

/// Scale applied to the golden-ratio icosahedron vertices.
pub const ICOSAHEDRON_SCALE: f32 = 0.31;

/// Vertex triples of the 20 icosahedron faces.
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    // around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // upper band
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // lower band
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
    // around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
];

/// Regular icosahedron built from three orthogonal golden rectangles.
pub fn icosahedron() -> Geometry {
    let f = ICOSAHEDRON_SCALE;
    let t = f * (1.0 + 5.0f32.sqrt()) / 2.0;
    let v = [
        Vec3::new(-f, t, 0.0),
        Vec3::new(f, t, 0.0),
        Vec3::new(-f, -t, 0.0),
        Vec3::new(f, -t, 0.0),
        Vec3::new(0.0, -f, t),
        Vec3::new(0.0, f, t),
        Vec3::new(0.0, -f, -t),
        Vec3::new(0.0, f, -t),
        Vec3::new(t, 0.0, -f),
        Vec3::new(t, 0.0, f),
        Vec3::new(-t, 0.0, -f),
        Vec3::new(-t, 0.0, f),
    ];
    let positions = ICOSAHEDRON_FACES
        .iter()
        .flat_map(|face| face.iter().map(|&i| v[i]))
        .collect();
    Geometry::flat(positions)
}

/// Polar and azimuth sampling step of the sphere mesh.
pub const SPHERE_STEP: f32 = PI / 10.0;
const SPHERE_RINGS: usize = 10;
const SPHERE_SEGMENTS: usize = 20;

fn sphere_point(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
}

/// Unit sphere with normals equal to positions and all-zero UVs.
pub fn sphere() -> Geometry {
    let vertex_count = SPHERE_RINGS * SPHERE_SEGMENTS * 6;
    let mut positions = Vec::with_capacity(vertex_count);
    for ring in 0..SPHERE_RINGS {
        let t = ring as f32 * SPHERE_STEP;
        for segment in 0..SPHERE_SEGMENTS {
            let r = segment as f32 * SPHERE_STEP;
            let p1 = sphere_point(t, r);
            let p2 = sphere_point(t + SPHERE_STEP, r);
            let p3 = sphere_point(t, r + SPHERE_STEP);
            let p4 = sphere_point(t + SPHERE_STEP, r + SPHERE_STEP);
            positions.extend([p1, p2, p4, p1, p4, p3]);
        }
    }
    let uvs = vec![Vec2::ZERO; positions.len()];
    let normals = positions.clone();
    Geometry::from_parts(positions, Some(uvs), Some(normals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(t: &[Vec3]) -> Vec3 {
        (t[1] - t[0]).cross(t[2] - t[0]).normalize()
    }

    #[test]
    fn cube_has_twelve_triangles_with_matching_attributes() {
        let g = cube();
        assert_eq!(g.triangle_count(), 12);
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.uvs().map(<[Vec2]>::len), Some(36));
        assert_eq!(g.normals().map(<[Vec3]>::len), Some(36));
    }

    #[test]
    fn cube_normals_point_outward_and_match_winding() {
        let g = cube();
        let normals = g.normals().unwrap();
        for (i, tri) in g.triangles().enumerate() {
            let n = normals[i * 3];
            assert!(face_normal(tri).abs_diff_eq(n, 1e-6), "triangle {i}");
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(centroid.dot(n) > 0.0);
        }
    }

    #[test]
    fn cube_fits_unit_bounds() {
        assert!(cube()
            .positions()
            .iter()
            .all(|p| p.abs().cmple(Vec3::splat(0.5)).all()));
    }

    #[test]
    fn flat_solids_have_no_uvs_or_normals() {
        for g in [pyramid4(), octahedron(), icosahedron()] {
            assert!(g.uvs().is_none());
            assert!(g.normals().is_none());
            assert_eq!(g.validate(), Ok(()));
        }
    }

    #[test]
    fn triangle_counts() {
        assert_eq!(pyramid4().triangle_count(), 6);
        assert_eq!(octahedron().triangle_count(), 8);
        assert_eq!(icosahedron().triangle_count(), 20);
        assert_eq!(sphere().triangle_count(), 400);
    }

    #[test]
    fn icosahedron_vertices_share_one_radius() {
        let g = icosahedron();
        let f = ICOSAHEDRON_SCALE;
        let t = f * (1.0 + 5.0f32.sqrt()) / 2.0;
        let radius = (f * f + t * t).sqrt();
        for p in g.positions() {
            assert!((p.length() - radius).abs() < 1e-5);
        }
    }

    #[test]
    fn icosahedron_edges_are_uniform() {
        let g = icosahedron();
        let edge = 2.0 * ICOSAHEDRON_SCALE;
        for tri in g.triangles() {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                assert!((tri[a].distance(tri[b]) - edge).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn sphere_lies_on_unit_sphere_with_position_normals() {
        let g = sphere();
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.normals().unwrap(), g.positions());
        assert!(g.uvs().unwrap().iter().all(|uv| *uv == Vec2::ZERO));
        for p in g.positions() {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }
}
