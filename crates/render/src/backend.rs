use blockfield_camera::Camera;
use blockfield_common::Color;
use glam::{Mat4, Vec2, Vec3};

use crate::light::PointLight;
use crate::material::MaterialSelector;

/// Errors reported by a draw backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("failed to allocate a vertex buffer of {vertices} vertices")]
    BufferAllocation { vertices: usize },
    #[error("backend rejected draw: {0}")]
    Rejected(String),
}

/// Per-frame state shared by every draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub camera_position: Vec3,
    pub light: PointLight,
}

impl FrameUniforms {
    /// Snapshot the camera's matrices. The camera must have had
    /// [`Camera::recompute_matrices`] called since its last mutation.
    pub fn new(camera: &Camera, light: PointLight) -> Self {
        Self {
            projection: camera.projection_matrix(),
            view: camera.view_matrix(),
            camera_position: camera.eye(),
            light,
        }
    }
}

/// One triangle list submitted to the backend.
///
/// The flat path carries positions only and is drawn in `color`. The
/// textured path carries UVs and normals for every position.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub positions: &'a [Vec3],
    pub uvs: Option<&'a [Vec2]>,
    pub normals: Option<&'a [Vec3]>,
    pub model: Mat4,
    pub normal_matrix: Mat4,
    pub material: MaterialSelector,
    pub color: Color,
    /// Whether the point light applies.
    pub lit: bool,
}

impl DrawCall<'_> {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_textured(&self) -> bool {
        self.uvs.is_some()
    }
}

/// The graphics binding the scene draws into.
///
/// Implementations rasterize however they like; the scene only promises to
/// call [`DrawBackend::begin_frame`] once before the frame's draw calls.
pub trait DrawBackend {
    fn begin_frame(&mut self, uniforms: &FrameUniforms) -> Result<(), BackendError>;

    fn draw_triangles(&mut self, call: &DrawCall<'_>) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfield_camera::CameraConfig;
    use blockfield_common::Viewport;

    #[test]
    fn uniforms_copy_camera_state() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.recompute_matrices(Viewport::default());
        let uniforms = FrameUniforms::new(&camera, PointLight::default());
        assert_eq!(uniforms.view, camera.view_matrix());
        assert_eq!(uniforms.projection, camera.projection_matrix());
        assert_eq!(uniforms.camera_position, camera.eye());
    }

    #[test]
    fn draw_call_counts_triangles() {
        let positions = [Vec3::ZERO; 6];
        let call = DrawCall {
            positions: &positions,
            uvs: None,
            normals: None,
            model: Mat4::IDENTITY,
            normal_matrix: Mat4::IDENTITY,
            material: MaterialSelector::FlatColor,
            color: Color::WHITE,
            lit: true,
        };
        assert_eq!(call.triangle_count(), 2);
        assert!(!call.is_textured());
    }
}
