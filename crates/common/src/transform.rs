use glam::{Mat4, Vec3};

/// A model matrix built up by post-multiplying local transforms.
///
/// `translate`, `rotate` and `scale` compose on the right, so the last call
/// is applied to geometry first. The `set_*` methods replace the matrix.
/// Copies are by value: a child built from a parent's transform keeps its own
/// snapshot and never observes later changes to the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Column-major elements, the layout shader uniforms expect.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.matrix *= Mat4::from_translation(Vec3::new(x, y, z));
        self
    }

    /// Rotate by `degrees` around the axis `(x, y, z)`. A zero axis is ignored.
    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) -> &mut Self {
        match Vec3::new(x, y, z).try_normalize() {
            Some(axis) => {
                self.matrix *= Mat4::from_axis_angle(axis, degrees.to_radians());
            }
            None => tracing::warn!(degrees, "rotation around a zero axis ignored"),
        }
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.matrix *= Mat4::from_scale(Vec3::new(x, y, z));
        self
    }

    pub fn set_translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.matrix = Mat4::from_translation(Vec3::new(x, y, z));
        self
    }

    pub fn set_look_at(&mut self, eye: Vec3, at: Vec3, up: Vec3) -> &mut Self {
        self.matrix = Mat4::look_at_rh(eye, at, up);
        self
    }

    /// Replace with an OpenGL-style perspective projection. `fov_degrees` is vertical.
    pub fn set_perspective(
        &mut self,
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        self.matrix = Mat4::perspective_rh_gl(fov_degrees.to_radians(), aspect, near, far);
        self
    }

    /// Map a point from local space through this transform.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Inverse-transpose for transforming normals.
    ///
    /// A singular matrix (e.g. a zero scale axis) yields the identity.
    pub fn normal_matrix(&self) -> Mat4 {
        if self.matrix.determinant().abs() <= f32::EPSILON {
            return Mat4::IDENTITY;
        }
        self.matrix.inverse().transpose()
    }
}
