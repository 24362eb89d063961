use blockfield_common::{Transform, Viewport};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Errors from building a camera with an unusable view.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("eye and look-at point coincide at {0}")]
    EyeAtTarget(Vec3),
    #[error("up vector {up} is zero or parallel to the view direction")]
    DegenerateUp { up: Vec3 },
    #[error("field of view must be within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },
}

/// Starting parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub eye: Vec3,
    /// Point the camera looks at (not a direction).
    pub at: Vec3,
    pub up: Vec3,
    /// Distance covered by one movement step.
    pub movement_scale: f32,
    /// Radians turned per unit of pan.
    pub turn_rate: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            eye: Vec3::new(0.0, 1.0, 4.0),
            at: Vec3::new(0.0, 1.0, -2.0),
            up: Vec3::Y,
            movement_scale: 0.1,
            turn_rate: 0.02,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// The pose restored by [`Camera::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    fov_degrees: f32,
}

/// First-person camera defined by an eye point, a look-at point and an up vector.
///
/// `at - eye` is never zero: construction rejects it and no operation can
/// produce it. View and projection matrices are derived on demand by
/// [`Camera::recompute_matrices`], not kept in sync incrementally.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    fov_degrees: f32,
    movement_scale: f32,
    turn_rate: f32,
    near: f32,
    far: f32,
    initial: Pose,
    projection: Transform,
    view: Transform,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        validate_fov(config.fov_degrees)?;
        if !(config.near > 0.0 && config.near < config.far) {
            return Err(CameraError::InvalidClipPlanes {
                near: config.near,
                far: config.far,
            });
        }
        validate_view(config.eye, config.at, config.up)?;

        let pose = Pose {
            eye: config.eye,
            at: config.at,
            up: config.up,
            fov_degrees: config.fov_degrees,
        };
        Ok(Self {
            eye: config.eye,
            at: config.at,
            up: config.up,
            fov_degrees: config.fov_degrees,
            movement_scale: config.movement_scale,
            turn_rate: config.turn_rate,
            near: config.near,
            far: config.far,
            initial: pose,
            projection: Transform::IDENTITY,
            view: Transform::IDENTITY,
        })
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) -> Result<(), CameraError> {
        validate_fov(fov_degrees)?;
        self.fov_degrees = fov_degrees;
        Ok(())
    }

    /// Unit vector from the eye towards the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.at - self.eye).normalize()
    }

    /// One movement step along the view direction.
    pub fn forward_step(&self) -> Vec3 {
        self.forward() * self.movement_scale
    }

    fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.at += delta;
    }

    pub fn move_forward(&mut self) {
        self.translate(self.forward_step());
    }

    pub fn move_backward(&mut self) {
        self.translate(-self.forward_step());
    }

    /// Sideways step; its length scales with the angle between forward and up.
    fn side_step(&self) -> Vec3 {
        self.forward_step().cross(self.up)
    }

    pub fn move_left(&mut self) {
        self.translate(-self.side_step());
    }

    pub fn move_right(&mut self) {
        self.translate(self.side_step());
    }

    /// Turn around the vertical axis through the eye by `amount * turn_rate` radians.
    ///
    /// The horizontal look distance and the vertical offset of `at` are kept.
    /// Refused when the view points straight up or down, since there is no
    /// bearing to turn.
    pub fn pan(&mut self, amount: f32) {
        let look = self.at - self.eye;
        let radius = look.x.hypot(look.z);
        if radius * radius <= DEGENERATE_EPSILON {
            tracing::warn!(?look, "pan refused: view direction is vertical");
            return;
        }

        let bearing = look.z.atan2(look.x) + amount * self.turn_rate;
        let turned = Vec3::new(radius * bearing.cos(), look.y, radius * bearing.sin());
        if turned.cross(self.up).length_squared() <= DEGENERATE_EPSILON {
            tracing::warn!(?turned, up = ?self.up, "pan refused: would align view with up");
            return;
        }
        self.at = self.eye + turned;
    }

    pub fn pan_left(&mut self) {
        self.pan(-1.0);
    }

    pub fn pan_right(&mut self) {
        self.pan(1.0);
    }

    /// Rebuild the projection and view matrices from the current state.
    ///
    /// Call after any mutation and before handing the matrices to a backend.
    pub fn recompute_matrices(&mut self, viewport: Viewport) {
        self.projection.set_perspective(
            self.fov_degrees,
            viewport.aspect_ratio(),
            self.near,
            self.far,
        );
        self.view.set_look_at(self.eye, self.at, self.up);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view.matrix()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Restore eye, at, up and field of view to their construction values.
    pub fn reset(&mut self) {
        self.eye = self.initial.eye;
        self.at = self.initial.at;
        self.up = self.initial.up;
        self.fov_degrees = self.initial.fov_degrees;
    }
}

fn validate_fov(fov_degrees: f32) -> Result<(), CameraError> {
    if fov_degrees > 0.0 && fov_degrees < 180.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidFieldOfView(fov_degrees))
    }
}

fn validate_view(eye: Vec3, at: Vec3, up: Vec3) -> Result<(), CameraError> {
    let look = at - eye;
    if look.length_squared() <= DEGENERATE_EPSILON {
        return Err(CameraError::EyeAtTarget(eye));
    }
    if look.cross(up).length_squared() <= DEGENERATE_EPSILON {
        return Err(CameraError::DegenerateUp { up });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn camera() -> Camera {
        Camera::new(CameraConfig::default()).unwrap()
    }

    #[test]
    fn default_camera_produces_finite_matrices() {
        let mut cam = camera();
        cam.recompute_matrices(Viewport::new(800, 600));
        let vp = cam.view_projection();
        assert!(vp.to_cols_array().iter().all(|e| e.is_finite()));
    }

    #[test]
    fn forward_step_has_movement_length() {
        let cam = camera();
        assert!((cam.forward_step().length() - 0.1).abs() < EPS);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn forward_then_backward_round_trips() {
        let mut cam = camera();
        let (eye, at) = (cam.eye(), cam.at());
        cam.move_forward();
        assert!(!cam.eye().abs_diff_eq(eye, EPS));
        cam.move_backward();
        assert!(cam.eye().abs_diff_eq(eye, EPS));
        assert!(cam.at().abs_diff_eq(at, EPS));
    }

    #[test]
    fn movement_preserves_look_vector() {
        let mut cam = camera();
        let look = cam.at() - cam.eye();
        cam.move_forward();
        cam.move_left();
        cam.move_right();
        cam.move_right();
        assert!((cam.at() - cam.eye()).abs_diff_eq(look, EPS));
    }

    #[test]
    fn move_right_goes_towards_positive_x_when_looking_down_negative_z() {
        let mut cam = camera();
        let start = cam.eye();
        cam.move_right();
        assert!(cam.eye().x > start.x);
        cam.move_left();
        cam.move_left();
        assert!(cam.eye().x < start.x);
    }

    #[test]
    fn pan_round_trips() {
        let mut cam = camera();
        let at = cam.at();
        cam.pan(3.5);
        assert!(!cam.at().abs_diff_eq(at, EPS));
        cam.pan(-3.5);
        assert!(cam.at().abs_diff_eq(at, EPS));
    }

    #[test]
    fn pan_keeps_eye_and_horizontal_distance() {
        let mut cam = Camera::new(CameraConfig {
            at: Vec3::new(2.0, 2.5, 0.0),
            ..CameraConfig::default()
        })
        .unwrap();
        let eye = cam.eye();
        let before = cam.at() - eye;
        cam.pan_right();
        cam.pan_right();
        let after = cam.at() - eye;
        assert_eq!(cam.eye(), eye);
        assert!((before.x.hypot(before.z) - after.x.hypot(after.z)).abs() < EPS);
        assert!((before.y - after.y).abs() < EPS);
    }

    #[test]
    fn pan_right_turns_by_turn_rate() {
        let mut cam = camera();
        let before = cam.at() - cam.eye();
        cam.pan_right();
        let after = cam.at() - cam.eye();
        let turned = before.z.atan2(before.x) - after.z.atan2(after.x);
        assert!((turned.abs() - 0.02).abs() < EPS);
    }

    #[test]
    fn pan_with_vertical_view_is_refused() {
        let mut cam = Camera::new(CameraConfig {
            eye: Vec3::ZERO,
            at: Vec3::Y,
            up: Vec3::Z,
            ..CameraConfig::default()
        })
        .unwrap();
        cam.pan(1.0);
        assert_eq!(cam.at(), Vec3::Y);
    }

    #[test]
    fn eye_at_target_is_rejected() {
        let err = Camera::new(CameraConfig {
            eye: Vec3::ONE,
            at: Vec3::ONE,
            ..CameraConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, CameraError::EyeAtTarget(_)));
    }

    #[test]
    fn up_parallel_to_view_is_rejected() {
        let err = Camera::new(CameraConfig {
            up: Vec3::NEG_Z,
            ..CameraConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, CameraError::DegenerateUp { .. }));
    }

    #[test]
    fn invalid_fov_is_rejected() {
        assert!(Camera::new(CameraConfig {
            fov_degrees: 180.0,
            ..CameraConfig::default()
        })
        .is_err());
        let mut cam = camera();
        assert!(cam.set_fov_degrees(0.0).is_err());
        assert_eq!(cam.fov_degrees(), 50.0);
    }

    #[test]
    fn reset_restores_construction_pose() {
        let mut cam = camera();
        cam.move_forward();
        cam.pan(10.0);
        cam.set_fov_degrees(90.0).unwrap();
        cam.reset();
        let config = CameraConfig::default();
        assert_eq!(cam.eye(), config.eye);
        assert_eq!(cam.at(), config.at);
        assert_eq!(cam.up(), config.up);
        assert_eq!(cam.fov_degrees(), config.fov_degrees);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut cam = camera();
        cam.move_right();
        cam.recompute_matrices(Viewport::default());
        let p = cam.view_matrix().transform_point3(cam.eye());
        assert!(p.abs_diff_eq(Vec3::ZERO, EPS));
        let target = cam.view_matrix().transform_point3(cam.at());
        assert!(target.z < 0.0);
    }

    #[test]
    fn projection_uses_viewport_aspect() {
        let mut wide = camera();
        let mut square = camera();
        wide.recompute_matrices(Viewport::new(1600, 800));
        square.recompute_matrices(Viewport::new(800, 800));
        let ratio = square.projection_matrix().x_axis.x / wide.projection_matrix().x_axis.x;
        assert!((ratio - 2.0).abs() < EPS);
    }
}
