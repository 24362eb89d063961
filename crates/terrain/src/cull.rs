use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distance and view-cone limits for terrain blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullSettings {
    pub max_distance: f32,
    /// Half-angle of the view cone, in degrees.
    pub max_angle_degrees: f32,
}

impl Default for CullSettings {
    fn default() -> Self {
        Self {
            max_distance: 40.0,
            max_angle_degrees: 70.0,
        }
    }
}

/// Outcome of testing one cell against the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    TooFar,
    OutsideView,
}

/// Test a world-space `cell` against a camera at `eye` looking along `forward`.
///
/// A cell exactly at the eye is visible. `forward` must be non-zero.
pub fn classify(cell: Vec3, eye: Vec3, forward: Vec3, settings: &CullSettings) -> Visibility {
    let to_cell = cell - eye;
    let distance = to_cell.length();
    if distance > settings.max_distance {
        return Visibility::TooFar;
    }
    // acos may round past 180 for cells straight behind the eye.
    if distance == 0.0 || settings.max_angle_degrees >= 180.0 {
        return Visibility::Visible;
    }
    let cosine = (to_cell.dot(forward) / (distance * forward.length())).clamp(-1.0, 1.0);
    if cosine.acos().to_degrees() > settings.max_angle_degrees {
        return Visibility::OutsideView;
    }
    Visibility::Visible
}

pub fn is_visible(cell: Vec3, eye: Vec3, forward: Vec3, settings: &CullSettings) -> bool {
    classify(cell, eye, forward, settings) == Visibility::Visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_cull() {
        let settings = CullSettings {
            max_distance: 5.0,
            max_angle_degrees: 180.0,
        };
        assert_eq!(
            classify(Vec3::new(0.0, 0.0, -6.0), Vec3::ZERO, Vec3::NEG_Z, &settings),
            Visibility::TooFar
        );
        assert!(is_visible(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::NEG_Z, &settings));
    }

    #[test]
    fn angle_cull() {
        let settings = CullSettings::default();
        let eye = Vec3::ZERO;
        assert!(is_visible(Vec3::new(0.0, 0.0, -3.0), eye, Vec3::NEG_Z, &settings));
        // 45 degrees off axis
        assert!(is_visible(Vec3::new(3.0, 0.0, -3.0), eye, Vec3::NEG_Z, &settings));
        // 90 degrees off axis
        assert_eq!(
            classify(Vec3::new(3.0, 0.0, 0.0), eye, Vec3::NEG_Z, &settings),
            Visibility::OutsideView
        );
        assert_eq!(
            classify(Vec3::new(0.0, 0.0, 3.0), eye, Vec3::NEG_Z, &settings),
            Visibility::OutsideView
        );
    }

    #[test]
    fn unnormalized_forward_gives_same_answer() {
        let settings = CullSettings::default();
        let cell = Vec3::new(2.0, 0.0, -3.0);
        assert_eq!(
            classify(cell, Vec3::ZERO, Vec3::NEG_Z, &settings),
            classify(cell, Vec3::ZERO, Vec3::NEG_Z * 0.1, &settings)
        );
    }

    #[test]
    fn cell_at_eye_is_visible() {
        let settings = CullSettings {
            max_distance: 0.0,
            max_angle_degrees: 0.0,
        };
        assert!(is_visible(Vec3::ONE, Vec3::ONE, Vec3::X, &settings));
    }

    #[test]
    fn full_cone_sees_behind() {
        let settings = CullSettings {
            max_distance: 1000.0,
            max_angle_degrees: 180.0,
        };
        assert!(is_visible(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::NEG_Z, &settings));
    }
}
