use blockfield_common::Color;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The single point light of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    /// When false, lit nodes are drawn with their unlit material color.
    pub enabled: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.5, 0.0),
            color: Color::WHITE,
            enabled: true,
        }
    }
}

impl PointLight {
    /// This light displaced along a unit circle in the XZ plane at `seconds`.
    pub fn orbit(&self, seconds: f32) -> Self {
        Self {
            position: self.position + Vec3::new(seconds.sin(), 0.0, seconds.cos()),
            ..*self
        }
    }
}
