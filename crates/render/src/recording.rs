use blockfield_common::Color;
use glam::Mat4;

use crate::backend::{BackendError, DrawBackend, DrawCall, FrameUniforms};
use crate::material::MaterialSelector;

/// What a [`RecordingBackend`] kept of one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub triangles: usize,
    pub textured: bool,
    pub material: MaterialSelector,
    pub color: Color,
    pub model: Mat4,
    pub lit: bool,
}

/// Backend that records draw calls instead of rasterizing them.
///
/// Used by the CLI for frame reports and by tests. A single draw can be made
/// to fail with [`RecordingBackend::fail_draw`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    frames: u64,
    uniforms: Option<FrameUniforms>,
    draws: Vec<DrawRecord>,
    attempts: usize,
    fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the draw attempt with this zero-based index within the current
    /// frame. Fires once.
    pub fn fail_draw(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn uniforms(&self) -> Option<&FrameUniforms> {
        self.uniforms.as_ref()
    }

    /// Draws accepted since the last `begin_frame`.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn triangle_total(&self) -> usize {
        self.draws.iter().map(|d| d.triangles).sum()
    }

    /// Human-readable digest of the current frame.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} ({} draws, {} triangles) ===\n",
            self.frames,
            self.draws.len(),
            self.triangle_total()
        ));
        if let Some(uniforms) = &self.uniforms {
            let eye = uniforms.camera_position;
            let light = uniforms.light.position;
            out.push_str(&format!(
                "Camera: eye=({:.2}, {:.2}, {:.2})  Light: ({:.2}, {:.2}, {:.2}) {}\n",
                eye.x,
                eye.y,
                eye.z,
                light.x,
                light.y,
                light.z,
                if uniforms.light.enabled { "on" } else { "off" }
            ));
        }
        let textured = self.draws.iter().filter(|d| d.textured).count();
        out.push_str(&format!(
            "Textured: {}  Flat: {}\n",
            textured,
            self.draws.len() - textured
        ));
        out
    }
}

impl DrawBackend for RecordingBackend {
    fn begin_frame(&mut self, uniforms: &FrameUniforms) -> Result<(), BackendError> {
        self.frames += 1;
        self.uniforms = Some(*uniforms);
        self.draws.clear();
        self.attempts = 0;
        Ok(())
    }

    fn draw_triangles(&mut self, call: &DrawCall<'_>) -> Result<(), BackendError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            self.fail_at = None;
            return Err(BackendError::Rejected(format!("injected failure at draw {attempt}")));
        }
        self.draws.push(DrawRecord {
            triangles: call.triangle_count(),
            textured: call.is_textured(),
            material: call.material,
            color: call.color,
            model: call.model,
            lit: call.lit,
        });
        Ok(())
    }
}
