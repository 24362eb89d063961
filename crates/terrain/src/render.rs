use blockfield_camera::Camera;
use blockfield_geometry::SolidType;
use blockfield_render::{DrawBackend, FramePass, MaterialSelector, SceneNode};
use glam::{Mat4, Vec3};

use crate::cull::{CullSettings, Visibility, classify};
use crate::field::TerrainField;

/// A nonzero cell that passed culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleCell {
    pub x: usize,
    pub z: usize,
    pub height: u32,
    /// Position in the parent's space, before any bob.
    pub local: Vec3,
}

impl TerrainField {
    /// Nonzero cells visible from `camera` once placed by `parent`.
    pub fn visible_cells(
        &self,
        parent: Mat4,
        camera: &Camera,
        settings: &CullSettings,
    ) -> Vec<VisibleCell> {
        let eye = camera.eye();
        let forward = camera.forward();
        let mut too_far = 0usize;
        let mut outside = 0usize;

        let visible: Vec<VisibleCell> = self
            .cells()
            .filter(|&(_, _, height)| height > 0)
            .filter_map(|(x, z, height)| {
                let local = self.local_position(x, z);
                let world = parent.transform_point3(local);
                match classify(world, eye, forward, settings) {
                    Visibility::Visible => Some(VisibleCell { x, z, height, local }),
                    Visibility::TooFar => {
                        too_far += 1;
                        None
                    }
                    Visibility::OutsideView => {
                        outside += 1;
                        None
                    }
                }
            })
            .collect();

        tracing::trace!(
            visible = visible.len(),
            too_far,
            outside,
            "terrain culled"
        );
        visible
    }

    /// Draw every visible block as a textured cube under `parent`.
    ///
    /// Returns the number of blocks that rendered successfully.
    pub fn render_visible<B: DrawBackend + ?Sized>(
        &self,
        parent: &SceneNode,
        camera: &Camera,
        settings: &CullSettings,
        seconds: f32,
        show_normals: bool,
        pass: &mut FramePass<'_, B>,
    ) -> usize {
        let _span = tracing::debug_span!("terrain_render").entered();
        let scale = self.config().block_scale;
        let bob = self.config().bob_amplitude;
        let material = if show_normals {
            MaterialSelector::NormalDebug
        } else {
            MaterialSelector::Texture(self.config().texture_unit)
        };

        let mut drawn = 0;
        for cell in self.visible_cells(parent.matrix(), camera, settings) {
            let mut offset = cell.local;
            if bob != 0.0 {
                offset.y += bob * (seconds + cell.x as f32 + cell.z as f32).sin();
            }
            let mut block = SceneNode::child_of(SolidType::Cube, parent);
            block
                .transform_mut()
                .translate(offset.x, offset.y, offset.z)
                .scale(scale, scale * cell.height as f32, scale);
            block.set_material(material);
            if pass.draw(&block) {
                drawn += 1;
            }
        }
        tracing::debug!(drawn, "terrain blocks drawn");
        drawn
    }
}
