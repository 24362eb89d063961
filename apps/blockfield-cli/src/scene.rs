use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Context;
use blockfield_camera::Camera;
use blockfield_common::Viewport;
use blockfield_geometry::{GeometryLibrary, SolidType};
use blockfield_render::{
    DrawBackend, FramePass, FrameTime, FrameUniforms, MaterialSelector, PointLight, SceneNode,
};
use blockfield_terrain::{CullSettings, TerrainField};

use crate::config::SceneConfig;

/// Sky and sea are counted alongside terrain blocks.
const EXTRA_BLOCKS: usize = 2;

/// Timing and counts for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub duration: Duration,
    pub draw_calls: usize,
    pub nodes: usize,
    pub failed_nodes: usize,
    pub terrain_blocks: usize,
}

impl FrameReport {
    pub fn fps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 { 1.0 / secs } else { 0.0 }
    }

    pub fn blocks_drawn(&self) -> usize {
        self.terrain_blocks + EXTRA_BLOCKS
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ms: {:.3} | fps: {:.1} | draws: {} | blocks drawn: {}",
            self.duration.as_secs_f64() * 1000.0,
            self.fps(),
            self.draw_calls,
            self.blocks_drawn()
        )?;
        if self.failed_nodes > 0 {
            write!(f, " | failed nodes: {}", self.failed_nodes)?;
        }
        Ok(())
    }
}

/// The demo scene: textured cubes, sky, sea, an orb, the light marker, a
/// small wizard and the terrain field.
pub struct Showcase {
    pub library: GeometryLibrary,
    pub camera: Camera,
    pub terrain: TerrainField,
    pub cull: CullSettings,
    pub light: PointLight,
    pub viewport: Viewport,
    pub show_normals: bool,
}

impl Showcase {
    pub fn new(config: &SceneConfig) -> anyhow::Result<Self> {
        let camera = Camera::new(config.camera).context("building camera")?;
        let terrain = TerrainField::generate(config.terrain).context("generating terrain")?;
        Ok(Self {
            library: GeometryLibrary::new(),
            camera,
            terrain,
            cull: config.cull,
            light: config.light,
            viewport: config.viewport,
            show_normals: config.show_normals,
        })
    }

    /// Material for a node that is normally drawn with `material`.
    fn pick(&self, material: MaterialSelector) -> MaterialSelector {
        if self.show_normals {
            MaterialSelector::NormalDebug
        } else {
            material
        }
    }

    pub fn render_frame<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        time: FrameTime,
    ) -> anyhow::Result<FrameReport> {
        let start = Instant::now();
        self.camera.recompute_matrices(self.viewport);
        let light = self.light.orbit(time.seconds);
        let uniforms = FrameUniforms::new(&self.camera, light);
        let mut pass =
            FramePass::begin(&self.library, backend, &uniforms).context("starting frame")?;

        let root = SceneNode::new(SolidType::Cube);

        let mut block = SceneNode::child_of(SolidType::Cube, &root);
        block.set_color_hex("ffcc00ff")?;
        block.set_shading_intensity(0.25);
        block.set_material(self.pick(MaterialSelector::Texture(0)));
        block.transform_mut().translate(0.0, 1.0, 0.0).scale(0.5, 0.5, 0.5);
        pass.draw(&block);

        let mut tilted = SceneNode::child_of(SolidType::Cube, &root);
        tilted.set_color_hex("ffcc00ff")?;
        tilted.set_shading_intensity(0.25);
        tilted.set_material(self.pick(MaterialSelector::Texture(1)));
        tilted
            .transform_mut()
            .translate(0.5, 1.0, 0.0)
            .rotate(45.0, 1.0, 1.0, 1.0)
            .scale(0.2, 0.2, 0.2);
        pass.draw(&tilted);

        let mut sky = SceneNode::child_of(SolidType::Cube, &root);
        sky.set_material(self.pick(MaterialSelector::Texture(3)));
        sky.set_lit(false);
        sky.transform_mut()
            .rotate(time.seconds * 0.3, 1.0, 1.0, 1.0)
            .scale(256.0, 256.0, 256.0);
        pass.draw(&sky);

        let mut sea = SceneNode::child_of(SolidType::Cube, &root);
        sea.set_material(self.pick(MaterialSelector::Texture(2)));
        sea.transform_mut().scale(256.0, 0.0, 256.0);
        pass.draw(&sea);

        let mut orb = SceneNode::child_of(SolidType::Sphere, &root);
        orb.set_color_hex("ffcc00ff")?;
        orb.set_material(self.pick(MaterialSelector::FlatColor));
        orb.transform_mut().translate(-2.5, 0.5, -4.0);
        pass.draw(&orb);

        let mut marker = SceneNode::child_of(SolidType::Cube, &root);
        let c = light.color;
        marker.set_color(c.r, c.g, c.b, 1.0);
        marker.set_lit(false);
        marker
            .transform_mut()
            .translate(light.position.x, light.position.y, light.position.z)
            .scale(0.05, 0.05, 0.05);
        pass.draw(&marker);

        draw_wizard(&root, time.seconds, &mut pass)?;

        let terrain_blocks = self.terrain.render_visible(
            &root,
            &self.camera,
            &self.cull,
            time.seconds,
            self.show_normals,
            &mut pass,
        );

        let stats = pass.finish();
        Ok(FrameReport {
            duration: start.elapsed(),
            draw_calls: stats.draw_calls,
            nodes: stats.nodes,
            failed_nodes: stats.failed_nodes,
            terrain_blocks,
        })
    }
}

/// A robed figure built from nested solids, standing off to the side.
fn draw_wizard<B: DrawBackend + ?Sized>(
    root: &SceneNode,
    seconds: f32,
    pass: &mut FramePass<'_, B>,
) -> anyhow::Result<()> {
    let breath = (seconds * 0.9).sin();

    let mut robe = SceneNode::child_of(SolidType::Pyramid4, root);
    robe.set_color_hex("ff1158ff")?;
    robe.transform_mut()
        .translate(1.5, 0.4, -2.0)
        .scale(0.5, 0.75, 0.5);
    pass.draw(&robe);

    let mut head = SceneNode::child_of(SolidType::Cube, &robe);
    head.set_color_hex("6d5858ff")?;
    head.transform_mut()
        .scale(1.0 / 0.5, 1.0 / 0.75, 1.0 / 0.5)
        .translate(0.0, breath * 0.01, 0.0)
        .rotate(breath, 0.2, 0.0, 1.0)
        .translate(0.0, 0.3, 0.0)
        .scale(0.25, 0.25, 0.25);
    pass.draw(&head);

    let mut beard = SceneNode::child_of(SolidType::Octahedron, &head);
    beard.set_color_hex("ffffffff")?;
    beard.transform_mut().translate(0.0, -0.7, 0.0).scale(2.0, 2.0, 2.0);
    pass.draw(&beard);

    let mut hat = SceneNode::child_of(SolidType::Pyramid4, &head);
    hat.set_color_hex("ff1158ff")?;
    hat.transform_mut().translate(0.0, 1.1, 0.0).scale(1.0, 1.2, 1.0);
    pass.draw(&hat);

    let mut brim = SceneNode::child_of(SolidType::Cube, &hat);
    brim.transform_mut().translate(0.0, -0.5, 0.0).scale(2.0, 0.1, 2.0);
    pass.draw(&brim);

    let mut bauble = SceneNode::child_of(SolidType::Icosahedron, &hat);
    bauble.set_color_hex("ffbb22ff")?;
    bauble
        .transform_mut()
        .translate(0.0, 0.5, 0.0)
        .scale(0.3, 0.3 / 1.2, 0.3);
    pass.draw(&bauble);

    let mut staff_orb = SceneNode::child_of(SolidType::Icosahedron, &robe);
    staff_orb.set_color_hex("ffff00ff")?;
    staff_orb
        .transform_mut()
        .translate(0.0, -0.2 + 0.05 * seconds.sin(), -0.5)
        .scale(0.25, 0.25, 0.25)
        .rotate(seconds * 40.0, 1.0, 2.0, 3.0);
    pass.draw(&staff_orb);

    Ok(())
}
