use std::borrow::Cow;

use blockfield_common::{Color, ColorError, Transform};
use blockfield_geometry::{GeometryError, GeometryLibrary, SolidType};
use glam::{Mat4, Vec2, Vec3};

use crate::backend::{BackendError, DrawBackend, DrawCall};
use crate::material::MaterialSelector;

/// Errors from rendering a single node.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("{solid} geometry is inconsistent: {source}")]
    Geometry {
        solid: SolidType,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A solid placed in the scene for one frame.
///
/// Nodes are rebuilt every frame. A child copies its parent's matrix and
/// color by value when it is created; later edits on either side stay local.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    solid: SolidType,
    transform: Transform,
    color: Color,
    shading_intensity: f32,
    material: MaterialSelector,
    lit: bool,
}

impl SceneNode {
    pub const DEFAULT_SHADING_INTENSITY: f32 = 0.5;

    /// A top-level node: identity transform, white, flat color, lit.
    pub fn new(solid: SolidType) -> Self {
        Self {
            solid,
            transform: Transform::IDENTITY,
            color: Color::WHITE,
            shading_intensity: Self::DEFAULT_SHADING_INTENSITY,
            material: MaterialSelector::FlatColor,
            lit: true,
        }
    }

    /// A node starting from `parent`'s current matrix and color.
    pub fn child_of(solid: SolidType, parent: &SceneNode) -> Self {
        Self {
            transform: parent.transform,
            color: parent.color,
            ..Self::new(solid)
        }
    }

    pub fn solid(&self) -> SolidType {
        self.solid
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Local transforms applied here compose after everything inherited.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color = Color::new(r, g, b, a);
    }

    /// Set the color from an `RRGGBBAA` string. On error the color is unchanged.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        match Color::from_hex(hex) {
            Ok(color) => {
                self.color = color;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(solid = %self.solid, %err, "color left unchanged");
                Err(err)
            }
        }
    }

    pub fn shading_intensity(&self) -> f32 {
        self.shading_intensity
    }

    /// How much the last triangle is darkened, clamped to `[0, 1]`.
    pub fn set_shading_intensity(&mut self, value: f32) {
        self.shading_intensity = value.clamp(0.0, 1.0);
    }

    pub fn material(&self) -> MaterialSelector {
        self.material
    }

    /// Select a material. Solids without texture coordinates are forced to
    /// flat color whatever is requested.
    pub fn set_material(&mut self, material: MaterialSelector) {
        if material != MaterialSelector::FlatColor && !self.solid.supports_uvs() {
            tracing::debug!(
                solid = %self.solid,
                requested = material.code(),
                "material clamped to flat color"
            );
            self.material = MaterialSelector::FlatColor;
            return;
        }
        self.material = material;
    }

    pub fn lit(&self) -> bool {
        self.lit
    }

    pub fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
    }

    /// Color factor for triangle `index` of `count`: 1 for the first triangle,
    /// `1 - shading_intensity` for the last, linear in between.
    pub fn falloff(&self, index: usize, count: usize) -> f32 {
        let amount = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        lerp(1.0, 1.0 - self.shading_intensity, amount)
    }

    /// Submit this node's triangles to `backend`. Returns the number of draw calls.
    ///
    /// Inconsistent geometry fails before anything is drawn. A backend error
    /// aborts the rest of this node only.
    pub fn render<B: DrawBackend + ?Sized>(
        &self,
        library: &GeometryLibrary,
        backend: &mut B,
    ) -> Result<usize, RenderError> {
        let geometry = library.get(self.solid);
        geometry.validate().map_err(|source| {
            tracing::error!(solid = %self.solid, %source, "refusing to draw geometry");
            RenderError::Geometry {
                solid: self.solid,
                source,
            }
        })?;

        let model = self.transform.matrix();
        let normal_matrix = self.transform.normal_matrix();

        if self.material == MaterialSelector::FlatColor {
            let count = geometry.triangle_count();
            for (i, triangle) in geometry.triangles().enumerate() {
                backend.draw_triangles(&DrawCall {
                    positions: triangle,
                    uvs: None,
                    normals: None,
                    model,
                    normal_matrix,
                    material: self.material,
                    color: self.color.shaded(self.falloff(i, count)),
                    lit: self.lit,
                })?;
            }
            return Ok(count);
        }

        let vertices = geometry.vertex_count();
        let uvs: Cow<'_, [Vec2]> = match geometry.uvs() {
            Some(uvs) => Cow::Borrowed(uvs),
            None => {
                self.report_missing("uvs", self.material.needs_uvs());
                Cow::Owned(vec![Vec2::ZERO; vertices])
            }
        };
        let normals: Cow<'_, [Vec3]> = match geometry.normals() {
            Some(normals) => Cow::Borrowed(normals),
            None => {
                self.report_missing("normals", self.material.needs_normals());
                Cow::Owned(vec![Vec3::ZERO; vertices])
            }
        };

        backend.draw_triangles(&DrawCall {
            positions: geometry.positions(),
            uvs: Some(&uvs),
            normals: Some(&normals),
            model,
            normal_matrix,
            material: self.material,
            color: self.color,
            lit: self.lit,
        })?;
        Ok(1)
    }

    fn report_missing(&self, attribute: &str, needed: bool) {
        if needed {
            tracing::warn!(
                solid = %self.solid,
                material = self.material.code(),
                attribute,
                "geometry lacks attribute, substituting zeros"
            );
        } else {
            tracing::trace!(solid = %self.solid, attribute, "zero-filling unused attribute");
        }
    }
}

fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    (1.0 - amount) * start + amount * end
}
