use std::path::Path;

use anyhow::Context;
use blockfield_camera::CameraConfig;
use blockfield_common::Viewport;
use blockfield_render::PointLight;
use blockfield_terrain::{CullSettings, TerrainConfig};
use serde::{Deserialize, Serialize};

/// Everything the showcase scene reads at startup. Missing fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: Viewport,
    pub camera: CameraConfig,
    pub terrain: TerrainConfig,
    pub cull: CullSettings,
    pub light: PointLight,
    /// Draw every textured node with the normal-debug material.
    pub show_normals: bool,
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening scene config {}", path.display()))?;
        let config = serde_json::from_reader(file)
            .with_context(|| format!("parsing scene config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "scene config loaded");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating scene config {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut config = SceneConfig::default();
        config.terrain.seed = Some(9);
        config.cull.max_angle_degrees = 45.0;
        config.show_normals = true;
        config.save(tmp.path()).unwrap();

        let loaded = SceneConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "terrain": {{ "width": 16 }}, "cull": {{ "max_distance": 5.0 }} }}"#).unwrap();

        let loaded = SceneConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded.terrain.width, 16);
        assert_eq!(loaded.terrain.depth, 8);
        assert_eq!(loaded.cull.max_distance, 5.0);
        assert_eq!(loaded.cull.max_angle_degrees, 70.0);
        assert_eq!(loaded.camera, CameraConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{{ not json").unwrap();
        let err = SceneConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("parsing scene config"));
    }
}
