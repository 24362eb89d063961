use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Tallest block a config may ask for.
pub const MAX_HEIGHT_LIMIT: u32 = u16::MAX as u32;

/// Largest number of cells a field may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Errors from building a terrain field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("terrain grid must be at least 1x1, got {width}x{depth}")]
    EmptyGrid { width: usize, depth: usize },
    #[error("terrain grid {width}x{depth} exceeds {} cells", MAX_CELLS)]
    GridTooLarge { width: usize, depth: usize },
    #[error("max height {0} exceeds the limit of {limit}", limit = MAX_HEIGHT_LIMIT)]
    MaxHeightTooLarge(u32),
    #[error("height bias must be finite and positive, got {0}")]
    InvalidBias(f32),
    #[error("block scale must be finite and positive, got {0}")]
    InvalidBlockScale(f32),
    #[error("expected {expected} heights for the grid, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("height {height} at ({x}, {z}) exceeds max height {max_height}")]
    HeightOutOfRange {
        x: usize,
        z: usize,
        height: u32,
        max_height: u32,
    },
}

/// Terrain generation and placement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along X.
    pub width: usize,
    /// Cells along Z.
    pub depth: usize,
    pub max_height: u32,
    /// Exponent applied to the uniform sample. Values above 1 favor low blocks.
    pub bias: f32,
    /// Fixed seed for reproducible fields. Random when absent.
    pub seed: Option<u64>,
    /// Horizontal block size; block height is `block_scale * height`.
    pub block_scale: f32,
    pub texture_unit: u16,
    /// Vertical bob of each block, in parent units. Zero disables it.
    pub bob_amplitude: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 8,
            depth: 8,
            max_height: 4,
            bias: 3.0,
            seed: None,
            block_scale: 0.2,
            texture_unit: 2,
            bob_amplitude: 0.0,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), TerrainError> {
        self.cell_count()?;
        if self.max_height > MAX_HEIGHT_LIMIT {
            return Err(TerrainError::MaxHeightTooLarge(self.max_height));
        }
        if !(self.bias.is_finite() && self.bias > 0.0) {
            return Err(TerrainError::InvalidBias(self.bias));
        }
        if !(self.block_scale.is_finite() && self.block_scale > 0.0) {
            return Err(TerrainError::InvalidBlockScale(self.block_scale));
        }
        Ok(())
    }

    /// Number of cells in the grid, rejecting empty or oversized grids.
    pub fn cell_count(&self) -> Result<usize, TerrainError> {
        if self.width == 0 || self.depth == 0 {
            return Err(TerrainError::EmptyGrid {
                width: self.width,
                depth: self.depth,
            });
        }
        self.width
            .checked_mul(self.depth)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(TerrainError::GridTooLarge {
                width: self.width,
                depth: self.depth,
            })
    }
}

/// Map a uniform sample in `[0, 1)` to a block height.
pub fn sample_height(uniform: f32, bias: f32, max_height: u32) -> u32 {
    let scaled = uniform.powf(bias) * (max_height as f32 + 1.0);
    (scaled.floor() as u32).min(max_height)
}

/// Fixed grid of block heights, generated once.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainField {
    config: TerrainConfig,
    /// Row-major by X: index `x * depth + z`.
    heights: Vec<u32>,
}

impl TerrainField {
    /// Generate a field from the config's seed, or from entropy when unseeded.
    pub fn generate(config: TerrainConfig) -> Result<Self, TerrainError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate_with(config, &mut rng)
    }

    pub fn generate_with<R: Rng>(
        config: TerrainConfig,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        let heights = (0..config.cell_count()?)
            .map(|_| sample_height(rng.gen_range(0.0f32..1.0), config.bias, config.max_height))
            .collect();
        let field = Self { config, heights };
        tracing::debug!(
            width = config.width,
            depth = config.depth,
            nonzero = field.nonzero_count(),
            "terrain generated"
        );
        Ok(field)
    }

    /// Build a field from explicit heights, laid out `x * depth + z`.
    pub fn from_heights(config: TerrainConfig, heights: Vec<u32>) -> Result<Self, TerrainError> {
        config.validate()?;
        let expected = config.cell_count()?;
        if heights.len() != expected {
            return Err(TerrainError::ShapeMismatch {
                expected,
                actual: heights.len(),
            });
        }
        if let Some(index) = heights.iter().position(|&h| h > config.max_height) {
            return Err(TerrainError::HeightOutOfRange {
                x: index / config.depth,
                z: index % config.depth,
                height: heights[index],
                max_height: config.max_height,
            });
        }
        Ok(Self { config, heights })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    pub fn height(&self, x: usize, z: usize) -> Option<u32> {
        if x >= self.config.width || z >= self.config.depth {
            return None;
        }
        self.heights.get(x * self.config.depth + z).copied()
    }

    /// Every cell as `(x, z, height)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let depth = self.config.depth;
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i / depth, i % depth, h))
    }

    pub fn nonzero_count(&self) -> usize {
        self.heights.iter().filter(|&&h| h > 0).count()
    }

    pub fn zero_count(&self) -> usize {
        self.heights.len() - self.nonzero_count()
    }

    /// Cell position in the parent's space, with the grid centered on the origin.
    pub fn local_position(&self, x: usize, z: usize) -> Vec3 {
        let half_w = (self.config.width / 2) as f32;
        let half_d = (self.config.depth / 2) as f32;
        Vec3::new(x as f32 - half_w, 0.0, z as f32 - half_d)
    }

    /// The height grid as text, one X row per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for x in 0..self.config.width {
            let row = &self.heights[x * self.config.depth..(x + 1) * self.config.depth];
            for (z, h) in row.iter().enumerate() {
                if z > 0 {
                    out.push(' ');
                }
                out.push_str(&h.to_string());
            }
            out.push('\n');
        }
        out
    }
}
