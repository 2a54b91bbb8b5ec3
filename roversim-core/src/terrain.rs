use fastrand::Rng;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::heightgrid::HeightGrid;

/// Fixed noise amplitude keeping slopes gentle enough to drive on.
pub const NOISE_AMPLITUDE: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Heightmap resolution; the grid is resolution x resolution.
    pub resolution: usize,
    /// Noise frequency scale. Larger values pack more features into the grid.
    pub scale: f32,
    /// World-space vertical scale handed to the terrain consumer.
    pub depth: f32,
    /// Number of random drop-off depressions carved after smoothing.
    pub drop_off_count: usize,
    /// Radius of each drop-off, in cells.
    pub drop_off_radius: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 129,
            scale: 50.0,
            depth: 20.0,
            drop_off_count: 6,
            drop_off_radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TerrainError {
    ZeroResolution,
    NonPositiveScale(f32),
    NonPositiveDepth(f32),
    NonPositiveDropOffRadius(f32),
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroResolution => write!(f, "heightmap resolution must be non-zero"),
            Self::NonPositiveScale(scale) => write!(f, "noise scale must be positive, got {scale}"),
            Self::NonPositiveDepth(depth) => {
                write!(f, "terrain depth must be positive, got {depth}")
            }
            Self::NonPositiveDropOffRadius(radius) => {
                write!(f, "drop-off radius must be positive, got {radius}")
            }
        }
    }
}

impl std::error::Error for TerrainError {}

/// A localized multiplicative depression: full height at the center,
/// falling off linearly to zero at the rim. Ephemeral, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropOffSpec {
    pub center_x: usize,
    pub center_y: usize,
    pub radius: f32,
}

pub struct TerrainGenerator {
    config: TerrainConfig,
    perlin: Perlin,
    seed: u32,
}

impl TerrainGenerator {
    /// Fails fast when the surface description is unusable; no partial
    /// grid is ever produced from a bad configuration.
    pub fn new(config: TerrainConfig, seed: u32) -> Result<Self, TerrainError> {
        if config.resolution == 0 {
            return Err(TerrainError::ZeroResolution);
        }
        if !(config.scale > 0.0) || !config.scale.is_finite() {
            return Err(TerrainError::NonPositiveScale(config.scale));
        }
        if !(config.depth > 0.0) || !config.depth.is_finite() {
            return Err(TerrainError::NonPositiveDepth(config.depth));
        }
        if config.drop_off_count > 0
            && (!(config.drop_off_radius > 0.0) || !config.drop_off_radius.is_finite())
        {
            return Err(TerrainError::NonPositiveDropOffRadius(config.drop_off_radius));
        }
        Ok(Self {
            config,
            perlin: Perlin::new(seed),
            seed,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// World-space vertical scale the consumer applies to grid values.
    pub fn depth(&self) -> f32 {
        self.config.depth
    }

    /// Noise pass: coherent Perlin heights in [0, NOISE_AMPLITUDE].
    pub fn noise_heights(&self) -> HeightGrid {
        let n = self.config.resolution;
        let scale = self.config.scale as f64;
        let mut grid = HeightGrid::new(n, n).expect("resolution validated at construction");

        for y in 0..n {
            for x in 0..n {
                let nx = x as f64 / n as f64 * scale;
                let ny = y as f64 / n as f64 * scale;
                // Perlin output is in [-1, 1]; remap to [0, 1] before scaling.
                let unit = ((self.perlin.get([nx, ny]) + 1.0) / 2.0).clamp(0.0, 1.0);
                grid.set(x, y, unit as f32 * NOISE_AMPLITUDE);
            }
        }

        grid
    }

    /// Full pipeline: noise, one smoothing pass, then the configured
    /// number of random drop-offs. Deterministic for a given seed.
    pub fn generate(&self) -> HeightGrid {
        let mut grid = self.noise_heights();
        smooth(&mut grid);

        let mut rng = Rng::with_seed(self.seed as u64);
        for spec in self.random_drop_offs(&mut rng) {
            apply_drop_off(&mut grid, &spec);
        }

        log::info!(
            "generated {}x{} terrain (seed {}, heights {:.4}..{:.4})",
            grid.width(),
            grid.height(),
            self.seed,
            grid.min(),
            grid.max(),
        );
        grid
    }

    fn random_drop_offs(&self, rng: &mut Rng) -> Vec<DropOffSpec> {
        let n = self.config.resolution;
        (0..self.config.drop_off_count)
            .map(|_| DropOffSpec {
                center_x: rng.usize(0..n),
                center_y: rng.usize(0..n),
                radius: self.config.drop_off_radius,
            })
            .collect()
    }
}

/// Single smoothing pass: each interior cell becomes the mean of itself
/// and its 4 orthogonal neighbours. The border ring is left untouched.
pub fn smooth(grid: &mut HeightGrid) {
    let (w, h) = (grid.width(), grid.height());
    if w < 3 || h < 3 {
        return;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mean = (grid.get(x, y)
                + grid.get(x - 1, y)
                + grid.get(x + 1, y)
                + grid.get(x, y - 1)
                + grid.get(x, y + 1))
                / 5.0;
            grid.set(x, y, mean);
        }
    }
}

/// Multiplies every cell within `spec.radius` of the center by
/// `clamp01(1 - distance / radius)`: unchanged at the center, zero at
/// the rim, untouched beyond it. Lookups clip to the grid bounds.
pub fn apply_drop_off(grid: &mut HeightGrid, spec: &DropOffSpec) {
    let radius = spec.radius;
    if !(radius > 0.0) {
        return;
    }
    let reach = radius.ceil() as isize;
    let (cx, cy) = (spec.center_x as isize, spec.center_y as isize);
    let x_min = (cx - reach).max(0) as usize;
    let x_max = ((cx + reach) as usize).min(grid.width() - 1);
    let y_min = (cy - reach).max(0) as usize;
    let y_max = ((cy + reach) as usize).min(grid.height() - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 - spec.center_x as f32;
            let dy = y as f32 - spec.center_y as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= radius {
                let factor = (1.0 - distance / radius).clamp(0.0, 1.0);
                grid.set(x, y, grid.get(x, y) * factor);
            }
        }
    }
}
