use serde::{Deserialize, Serialize};

/// Row-major grid of normalized terrain heights in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    ZeroSized,
    InvalidCellCount { expected: usize, actual: usize },
}

impl HeightGrid {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized);
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width * height],
        })
    }

    pub fn from_data(width: usize, height: usize, data: Vec<f32>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized);
        }
        if data.len() != width * height {
            return Err(GridError::InvalidCellCount {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[f32] {
        &self.data
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let index = self.index(x, y);
        self.data[index] = value;
    }

    /// Reads a cell with signed indices clipped to the grid bounds.
    /// Out-of-range lookups are a boundary policy, not an error.
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.get(cx, cy)
    }

    /// Sample height at a fractional position (bilinear interpolation).
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let fx = x.clamp(0.0, (self.width - 1) as f32);
        let fy = y.clamp(0.0, (self.height - 1) as f32);

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let tx = fx - fx.floor();
        let ty = fy - fy.floor();

        let h00 = self.get(x0, y0);
        let h10 = self.get(x1, y0);
        let h01 = self.get(x0, y1);
        let h11 = self.get(x1, y1);

        let h0 = h00 * (1.0 - tx) + h10 * tx;
        let h1 = h01 * (1.0 - tx) + h11 * tx;

        h0 * (1.0 - ty) + h1 * ty
    }

    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> HeightGrid {
        // 3x3 grid rising left to right: columns 0.0, 0.5, 1.0.
        let data = vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0, 0.0, 0.5, 1.0];
        HeightGrid::from_data(3, 3, data).unwrap()
    }

    #[test]
    fn rejects_zero_sized_grid() {
        assert_eq!(HeightGrid::new(0, 4), Err(GridError::ZeroSized));
        assert_eq!(HeightGrid::new(4, 0), Err(GridError::ZeroSized));
    }

    #[test]
    fn rejects_mismatched_cell_count() {
        assert_eq!(
            HeightGrid::from_data(2, 2, vec![0.0; 3]),
            Err(GridError::InvalidCellCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn set_and_get_cell() {
        let mut grid = HeightGrid::new(4, 3).unwrap();
        grid.set(3, 2, 0.75);
        assert_eq!(grid.get(3, 2), 0.75);
    }

    #[test]
    fn clamped_reads_clip_to_bounds() {
        let grid = ramp_grid();
        assert_eq!(grid.get_clamped(-5, 1), grid.get(0, 1));
        assert_eq!(grid.get_clamped(10, 1), grid.get(2, 1));
        assert_eq!(grid.get_clamped(1, -1), grid.get(1, 0));
        assert_eq!(grid.get_clamped(1, 99), grid.get(1, 2));
    }

    #[test]
    fn sample_interpolates_between_cells() {
        let grid = ramp_grid();
        assert_eq!(grid.sample(0.0, 0.0), 0.0);
        assert_eq!(grid.sample(2.0, 2.0), 1.0);
        let mid = grid.sample(0.5, 1.0);
        assert!((mid - 0.25).abs() < 1e-6);
    }

    #[test]
    fn sample_clamps_outside_positions() {
        let grid = ramp_grid();
        assert_eq!(grid.sample(-3.0, 1.0), 0.0);
        assert_eq!(grid.sample(50.0, 1.0), 1.0);
    }

    #[test]
    fn min_and_max_scan_all_cells() {
        let grid = ramp_grid();
        assert_eq!(grid.min(), 0.0);
        assert_eq!(grid.max(), 1.0);
    }
}
