//! Square evaluation grid and its chunking for parallel passes.

use crate::error::NoiseError;

/// Default grid resolution, 512×512.
pub const DEFAULT_RESOLUTION: usize = 0x200;

/// Pixels per unit of parallel work.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// A square, power-of-two grid plus the chunk size used to split it.
///
/// Immutable once built; an evaluator keeps the same config for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    resolution: usize,
    chunk_size: usize,
}

impl GridConfig {
    /// Creates a `resolution × resolution` grid with the default chunk size
    /// (reduced to the pixel count for grids smaller than one chunk).
    ///
    /// Returns `NoiseError::InvalidResolution` if `resolution` is zero, not a
    /// power of two, or if `resolution²` overflows `usize`.
    pub fn new(resolution: usize) -> Result<Self, NoiseError> {
        if !resolution.is_power_of_two() {
            return Err(NoiseError::InvalidResolution(resolution));
        }
        let len = resolution
            .checked_mul(resolution)
            .ok_or(NoiseError::InvalidResolution(resolution))?;
        Ok(Self {
            resolution,
            chunk_size: DEFAULT_CHUNK_SIZE.min(len),
        })
    }

    /// Replaces the chunk size.
    ///
    /// Returns `NoiseError::InvalidChunkSize` if `chunk_size` is zero or larger
    /// than the number of pixels.
    pub fn with_chunk_size(self, chunk_size: usize) -> Result<Self, NoiseError> {
        let len = self.len();
        if chunk_size == 0 || chunk_size > len {
            return Err(NoiseError::InvalidChunkSize { chunk_size, len });
        }
        Ok(Self { chunk_size, ..self })
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.resolution
    }

    /// Grid height in pixels; always equal to the width.
    pub fn height(&self) -> usize {
        self.resolution
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Always `false`: a valid grid has at least one pixel.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks a pass dispatches, counting a trailing partial chunk.
    pub fn chunk_count(&self) -> usize {
        self.len().div_ceil(self.chunk_size)
    }

    /// Pixel `(x, y)` of linear index `i` in row-major order.
    #[inline]
    pub fn position(&self, i: usize) -> (usize, usize) {
        let y = i / self.resolution;
        let x = i - y * self.resolution;
        (x, y)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_powers_of_two() {
        for resolution in [1, 2, 4, 64, 512, 1024] {
            let grid = GridConfig::new(resolution).unwrap();
            assert_eq!(grid.width(), resolution);
            assert_eq!(grid.height(), resolution);
            assert_eq!(grid.len(), resolution * resolution);
        }
    }

    #[test]
    fn new_rejects_zero() {
        assert!(matches!(
            GridConfig::new(0),
            Err(NoiseError::InvalidResolution(0))
        ));
    }

    #[test]
    fn new_rejects_non_powers_of_two() {
        for resolution in [3, 100, 513] {
            assert!(matches!(
                GridConfig::new(resolution),
                Err(NoiseError::InvalidResolution(r)) if r == resolution
            ));
        }
    }

    #[test]
    fn new_rejects_overflowing_resolution() {
        let huge = 1usize << (usize::BITS - 1);
        assert!(GridConfig::new(huge).is_err());
    }

    #[test]
    fn default_chunk_size_shrinks_for_tiny_grids() {
        assert_eq!(GridConfig::new(4).unwrap().chunk_size(), 16);
        assert_eq!(GridConfig::new(512).unwrap().chunk_size(), 64);
    }

    #[test]
    fn default_is_512_square() {
        let grid = GridConfig::default();
        assert_eq!(grid, GridConfig::new(512).unwrap());
    }

    #[test]
    fn with_chunk_size_validates_range() {
        let grid = GridConfig::new(8).unwrap();
        assert_eq!(grid.with_chunk_size(64).unwrap().chunk_size(), 64);
        assert_eq!(grid.with_chunk_size(1).unwrap().chunk_size(), 1);
        assert!(matches!(
            grid.with_chunk_size(0),
            Err(NoiseError::InvalidChunkSize { chunk_size: 0, len: 64 })
        ));
        assert!(matches!(
            grid.with_chunk_size(65),
            Err(NoiseError::InvalidChunkSize { chunk_size: 65, len: 64 })
        ));
    }

    #[test]
    fn chunk_count_includes_partial_chunk() {
        let grid = GridConfig::new(8).unwrap().with_chunk_size(10).unwrap();
        assert_eq!(grid.chunk_count(), 7);
    }

    #[test]
    fn position_is_row_major() {
        let grid = GridConfig::new(4).unwrap();
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(3), (3, 0));
        assert_eq!(grid.position(4), (0, 1));
        assert_eq!(grid.position(15), (3, 3));
    }
}
