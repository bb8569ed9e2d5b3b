//! RGBA8 output buffer and the sample-to-pixel mapping.

use noise_grid_core::grid::GridConfig;
use noise_grid_core::kernel::NoiseSample;

/// Maps a noise channel in `[-1, 1]` to a byte: `saturate(c * 0.5 + 0.5)`,
/// then truncated after scaling by 255.
#[inline]
pub fn quantize(c: f32) -> u8 {
    let c = (c * 0.5 + 0.5).clamp(0.0, 1.0);
    (c * 255.0) as u8
}

/// Converts one sample to an opaque pixel. Scalar samples are grey; gradient
/// samples put the value in red and the x/y derivatives in green/blue.
#[inline]
pub fn shade(sample: NoiseSample) -> [u8; 4] {
    let [r, g, b] = sample.channels().map(quantize);
    [r, g, b, 255]
}

/// Row-major RGBA8 pixels for one grid, reused across passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    pixels: Vec<[u8; 4]>,
}

impl PixelBuffer {
    /// Creates a transparent-black buffer sized for `config`.
    pub fn new(config: &GridConfig) -> Self {
        Self::filled(config, [0; 4])
    }

    /// Creates a buffer sized for `config` with every pixel set to `pixel`.
    pub fn filled(config: &GridConfig, pixel: [u8; 4]) -> Self {
        Self {
            width: config.width(),
            pixels: vec![pixel; config.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    /// Pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the grid.
    pub fn row(&self, y: usize) -> &[[u8; 4]] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// The buffer as `len * 4` bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Mean of each RGBA channel over the whole buffer.
    pub fn mean_channels(&self) -> [f64; 4] {
        let mut sums = [0u64; 4];
        for pixel in &self.pixels {
            for (sum, &c) in sums.iter_mut().zip(pixel) {
                *sum += u64::from(c);
            }
        }
        let n = self.pixels.len().max(1) as f64;
        sums.map(|s| s as f64 / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn quantize_maps_range_endpoints() {
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.0), 127);
    }

    #[test]
    fn quantize_saturates_out_of_range() {
        assert_eq!(quantize(-3.0), 0);
        assert_eq!(quantize(7.5), 255);
    }

    #[test]
    fn quantize_truncates() {
        // 0.5 * 255 = 127.5 and 0.999 * 255 = 254.7
        assert_eq!(quantize(0.0), 127);
        assert_eq!(quantize(0.998), 254);
    }

    #[test]
    fn shade_scalar_is_grey_and_opaque() {
        assert_eq!(shade(NoiseSample::Value(1.0)), [255, 255, 255, 255]);
        assert_eq!(shade(NoiseSample::Value(-1.0)), [0, 0, 0, 255]);
    }

    #[test]
    fn shade_gradient_uses_three_channels() {
        let pixel = shade(NoiseSample::Gradient(Vec3::new(1.0, -1.0, 0.0)));
        assert_eq!(pixel, [255, 0, 127, 255]);
    }

    #[test]
    fn buffer_matches_grid() {
        let config = GridConfig::new(8).unwrap();
        let buffer = PixelBuffer::new(&config);
        assert_eq!(buffer.len(), 64);
        assert_eq!(buffer.width(), 8);
        assert_eq!(buffer.as_bytes().len(), 256);
        assert_eq!(buffer.row(7).len(), 8);
    }

    #[test]
    fn as_bytes_is_row_major_rgba() {
        let config = GridConfig::new(2).unwrap();
        let mut buffer = PixelBuffer::new(&config);
        buffer.pixels_mut()[1] = [1, 2, 3, 4];
        assert_eq!(&buffer.as_bytes()[4..8], &[1, 2, 3, 4]);
        assert_eq!(buffer.row(0)[1], [1, 2, 3, 4]);
    }

    #[test]
    fn mean_channels_averages_each_channel() {
        let config = GridConfig::new(2).unwrap();
        let mut buffer = PixelBuffer::filled(&config, [0, 100, 200, 255]);
        buffer.pixels_mut()[0] = [40, 100, 0, 255];
        assert_eq!(buffer.mean_channels(), [10.0, 100.0, 150.0, 255.0]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn quantize_is_monotonic(a in -2.0f32..2.0, b in -2.0f32..2.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(quantize(lo) <= quantize(hi));
            }

            #[test]
            fn shade_is_always_opaque(v in -5.0f32..5.0, dx in -50.0f32..50.0, dy in -50.0f32..50.0) {
                prop_assert_eq!(shade(NoiseSample::Value(v))[3], 255);
                prop_assert_eq!(shade(NoiseSample::Gradient(Vec3::new(v, dx, dy)))[3], 255);
            }

            #[test]
            fn scalar_shade_is_grey(v in -1.5f32..1.5) {
                let [r, g, b, _] = shade(NoiseSample::Value(v));
                prop_assert_eq!(r, g);
                prop_assert_eq!(g, b);
            }
        }
    }
}
