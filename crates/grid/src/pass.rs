//! One parallel evaluation pass over a grid.

use std::time::Instant;

use log::trace;
use noise_grid_core::error::NoiseError;
use noise_grid_core::grid::GridConfig;
use noise_grid_core::request::NoiseRequest;
use rayon::prelude::*;

use crate::pixel::{shade, PixelBuffer};

/// Evaluates `request` at every pixel of `config` and writes the result into
/// `buffer`.
///
/// The buffer is split into contiguous chunks of `config.chunk_size()` pixels
/// which run on the current rayon pool. Every pixel is written exactly once,
/// and the call returns only after all chunks have finished.
///
/// Returns `NoiseError::DimensionMismatch` if `buffer` was sized for a
/// different grid; nothing is written in that case.
pub fn evaluate_pass(
    config: &GridConfig,
    request: &NoiseRequest,
    buffer: &mut PixelBuffer,
) -> Result<(), NoiseError> {
    if buffer.len() != config.len() || buffer.width() != config.width() {
        return Err(NoiseError::DimensionMismatch {
            expected: config.len(),
            got: buffer.len(),
        });
    }

    let width = config.width();
    let chunk_size = config.chunk_size();
    let start = Instant::now();

    buffer
        .pixels_mut()
        .par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk, pixels)| {
            let base = chunk * chunk_size;
            for (offset, pixel) in pixels.iter_mut().enumerate() {
                let (x, y) = config.position(base + offset);
                *pixel = shade(request.sample(x, y, width));
            }
        });

    trace!(
        "{} pass over {}x{} in {} chunks took {:?}",
        request.variant(),
        width,
        config.height(),
        config.chunk_count(),
        start.elapsed()
    );
    Ok(())
}
