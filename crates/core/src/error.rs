//! Error types for noise-grid.
//!
//! Every variant is a configuration error: it is raised while building a
//! grid, request or evaluator, never in the middle of a pass.

use thiserror::Error;

/// Errors produced while configuring grids, requests and evaluators.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// The grid resolution was zero, not a power of two, or overflowed `usize`.
    #[error("invalid resolution {0}: must be a non-zero power of two")]
    InvalidResolution(usize),

    /// The chunk size was zero or exceeded the number of pixels.
    #[error("invalid chunk size {chunk_size} for a grid of {len} pixels")]
    InvalidChunkSize { chunk_size: usize, len: usize },

    /// A scale component was zero, negative or not finite.
    #[error("invalid scale ({x}, {y}): components must be finite and positive")]
    InvalidScale { x: f32, y: f32 },

    /// A period component cannot tile the lattice of the selected variant.
    #[error("invalid period on {axis} axis: {value} ({reason})")]
    InvalidPeriod {
        axis: char,
        value: f32,
        reason: &'static str,
    },

    /// A periodic variant was requested without a period.
    #[error("periodic variant requested without a period")]
    MissingPeriod,

    /// A period was supplied to a variant that does not tile.
    #[error("variant {0} does not support a period")]
    UnsupportedPeriod(String),

    /// An offset or rotation angle was not finite.
    #[error("invalid parameter '{name}': {value} is not finite")]
    InvalidParameter { name: &'static str, value: f32 },

    /// A pixel buffer did not match the grid it was evaluated against.
    #[error("dimension mismatch: grid has {expected} pixels, buffer has {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A worker pool was requested with zero threads.
    #[error("invalid worker count: at least one worker is required")]
    InvalidWorkerCount,

    /// The worker thread pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// A variant name was not recognized.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}
