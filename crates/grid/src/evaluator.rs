//! Long-lived evaluator owning the output buffer and, optionally, a worker pool.

use log::debug;
use noise_grid_core::error::NoiseError;
use noise_grid_core::grid::GridConfig;
use noise_grid_core::request::NoiseRequest;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::pass::evaluate_pass;
use crate::pixel::PixelBuffer;

/// Runs one pass per frame into a buffer allocated once and reused.
///
/// Without an explicit worker count passes run on rayon's global pool.
#[derive(Debug)]
pub struct GridEvaluator {
    config: GridConfig,
    pixels: PixelBuffer,
    pool: Option<ThreadPool>,
}

impl GridEvaluator {
    /// Creates an evaluator on the global rayon pool.
    pub fn new(config: GridConfig) -> Self {
        debug!(
            "evaluator for {}x{} grid, chunk size {}, global pool",
            config.width(),
            config.height(),
            config.chunk_size()
        );
        Self {
            pixels: PixelBuffer::new(&config),
            config,
            pool: None,
        }
    }

    /// Creates an evaluator with a dedicated pool of `workers` threads.
    ///
    /// Returns `NoiseError::InvalidWorkerCount` if `workers` is zero, or
    /// `NoiseError::ThreadPool` if the threads cannot be spawned.
    pub fn with_workers(config: GridConfig, workers: usize) -> Result<Self, NoiseError> {
        if workers == 0 {
            return Err(NoiseError::InvalidWorkerCount);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("noise-grid-{i}"))
            .build()
            .map_err(|e| NoiseError::ThreadPool(e.to_string()))?;
        debug!(
            "evaluator for {}x{} grid, chunk size {}, {workers} workers",
            config.width(),
            config.height(),
            config.chunk_size()
        );
        Ok(Self {
            pixels: PixelBuffer::new(&config),
            config,
            pool: Some(pool),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of threads a pass is spread across.
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Evaluates `request` over the whole grid and returns the filled buffer.
    pub fn evaluate(&mut self, request: &NoiseRequest) -> Result<&PixelBuffer, NoiseError> {
        let Self {
            config,
            pixels,
            pool,
        } = self;
        match pool {
            Some(pool) => pool.install(|| evaluate_pass(config, request, pixels))?,
            None => evaluate_pass(config, request, pixels)?,
        }
        Ok(&self.pixels)
    }

    /// The buffer as left by the last pass.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }
}
