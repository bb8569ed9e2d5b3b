#![deny(unsafe_code)]
//! Parallel grid evaluation for noise-grid.
//!
//! Fans a [`NoiseRequest`](noise_grid_core::request::NoiseRequest) out over
//! every pixel of a square grid with rayon and writes RGBA8 pixels into a
//! reusable [`PixelBuffer`]. The [`animation`] module maps host-facing frame
//! settings and a time value to a request.

pub mod animation;
pub mod evaluator;
pub mod pass;
pub mod pixel;

pub use animation::{FrameSettings, Pattern};
pub use evaluator::GridEvaluator;
pub use pass::evaluate_pass;
pub use pixel::{quantize, shade, PixelBuffer};
