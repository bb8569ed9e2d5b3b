//! Pure noise functions. None of them allocate or touch shared state, so they
//! can be called from any number of threads at once.
//!
//! - [`classic`]: Perlin gradient noise in 2D/3D/4D, plus a tiling 2D form.
//! - [`simplex`]: simplex gradient noise in 2D/3D/4D.
//! - [`flow`]: 2D simplex noise with rotating gradients, tiling and
//!   analytic derivatives.

pub mod classic;
pub mod flow;
mod lattice;
pub mod simplex;
