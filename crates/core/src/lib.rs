#![deny(unsafe_code)]
//! Core types for the noise-grid procedural noise system.
//!
//! Provides the noise kernels (classic and simplex gradient noise in 2D/3D/4D,
//! and 2D flow noise with tiling, rotation and analytic derivatives), the
//! `GridConfig`/`NoiseRequest` data model and the `NoiseError` type.

pub mod error;
pub mod grid;
pub mod kernel;
pub mod noise;
pub mod request;

pub use error::NoiseError;
pub use grid::GridConfig;
pub use kernel::{FlowFlags, Kernel, NoiseKind, NoiseSample, Variant};
pub use request::{Anchor, NoiseRequest, RequestBuilder};
