//! Per-frame noise requests.
//!
//! A [`NoiseRequest`] is an immutable snapshot of everything a pass needs:
//! the resolved [`Kernel`], the pixel-to-noise-space mapping and the offset.
//! Requests are built with [`RequestBuilder`], which validates every field
//! so that a pass never has to.

use glam::{Vec2, Vec4};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::kernel::{FlowFlags, Kernel, NoiseKind, NoiseSample, Variant};

/// Which pixel maps onto the request offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Pixel `(0, 0)`.
    #[default]
    Corner,
    /// Pixel `(width/2, height/2)`.
    Center,
}

/// A validated, immutable description of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseRequest {
    variant: Variant,
    kernel: Kernel,
    scale: Vec2,
    offset: Vec4,
    anchor: Anchor,
}

impl NoiseRequest {
    /// Starts a request for `variant` with unit scale, zero offset and the
    /// variant's default anchor.
    pub fn builder(variant: Variant) -> RequestBuilder {
        RequestBuilder {
            variant,
            scale: Vec2::ONE,
            offset: Vec4::ZERO,
            period: None,
            angle: 0.0,
            anchor: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Noise-space units per pixel on each axis.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn offset(&self) -> Vec4 {
        self.offset
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The tiling period, if the resolved kernel is periodic.
    pub fn period(&self) -> Option<Vec2> {
        self.kernel.period()
    }

    /// Noise-space coordinate of pixel `(x, y)` on a grid `width` pixels wide.
    #[inline]
    pub fn coordinate(&self, x: usize, y: usize, width: usize) -> Vec4 {
        let origin = match self.anchor {
            Anchor::Corner => Vec2::ZERO,
            Anchor::Center => Vec2::splat((width / 2) as f32),
        };
        let p = (Vec2::new(x as f32, y as f32) - origin) * self.scale;
        self.offset + Vec4::new(p.x, p.y, 0.0, 0.0)
    }

    /// Samples the kernel at pixel `(x, y)`.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, width: usize) -> NoiseSample {
        self.kernel.sample(self.coordinate(x, y, width))
    }
}

/// Builder for [`NoiseRequest`]. Nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    variant: Variant,
    scale: Vec2,
    offset: Vec4,
    period: Option<Vec2>,
    angle: f32,
    anchor: Option<Anchor>,
}

impl RequestBuilder {
    /// Uniform scale on both axes.
    pub fn scale(self, scale: f32) -> Self {
        self.scale_xy(Vec2::splat(scale))
    }

    pub fn scale_xy(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn offset(mut self, offset: Vec4) -> Self {
        self.offset = offset;
        self
    }

    /// Tiling period. Required by periodic flow noise; turns classic 2D into
    /// its periodic form; rejected by every other variant.
    pub fn period(mut self, period: Vec2) -> Self {
        self.period = Some(period);
        self
    }

    /// Gradient rotation in radians. Only read by flow noise with the
    /// rotation flag set.
    pub fn rotation(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Validates the parameters and resolves the kernel.
    pub fn build(self) -> Result<NoiseRequest, NoiseError> {
        let RequestBuilder {
            variant,
            scale,
            offset,
            period,
            angle,
            anchor,
        } = self;

        if !(scale.is_finite() && scale.x > 0.0 && scale.y > 0.0) {
            return Err(NoiseError::InvalidScale {
                x: scale.x,
                y: scale.y,
            });
        }
        if !offset.is_finite() {
            let value = offset
                .to_array()
                .into_iter()
                .find(|c| !c.is_finite())
                .unwrap_or(f32::NAN);
            return Err(NoiseError::InvalidParameter {
                name: "offset",
                value,
            });
        }
        if !angle.is_finite() {
            return Err(NoiseError::InvalidParameter {
                name: "rotation",
                value: angle,
            });
        }

        let kernel = match variant {
            Variant::Lattice(kind) => lattice_kernel(kind, period)?,
            Variant::Flow(flags) => flow_kernel(flags, period, angle)?,
        };
        let anchor = anchor.unwrap_or(match variant {
            Variant::Flow(FlowFlags {
                periodic: false, ..
            }) => Anchor::Center,
            _ => Anchor::Corner,
        });

        debug!(
            "resolved {variant} to {kernel:?} (scale {scale}, offset {offset}, {anchor:?})"
        );

        Ok(NoiseRequest {
            variant,
            kernel,
            scale,
            offset,
            anchor,
        })
    }
}

fn lattice_kernel(kind: NoiseKind, period: Option<Vec2>) -> Result<Kernel, NoiseError> {
    match (kind, period) {
        (NoiseKind::Classic2D, Some(period)) => {
            check_integer_period('x', period.x, false)?;
            check_integer_period('y', period.y, false)?;
            Ok(Kernel::PeriodicClassic2 { period })
        }
        (kind, Some(_)) => Err(NoiseError::UnsupportedPeriod(kind.to_string())),
        (NoiseKind::Classic2D, None) => Ok(Kernel::Classic2),
        (NoiseKind::Classic3D, None) => Ok(Kernel::Classic3),
        (NoiseKind::Classic4D, None) => Ok(Kernel::Classic4),
        (NoiseKind::Simplex2D, None) => Ok(Kernel::Simplex2),
        (NoiseKind::Simplex3D, None) => Ok(Kernel::Simplex3),
        (NoiseKind::Simplex4D, None) => Ok(Kernel::Simplex4),
    }
}

fn flow_kernel(flags: FlowFlags, period: Option<Vec2>, angle: f32) -> Result<Kernel, NoiseError> {
    let period = match (flags.periodic, period) {
        (true, Some(period)) => {
            check_integer_period('x', period.x, false)?;
            check_integer_period('y', period.y, true)?;
            Some(period)
        }
        (true, None) => return Err(NoiseError::MissingPeriod),
        (false, Some(_)) => return Err(NoiseError::UnsupportedPeriod(Variant::Flow(flags).to_string())),
        (false, None) => None,
    };

    let kernel = match (period, flags.derivative, flags.rotation) {
        (None, false, false) => Kernel::Flow,
        (None, false, true) => Kernel::FlowRotating { angle },
        (None, true, false) => Kernel::FlowGradient,
        (None, true, true) => Kernel::FlowGradientRotating { angle },
        (Some(period), false, false) => Kernel::PeriodicFlow { period },
        (Some(period), false, true) => Kernel::PeriodicFlowRotating { period, angle },
        (Some(period), true, false) => Kernel::PeriodicFlowGradient { period },
        (Some(period), true, true) => Kernel::PeriodicFlowGradientRotating { period, angle },
    };
    Ok(kernel)
}

fn check_integer_period(axis: char, value: f32, even: bool) -> Result<(), NoiseError> {
    let reason = if !value.is_finite() || value <= 0.0 {
        "must be finite and positive"
    } else if value.fract() != 0.0 {
        "must be an integer"
    } else if even && value % 2.0 != 0.0 {
        "must be an even integer"
    } else {
        return Ok(());
    };
    Err(NoiseError::InvalidPeriod {
        axis,
        value,
        reason,
    })
}
