//! Variant selection and the resolved per-pixel kernel.
//!
//! A [`Variant`] is what a host asks for: one of six [`NoiseKind`]s, or flow
//! noise with a set of [`FlowFlags`]. A [`Kernel`] is what the evaluator runs:
//! a closed enumeration with the period and angle baked in, resolved once per
//! request so a pass only dispatches on a single `match`.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::noise::{classic, flow, simplex};

/// The six lattice noise functions over 2, 3 or 4 input axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseKind {
    #[serde(rename = "classic2d")]
    Classic2D,
    #[serde(rename = "classic3d")]
    Classic3D,
    #[serde(rename = "classic4d")]
    Classic4D,
    #[default]
    #[serde(rename = "simplex2d")]
    Simplex2D,
    #[serde(rename = "simplex3d")]
    Simplex3D,
    #[serde(rename = "simplex4d")]
    Simplex4D,
}

impl NoiseKind {
    /// Every kind, in declaration order.
    pub const ALL: [NoiseKind; 6] = [
        NoiseKind::Classic2D,
        NoiseKind::Classic3D,
        NoiseKind::Classic4D,
        NoiseKind::Simplex2D,
        NoiseKind::Simplex3D,
        NoiseKind::Simplex4D,
    ];

    /// Number of input axes the kind reads from a coordinate.
    pub fn dimensions(self) -> usize {
        match self {
            NoiseKind::Classic2D | NoiseKind::Simplex2D => 2,
            NoiseKind::Classic3D | NoiseKind::Simplex3D => 3,
            NoiseKind::Classic4D | NoiseKind::Simplex4D => 4,
        }
    }

    /// Lowercase name used on the command line and in JSON parameters.
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Classic2D => "classic2d",
            NoiseKind::Classic3D => "classic3d",
            NoiseKind::Classic4D => "classic4d",
            NoiseKind::Simplex2D => "simplex2d",
            NoiseKind::Simplex3D => "simplex3d",
            NoiseKind::Simplex4D => "simplex4d",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoiseKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| NoiseError::UnknownVariant(s.to_string()))
    }
}

/// Options of 2D flow noise. All eight combinations are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowFlags {
    /// Tile against a per-axis period.
    pub periodic: bool,
    /// Return analytic partial derivatives with the value.
    pub derivative: bool,
    /// Rotate the gradients by the request's angle.
    pub rotation: bool,
}

/// What a request asks to be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Lattice(NoiseKind),
    Flow(FlowFlags),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Lattice(NoiseKind::default())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Lattice(kind) => write!(f, "{kind}"),
            Variant::Flow(flags) => {
                f.write_str("flow")?;
                for (set, name) in [
                    (flags.periodic, "periodic"),
                    (flags.derivative, "derivative"),
                    (flags.rotation, "rotation"),
                ] {
                    if set {
                        write!(f, "+{name}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// One sample of a kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseSample {
    /// A scalar, roughly in `[-1, 1]`.
    Value(f32),
    /// `(value, d/dx, d/dy)`.
    Gradient(Vec3),
}

impl NoiseSample {
    /// The scalar noise value.
    pub fn value(self) -> f32 {
        match self {
            NoiseSample::Value(v) => v,
            NoiseSample::Gradient(g) => g.x,
        }
    }

    /// Three display channels: the value repeated, or value and derivatives.
    pub fn channels(self) -> [f32; 3] {
        match self {
            NoiseSample::Value(v) => [v; 3],
            NoiseSample::Gradient(g) => g.to_array(),
        }
    }
}

/// A fully resolved evaluation path.
///
/// Constructed by [`RequestBuilder::build`](crate::request::RequestBuilder::build),
/// which validates periods and angles first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    Classic2,
    Classic3,
    Classic4,
    PeriodicClassic2 { period: Vec2 },
    Simplex2,
    Simplex3,
    Simplex4,
    Flow,
    FlowRotating { angle: f32 },
    FlowGradient,
    FlowGradientRotating { angle: f32 },
    PeriodicFlow { period: Vec2 },
    PeriodicFlowRotating { period: Vec2, angle: f32 },
    PeriodicFlowGradient { period: Vec2 },
    PeriodicFlowGradientRotating { period: Vec2, angle: f32 },
}

impl Kernel {
    /// Evaluates the kernel at `p`. Components beyond the kernel's
    /// dimensionality are ignored.
    #[inline]
    pub fn sample(&self, p: Vec4) -> NoiseSample {
        let xy = Vec2::new(p.x, p.y);
        match *self {
            Kernel::Classic2 => NoiseSample::Value(classic::noise2(xy)),
            Kernel::Classic3 => NoiseSample::Value(classic::noise3(p.truncate())),
            Kernel::Classic4 => NoiseSample::Value(classic::noise4(p)),
            Kernel::PeriodicClassic2 { period } => {
                NoiseSample::Value(classic::periodic2(xy, period))
            }
            Kernel::Simplex2 => NoiseSample::Value(simplex::noise2(xy)),
            Kernel::Simplex3 => NoiseSample::Value(simplex::noise3(p.truncate())),
            Kernel::Simplex4 => NoiseSample::Value(simplex::noise4(p)),
            Kernel::Flow => NoiseSample::Value(flow::noise(xy, 0.0)),
            Kernel::FlowRotating { angle } => NoiseSample::Value(flow::noise(xy, angle)),
            Kernel::FlowGradient => NoiseSample::Gradient(flow::noise_with_gradient(xy, 0.0)),
            Kernel::FlowGradientRotating { angle } => {
                NoiseSample::Gradient(flow::noise_with_gradient(xy, angle))
            }
            Kernel::PeriodicFlow { period } => {
                NoiseSample::Value(flow::periodic(xy, period, 0.0))
            }
            Kernel::PeriodicFlowRotating { period, angle } => {
                NoiseSample::Value(flow::periodic(xy, period, angle))
            }
            Kernel::PeriodicFlowGradient { period } => {
                NoiseSample::Gradient(flow::periodic_with_gradient(xy, period, 0.0))
            }
            Kernel::PeriodicFlowGradientRotating { period, angle } => {
                NoiseSample::Gradient(flow::periodic_with_gradient(xy, period, angle))
            }
        }
    }

    /// Whether samples carry derivatives.
    pub fn has_gradient(&self) -> bool {
        matches!(
            self,
            Kernel::FlowGradient
                | Kernel::FlowGradientRotating { .. }
                | Kernel::PeriodicFlowGradient { .. }
                | Kernel::PeriodicFlowGradientRotating { .. }
        )
    }

    /// The tiling period, if the kernel is periodic.
    pub fn period(&self) -> Option<Vec2> {
        match *self {
            Kernel::PeriodicClassic2 { period }
            | Kernel::PeriodicFlow { period }
            | Kernel::PeriodicFlowRotating { period, .. }
            | Kernel::PeriodicFlowGradient { period }
            | Kernel::PeriodicFlowGradientRotating { period, .. } => Some(period),
            _ => None,
        }
    }
}
