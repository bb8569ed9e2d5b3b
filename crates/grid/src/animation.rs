//! Host-side frame parameters and their per-frame requests.
//!
//! [`FrameSettings`] is what a host exposes to a user; [`FrameSettings::request_at`]
//! turns it into a [`NoiseRequest`] for a given time. Lattice kinds drift
//! their offset with time, while flow noise stays anchored and swirls by
//! rotating its gradients when rotation is enabled.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec4};
use noise_grid_core::error::NoiseError;
use noise_grid_core::grid::GridConfig;
use noise_grid_core::kernel::{FlowFlags, NoiseKind, Variant};
use noise_grid_core::request::{Anchor, NoiseRequest};
use serde::{Deserialize, Serialize};

/// A lattice noise kind, or flow noise configured by the settings' flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Pattern {
    Lattice(NoiseKind),
    Flow,
}

impl Pattern {
    /// Every pattern name, in the order they are listed to users.
    pub fn names() -> impl Iterator<Item = &'static str> {
        NoiseKind::ALL
            .into_iter()
            .map(NoiseKind::name)
            .chain(std::iter::once("flow"))
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Lattice(NoiseKind::default())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Lattice(kind) => write!(f, "{kind}"),
            Pattern::Flow => f.write_str("flow"),
        }
    }
}

impl FromStr for Pattern {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("flow") {
            Ok(Pattern::Flow)
        } else {
            s.parse().map(Pattern::Lattice)
        }
    }
}

impl TryFrom<String> for Pattern {
    type Error = NoiseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

/// User-facing animation parameters.
///
/// Missing JSON fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub variant: Pattern,
    /// Noise-space units across the grid (doubled for flow noise, which
    /// spans `[-frequency, frequency]`).
    pub frequency: f32,
    /// Tile against `period`. Flow noise and classic 2D only.
    pub periodic: bool,
    /// Flow noise: output derivatives in green/blue.
    pub derivative: bool,
    /// Flow noise: rotate gradients by the frame time in radians.
    pub rotation: bool,
    pub period: [f32; 2],
    /// Periods across the grid when tiling.
    pub tiles: u32,
    /// Fixed offset used when tiling.
    pub offset: [f32; 2],
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            variant: Pattern::default(),
            frequency: 2.0,
            periodic: false,
            derivative: false,
            rotation: false,
            period: [4.0, 4.0],
            tiles: 1,
            offset: [0.0, 0.0],
        }
    }
}

impl FrameSettings {
    /// The variant a request built from these settings evaluates.
    pub fn variant(&self) -> Variant {
        match self.variant {
            Pattern::Lattice(kind) => Variant::Lattice(kind),
            Pattern::Flow => Variant::Flow(FlowFlags {
                periodic: self.periodic,
                derivative: self.derivative,
                rotation: self.rotation,
            }),
        }
    }

    /// Builds the request for the frame at `time` seconds on `grid`.
    ///
    /// Errors are the request builder's: an invalid frequency or tile count
    /// surfaces as `InvalidScale`, a bad period as `InvalidPeriod`, and
    /// `periodic` on a kind that cannot tile as `UnsupportedPeriod`.
    pub fn request_at(&self, time: f32, grid: &GridConfig) -> Result<NoiseRequest, NoiseError> {
        let resolution = grid.width() as f32;
        let f = self.frequency;
        let mut builder = NoiseRequest::builder(self.variant());

        if self.periodic {
            let period = Vec2::from_array(self.period);
            builder = builder
                .period(period)
                .scale_xy(period * self.tiles as f32 / resolution)
                .offset(Vec4::new(self.offset[0], self.offset[1], 0.0, 0.0))
                .anchor(Anchor::Corner);
        } else {
            builder = match self.variant {
                Pattern::Lattice(kind) => builder
                    .scale(f / resolution)
                    .offset(drift(kind, time, f))
                    .anchor(Anchor::Corner),
                Pattern::Flow => builder.scale(2.0 * f / resolution).anchor(Anchor::Center),
            };
        }

        if self.rotation {
            builder = builder.rotation(time);
        }
        builder.build()
    }
}

/// Time-dependent offset of a lattice kind: 2D circles with a slowly
/// breathing radius, 3D moves along z, 4D circles in the z/w plane.
pub fn drift(kind: NoiseKind, time: f32, frequency: f32) -> Vec4 {
    let t = time;
    let amp = (t / 5.0).cos() * frequency * 2.0;
    match kind.dimensions() {
        2 => Vec4::new(t.cos(), t.sin(), 0.0, 0.0) * amp,
        3 => Vec4::new(-0.5, -0.5, t / 2.0, 0.0) * frequency,
        _ => Vec4::new(
            -0.5 * frequency,
            -0.5 * frequency,
            t.cos() * amp,
            t.sin() * amp,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise_grid_core::kernel::Kernel;

    fn grid() -> GridConfig {
        GridConfig::new(512).unwrap()
    }

    // -- Pattern --

    #[test]
    fn pattern_parses_kinds_and_flow() {
        assert_eq!("flow".parse::<Pattern>().unwrap(), Pattern::Flow);
        assert_eq!(
            "Classic3D".parse::<Pattern>().unwrap(),
            Pattern::Lattice(NoiseKind::Classic3D)
        );
        assert!(matches!(
            "voronoi".parse::<Pattern>(),
            Err(NoiseError::UnknownVariant(_))
        ));
    }

    #[test]
    fn pattern_names_cover_all_patterns() {
        let names: Vec<_> = Pattern::names().collect();
        assert_eq!(names.len(), 7);
        for name in names {
            assert_eq!(name.parse::<Pattern>().unwrap().to_string(), name);
        }
    }

    // -- Settings --

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: FrameSettings =
            serde_json::from_str(r#"{"variant": "flow", "rotation": true}"#).unwrap();
        assert_eq!(settings.variant, Pattern::Flow);
        assert!(settings.rotation);
        assert_eq!(settings.frequency, 2.0);
        assert_eq!(settings.period, [4.0, 4.0]);
        assert_eq!(settings.tiles, 1);
    }

    #[test]
    fn settings_reject_unknown_variant() {
        let result = serde_json::from_str::<FrameSettings>(r#"{"variant": "worley"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_settings_are_default() {
        let settings: FrameSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, FrameSettings::default());
    }

    #[test]
    fn settings_serialize_variant_by_name() {
        let settings = FrameSettings {
            variant: Pattern::Lattice(NoiseKind::Simplex4D),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["variant"], "simplex4d");
    }

    // -- Requests --

    #[test]
    fn lattice_request_scales_by_frequency_over_resolution() {
        let settings = FrameSettings {
            variant: Pattern::Lattice(NoiseKind::Classic2D),
            frequency: 4.0,
            ..Default::default()
        };
        let request = settings.request_at(0.0, &grid()).unwrap();
        assert_eq!(request.scale(), Vec2::splat(4.0 / 512.0));
        assert_eq!(request.anchor(), Anchor::Corner);
        assert_eq!(request.kernel(), Kernel::Classic2);
        // t = 0: (cos 0, sin 0) * cos 0 * 4 * 2
        assert_eq!(request.offset(), Vec4::new(8.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn drift_follows_dimensionality() {
        let t = 2.0f32;
        let amp = (t / 5.0).cos() * 2.0 * 2.0;
        assert_eq!(
            drift(NoiseKind::Simplex2D, t, 2.0),
            Vec4::new(t.cos(), t.sin(), 0.0, 0.0) * amp
        );
        assert_eq!(
            drift(NoiseKind::Classic3D, t, 2.0),
            Vec4::new(-1.0, -1.0, 2.0, 0.0)
        );
        assert_eq!(
            drift(NoiseKind::Simplex4D, t, 2.0),
            Vec4::new(-1.0, -1.0, t.cos() * amp, t.sin() * amp)
        );
    }

    #[test]
    fn flow_request_is_centered() {
        let settings = FrameSettings {
            variant: Pattern::Flow,
            frequency: 10.0,
            ..Default::default()
        };
        let request = settings.request_at(3.0, &grid()).unwrap();
        assert_eq!(request.anchor(), Anchor::Center);
        assert_eq!(request.scale(), Vec2::splat(20.0 / 512.0));
        assert_eq!(request.offset(), Vec4::ZERO);
        assert_eq!(request.coordinate(0, 0, 512), Vec4::new(-10.0, -10.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_uses_frame_time() {
        let settings = FrameSettings {
            variant: Pattern::Flow,
            derivative: true,
            rotation: true,
            ..Default::default()
        };
        let request = settings.request_at(1.5, &grid()).unwrap();
        assert_eq!(request.kernel(), Kernel::FlowGradientRotating { angle: 1.5 });
    }

    #[test]
    fn periodic_flow_spans_whole_tiles() {
        let settings = FrameSettings {
            variant: Pattern::Flow,
            periodic: true,
            period: [4.0, 6.0],
            tiles: 2,
            ..Default::default()
        };
        let request = settings.request_at(0.0, &grid()).unwrap();
        assert_eq!(request.period(), Some(Vec2::new(4.0, 6.0)));
        assert_eq!(request.anchor(), Anchor::Corner);
        let far_corner = request.coordinate(512, 512, 512);
        assert_eq!(far_corner, Vec4::new(8.0, 12.0, 0.0, 0.0));
    }

    #[test]
    fn periodic_on_simplex_is_unsupported() {
        let settings = FrameSettings {
            variant: Pattern::Lattice(NoiseKind::Simplex2D),
            periodic: true,
            ..Default::default()
        };
        assert!(matches!(
            settings.request_at(0.0, &grid()),
            Err(NoiseError::UnsupportedPeriod(_))
        ));
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let settings = FrameSettings {
            frequency: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.request_at(0.0, &grid()),
            Err(NoiseError::InvalidScale { .. })
        ));
    }
}
