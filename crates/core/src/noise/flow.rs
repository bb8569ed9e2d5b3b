//! Flow noise: 2D simplex noise with rotating gradients, optional tiling and
//! analytic derivatives.
//!
//! The plane is tiled by a skewed triangular lattice whose rows are offset by
//! half a cell. Every lattice corner carries a unit gradient whose angle is
//! hashed from the corner and then shifted by a caller-supplied rotation, so
//! animating the angle makes the pattern swirl in place without changing its
//! frequency content. Each corner within `√0.8` of the sample contributes
//! `(0.8 - |d|²)⁴ · (g · d)`; the derivative is the exact gradient of that sum.
//!
//! Periodic evaluation wraps the corners before hashing. The triangular
//! lattice maps onto itself under a translation `(Px, Py)` only when `Px` is
//! an integer and `Py` an even integer, which is what
//! [`RequestBuilder`](crate::request::RequestBuilder) enforces.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::lattice::{fract, mod289, permute, wrap};

/// Scales the sum of corner contributions to roughly `[-1, 1]`.
const AMPLITUDE: f32 = 10.9;
/// Squared attenuation radius of a corner.
const RADIUS_SQ: f32 = 0.8;

/// Value of non-periodic flow noise, gradients rotated by `angle` radians.
pub fn noise(p: Vec2, angle: f32) -> f32 {
    flow(p, None, angle).x
}

/// Non-periodic flow noise as `(value, d/dx, d/dy)`.
pub fn noise_with_gradient(p: Vec2, angle: f32) -> Vec3 {
    flow(p, None, angle)
}

/// Value of flow noise tiling with `period` on each axis.
pub fn periodic(p: Vec2, period: Vec2, angle: f32) -> f32 {
    flow(p, Some(period), angle).x
}

/// Periodic flow noise as `(value, d/dx, d/dy)`.
pub fn periodic_with_gradient(p: Vec2, period: Vec2, angle: f32) -> Vec3 {
    flow(p, Some(period), angle)
}

fn flow(p: Vec2, period: Option<Vec2>, angle: f32) -> Vec3 {
    // Skew so that the triangular lattice becomes the unit square grid.
    let uv = Vec2::new(p.x + p.y * 0.5, p.y);
    let i0 = uv.floor();
    let f0 = uv - i0;
    let step = if f0.x > f0.y { Vec2::X } else { Vec2::Y };

    // The three triangle corners, back in (x, y) space.
    let p0 = Vec2::new(i0.x - i0.y * 0.5, i0.y);
    let p1 = Vec2::new(p0.x + step.x - step.y * 0.5, p0.y + step.y);
    let p2 = Vec2::new(p0.x + 0.5, p0.y + 1.0);

    let mut value = 0.0;
    let mut gradient = Vec2::ZERO;
    for corner in [p0, p1, p2] {
        let d = p - corner;
        let t = RADIUS_SQ - d.length_squared();
        if t <= 0.0 {
            continue;
        }

        let wrapped = match period {
            Some(period) => Vec2::new(wrap(corner.x, period.x), wrap(corner.y, period.y)),
            None => corner,
        };
        let g = corner_gradient(wrapped, angle);

        let w = g.dot(d);
        let t2 = t * t;
        let t4 = t2 * t2;
        value += t4 * w;
        // d/dp (t⁴ w) = t⁴ g + 4t³ w dt/dp, with dt/dp = -2d.
        gradient += t4 * g - 8.0 * t2 * t * w * d;
    }

    AMPLITUDE * Vec3::new(value, gradient.x, gradient.y)
}

/// Unit gradient for a lattice corner, rotated by `angle`.
fn corner_gradient(corner: Vec2, angle: f32) -> Vec2 {
    // Back to integer (u, v) indices for hashing.
    let u = mod289(corner.x + 0.5 * corner.y);
    let v = mod289(corner.y);
    let hash = permute(permute(u) + v);
    let psi = fract(hash * (1.0 / 41.0)) * TAU + angle;
    let (sin, cos) = psi.sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> impl Iterator<Item = Vec2> {
        (0..40).map(|k| Vec2::new(k as f32 * 0.193 - 3.7, k as f32 * 0.117 - 2.1))
    }

    #[test]
    fn value_functions_match_gradient_functions() {
        for p in sample_points() {
            assert_eq!(noise(p, 0.3), noise_with_gradient(p, 0.3).x);
            let period = Vec2::new(4.0, 4.0);
            assert_eq!(
                periodic(p, period, 0.3),
                periodic_with_gradient(p, period, 0.3).x
            );
        }
    }

    #[test]
    fn full_turn_rotation_is_identity() {
        for p in sample_points() {
            let a = noise(p, 0.0);
            let b = noise(p, TAU);
            assert!((a - b).abs() < 1e-4, "at {p}: {a} vs {b}");
        }
    }

    #[test]
    fn rotation_changes_the_field() {
        let changed = sample_points()
            .filter(|&p| (noise(p, 0.0) - noise(p, 1.0)).abs() > 1e-3)
            .count();
        assert!(changed > 20, "rotation left {changed} of 40 samples unchanged");
    }

    #[test]
    fn periodic_matches_unwrapped_inside_first_tile() {
        // Corners inside the first tile are left in place by wrapping.
        let period = Vec2::new(16.0, 16.0);
        let p = Vec2::new(7.3, 8.1);
        let a = noise(p, 0.5);
        let b = periodic(p, period, 0.5);
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn periodic_tiles_with_rectangular_period() {
        let period = Vec2::new(5.0, 2.0);
        for p in sample_points() {
            let base = periodic_with_gradient(p, period, 0.8);
            let dx = periodic_with_gradient(p + Vec2::new(period.x, 0.0), period, 0.8);
            let dy = periodic_with_gradient(p + Vec2::new(0.0, period.y), period, 0.8);
            assert!((base - dx).abs().max_element() < 1e-4, "x wrap at {p}");
            assert!((base - dy).abs().max_element() < 1e-4, "y wrap at {p}");
        }
    }

    #[test]
    fn lattice_corner_has_zero_value_and_nonzero_slope() {
        let s = noise_with_gradient(Vec2::new(2.0, 0.0), 0.0);
        assert!(s.x.abs() < 1e-6, "value on lattice corner: {}", s.x);
        let slope = Vec2::new(s.y, s.z).length();
        assert!(slope > 1.0, "slope on lattice corner: {slope}");
    }
}
