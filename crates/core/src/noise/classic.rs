//! Classic (Perlin) gradient noise in two, three and four dimensions.
//!
//! Gradients are hashed from the integer lattice corners surrounding the
//! sample point, dotted with the corner-to-point vectors and blended with
//! the quintic fade curve. Output lies roughly in `[-1, 1]`.

use glam::{Vec2, Vec3, Vec4};

use super::lattice::{fade, fract, lerp, mod289, permute, taylor_inv_sqrt, wrap};

/// 2D classic noise.
pub fn noise2(p: Vec2) -> f32 {
    classic2(p, None)
}

/// 2D classic noise that tiles with the given integer period on each axis.
///
/// The period is not validated here; callers go through
/// [`RequestBuilder`](crate::request::RequestBuilder), which rejects
/// non-integer and non-positive periods.
pub fn periodic2(p: Vec2, period: Vec2) -> f32 {
    classic2(p, Some(period))
}

/// 3D classic noise.
pub fn noise3(p: Vec3) -> f32 {
    let cell = p.floor();
    let f = p - cell;

    let mut n = [0.0_f32; 8];
    for (bits, slot) in n.iter_mut().enumerate() {
        let d = Vec3::new(bit(bits, 0), bit(bits, 1), bit(bits, 2));
        let i = cell + d;
        let hash = permute(permute(permute(mod289(i.x)) + mod289(i.y)) + mod289(i.z));
        *slot = gradient3(hash).dot(f - d);
    }

    let (u, v, w) = (fade(f.x), fade(f.y), fade(f.z));
    let x00 = lerp(n[0], n[1], u);
    let x10 = lerp(n[2], n[3], u);
    let x01 = lerp(n[4], n[5], u);
    let x11 = lerp(n[6], n[7], u);
    2.2 * lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
}

/// 4D classic noise.
pub fn noise4(p: Vec4) -> f32 {
    let cell = p.floor();
    let f = p - cell;

    let mut n = [0.0_f32; 16];
    for (bits, slot) in n.iter_mut().enumerate() {
        let d = Vec4::new(bit(bits, 0), bit(bits, 1), bit(bits, 2), bit(bits, 3));
        let i = cell + d;
        let hash = permute(
            permute(permute(permute(mod289(i.x)) + mod289(i.y)) + mod289(i.z)) + mod289(i.w),
        );
        *slot = gradient4(hash).dot(f - d);
    }

    let fades = [fade(f.x), fade(f.y), fade(f.z), fade(f.w)];
    // Collapse one axis per round: x, then y, z and w.
    let mut len = n.len();
    for t in fades {
        len /= 2;
        for k in 0..len {
            n[k] = lerp(n[2 * k], n[2 * k + 1], t);
        }
    }
    2.2 * n[0]
}

fn classic2(p: Vec2, period: Option<Vec2>) -> f32 {
    let cell = p.floor();
    let f = p - cell;

    let corner = |dx: f32, dy: f32| {
        let d = Vec2::new(dx, dy);
        let mut i = cell + d;
        if let Some(period) = period {
            i = Vec2::new(wrap(i.x, period.x), wrap(i.y, period.y));
        }
        let hash = permute(permute(mod289(i.x)) + mod289(i.y));
        gradient2(hash).dot(f - d)
    };

    let (u, v) = (fade(f.x), fade(f.y));
    let bottom = lerp(corner(0.0, 0.0), corner(1.0, 0.0), u);
    let top = lerp(corner(0.0, 1.0), corner(1.0, 1.0), u);
    2.3 * lerp(bottom, top, v)
}

#[inline]
fn bit(bits: usize, axis: usize) -> f32 {
    ((bits >> axis) & 1) as f32
}

/// Gradients on the edges of a diamond, 41 directions.
fn gradient2(hash: f32) -> Vec2 {
    let gx = fract(hash * (1.0 / 41.0)) * 2.0 - 1.0;
    let gy = gx.abs() - 0.5;
    let gx = gx - (gx + 0.5).floor();
    let g = Vec2::new(gx, gy);
    g * taylor_inv_sqrt(g.length_squared())
}

/// Gradients on the surface of an octahedron, 7×7 points folded at the edges.
fn gradient3(hash: f32) -> Vec3 {
    let gx = hash * (1.0 / 7.0);
    let mut gy = fract(gx.floor() * (1.0 / 7.0)) - 0.5;
    let mut gx = fract(gx);
    let gz = 0.5 - gx.abs() - gy.abs();
    if gz <= 0.0 {
        gx -= step_half(gx);
        gy -= step_half(gy);
    }
    let g = Vec3::new(gx, gy, gz);
    g * taylor_inv_sqrt(g.length_squared())
}

/// Gradients on the surface of a 4D cross-polytope, 7×7×6 points.
fn gradient4(hash: f32) -> Vec4 {
    let gx = hash * (1.0 / 7.0);
    let gy = gx.floor() * (1.0 / 7.0);
    let gz = gy.floor() * (1.0 / 6.0);
    let mut gx = fract(gx) - 0.5;
    let mut gy = fract(gy) - 0.5;
    let gz = fract(gz) - 0.5;
    let gw = 0.75 - gx.abs() - gy.abs() - gz.abs();
    if gw <= 0.0 {
        gx -= step_half(gx);
        gy -= step_half(gy);
    }
    let g = Vec4::new(gx, gy, gz, gw);
    g * taylor_inv_sqrt(g.length_squared())
}

/// `step(0, x) - 0.5`: `+0.5` for non-negative inputs, `-0.5` otherwise.
#[inline]
fn step_half(x: f32) -> f32 {
    if x >= 0.0 {
        0.5
    } else {
        -0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanishes_on_integer_lattice() {
        for &(x, y) in &[(0.0, 0.0), (3.0, -2.0), (-7.0, 11.0)] {
            assert!(noise2(Vec2::new(x, y)).abs() < 1e-6);
            assert!(noise3(Vec3::new(x, y, 5.0)).abs() < 1e-6);
            assert!(noise4(Vec4::new(x, y, -1.0, 2.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn varies_between_lattice_points() {
        let samples: Vec<f32> = (0..64)
            .map(|k| noise2(Vec2::new(k as f32 * 0.37 + 0.1, k as f32 * 0.21 + 0.3)))
            .collect();
        let spread = samples.iter().cloned().fold(f32::MIN, f32::max)
            - samples.iter().cloned().fold(f32::MAX, f32::min);
        assert!(spread > 0.2, "classic noise looks flat: spread {spread}");
    }

    #[test]
    fn periodic2_tiles_on_both_axes() {
        let period = Vec2::new(4.0, 3.0);
        for k in 0..50 {
            let p = Vec2::new(k as f32 * 0.173 - 3.0, k as f32 * 0.091 - 2.0);
            let base = periodic2(p, period);
            let dx = periodic2(p + Vec2::new(period.x, 0.0), period);
            let dy = periodic2(p + Vec2::new(0.0, period.y), period);
            assert!((base - dx).abs() < 1e-4, "x wrap at {p}: {base} vs {dx}");
            assert!((base - dy).abs() < 1e-4, "y wrap at {p}: {base} vs {dy}");
        }
    }

    #[test]
    fn four_dimensional_noise_is_bounded_on_lattice_plane() {
        // w on a lattice plane: the w-fade is zero, only eight corners contribute.
        let v = noise4(Vec4::new(0.3, 0.6, 0.2, 0.0));
        assert!(v.is_finite());
        assert!(v.abs() < 1.5);
    }

    #[test]
    fn gradients_are_nonzero_and_bounded() {
        for h in 0..289 {
            let h = h as f32;
            for len in [
                gradient2(h).length(),
                gradient3(h).length(),
                gradient4(h).length(),
            ] {
                assert!(len > 0.3 && len < 1.3, "gradient for hash {h} has length {len}");
            }
        }
    }
}
