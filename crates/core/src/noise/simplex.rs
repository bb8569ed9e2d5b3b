//! Simplex gradient noise in two, three and four dimensions.
//!
//! The input is skewed onto a simplex lattice, the containing simplex is
//! found by ranking the fractional coordinates, and each of its N+1 corners
//! contributes a radially attenuated gradient ramp.

use glam::{Vec2, Vec3, Vec4};

use super::lattice::{fract, mod289, permute, taylor_inv_sqrt};

/// Unskew factor for 2D, `(3 - √3) / 6`.
const G2: f32 = 0.211_324_87;
/// Skew factor for 2D, `(√3 - 1) / 2`.
const F2: f32 = 0.366_025_4;
const G3: f32 = 1.0 / 6.0;
const F3: f32 = 1.0 / 3.0;
/// Unskew factor for 4D, `(5 - √5) / 20`.
const G4: f32 = 0.138_196_6;
/// Skew factor for 4D, `(√5 - 1) / 4`.
const F4: f32 = 0.309_017;

/// 2D simplex noise.
pub fn noise2(v: Vec2) -> f32 {
    let i = (v + v.dot(Vec2::splat(F2))).floor();
    let x0 = v - i + i.dot(Vec2::splat(G2));

    let i1 = if x0.x > x0.y { Vec2::X } else { Vec2::Y };
    let x1 = x0 - i1 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;

    let i = Vec2::new(mod289(i.x), mod289(i.y));
    let corner = |o: Vec2, x: Vec2| {
        let t = 0.5 - x.length_squared();
        if t <= 0.0 {
            return 0.0;
        }
        let hash = permute(permute(i.y + o.y) + i.x + o.x);
        let gx = 2.0 * fract(hash * (1.0 / 41.0)) - 1.0;
        let h = gx.abs() - 0.5;
        let a0 = gx - (gx + 0.5).floor();
        let t2 = t * t;
        t2 * t2 * taylor_inv_sqrt(a0 * a0 + h * h) * (a0 * x.x + h * x.y)
    };

    130.0 * (corner(Vec2::ZERO, x0) + corner(i1, x1) + corner(Vec2::ONE, x2))
}

/// 3D simplex noise.
pub fn noise3(v: Vec3) -> f32 {
    let i = (v + v.dot(Vec3::splat(F3))).floor();
    let x0 = v - i + i.dot(Vec3::splat(G3));

    // Rank the components of x0 to pick the traversal order.
    let g = Vec3::new(ge(x0.x, x0.y), ge(x0.y, x0.z), ge(x0.z, x0.x));
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let x1 = x0 - i1 + G3;
    let x2 = x0 - i2 + 2.0 * G3;
    let x3 = x0 - 0.5;

    let i = Vec3::new(mod289(i.x), mod289(i.y), mod289(i.z));
    let corner = |o: Vec3, x: Vec3| {
        let t = 0.6 - x.length_squared();
        if t <= 0.0 {
            return 0.0;
        }
        let hash = permute(permute(permute(i.z + o.z) + i.y + o.y) + i.x + o.x);
        let t2 = t * t;
        t2 * t2 * gradient3(hash).dot(x)
    };

    42.0 * (corner(Vec3::ZERO, x0) + corner(i1, x1) + corner(i2, x2) + corner(Vec3::ONE, x3))
}

/// 4D simplex noise.
pub fn noise4(v: Vec4) -> f32 {
    let i = (v + v.dot(Vec4::splat(F4))).floor();
    let x0 = v - i + i.dot(Vec4::splat(G4));

    let rank = rank4(x0);
    let i3 = rank.clamp(Vec4::ZERO, Vec4::ONE);
    let i2 = (rank - 1.0).clamp(Vec4::ZERO, Vec4::ONE);
    let i1 = (rank - 2.0).clamp(Vec4::ZERO, Vec4::ONE);

    let x1 = x0 - i1 + G4;
    let x2 = x0 - i2 + 2.0 * G4;
    let x3 = x0 - i3 + 3.0 * G4;
    let x4 = x0 - 1.0 + 4.0 * G4;

    let i = Vec4::new(mod289(i.x), mod289(i.y), mod289(i.z), mod289(i.w));
    let corner = |o: Vec4, x: Vec4| {
        let t = 0.6 - x.length_squared();
        if t <= 0.0 {
            return 0.0;
        }
        let hash = permute(
            permute(permute(permute(i.w + o.w) + i.z + o.z) + i.y + o.y) + i.x + o.x,
        );
        let t2 = t * t;
        t2 * t2 * gradient4(hash).dot(x)
    };

    49.0 * (corner(Vec4::ZERO, x0)
        + corner(i1, x1)
        + corner(i2, x2)
        + corner(i3, x3)
        + corner(Vec4::ONE, x4))
}

/// For each axis, the number of other axes it dominates. The rank decides at
/// which step of the simplex walk that axis is incremented.
fn rank4(x0: Vec4) -> Vec4 {
    let is_x = [ge(x0.x, x0.y), ge(x0.x, x0.z), ge(x0.x, x0.w)];
    let is_yz = [ge(x0.y, x0.z), ge(x0.y, x0.w), ge(x0.z, x0.w)];
    Vec4::new(
        is_x[0] + is_x[1] + is_x[2],
        (1.0 - is_x[0]) + is_yz[0] + is_yz[1],
        (1.0 - is_x[1]) + (1.0 - is_yz[0]) + is_yz[2],
        (1.0 - is_x[2]) + (1.0 - is_yz[1]) + (1.0 - is_yz[2]),
    )
}

/// `step(b, a)`: 1 when `a >= b`.
#[inline]
fn ge(a: f32, b: f32) -> f32 {
    if a >= b {
        1.0
    } else {
        0.0
    }
}

/// Gradients on a 7×7 grid over the octahedron, folded where `z < 0`.
fn gradient3(hash: f32) -> Vec3 {
    const NS_X: f32 = 2.0 / 7.0;
    const NS_Y: f32 = 0.5 / 7.0 - 1.0;

    let j = hash - 49.0 * (hash * (1.0 / 49.0)).floor();
    let gx_cell = (j * (1.0 / 7.0)).floor();
    let gy_cell = (j - 7.0 * gx_cell).floor();
    let mut gx = gx_cell * NS_X + NS_Y;
    let mut gy = gy_cell * NS_X + NS_Y;
    let gz = 1.0 - gx.abs() - gy.abs();
    if gz <= 0.0 {
        gx -= gx.floor() * 2.0 + 1.0;
        gy -= gy.floor() * 2.0 + 1.0;
    }
    let g = Vec3::new(gx, gy, gz);
    g * taylor_inv_sqrt(g.length_squared())
}

/// Gradients on the 4D cross-polytope, folded where `w < 0`.
fn gradient4(hash: f32) -> Vec4 {
    let axis = |scale: f32| (fract(hash * scale) * 7.0).floor() * (1.0 / 7.0) - 1.0;
    let mut gx = axis(1.0 / 294.0);
    let mut gy = axis(1.0 / 49.0);
    let mut gz = axis(1.0 / 7.0);
    let gw = 1.5 - gx.abs() - gy.abs() - gz.abs();
    if gw < 0.0 {
        gx += if gx < 0.0 { 1.0 } else { -1.0 };
        gy += if gy < 0.0 { 1.0 } else { -1.0 };
        gz += if gz < 0.0 { 1.0 } else { -1.0 };
    }
    let g = Vec4::new(gx, gy, gz, gw);
    g * taylor_inv_sqrt(g.length_squared())
}
