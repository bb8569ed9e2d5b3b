//! Shared lattice arithmetic: the mod-289 permutation polynomial, period
//! wrapping, gradient normalization and the quintic fade curve.
//!
//! Hash inputs are integer-valued and stay below 600, so every product in
//! `permute` is exactly representable in f32.

/// `x mod 289`; integral inputs map to integers in `[0, 289)`.
#[inline]
pub(crate) fn mod289(x: f32) -> f32 {
    x.rem_euclid(289.0)
}

/// Permutation polynomial `(34x² + x) mod 289`.
#[inline]
pub(crate) fn permute(x: f32) -> f32 {
    mod289((x * 34.0 + 1.0) * x)
}

/// Floor-based fractional part.
///
/// `f32::fract` truncates toward zero and differs for negative inputs.
#[inline]
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Euclidean remainder of a lattice coordinate against a positive period.
#[inline]
pub(crate) fn wrap(x: f32, period: f32) -> f32 {
    x.rem_euclid(period)
}

/// First-order Taylor approximation of `1 / sqrt(r)` around `r = 0.7`.
#[inline]
pub(crate) fn taylor_inv_sqrt(r: f32) -> f32 {
    1.792_842_9 - 0.853_734_7 * r
}

/// Quintic fade curve `6t⁵ - 15t⁴ + 10t³`.
#[inline]
pub(crate) fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
