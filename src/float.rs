//! Scalar type the simulation is generic over.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Floating-point scalar for positions, forces and hues.
///
/// `f32` and `f64` are supported; transcendental functions go through
/// `libm` so the crate stays `no_std`.
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + Default
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn two() -> Self;
    /// Widen or narrow a configuration constant.
    fn from_f32(v: f32) -> Self;
    /// Narrow for buffers handed to a host.
    fn to_f32(self) -> f32;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    /// Quadrant-aware arctangent of `y / x`.
    fn atan2(y: Self, x: Self) -> Self;
    fn floor(self) -> Self;
    /// Rounds half away from zero.
    fn round(self) -> Self;
    fn is_finite(self) -> bool;

    /// `self + (other - self) * t`
    fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }

    /// Euclidean remainder, in `[0, modulus)` for a positive modulus.
    fn wrap_to(self, modulus: Self) -> Self {
        self - modulus * (self / modulus).floor()
    }
}

macro_rules! impl_float {
    ($t:ident, $sqrt:path, $abs:path, $atan2:path, $floor:path, $round:path) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn two() -> Self { 2.0 }
            fn from_f32(v: f32) -> Self { v as $t }
            fn to_f32(self) -> f32 { self as f32 }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn abs(self) -> Self { $abs(self) }
            fn atan2(y: Self, x: Self) -> Self { $atan2(y, x) }
            fn floor(self) -> Self { $floor(self) }
            fn round(self) -> Self { $round(self) }
            fn is_finite(self) -> bool { $t::is_finite(self) }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::fabsf, libm::atan2f, libm::floorf, libm::roundf);
impl_float!(f64, libm::sqrt, libm::fabs, libm::atan2, libm::floor, libm::round);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_to_handles_negative_values() {
        assert!((Float::wrap_to(-30.0f32, 360.0) - 330.0).abs() < 1e-4);
        assert!((Float::wrap_to(725.0f64, 360.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(Float::round(2.5f32), 3.0);
        assert_eq!(Float::round(-2.5f64), -3.0);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(Float::lerp(2.0f32, 4.0, 0.5), 3.0);
    }
}
