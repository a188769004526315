//! Common

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/8*PI (1/8π)
pub const INV_EIGHT_PI: Float = 1.0 / (8.0 * PI);

/// Centimetres to millimetres.
pub const CM_TO_MM: Float = 10.0;

/// Millimetres to centimetres.
pub const MM_TO_CM: Float = 0.1;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Returns `v^3`.
///
/// * `v` - The value.
#[inline(always)]
pub fn pow3<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    v * v * v
}

/// Returns `v^4`.
///
/// * `v` - The value.
#[inline(always)]
pub fn pow4<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    (v * v) * (v * v)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
