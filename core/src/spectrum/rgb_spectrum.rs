//! RGB Spectrum.

use super::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents a linear colour as independent red, green and blue
/// channels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBSpectrum {
    /// The channel values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// White.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all channels.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self {
            c: [v; RGB_SAMPLES],
        }
    }

    /// Create a new `RGBSpectrum` from individual channel values.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns the channel values as an array.
    pub fn to_rgb(&self) -> [Float; RGB_SAMPLES] {
        self.c
    }

    /// Returns a new `RGBSpectrum` by applying a function to every channel.
    ///
    /// * `f` - The function.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Float) -> Float,
    {
        Self {
            c: [f(self.c[0]), f(self.c[1]), f(self.c[2])],
        }
    }

    /// Returns `e` raised to the power of each channel.
    pub fn exp(&self) -> Self {
        self.map(Float::exp)
    }
}

impl Default for RGBSpectrum {
    /// Return a black `RGBSpectrum`.
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[Float; RGB_SAMPLES]> for RGBSpectrum {
    /// Create a new `RGBSpectrum` from channel values.
    ///
    /// * `c` - Channel values.
    fn from(c: [Float; RGB_SAMPLES]) -> Self {
        Self { c }
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    /// Returns the stored samples.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn add(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::add(&mut ret, &other);
        ret
    }
}

impl AddAssign for RGBSpectrum {
    /// Adds the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn add_assign(&mut self, other: Self) {
        CoefficientSpectrum::add(self, &other);
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn sub(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::sub(&mut ret, &other);
        ret
    }
}

impl SubAssign for RGBSpectrum {
    /// Subtracts the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn sub_assign(&mut self, other: Self) {
        CoefficientSpectrum::sub(self, &other);
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn mul(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::mul(&mut ret, &other);
        ret
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the channel values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::scale(&mut ret, f);
        ret
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the channel values of an `RGBSpectrum`.
    ///
    /// * `s` - Channel values.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign for RGBSpectrum {
    /// Multiplies the corresponding channel values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn mul_assign(&mut self, other: Self) {
        CoefficientSpectrum::mul(self, &other);
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Scales the channel values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul_assign(&mut self, f: Float) {
        CoefficientSpectrum::scale(self, f);
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Divides the corresponding channel values by those of another
    /// `RGBSpectrum`. No checks are made for zero divisors.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn div(self, other: Self) -> Self::Output {
        let mut ret = self;
        CoefficientSpectrum::div(&mut ret, &other);
        ret
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the channel values by 1/f.
    ///
    /// * `f` - Scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let mut ret = self;
        CoefficientSpectrum::scale(&mut ret, 1.0 / f);
        ret
    }
}

impl DivAssign for RGBSpectrum {
    /// Divides the corresponding channel values by those of another
    /// `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn div_assign(&mut self, other: Self) {
        CoefficientSpectrum::div(self, &other);
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Scales the channel values by 1/f.
    ///
    /// * `f` - Scaling factor.
    fn div_assign(&mut self, f: Float) {
        debug_assert!(f != 0.0);
        CoefficientSpectrum::scale(self, 1.0 / f);
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    /// Negates the channel values.
    fn neg(self) -> Self::Output {
        self.map(|v| -v)
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Index the channel values.
    ///
    /// * `index` - The channel index (0 = red, 1 = green, 2 = blue).
    fn index(&self, index: usize) -> &Self::Output {
        &self.c[index]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    /// Index the channel values for mutation.
    ///
    /// * `index` - The channel index (0 = red, 1 = green, 2 = blue).
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.c[index]
    }
}

impl Clamp<Float> for RGBSpectrum {
    /// Clamps the channel values to given [low, high] interval.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Clamps the channel values to [0.0, INFINITY].
    fn clamp_default(&self) -> Self {
        self.clamp(0.0, INFINITY)
    }
}

impl fmt::Display for RGBSpectrum {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.c[0], self.c[1], self.c[2])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_compose! {
        fn rgb_f32()(r in 0.0..10.0f32, g in 0.0..10.0f32, b in 0.0..10.0f32) -> RGBSpectrum {
            RGBSpectrum::rgb(r, g, b)
        }
    }

    #[test]
    fn zero_is_black() {
        assert!(RGBSpectrum::ZERO.is_black());
        assert!(!RGBSpectrum::ONE.is_black());
        assert_eq!(RGBSpectrum::default(), RGBSpectrum::ZERO);
    }

    #[test]
    fn exp_per_channel() {
        let s = RGBSpectrum::rgb(0.0, 1.0, -1.0).exp();
        assert_eq!(s[0], 1.0);
        assert!(approx_eq!(f32, s[1], std::f32::consts::E, ulps = 2));
        assert!(approx_eq!(f32, s[2], 1.0 / std::f32::consts::E, ulps = 2));
    }

    #[test]
    fn has_nans() {
        assert!(!RGBSpectrum::new(1.0).has_nans());
        assert!(RGBSpectrum::rgb(0.0, f32::NAN, 0.0).has_nans());
    }

    #[test]
    fn max_component() {
        let s = RGBSpectrum::rgb(0.2, 0.9, 0.4);
        assert_eq!(s.max_component_value(), 0.9);
        assert_eq!(s.max_component_index(), 1);
        assert_eq!(RGBSpectrum::new(0.5).max_component_index(), 0);
    }

    #[test]
    fn clamp_channels() {
        let s = RGBSpectrum::rgb(-1.0, 0.5, 2.0).clamp(0.009, 1.0);
        assert_eq!(s, RGBSpectrum::rgb(0.009, 0.5, 1.0));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", RGBSpectrum::rgb(1.0, 0.5, 0.25)), "1 0.5 0.25");
    }

    proptest! {
        #[test]
        fn add(s1 in rgb_f32(), s2 in rgb_f32()) {
            let s = s1 + s2;
            for c in 0..RGB_SAMPLES {
                prop_assert_eq!(s[c], s1[c] + s2[c]);
            }
        }

        #[test]
        fn mul(s1 in rgb_f32(), s2 in rgb_f32()) {
            let s = s1 * s2;
            for c in 0..RGB_SAMPLES {
                prop_assert_eq!(s[c], s1[c] * s2[c]);
            }
        }

        #[test]
        fn scale(s1 in rgb_f32(), f in 0.0..10.0f32) {
            prop_assert_eq!(s1 * f, f * s1);
            prop_assert_eq!(s1 * f, s1.map(|v| v * f));
        }

        #[test]
        fn sub_assign(s1 in rgb_f32(), s2 in rgb_f32()) {
            let mut s = s1;
            s -= s2;
            prop_assert_eq!(s, s1 - s2);
            prop_assert_eq!(-s, s2 - s1);
        }
    }
}
