//! Common.

use crate::pbrt::*;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Interface and helper functions for coefficient based colour values.
pub trait CoefficientSpectrum:
    Sized
    + Add
    + AddAssign
    + Sub
    + SubAssign
    + Mul<Self>
    + MulAssign<Self>
    + MulAssign<Float>
    + Div<Self>
    + DivAssign<Self>
    + DivAssign<Float>
    + Neg
    + Index<usize>
    + IndexMut<usize>
    + Clamp<Float>
{
    /// Returns the stored samples.
    fn samples(&self) -> &[Float];

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if any sample is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum sample value.
    fn max_component_value(&self) -> Float {
        let samples = self.samples();
        assert!(!samples.is_empty());
        samples[1..].iter().fold(samples[0], |m, v| max(m, *v))
    }

    /// Returns the index of the maximum sample value. Ties resolve to the
    /// lowest index.
    fn max_component_index(&self) -> usize {
        let m = self.max_component_value();
        self.samples().iter().position(|v| *v == m).unwrap_or(0)
    }

    /// Adds the sample values from another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn add(&mut self, other: &Self) {
        let other_samples = other.samples();
        for (s, o) in self.samples_mut().iter_mut().zip(other_samples.iter()) {
            *s += *o;
        }
    }

    /// Subtract the sample values from another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn sub(&mut self, other: &Self) {
        let other_samples = other.samples();
        for (s, o) in self.samples_mut().iter_mut().zip(other_samples.iter()) {
            *s -= *o;
        }
    }

    /// Multiplies the sample values from another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul(&mut self, other: &Self) {
        let other_samples = other.samples();
        for (s, o) in self.samples_mut().iter_mut().zip(other_samples.iter()) {
            *s *= *o;
        }
    }

    /// Divides the sample values by those of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn div(&mut self, other: &Self) {
        let other_samples = other.samples();
        for (s, o) in self.samples_mut().iter_mut().zip(other_samples.iter()) {
            *s /= *o;
        }
    }

    /// Scales the sample values by a constant factor.
    ///
    /// * `f` - The factor.
    fn scale(&mut self, f: Float) {
        for s in self.samples_mut().iter_mut() {
            *s *= f;
        }
    }
}
