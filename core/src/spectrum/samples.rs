//! Lookup table samples.

use super::Spectrum;
use crate::pbrt::*;
use std::fmt;

/// A single weighted tap of a mirrored diffusion kernel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KernelSample {
    /// Per-channel weight.
    pub weight: Spectrum,

    /// Signed distance of the tap from the kernel centre.
    pub offset: Float,
}

impl KernelSample {
    /// Create a new `KernelSample`.
    ///
    /// * `weight` - Per-channel weight.
    /// * `offset` - Signed distance from the kernel centre.
    pub fn new(weight: Spectrum, offset: Float) -> Self {
        Self { weight, offset }
    }

    /// Returns the sample as an RGBA quadruple with the offset in alpha.
    pub fn to_rgba(&self) -> [Float; 4] {
        let [r, g, b] = self.weight.to_rgb();
        [r, g, b, self.offset]
    }
}

impl fmt::Display for KernelSample {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] @ {}", self.weight, self.offset)
    }
}

/// A single distance step of a transmission profile.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TransmissionSample {
    /// Tinted transmitted colour.
    pub value: Spectrum,

    /// Shadow attenuation `e^(-distance * extinction)`.
    pub shadow: Float,
}

impl TransmissionSample {
    /// Fully occluded sample.
    pub const BLACK: Self = Self {
        value: Spectrum::ZERO,
        shadow: 0.0,
    };

    /// Create a new `TransmissionSample`.
    ///
    /// * `value`  - Tinted transmitted colour.
    /// * `shadow` - Shadow attenuation.
    pub fn new(value: Spectrum, shadow: Float) -> Self {
        Self { value, shadow }
    }

    /// Returns the sample as an RGBA quadruple with the shadow attenuation in
    /// alpha.
    pub fn to_rgba(&self) -> [Float; 4] {
        let [r, g, b] = self.value.to_rgb();
        [r, g, b, self.shadow]
    }
}

impl fmt::Display for TransmissionSample {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] shadow {}", self.value, self.shadow)
    }
}
