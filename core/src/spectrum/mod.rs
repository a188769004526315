//! Spectrum

mod common;
mod rgb_spectrum;
mod samples;

// Re-export
pub use common::*;
pub use rgb_spectrum::*;
pub use samples::*;

/// Default to using `RGBSpectrum` for all colour values.
pub type Spectrum = RGBSpectrum;

/// Number of samples used in `Spectrum`.
pub const SPECTRUM_SAMPLES: usize = RGB_SAMPLES;
