//! Burley normalized subsurface scattering.
//!
//! Precomputes the lookup data of the Burley normalized diffusion profile:
//! per-channel scaling factors, a mirrored blur kernel and a transmission
//! profile for thin, back-lit geometry.

mod kernel;
mod profile;
mod scaling;
mod transmission;

// Re-export
pub use kernel::*;
pub use profile::*;
pub use scaling::*;
pub use transmission::*;
