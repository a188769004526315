//! Scaling factors

use crate::pbrt::*;
use crate::spectrum::*;

/// Scaling factor for light entering the volume perpendicular to the surface.
/// Average relative error is 5.5% against Monte Carlo references.
///
/// * `albedo` - Surface albedo.
#[inline]
pub fn perpendicular_scaling_factor(albedo: Float) -> Float {
    1.85 - albedo + 7.0 * pow3(abs(albedo - 0.8))
}

/// Per-channel `perpendicular_scaling_factor()`.
///
/// * `albedo` - Surface albedo.
pub fn perpendicular_scaling_factor_rgb(albedo: &Spectrum) -> Spectrum {
    albedo.map(perpendicular_scaling_factor)
}

/// Scaling factor for the diffuse mean free path under search-light
/// illumination. Average relative error is 7.7% against Monte Carlo
/// references.
///
/// * `albedo` - Surface albedo.
#[inline]
pub fn search_light_scaling_factor(albedo: Float) -> Float {
    3.5 + 100.0 * pow4(albedo - 0.33)
}

/// Per-channel `search_light_scaling_factor()`.
///
/// * `albedo` - Surface albedo.
pub fn search_light_scaling_factor_rgb(albedo: &Spectrum) -> Spectrum {
    albedo.map(search_light_scaling_factor)
}

/// Converts a mean free path to the diffuse mean free path used by the
/// profile functions. Units are preserved.
///
/// Albedo channels are expected to be biased away from 0 by the caller.
///
/// * `albedo` - Surface albedo.
/// * `mfp`    - Mean free path.
pub fn diffuse_mean_free_path_from_mean_free_path(albedo: &Spectrum, mfp: &Spectrum) -> Spectrum {
    let s_search = search_light_scaling_factor_rgb(albedo);
    let s_perp = perpendicular_scaling_factor_rgb(albedo);
    *mfp * (s_search / s_perp)
}

/// Converts a diffuse mean free path back to a mean free path. Inverse of
/// `diffuse_mean_free_path_from_mean_free_path()`.
///
/// * `albedo` - Surface albedo.
/// * `dmfp`   - Diffuse mean free path.
pub fn mean_free_path_from_diffuse_mean_free_path(
    albedo: &Spectrum,
    dmfp: &Spectrum,
) -> Spectrum {
    let s_search = search_light_scaling_factor_rgb(albedo);
    let s_perp = perpendicular_scaling_factor_rgb(albedo);
    *dmfp * (s_perp / s_search)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
