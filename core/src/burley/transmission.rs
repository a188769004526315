//! Transmission profile

use super::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Unit of the subsurface scattering distances in cm.
pub const SUBSURFACE_UNIT_IN_CM: Float = 0.1;

/// Distance covered by a transmission profile in cm.
pub const MAX_TRANSMISSION_PROFILE_DISTANCE: Float = 5.0;

/// Radius bias in cm keeping the first sample off the profile peak.
pub const PROFILE_RADIUS_OFFSET: Float = 0.06;

/// Additional inverse unit scale applied in legacy mode.
const LEGACY_INV_UNIT_SCALE: Float = 0.1;

/// Computes a Burley transmission profile over `[0, 5cm)` sampled at
/// `target.len()` uniform steps. The last sample is always black. An empty
/// buffer is left untouched.
///
/// * `target`           - The output buffer.
/// * `extinction_scale` - Extinction per mm of the shadow attenuation.
/// * `albedo`           - Surface albedo.
/// * `dmfp`             - Diffuse mean free path in mm.
/// * `world_unit_scale` - Size of one world unit in cm.
/// * `tint`             - Transmission tint.
/// * `legacy`           - Apply the legacy 0.1 calibration to the unit scale.
pub fn compute_transmission_profile(
    target: &mut [TransmissionSample],
    extinction_scale: Float,
    albedo: &Spectrum,
    dmfp: &Spectrum,
    world_unit_scale: Float,
    tint: &Spectrum,
    legacy: bool,
) {
    let n_samples = target.len();
    if n_samples == 0 {
        return;
    }

    let unit_scale = world_unit_scale / SUBSURFACE_UNIT_IN_CM;
    let mut inv_unit_scale = 1.0 / unit_scale;
    if legacy {
        inv_unit_scale *= LEGACY_INV_UNIT_SCALE;
    }

    let s = search_light_scaling_factor_rgb(albedo);
    let inv_size = 1.0 / n_samples as Float;
    let offset_mm = PROFILE_RADIUS_OFFSET * CM_TO_MM * inv_unit_scale;

    for (i, sample) in target.iter_mut().enumerate() {
        let distance_mm =
            i as Float * inv_size * (MAX_TRANSMISSION_PROFILE_DISTANCE * CM_TO_MM) * inv_unit_scale;
        let value = transmission_profile_rgb(distance_mm + offset_mm, albedo, &s, dmfp) * *tint;
        let shadow = (-distance_mm * extinction_scale).exp();
        *sample = TransmissionSample::new(value, shadow);
    }

    // Fade out completely at the end of the table.
    target[n_samples - 1] = TransmissionSample::BLACK;

    debug!(
        "Transmission profile: {} samples, inverse unit scale {}, legacy {}",
        n_samples, inv_unit_scale, legacy
    );
}

/// Returns a Burley transmission profile of `n_samples` samples.
///
/// * `n_samples`        - Number of samples.
/// * `extinction_scale` - Extinction per mm of the shadow attenuation.
/// * `albedo`           - Surface albedo.
/// * `dmfp`             - Diffuse mean free path in mm.
/// * `world_unit_scale` - Size of one world unit in cm.
/// * `tint`             - Transmission tint.
/// * `legacy`           - Apply the legacy 0.1 calibration to the unit scale.
pub fn transmission_profile_table(
    n_samples: usize,
    extinction_scale: Float,
    albedo: &Spectrum,
    dmfp: &Spectrum,
    world_unit_scale: Float,
    tint: &Spectrum,
    legacy: bool,
) -> Vec<TransmissionSample> {
    let mut target = vec![TransmissionSample::default(); n_samples];
    compute_transmission_profile(
        &mut target,
        extinction_scale,
        albedo,
        dmfp,
        world_unit_scale,
        tint,
        legacy,
    );
    target
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
