//! Burley diffusion and transmission profiles

use crate::pbrt::*;
use crate::spectrum::*;

/// Scale factors and mean free paths at or below this are treated as zero.
pub const PROFILE_EPSILON: Float = 1e-6;

/// Evaluates the Burley normalized diffusion profile `R(r)`, the sum of two
/// exponentials, at a given radius.
///
/// Returns 0 for a disabled channel (`s` or `l` at or below
/// `PROFILE_EPSILON`).
///
/// * `r` - Radius in mm.
/// * `a` - Surface albedo.
/// * `s` - Search light scaling factor.
/// * `l` - Diffuse mean free path in mm.
pub fn scattering_profile(r: Float, a: Float, s: Float, l: Float) -> Float {
    if s <= PROFILE_EPSILON || l <= PROFILE_EPSILON {
        return 0.0;
    }

    let d = 1.0 / s;
    let neg_r_by_d = -(r / l) / d;
    let exp_term = neg_r_by_d.exp() + (neg_r_by_d / 3.0).exp();
    max(a * exp_term / (d * l) * INV_EIGHT_PI, 0.0)
}

/// Evaluates the Burley transmission profile `T(r)` at a given distance.
///
/// Returns 0 for a disabled channel (`l` at or below `PROFILE_EPSILON`).
///
/// * `r` - Distance in mm.
/// * `a` - Surface albedo.
/// * `s` - Search light scaling factor.
/// * `l` - Diffuse mean free path in mm.
pub fn transmission_profile(r: Float, a: Float, s: Float, l: Float) -> Float {
    if l <= PROFILE_EPSILON {
        return 0.0;
    }

    0.25 * a * ((-s * r / l).exp() + 3.0 * (-s * r / (3.0 * l)).exp())
}

/// Per-channel `scattering_profile()`.
///
/// * `r`      - Radius in mm.
/// * `albedo` - Surface albedo.
/// * `s`      - Search light scaling factors.
/// * `dmfp`   - Diffuse mean free path in mm.
pub fn scattering_profile_rgb(
    r: Float,
    albedo: &Spectrum,
    s: &Spectrum,
    dmfp: &Spectrum,
) -> Spectrum {
    let mut ret = Spectrum::ZERO;
    for c in 0..SPECTRUM_SAMPLES {
        ret[c] = scattering_profile(r, albedo[c], s[c], dmfp[c]);
    }
    ret
}

/// Per-channel `transmission_profile()`.
///
/// * `r`      - Distance in mm.
/// * `albedo` - Surface albedo.
/// * `s`      - Search light scaling factors.
/// * `dmfp`   - Diffuse mean free path in mm.
pub fn transmission_profile_rgb(
    r: Float,
    albedo: &Spectrum,
    s: &Spectrum,
    dmfp: &Spectrum,
) -> Spectrum {
    let mut ret = Spectrum::ZERO;
    for c in 0..SPECTRUM_SAMPLES {
        ret[c] = transmission_profile(r, albedo[c], s[c], dmfp[c]);
    }
    ret
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn scattering_at_origin() {
        // R(0) = A * 2 * S / (8 * PI * L)
        let (a, s, l) = (0.8, 4.0, 2.0);
        let expected = a * 2.0 * s / (8.0 * PI * l);
        assert!(approx_eq!(Float, scattering_profile(0.0, a, s, l), expected, epsilon = 1e-6));
    }

    #[test]
    fn transmission_at_origin_is_albedo() {
        assert!(approx_eq!(Float, transmission_profile(0.0, 0.6, 5.0, 1.0), 0.6, ulps = 2));
    }

    #[test]
    fn transmission_degenerate_mean_free_path() {
        assert_eq!(transmission_profile(1.0, 0.6, 5.0, 0.0), 0.0);
        assert_eq!(transmission_profile(1.0, 0.6, 5.0, 1e-6), 0.0);
    }

    #[test]
    fn rgb_disables_single_channel() {
        let albedo = Spectrum::new(0.5);
        let s = Spectrum::new(4.0);
        let dmfp = Spectrum::rgb(1.0, 0.0, 2.0);
        let v = scattering_profile_rgb(0.5, &albedo, &s, &dmfp);
        assert!(v[0] > 0.0);
        assert_eq!(v[1], 0.0);
        assert!(v[2] > 0.0);

        let t = transmission_profile_rgb(0.5, &albedo, &s, &dmfp);
        assert!(t[0] > 0.0);
        assert_eq!(t[1], 0.0);
        assert_eq!(t[2], transmission_profile(0.5, 0.5, 4.0, 2.0));
    }

    proptest! {
        #[test]
        fn degenerate_scattering(
            r in 0.0..100.0f32,
            a in -1.0..2.0f32,
            s in -1.0..=1e-6f32,
            l in 0.0..100.0f32,
        ) {
            prop_assert_eq!(scattering_profile(r, a, s, l), 0.0);
            prop_assert_eq!(scattering_profile(r, a, l + 1.0, s), 0.0);
        }

        #[test]
        fn scattering_decreases_with_radius(
            r in 0.0..50.0f32,
            dr in 0.01..10.0f32,
            a in 0.01..=1.0f32,
            l in 0.1..10.0f32,
        ) {
            let s = crate::burley::search_light_scaling_factor(a);
            let r0 = scattering_profile(r, a, s, l);
            let r1 = scattering_profile(r + dr, a, s, l);
            prop_assert!(r1 <= r0);
            prop_assert!(r1 >= 0.0);
        }
    }
}
