//! Subsurface Profile Settings

use crate::burley::*;
use crate::paramset::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::fmt;

/// Number of one-sided taps of each baked kernel, from widest to narrowest.
pub const BAKED_KERNEL_SIZES: [usize; 3] = [13, 9, 6];

/// Number of samples of a baked transmission profile.
pub const BAKED_TRANSMISSION_PROFILE_SIZE: usize = 32;

/// Lower bound of colours used as denominators in the scaling factors.
const COLOR_BIAS: Float = 0.009;

/// Smallest mean free path distance in cm.
const MIN_MEAN_FREE_PATH_DISTANCE: Float = 0.1;

/// Mean free path colours with every channel below this are considered unset.
const MIN_MEAN_FREE_PATH_COLOR: Float = 0.001;

/// Replacement for an unset mean free path colour.
const FALLBACK_MEAN_FREE_PATH_COLOR: Spectrum = Spectrum::rgb(1.0, 0.0, 0.5);

/// Smallest surface albedo accepted by `validate_and_fix()`.
const MIN_SURFACE_ALBEDO: Float = 0.01;

/// Smallest scatter radius in cm.
const MIN_SCATTER_RADIUS: Float = 0.1;

/// Name of the built-in profile. Reserved, user profiles cannot take it.
pub const SYSTEM_DEFAULT_PROFILE_NAME: &str = "System_Default_Profile (ID: 0)";

/// The artist facing settings of a subsurface scattering material.
#[derive(Clone, Debug, PartialEq)]
pub struct SubsurfaceProfile {
    /// Profile name.
    pub name: String,

    /// Base colour of the material.
    pub surface_albedo: Spectrum,

    /// Per-channel weight of the mean free path.
    pub mean_free_path_color: Spectrum,

    /// Mean free path distance in cm.
    pub mean_free_path_distance: Float,

    /// Size of one world unit in cm.
    pub world_unit_scale: Float,

    /// Blend between the unfiltered diffuse and the scattered result.
    pub tint: Spectrum,

    /// Per-channel falloff at material boundaries.
    pub boundary_color_bleed: Spectrum,

    /// Tint of the back-lit transmission.
    pub transmission_tint: Spectrum,

    /// Extinction coefficient of the transmission shadow.
    pub extinction_scale: Float,

    /// Normal perturbation of the transmitted light direction.
    pub normal_scale: Float,

    /// Anisotropy of the transmission phase function.
    pub scattering_distribution: Float,

    /// Index of refraction.
    pub ior: Float,

    /// Roughness of the first specular lobe.
    pub roughness0: Float,

    /// Roughness of the second specular lobe.
    pub roughness1: Float,

    /// Weight of the second specular lobe.
    pub lobe_mix: Float,

    /// Use the legacy unit calibration for the transmission profile.
    pub legacy_transmission: bool,
}

impl SubsurfaceProfile {
    /// Returns a new `SubsurfaceProfile` with default settings.
    ///
    /// * `name` - Profile name.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            surface_albedo: Spectrum::rgb(0.91, 0.34, 0.27),
            mean_free_path_color: Spectrum::rgb(1.0, 0.089, 0.072),
            mean_free_path_distance: 2.67,
            world_unit_scale: 0.1,
            tint: Spectrum::ONE,
            boundary_color_bleed: Spectrum::ONE,
            transmission_tint: Spectrum::ONE,
            extinction_scale: 1.0,
            normal_scale: 0.08,
            scattering_distribution: 0.93,
            ior: 1.55,
            roughness0: 0.75,
            roughness1: 1.30,
            lobe_mix: 0.85,
            legacy_transmission: true,
        }
    }

    /// Returns the built-in profile used for materials without a profile.
    pub fn system_default() -> Self {
        Self {
            surface_albedo: Spectrum::rgb(0.91, 0.34, 0.27),
            mean_free_path_color: Spectrum::rgb(1.0, 0.09, 0.07),
            mean_free_path_distance: 2.6,
            world_unit_scale: 1.0,
            roughness0: 0.5,
            roughness1: 1.2,
            ..Self::new(SYSTEM_DEFAULT_PROFILE_NAME)
        }
    }

    /// Repairs settings that cannot produce a usable profile and returns
    /// `true` if the mean free path had to be replaced. The surface albedo is
    /// clamped silently.
    pub fn validate_and_fix(&mut self) -> bool {
        let mut fixed = false;

        if self.mean_free_path_distance < MIN_MEAN_FREE_PATH_DISTANCE {
            warn!(
                "Profile '{}': mean free path distance {} too small, using {}",
                self.name, self.mean_free_path_distance, MIN_MEAN_FREE_PATH_DISTANCE
            );
            self.mean_free_path_distance = MIN_MEAN_FREE_PATH_DISTANCE;
            fixed = true;
        }

        if self.mean_free_path_color.max_component_value() < MIN_MEAN_FREE_PATH_COLOR {
            warn!(
                "Profile '{}': mean free path colour [{}] is black, using [{}]",
                self.name, self.mean_free_path_color, FALLBACK_MEAN_FREE_PATH_COLOR
            );
            self.mean_free_path_color = FALLBACK_MEAN_FREE_PATH_COLOR;
            fixed = true;
        }

        self.surface_albedo = self.surface_albedo.clamp(MIN_SURFACE_ALBEDO, 1.0);

        fixed
    }

    /// Derives the kernels and the transmission profile of a validated copy
    /// of these settings.
    pub fn bake(&self) -> BakedProfile {
        let mut profile = self.clone();
        profile.validate_and_fix();

        profile.surface_albedo = profile.surface_albedo.clamp(COLOR_BIAS, 1.0);
        profile.mean_free_path_color = profile.mean_free_path_color.clamp(COLOR_BIAS, 1.0);
        profile.transmission_tint = profile.transmission_tint.clamp(COLOR_BIAS, 1.0);
        profile.tint = profile.tint.clamp(0.0, 1.0);
        profile.boundary_color_bleed = profile.boundary_color_bleed.clamp(0.0, 1.0);

        let mfp = profile.mean_free_path_color * profile.mean_free_path_distance;
        let dmfp =
            diffuse_mean_free_path_from_mean_free_path(&profile.surface_albedo, &mfp) * CM_TO_MM;
        let scatter_radius = max(dmfp.max_component_value() * MM_TO_CM, MIN_SCATTER_RADIUS);
        debug!(
            "Profile '{}': dmfp [{}] mm, scatter radius {} cm",
            profile.name, dmfp, scatter_radius
        );

        let kernels = BAKED_KERNEL_SIZES
            .map(|n| mirrored_kernel(n, &profile.surface_albedo, &dmfp, scatter_radius));

        let transmission = transmission_profile_table(
            BAKED_TRANSMISSION_PROFILE_SIZE,
            profile.extinction_scale,
            &profile.surface_albedo,
            &dmfp,
            profile.world_unit_scale,
            &profile.transmission_tint,
            profile.legacy_transmission,
        );

        BakedProfile {
            profile,
            diffuse_mean_free_path: dmfp,
            scatter_radius,
            kernels,
            transmission,
        }
    }
}

impl Default for SubsurfaceProfile {
    /// Returns the system default profile.
    fn default() -> Self {
        Self::system_default()
    }
}

impl From<(&ParamSet, &str)> for SubsurfaceProfile {
    /// Create a new `SubsurfaceProfile` from parameters, using the default
    /// settings for missing ones.
    ///
    /// * `p` - Tuple containing the parameters and the profile name.
    fn from(p: (&ParamSet, &str)) -> Self {
        let (params, name) = p;
        let d = Self::new(name);

        Self {
            name: String::from(name),
            surface_albedo: params.find_one_spectrum("surfacealbedo", d.surface_albedo),
            mean_free_path_color: params
                .find_one_spectrum("meanfreepathcolor", d.mean_free_path_color),
            mean_free_path_distance: params
                .find_one_float("meanfreepathdistance", d.mean_free_path_distance),
            world_unit_scale: params.find_one_float("worldunitscale", d.world_unit_scale),
            tint: params.find_one_spectrum("tint", d.tint),
            boundary_color_bleed: params
                .find_one_spectrum("boundarycolorbleed", d.boundary_color_bleed),
            transmission_tint: params.find_one_spectrum("transmissiontint", d.transmission_tint),
            extinction_scale: params.find_one_float("extinctionscale", d.extinction_scale),
            normal_scale: params.find_one_float("normalscale", d.normal_scale),
            scattering_distribution: params
                .find_one_float("scatteringdistribution", d.scattering_distribution),
            ior: params.find_one_float("ior", d.ior),
            roughness0: params.find_one_float("roughness0", d.roughness0),
            roughness1: params.find_one_float("roughness1", d.roughness1),
            lobe_mix: params.find_one_float("lobemix", d.lobe_mix),
            legacy_transmission: params
                .find_one_bool("legacytransmission", d.legacy_transmission),
        }
    }
}

/// The per-profile outputs of the Burley model.
#[derive(Clone, Debug)]
pub struct BakedProfile {
    /// Validated settings with colours clamped to the ranges used for baking.
    pub profile: SubsurfaceProfile,

    /// Diffuse mean free path in mm.
    pub diffuse_mean_free_path: Spectrum,

    /// Scatter radius in cm.
    pub scatter_radius: Float,

    /// Kernels of `BAKED_KERNEL_SIZES` one-sided taps.
    pub kernels: [Vec<KernelSample>; 3],

    /// Transmission profile of `BAKED_TRANSMISSION_PROFILE_SIZE` samples.
    pub transmission: Vec<TransmissionSample>,
}

impl BakedProfile {
    /// Returns the index of the channel with the longest mean free path.
    pub fn dominant_channel(&self) -> usize {
        mean_free_path_from_diffuse_mean_free_path(
            &self.profile.surface_albedo,
            &self.diffuse_mean_free_path,
        )
        .max_component_index()
    }
}

impl fmt::Display for BakedProfile {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SubsurfaceProfile \"{}\"", self.profile.name)?;
        writeln!(f, "  albedo          [{}]", self.profile.surface_albedo)?;
        writeln!(f, "  dmfp (mm)       [{}]", self.diffuse_mean_free_path)?;
        writeln!(f, "  scatter radius  {} cm", self.scatter_radius)?;
        for (kernel, n) in self.kernels.iter().zip(BAKED_KERNEL_SIZES) {
            writeln!(f, "  kernel ({} taps)", n)?;
            for sample in kernel {
                writeln!(f, "    {}", sample)?;
            }
        }
        writeln!(f, "  transmission")?;
        for sample in self.transmission.iter() {
            writeln!(f, "    {}", sample)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn defaults() {
        let p = SubsurfaceProfile::new("skin");
        assert_eq!(p.name, "skin");
        assert_eq!(p.mean_free_path_distance, 2.67);
        assert_eq!(p.world_unit_scale, 0.1);
        assert!(p.legacy_transmission);

        let d = SubsurfaceProfile::system_default();
        assert_eq!(d.mean_free_path_color, Spectrum::rgb(1.0, 0.09, 0.07));
        assert_eq!(d.world_unit_scale, 1.0);
        assert_eq!(d.ior, 1.55);
        assert_eq!(d.lobe_mix, 0.85);
    }

    #[test]
    fn valid_settings_are_untouched() {
        let mut p = SubsurfaceProfile::new("skin");
        assert!(!p.validate_and_fix());
        assert_eq!(p, SubsurfaceProfile::new("skin"));
    }

    #[test]
    fn fixes_short_mean_free_path() {
        let mut p = SubsurfaceProfile::new("thin");
        p.mean_free_path_distance = 0.05;
        assert!(p.validate_and_fix());
        assert_eq!(p.mean_free_path_distance, 0.1);
    }

    #[test]
    fn fixes_black_mean_free_path_color() {
        let mut p = SubsurfaceProfile::new("black");
        p.mean_free_path_color = Spectrum::rgb(0.0005, 0.0, 0.0);
        assert!(p.validate_and_fix());
        assert_eq!(p.mean_free_path_color, Spectrum::rgb(1.0, 0.0, 0.5));

        // A single usable channel is kept.
        let mut p = SubsurfaceProfile::new("red");
        p.mean_free_path_color = Spectrum::rgb(0.002, 0.0, 0.0);
        assert!(!p.validate_and_fix());
        assert_eq!(p.mean_free_path_color, Spectrum::rgb(0.002, 0.0, 0.0));
    }

    #[test]
    fn clamps_surface_albedo() {
        let mut p = SubsurfaceProfile::new("bright");
        p.surface_albedo = Spectrum::rgb(1.5, -0.2, 0.5);
        assert!(!p.validate_and_fix());
        assert_eq!(p.surface_albedo, Spectrum::rgb(1.0, 0.01, 0.5));
    }

    #[test]
    fn from_paramset() {
        let mut params = ParamSet::new();
        params.add_rgb_spectrum("surfacealbedo", &[0.8, 0.5, 0.4]);
        params.add_float("meanfreepathdistance", &[1.5]);
        params.add_float("ior", &[1.4]);
        params.add_bool("legacytransmission", &[false]);

        let p = SubsurfaceProfile::from((&params, "marble"));
        assert_eq!(p.name, "marble");
        assert_eq!(p.surface_albedo, Spectrum::rgb(0.8, 0.5, 0.4));
        assert_eq!(p.mean_free_path_distance, 1.5);
        assert_eq!(p.ior, 1.4);
        assert!(!p.legacy_transmission);
        assert_eq!(p.mean_free_path_color, Spectrum::rgb(1.0, 0.089, 0.072));
        assert_eq!(p.roughness1, 1.30);
        assert!(params.unused().is_empty());
    }

    #[test]
    fn bake_skin() {
        let baked = SubsurfaceProfile::new("skin").bake();

        let albedo = Spectrum::rgb(0.91, 0.34, 0.27);
        let mfp = Spectrum::rgb(1.0, 0.089, 0.072) * 2.67;
        let dmfp = diffuse_mean_free_path_from_mean_free_path(&albedo, &mfp) * CM_TO_MM;
        for c in 0..3 {
            assert!(approx_eq!(
                f32,
                baked.diffuse_mean_free_path[c],
                dmfp[c],
                epsilon = 1e-3
            ));
        }
        assert!(approx_eq!(
            f32,
            baked.scatter_radius,
            dmfp.max_component_value() * MM_TO_CM,
            epsilon = 1e-4
        ));

        for (kernel, n) in baked.kernels.iter().zip(BAKED_KERNEL_SIZES) {
            assert_eq!(kernel.len(), n);
            assert_eq!(kernel[0].offset, 0.0);
        }
        assert_eq!(baked.transmission.len(), BAKED_TRANSMISSION_PROFILE_SIZE);
        assert_eq!(baked.transmission[31], TransmissionSample::BLACK);
        assert_eq!(baked.dominant_channel(), 0);
    }

    #[test]
    fn bake_clamps_colors() {
        let mut p = SubsurfaceProfile::new("clamped");
        p.mean_free_path_color = Spectrum::rgb(1.0, 0.0, 0.5);
        p.transmission_tint = Spectrum::rgb(0.0, 2.0, 0.5);
        p.tint = Spectrum::rgb(-1.0, 2.0, 0.5);
        p.boundary_color_bleed = Spectrum::rgb(1.5, 0.25, -0.5);

        let baked = p.bake();
        assert_eq!(baked.profile.mean_free_path_color, Spectrum::rgb(1.0, 0.009, 0.5));
        assert_eq!(baked.profile.transmission_tint, Spectrum::rgb(0.009, 1.0, 0.5));
        assert_eq!(baked.profile.tint, Spectrum::rgb(0.0, 1.0, 0.5));
        assert_eq!(baked.profile.boundary_color_bleed, Spectrum::rgb(1.0, 0.25, 0.0));

        // The settings themselves are left alone.
        assert_eq!(p.tint, Spectrum::rgb(-1.0, 2.0, 0.5));
    }

    #[test]
    fn bake_applies_fixes() {
        let mut p = SubsurfaceProfile::new("broken");
        p.mean_free_path_distance = 0.0;
        p.mean_free_path_color = Spectrum::ZERO;

        let baked = p.bake();
        assert_eq!(baked.profile.mean_free_path_distance, 0.1);
        assert_eq!(baked.profile.mean_free_path_color, Spectrum::rgb(1.0, 0.009, 0.5));
        assert!(!baked.diffuse_mean_free_path.has_nans());
    }

    #[test]
    fn minimum_scatter_radius() {
        let mut p = SubsurfaceProfile::new("tiny");
        p.mean_free_path_distance = 0.1;
        p.mean_free_path_color = Spectrum::new(0.01);
        p.surface_albedo = Spectrum::new(0.5);

        let baked = p.bake();
        assert!(baked.diffuse_mean_free_path.max_component_value() * MM_TO_CM < 0.1);
        assert_eq!(baked.scatter_radius, 0.1);
    }

    #[test]
    fn display_lists_outputs() {
        let s = format!("{}", SubsurfaceProfile::system_default().bake());
        assert!(s.starts_with("SubsurfaceProfile \"System_Default_Profile (ID: 0)\""));
        assert!(s.contains("kernel (13 taps)"));
        assert!(s.contains("transmission"));
    }
}
