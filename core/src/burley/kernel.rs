//! Mirrored diffusion kernel

use super::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Size of the working buffer. A mirrored kernel holds at most
/// `MAX_KERNEL_SAMPLES - 1` taps; larger requests are truncated.
pub const MAX_KERNEL_SAMPLES: usize = 64;

/// Kernels with more taps than this span the wider offset range.
const WIDE_RANGE_THRESHOLD: usize = 20;

/// Offset range for kernels up to `WIDE_RANGE_THRESHOLD` taps.
const NARROW_RANGE: Float = 2.0;

/// Offset range for kernels above `WIDE_RANGE_THRESHOLD` taps.
const WIDE_RANGE: Float = 3.0;

/// Exponent of the remap that concentrates taps near the centre.
const OFFSET_EXPONENT: Float = 2.0;

/// Post-scale applied to every offset after the weights are computed.
const OFFSET_SCALE: Float = 2.0;

/// The full mirrored kernel: the centre tap first, followed by the taps
/// left of the centre and then the taps right of it, each group ordered by
/// increasing offset. Per-channel weights sum to 1 over all taps unless that
/// channel carried no energy.
#[derive(Clone, Debug)]
pub struct MirroredKernel {
    /// Number of one-sided taps requested, including the centre.
    n_non_mirrored: usize,

    /// The mirrored taps.
    samples: Vec<KernelSample>,
}

impl MirroredKernel {
    /// Computes a new `MirroredKernel`.
    ///
    /// * `n_non_mirrored` - Number of one-sided taps including the centre.
    /// * `albedo`         - Surface albedo.
    /// * `dmfp`           - Diffuse mean free path in mm.
    /// * `scatter_radius` - Scatter radius in cm.
    pub fn new(
        n_non_mirrored: usize,
        albedo: &Spectrum,
        dmfp: &Spectrum,
        scatter_radius: Float,
    ) -> Self {
        if n_non_mirrored == 0 {
            return Self {
                n_non_mirrored,
                samples: vec![],
            };
        }

        let n_requested = n_non_mirrored.saturating_mul(2) - 1;
        let n_total = min(n_requested, MAX_KERNEL_SAMPLES - 1);
        if n_total < n_requested {
            debug!(
                "Kernel of {} taps truncated to {} mirrored taps",
                n_non_mirrored, n_total
            );
        }
        let center = n_total / 2;

        // Spread the offsets over [-range, range] and pull them towards the
        // centre.
        let range = if n_total > WIDE_RANGE_THRESHOLD {
            WIDE_RANGE
        } else {
            NARROW_RANGE
        };
        let mut offsets: Vec<Float> = (0..n_total)
            .map(|i| {
                let o = if n_total > 1 {
                    lerp(i as Float / (n_total - 1) as Float, -range, range)
                } else {
                    0.0
                };
                let sign = if o < 0.0 { -1.0 } else { 1.0 };
                range * sign * abs(o).powf(OFFSET_EXPONENT) / range.powf(OFFSET_EXPONENT)
            })
            .collect();
        offsets[center] = 0.0;

        // Weight every tap by the profile and the area it covers.
        let s = search_light_scaling_factor_rgb(albedo);
        let space_scale = scatter_radius * CM_TO_MM;
        let mut samples: Vec<KernelSample> = (0..n_total)
            .map(|i| {
                let w0 = if i > 0 {
                    abs(offsets[i] - offsets[i - 1])
                } else {
                    0.0
                };
                let w1 = if i + 1 < n_total {
                    abs(offsets[i] - offsets[i + 1])
                } else {
                    0.0
                };
                let area = (w0 + w1) / 2.0;
                let r = abs(offsets[i]) * space_scale;
                let weight = area * scattering_profile_rgb(r, albedo, &s, dmfp);
                KernelSample::new(weight, offsets[i] * OFFSET_SCALE)
            })
            .collect();

        // Centre tap goes first.
        samples[..=center].rotate_right(1);

        // Normalize each channel on its own; channels without energy are left
        // as they are.
        let sum = samples
            .iter()
            .fold(Spectrum::ZERO, |acc, sample| acc + sample.weight);
        for sample in samples.iter_mut() {
            for c in 0..SPECTRUM_SAMPLES {
                if sum[c] > 0.0 {
                    sample.weight[c] /= sum[c];
                }
            }
        }

        for (i, sample) in samples.iter().enumerate() {
            trace!("Kernel tap {}: {}", i, sample);
        }

        Self {
            n_non_mirrored,
            samples,
        }
    }

    /// Returns the mirrored taps.
    pub fn samples(&self) -> &[KernelSample] {
        &self.samples
    }

    /// Returns the per-channel sum of all weights.
    pub fn weight_sum(&self) -> Spectrum {
        self.samples
            .iter()
            .fold(Spectrum::ZERO, |acc, sample| acc + sample.weight)
    }

    /// Returns the centre tap followed by the taps right of the centre,
    /// ordered by increasing offset.
    ///
    /// When the request was truncated the taps beyond the working buffer are
    /// zero.
    pub fn collapse(&self) -> Vec<KernelSample> {
        let mut target = vec![KernelSample::default(); self.n_non_mirrored];
        self.collapse_into(&mut target);
        target
    }

    /// Writes the centre tap followed by the taps right of the centre into
    /// the given buffer.
    ///
    /// * `target` - The output buffer.
    pub fn collapse_into(&self, target: &mut [KernelSample]) {
        if target.is_empty() || self.samples.is_empty() {
            return;
        }

        let first_positive = self.samples.len() / 2 + 1;
        target[0] = self.samples[0];
        for (i, t) in target[1..].iter_mut().enumerate() {
            *t = self
                .samples
                .get(first_positive + i)
                .copied()
                .unwrap_or_default();
        }
    }
}

/// Computes a mirrored Burley kernel and writes the centre tap followed by
/// the positive half into `target`. The number of one-sided taps is the
/// length of `target`; an empty buffer is left untouched.
///
/// * `target`         - The output buffer.
/// * `albedo`         - Surface albedo.
/// * `dmfp`           - Diffuse mean free path in mm.
/// * `scatter_radius` - Scatter radius in cm.
pub fn compute_mirrored_kernel(
    target: &mut [KernelSample],
    albedo: &Spectrum,
    dmfp: &Spectrum,
    scatter_radius: Float,
) {
    if target.is_empty() {
        return;
    }
    MirroredKernel::new(target.len(), albedo, dmfp, scatter_radius).collapse_into(target);
}

/// Returns a mirrored Burley kernel collapsed to `n_samples` one-sided taps.
///
/// * `n_samples`      - Number of one-sided taps including the centre.
/// * `albedo`         - Surface albedo.
/// * `dmfp`           - Diffuse mean free path in mm.
/// * `scatter_radius` - Scatter radius in cm.
pub fn mirrored_kernel(
    n_samples: usize,
    albedo: &Spectrum,
    dmfp: &Spectrum,
    scatter_radius: Float,
) -> Vec<KernelSample> {
    MirroredKernel::new(n_samples, albedo, dmfp, scatter_radius).collapse()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    /// Skin-like profile parameters.
    fn skin() -> (Spectrum, Spectrum, Float) {
        let albedo = Spectrum::rgb(0.91, 0.34, 0.27);
        let mfp = Spectrum::rgb(2.6, 0.09 * 2.6, 0.07 * 2.6);
        let dmfp = diffuse_mean_free_path_from_mean_free_path(&albedo, &mfp) * CM_TO_MM;
        let scatter_radius = max(dmfp.max_component_value() * MM_TO_CM, 0.1);
        (albedo, dmfp, scatter_radius)
    }

    fn assert_normalized(kernel: &MirroredKernel) {
        let sum = kernel.weight_sum();
        for c in 0..SPECTRUM_SAMPLES {
            assert!(
                approx_eq!(Float, sum[c], 1.0, epsilon = 1e-5),
                "channel {} sums to {}",
                c,
                sum[c]
            );
        }
    }

    #[test]
    fn skin_kernel_13() {
        let (albedo, dmfp, scatter_radius) = skin();
        let kernel = MirroredKernel::new(13, &albedo, &dmfp, scatter_radius);
        assert_eq!(kernel.samples().len(), 25);
        assert_normalized(&kernel);

        let taps = kernel.collapse();
        assert_eq!(taps.len(), 13);
        assert_eq!(taps[0].offset, 0.0);
        for i in 1..13 {
            assert!(taps[i].offset > taps[i - 1].offset);
        }
        assert_eq!(taps[12].offset, WIDE_RANGE * OFFSET_SCALE);
    }

    #[test]
    fn skin_kernels_are_normalized() {
        let (albedo, dmfp, scatter_radius) = skin();
        for n in [2, 6, 9, 13, 20, 32] {
            assert_normalized(&MirroredKernel::new(n, &albedo, &dmfp, scatter_radius));
        }
    }

    #[test]
    fn empty_request() {
        let (albedo, dmfp, scatter_radius) = skin();
        assert!(mirrored_kernel(0, &albedo, &dmfp, scatter_radius).is_empty());

        let mut target: [KernelSample; 0] = [];
        compute_mirrored_kernel(&mut target, &albedo, &dmfp, scatter_radius);
    }

    #[test]
    fn single_tap_carries_no_area() {
        let (albedo, dmfp, scatter_radius) = skin();
        let taps = mirrored_kernel(1, &albedo, &dmfp, scatter_radius);
        assert_eq!(taps, vec![KernelSample::default()]);
    }

    #[test]
    fn oversized_request_is_truncated() {
        let (albedo, dmfp, scatter_radius) = skin();
        let kernel = MirroredKernel::new(40, &albedo, &dmfp, scatter_radius);
        assert_eq!(kernel.samples().len(), MAX_KERNEL_SAMPLES - 1);
        assert_normalized(&kernel);

        let taps = kernel.collapse();
        assert_eq!(taps.len(), 40);
        assert_eq!(taps[0].offset, 0.0);
        for i in 1..32 {
            assert!(taps[i].offset > taps[i - 1].offset);
        }
        assert_eq!(taps[31].offset, WIDE_RANGE * OFFSET_SCALE);
        assert!(taps[32..].iter().all(|t| *t == KernelSample::default()));
    }

    #[test]
    fn huge_request_is_clamped() {
        let (albedo, dmfp, scatter_radius) = skin();
        let kernel = MirroredKernel::new(usize::MAX / 2 + 1, &albedo, &dmfp, scatter_radius);
        assert_eq!(kernel.samples().len(), MAX_KERNEL_SAMPLES - 1);
        assert_eq!(kernel.samples()[0].offset, 0.0);
    }

    #[test]
    fn centre_first_then_negative_then_positive() {
        let (albedo, dmfp, scatter_radius) = skin();
        let kernel = MirroredKernel::new(9, &albedo, &dmfp, scatter_radius);
        let samples = kernel.samples();
        assert_eq!(samples[0].offset, 0.0);
        assert!(samples[1..9].iter().all(|s| s.offset < 0.0));
        assert!(samples[9..].iter().all(|s| s.offset > 0.0));
        for i in 2..samples.len() {
            if i != 9 {
                assert!(samples[i].offset > samples[i - 1].offset);
            }
        }

        // Taps mirror each other.
        for i in 1..9 {
            let neg = samples[i];
            let pos = samples[samples.len() - i];
            assert!(approx_eq!(Float, -neg.offset, pos.offset, epsilon = 1e-5));
            for c in 0..SPECTRUM_SAMPLES {
                assert!(approx_eq!(Float, neg.weight[c], pos.weight[c], epsilon = 1e-5));
            }
        }
    }

    #[test]
    fn narrow_range_for_small_kernels() {
        let (albedo, dmfp, scatter_radius) = skin();
        let taps = mirrored_kernel(6, &albedo, &dmfp, scatter_radius);
        assert_eq!(taps[5].offset, NARROW_RANGE * OFFSET_SCALE);
    }

    #[test]
    fn disabled_channel_is_not_normalized() {
        let albedo = Spectrum::new(0.5);
        let dmfp = Spectrum::rgb(1.0, 0.0, 1.0);
        let kernel = MirroredKernel::new(6, &albedo, &dmfp, 0.5);
        let sum = kernel.weight_sum();
        assert!(approx_eq!(Float, sum[0], 1.0, epsilon = 1e-5));
        assert_eq!(sum[1], 0.0);
        assert!(approx_eq!(Float, sum[2], 1.0, epsilon = 1e-5));
    }

    #[test]
    fn compute_into_matches_allocating_variant() {
        let (albedo, dmfp, scatter_radius) = skin();
        let mut target = [KernelSample::default(); 6];
        compute_mirrored_kernel(&mut target, &albedo, &dmfp, scatter_radius);
        assert_eq!(target.to_vec(), mirrored_kernel(6, &albedo, &dmfp, scatter_radius));
    }

    proptest! {
        #[test]
        fn kernel_invariants(
            n in 2usize..=32,
            r in 0.05..=1.0f32, g in 0.05..=1.0f32, b in 0.05..=1.0f32,
            mfp in 0.1..10.0f32,
        ) {
            let albedo = Spectrum::rgb(r, g, b);
            let dmfp = diffuse_mean_free_path_from_mean_free_path(
                &albedo,
                &Spectrum::rgb(mfp, 0.5 * mfp, 0.25 * mfp),
            ) * CM_TO_MM;
            let scatter_radius = max(dmfp.max_component_value() * MM_TO_CM, 0.1);
            let kernel = MirroredKernel::new(n, &albedo, &dmfp, scatter_radius);

            let sum = kernel.weight_sum();
            for c in 0..SPECTRUM_SAMPLES {
                prop_assert!(approx_eq!(Float, sum[c], 1.0, epsilon = 1e-5));
            }

            let taps = kernel.collapse();
            prop_assert_eq!(taps.len(), n);
            prop_assert_eq!(taps[0].offset, 0.0);
            for i in 1..n {
                prop_assert!(taps[i].offset > taps[i - 1].offset);
            }
        }
    }
}
