//! Profile Lookup Table
//!
//! Each baked profile occupies one row of `TABLE_WIDTH` RGBA texels:
//!
//! | texel    | contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | 0        | tint, encoded world unit scale                            |
//! | 1        | surface albedo, albedo of the longest mean free path      |
//! | 2        | encoded diffuse mean free path, its longest channel       |
//! | 3        | extinction, normal scale, scattering distribution, 1/IOR  |
//! | 4        | boundary colour bleed                                     |
//! | 5        | dual specular roughness, lobe mix, average roughness      |
//! | 6..19    | kernel of 13 taps                                         |
//! | 19..28   | kernel of 9 taps                                          |
//! | 28..34   | kernel of 6 taps                                          |
//! | 34..66   | transmission profile                                      |

use sss_core::pbrt::*;
use sss_core::spectrum::*;
use sss_core::subsurface_profile::*;
use std::fmt;

/// An RGBA texel.
pub type Texel = [Float; 4];

/// Number of texels per row.
pub const TABLE_WIDTH: usize = 128;

/// Number of rows.
pub const MAX_PROFILE_COUNT: usize = 256;

pub const TINT_SCALE_OFFSET: usize = 0;
pub const SURFACE_ALBEDO_OFFSET: usize = 1;
pub const DIFFUSE_MEAN_FREE_PATH_OFFSET: usize = 2;
pub const TRANSMISSION_OFFSET: usize = 3;
pub const BOUNDARY_COLOR_BLEED_OFFSET: usize = 4;
pub const DUAL_SPECULAR_OFFSET: usize = 5;

/// First texel of each kernel, matching `BAKED_KERNEL_SIZES`.
pub const KERNEL_OFFSETS: [usize; 3] = [6, 19, 28];

pub const TRANSMISSION_PROFILE_OFFSET: usize = 34;

const WORLD_UNIT_SCALE_ENCODING: Float = 0.02;
const DIFFUSE_MEAN_FREE_PATH_ENCODING: Float = 0.0002;
const EXTINCTION_SCALE_ENCODING: Float = 0.01;
const MAX_DUAL_SPECULAR_ROUGHNESS: Float = 2.0;

/// Kernel offsets are stored relative to this range.
const MAX_KERNEL_OFFSET: Float = 3.0;

/// Encodes a world unit scale in cm to [0, 1].
///
/// * `world_unit_scale` - World unit scale in cm.
pub fn encode_world_unit_scale(world_unit_scale: Float) -> Float {
    saturate(world_unit_scale * WORLD_UNIT_SCALE_ENCODING)
}

/// Encodes a diffuse mean free path in mm to [0, 1], covering up to 500cm.
///
/// * `dmfp` - Diffuse mean free path in mm.
pub fn encode_diffuse_mean_free_path(dmfp: Float) -> Float {
    saturate(dmfp * DIFFUSE_MEAN_FREE_PATH_ENCODING)
}

/// Encodes a scattering distribution in [-1, 1] to [0, 1].
///
/// * `scattering_distribution` - Phase function anisotropy.
pub fn encode_scattering_distribution(scattering_distribution: Float) -> Float {
    saturate((scattering_distribution + 1.0) * 0.5)
}

/// Encodes an extinction scale to [0, 1].
///
/// * `extinction_scale` - Extinction scale.
pub fn encode_extinction_scale(extinction_scale: Float) -> Float {
    saturate(extinction_scale * EXTINCTION_SCALE_ENCODING)
}

fn texel(s: &Spectrum, a: Float) -> Texel {
    let [r, g, b] = s.to_rgb();
    [r, g, b, a]
}

/// Packs a baked profile into a table row.
///
/// * `baked` - The baked profile.
pub fn pack_row(baked: &BakedProfile) -> [Texel; TABLE_WIDTH] {
    let p = &baked.profile;
    let channel = baked.dominant_channel();
    let dmfp = baked.diffuse_mean_free_path;

    let mut row = [[0.0; 4]; TABLE_WIDTH];

    row[TINT_SCALE_OFFSET] = texel(&p.tint, encode_world_unit_scale(p.world_unit_scale));
    row[SURFACE_ALBEDO_OFFSET] = texel(&p.surface_albedo, p.surface_albedo[channel]);
    row[DIFFUSE_MEAN_FREE_PATH_OFFSET] = texel(
        &dmfp.map(encode_diffuse_mean_free_path),
        encode_diffuse_mean_free_path(dmfp[channel]),
    );
    row[TRANSMISSION_OFFSET] = [
        encode_extinction_scale(p.extinction_scale),
        p.normal_scale,
        encode_scattering_distribution(p.scattering_distribution),
        1.0 / p.ior,
    ];
    row[BOUNDARY_COLOR_BLEED_OFFSET] = texel(&p.boundary_color_bleed, 0.0);

    let average_roughness = p.roughness0 * (1.0 - p.lobe_mix) + p.roughness1 * p.lobe_mix;
    row[DUAL_SPECULAR_OFFSET] = [
        saturate(p.roughness0 / MAX_DUAL_SPECULAR_ROUGHNESS),
        saturate(p.roughness1 / MAX_DUAL_SPECULAR_ROUGHNESS),
        p.lobe_mix,
        saturate(average_roughness / MAX_DUAL_SPECULAR_ROUGHNESS),
    ];

    for (kernel, start) in baked.kernels.iter().zip(KERNEL_OFFSETS) {
        for (i, sample) in kernel.iter().enumerate() {
            let mut t = sample.to_rgba();
            t[3] /= MAX_KERNEL_OFFSET;
            row[start + i] = t;
        }
    }

    for (i, sample) in baked.transmission.iter().enumerate() {
        row[TRANSMISSION_PROFILE_OFFSET + i] = sample.to_rgba();
    }

    row
}

/// In-memory lookup table of `MAX_PROFILE_COUNT` rows of `TABLE_WIDTH` texels.
/// Unused texels are zero.
#[derive(Clone)]
pub struct ProfileTable {
    /// Row-major texels.
    texels: Vec<Texel>,

    /// Profile name of each populated row.
    names: Vec<String>,
}

impl ProfileTable {
    /// Returns an empty table.
    pub fn new() -> Self {
        Self {
            texels: vec![[0.0; 4]; TABLE_WIDTH * MAX_PROFILE_COUNT],
            names: vec![],
        }
    }

    /// Packs a baked profile into the next free row and returns the row.
    ///
    /// * `baked` - The baked profile.
    pub fn push(&mut self, baked: &BakedProfile) -> Result<usize, String> {
        let row = self.names.len();
        if row >= MAX_PROFILE_COUNT {
            return Err(format!(
                "No row left for SubsurfaceProfile '{}'",
                baked.profile.name
            ));
        }

        let start = row * TABLE_WIDTH;
        self.texels[start..start + TABLE_WIDTH].copy_from_slice(&pack_row(baked));
        self.names.push(baked.profile.name.clone());
        Ok(row)
    }

    /// Returns the profile names of the populated rows.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the row holding the named profile.
    ///
    /// * `name` - Profile name.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the texels of a row.
    ///
    /// * `row` - Row index.
    pub fn row(&self, row: usize) -> &[Texel] {
        &self.texels[row * TABLE_WIDTH..(row + 1) * TABLE_WIDTH]
    }

    /// Returns a texel.
    ///
    /// * `row`    - Row index.
    /// * `column` - Texel index within the row.
    pub fn texel(&self, row: usize, column: usize) -> Texel {
        self.texels[row * TABLE_WIDTH + column]
    }

    /// Returns all texels in row-major order.
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[BakedProfile]> for ProfileTable {
    /// Packs baked profiles into consecutive rows. Profiles beyond the last
    /// row are dropped.
    ///
    /// * `profiles` - The baked profiles.
    fn from(profiles: &[BakedProfile]) -> Self {
        let mut table = Self::new();
        for baked in profiles {
            if let Err(e) = table.push(baked) {
                warn!("{}", e);
            }
        }
        table
    }
}

impl fmt::Display for ProfileTable {
    /// Formats the populated rows, skipping unused texels.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, name) in self.names.iter().enumerate() {
            writeln!(f, "row {} \"{}\"", row, name)?;
            for (column, t) in self.row(row).iter().enumerate() {
                if *t != [0.0; 4] {
                    writeln!(f, "  {:3}: {} {} {} {}", column, t[0], t[1], t[2], t[3])?;
                }
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
