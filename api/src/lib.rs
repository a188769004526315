//! The API

#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

mod profile_table;

use sss_core::paramset::*;
use sss_core::subsurface_profile::*;
use std::collections::BTreeMap;

// Re-export.
pub mod parser;
pub use profile_table::*;

/// Registry of the subsurface profiles declared in description files.
///
/// Row 0 always holds the system default profile. Named profiles follow in
/// name order.
pub struct Api {
    /// Declared profiles sorted by name.
    profiles: BTreeMap<String, SubsurfaceProfile>,

    /// The built-in profile bound to row 0.
    default_profile: SubsurfaceProfile,
}

impl Api {
    /// Returns a newly initialized API.
    pub fn new() -> Self {
        Self {
            profiles: BTreeMap::new(),
            default_profile: SubsurfaceProfile::system_default(),
        }
    }

    /// Declares a named profile. A profile declared again under the same
    /// name replaces the earlier one. The name of the built-in profile is
    /// reserved and such declarations are ignored.
    ///
    /// * `name`   - Profile name.
    /// * `params` - Profile settings.
    pub fn subsurface_profile(&mut self, name: &str, params: &ParamSet) {
        if name == SYSTEM_DEFAULT_PROFILE_NAME {
            warn!("SubsurfaceProfile '{}' is reserved, ignoring declaration", name);
            return;
        }

        let profile = SubsurfaceProfile::from((params, name));
        params.report_unused();

        if self.profiles.insert(String::from(name), profile).is_some() {
            warn!("SubsurfaceProfile '{}' redefined", name);
        }
    }

    /// Remove all declared profiles.
    pub fn clear(&mut self) {
        self.profiles.clear();
    }

    /// Returns the profiles in row order, starting with the system default.
    /// Profiles that do not fit into the table are left out.
    pub fn rows(&self) -> Vec<&SubsurfaceProfile> {
        let mut rows = vec![&self.default_profile];
        for (row, profile) in self.profiles.values().enumerate() {
            if row + 1 < MAX_PROFILE_COUNT {
                rows.push(profile);
            } else {
                warn!(
                    "SubsurfaceProfile '{}' dropped, the table holds {} profiles",
                    profile.name, MAX_PROFILE_COUNT
                );
            }
        }
        rows
    }

    /// Returns the profile names in row order.
    pub fn profile_names(&self) -> Vec<&str> {
        self.rows().into_iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns the row of a declared profile. Unknown names map to the
    /// system default row.
    ///
    /// * `name` - Profile name.
    pub fn profile_row(&self, name: &str) -> usize {
        self.profiles
            .keys()
            .position(|n| n == name)
            .map(|i| i + 1)
            .filter(|&row| row < MAX_PROFILE_COUNT)
            .unwrap_or(0)
    }

    /// Returns a declared profile.
    ///
    /// * `name` - Profile name.
    pub fn profile(&self, name: &str) -> Option<&SubsurfaceProfile> {
        self.profiles.get(name)
    }

    /// Bakes every profile in row order.
    pub fn bake_profiles(&self) -> Vec<BakedProfile> {
        self.rows()
            .into_iter()
            .map(|profile| {
                info!("Baking SubsurfaceProfile '{}'", profile.name);
                profile.bake()
            })
            .collect()
    }

    /// Bakes every profile and packs the results into a lookup table.
    pub fn bake(&self) -> ProfileTable {
        ProfileTable::from(self.bake_profiles().as_slice())
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
