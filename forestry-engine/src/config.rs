//! Protection configuration — reads a JSON config file and falls back to
//! defaults on any load failure rather than refusing to start.

use crate::store::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Runtime configuration, read-only to the core once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ProtectionConfig {
    /// Require the owner to hold the use permission before zones are created
    /// or owner/associate harvesting is allowed.
    pub require_permission: bool,
    /// Allow the building owner (and associates) to harvest inside the zone.
    pub allow_owner: bool,
    /// Consult the friends collaborator when deciding association.
    pub use_friends: bool,
    /// Consult the clans collaborator when deciding association.
    pub use_clans: bool,
    /// Consult the team roster when deciding association.
    pub use_teams: bool,
    /// Locate protected resources through the zone service instead of raw
    /// proximity.
    pub use_zone_manager: bool,
    /// Permit creating a protection zone inside a foreign zone.
    pub allow_zone_overlap: bool,
    /// Also protect ore deposits in the gather paths.
    pub protect_ore_deposits: bool,
    /// Maximum structures tracked per owner.
    pub player_limit: usize,
    /// At the limit, reject new structures outright.
    pub no_update: bool,
    /// Over the limit, drop the oldest tracked structure instead of the
    /// second-oldest.
    pub update_last: bool,
    /// Radius of the spherical zone created around each structure.
    pub protection_radius: f32,
    /// Message sent to an offending player, once per zone.
    pub message: String,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            require_permission: false,
            allow_owner: false,
            use_friends: false,
            use_clans: false,
            use_teams: false,
            use_zone_manager: false,
            allow_zone_overlap: false,
            protect_ore_deposits: false,
            player_limit: 0,
            no_update: false,
            update_last: false,
            protection_radius: 120.0,
            message: "This area is protected by the local Forestry Service.".to_string(),
        }
    }
}

impl ProtectionConfig {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file yields defaults with an `info` log; an unreadable or
    /// unparsable file yields defaults with a `warn`. Load never fails.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Writes the configuration back out as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
