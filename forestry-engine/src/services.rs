//! Collaborator service traits.
//!
//! Every external surface the core touches — the zone service, the social
//! plugins, permissions, chat — sits behind one of these synchronous traits.
//! Optional collaborators are carried as `Option<Arc<dyn …>>` and checked
//! for presence before each call; an absent collaborator means the dependent
//! feature is disabled, never an error.

use forestry_types::{EntityId, PlayerId, Position, ZoneId};
use std::collections::HashSet;

/// Friends plugin: symmetric-enough pairwise friendship check.
pub trait FriendsProvider: Send + Sync {
    fn are_friends(&self, a: PlayerId, b: PlayerId) -> bool;
}

/// Clans plugin: resolves a player to their clan name, if any.
pub trait ClanProvider: Send + Sync {
    fn clan_of(&self, player: PlayerId) -> Option<String>;
}

/// Native team system: current team handle and roster lookup.
pub trait TeamProvider: Send + Sync {
    /// The player's current team, `None` when teamless.
    fn current_team_of(&self, player: PlayerId) -> Option<u64>;
    /// Member roster of a team; empty when the team is unknown.
    fn team_members(&self, team: u64) -> HashSet<PlayerId>;
}

/// External zone-management service. Zone geometry and membership live
/// entirely on the other side of this trait.
pub trait ZoneService: Send + Sync {
    /// Creates (or re-shapes) a spherical zone centered on `position`.
    fn create_or_update_zone(&self, id: &ZoneId, name: &str, radius: f32, position: Position);
    /// Deletes a zone. Unknown ids are ignored by the service.
    fn erase_zone(&self, id: &ZoneId);
    /// The zone's name tag; `None` for stale or foreign-unnamed zones.
    fn zone_name(&self, id: &ZoneId) -> Option<String>;
    /// Zones the entity currently sits in, in the service's own order.
    fn entity_zones(&self, entity: EntityId) -> Vec<ZoneId>;
    /// Every zone id the service knows about.
    fn zone_ids(&self) -> Vec<ZoneId>;
}

/// Host permission system.
pub trait PermissionService: Send + Sync {
    fn has_permission(&self, player: PlayerId, key: &str) -> bool;
    fn register_permission(&self, key: &str);
}

/// Chat reply surface for denial warnings.
pub trait Messenger: Send + Sync {
    fn send(&self, to: PlayerId, message: &str);
}
