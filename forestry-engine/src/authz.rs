//! Authorization decision engine and the denial-notification ledger.

use crate::config::ProtectionConfig;
use crate::oracle::RelationshipOracle;
use crate::services::PermissionService;
use crate::PERMISSION_KEY;
use forestry_types::{PlayerId, ZoneId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Combines ownership, association, and the permission/config flags into an
/// allow/deny decision for a harvesting attempt.
pub struct AuthorizationEngine {
    oracle: RelationshipOracle,
    permissions: Arc<dyn PermissionService>,
}

impl AuthorizationEngine {
    #[must_use]
    pub fn new(oracle: RelationshipOracle, permissions: Arc<dyn PermissionService>) -> Self {
        Self {
            oracle,
            permissions,
        }
    }

    /// Whether `actor` may harvest a resource protected by `owner`'s zone.
    ///
    /// Pure predicate:
    /// 1. the actor must be the owner or an associate of the owner;
    /// 2. `allow_owner` must be set at all;
    /// 3. without `require_permission` that is sufficient;
    /// 4. with it, the **owner** must hold the use permission — an associate
    ///    rides on the owner's grant, never their own.
    #[must_use]
    pub fn is_authorized(
        &self,
        config: &ProtectionConfig,
        owner: PlayerId,
        actor: PlayerId,
    ) -> bool {
        if actor != owner && !self.oracle.are_associated(config, actor, owner) {
            return false;
        }
        if !config.allow_owner {
            return false;
        }
        if !config.require_permission {
            return true;
        }
        self.permissions.has_permission(owner, PERMISSION_KEY)
    }
}

/// First zone in the resource's membership list that is tracked by this
/// engine. Untracked ids are skipped, not treated as a miss: the scan stops
/// only at the first *tracked* zone.
#[must_use]
pub fn find_protected_zone<'a>(
    resource_zones: &'a [ZoneId],
    tracked: &HashSet<ZoneId>,
) -> Option<&'a ZoneId> {
    resource_zones.iter().find(|zone| tracked.contains(*zone))
}

/// Records which (actor, zone) pairs have already been warned, so the deny
/// message is sent at most once per pair. Cleared only on reload, never on a
/// timer.
#[derive(Debug, Default)]
pub struct NotificationLedger {
    warned: HashMap<PlayerId, HashSet<ZoneId>>,
}

impl NotificationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per (actor, zone) pair; the caller sends
    /// the warning on true.
    pub fn first_denial(&mut self, actor: PlayerId, zone: &ZoneId) -> bool {
        self.warned.entry(actor).or_default().insert(zone.clone())
    }

    /// Forgets all recorded warnings.
    pub fn clear(&mut self) {
        self.warned.clear();
    }
}
