//! Authorization and zone bookkeeping core for TC-anchored resource
//! protection.
//!
//! Decides whether a harvesting actor may damage or gather a protected
//! resource, and maintains the owner → (structure → zone) bookkeeping under
//! a configurable per-owner zone limit. Zone geometry and membership live in
//! an external zone service; social relationships (friends, clans, teams)
//! live in external collaborator plugins. Both are reached only through the
//! traits in [`services`], so any of them may be absent at runtime.
//!
//! All state is owned by explicit instances ([`ZoneRegistry`],
//! [`NotificationLedger`]) constructed once and handed to call sites. The
//! core is synchronous and single-writer: in a multi-threaded host, wrap the
//! whole thing in one mutual-exclusion domain.

mod authz;
mod config;
mod oracle;
mod registry;
mod services;
mod store;

pub use authz::{AuthorizationEngine, NotificationLedger, find_protected_zone};
pub use config::ProtectionConfig;
pub use oracle::RelationshipOracle;
pub use registry::{CreateOutcome, UpsertOutcome, ZoneRegistry};
pub use services::{
    ClanProvider, FriendsProvider, Messenger, PermissionService, TeamProvider, ZoneService,
};
pub use store::{DataFile, OwnerZoneMap, StorageError, StorageResult};

/// Permission key gating zone creation when `require_permission` is set.
pub const PERMISSION_KEY: &str = "forestryzones.use";

/// Name tag this engine stamps on every zone it creates. Zones carrying any
/// other tag belong to unrelated systems and are never adopted.
pub const ZONE_NAME_TAG: &str = "ForestryZones";
