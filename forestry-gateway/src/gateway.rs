//! The gateway: one handler per host callback, calling into the engine.

use crate::events::{ResourceKind, Verdict};
use crate::world::{StructureInfo, WorldQuery};
use forestry_engine::{
    find_protected_zone, AuthorizationEngine, ClanProvider, CreateOutcome, DataFile,
    FriendsProvider, Messenger, NotificationLedger, PermissionService, ProtectionConfig,
    RelationshipOracle, TeamProvider, ZoneRegistry, ZoneService, PERMISSION_KEY, ZONE_NAME_TAG,
};
use forestry_types::{EntityId, PlayerId, Position, StructureId, ZoneId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External collaborators handed to the gateway at construction.
///
/// The zone service and the social plugins are optional: when absent, each
/// dependent feature is simply disabled (never an error). Permissions and
/// the world view come from the host and are always present.
pub struct Collaborators {
    pub zones: Option<Arc<dyn ZoneService>>,
    pub friends: Option<Arc<dyn FriendsProvider>>,
    pub clans: Option<Arc<dyn ClanProvider>>,
    pub teams: Option<Arc<dyn TeamProvider>>,
    pub permissions: Arc<dyn PermissionService>,
    pub messenger: Option<Arc<dyn Messenger>>,
    pub world: Arc<dyn WorldQuery>,
}

/// Synchronous event dispatcher owning all mutable protection state.
///
/// Single-writer by construction: every handler takes `&mut self`, and a
/// multi-threaded host must funnel all calls through one mutual-exclusion
/// domain.
pub struct Gateway {
    config: ProtectionConfig,
    registry: ZoneRegistry,
    ledger: NotificationLedger,
    data: DataFile,
    authz: AuthorizationEngine,
    permissions: Arc<dyn PermissionService>,
    zones: Option<Arc<dyn ZoneService>>,
    messenger: Option<Arc<dyn Messenger>>,
    world: Arc<dyn WorldQuery>,
    enabled: bool,
}

impl Gateway {
    #[must_use]
    pub fn new(config: ProtectionConfig, data: DataFile, collaborators: Collaborators) -> Self {
        collaborators.permissions.register_permission(PERMISSION_KEY);
        let oracle = RelationshipOracle::new(
            collaborators.friends,
            collaborators.clans,
            collaborators.teams,
        );
        let authz = AuthorizationEngine::new(oracle, collaborators.permissions.clone());
        Self {
            config,
            registry: ZoneRegistry::new(),
            ledger: NotificationLedger::new(),
            data,
            authz,
            permissions: collaborators.permissions,
            zones: collaborators.zones,
            messenger: collaborators.messenger,
            world: collaborators.world,
            enabled: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    // ── lifecycle ────────────────────────────────────────────────

    /// World is up; structure-spawn events are live from here on.
    pub fn on_server_initialized(&mut self) {
        self.enabled = true;
    }

    /// Loads persisted state and re-establishes zones for every structure
    /// that survived the restart. Idempotent: structures already inside a
    /// zone with our name tag adopt it instead of creating a duplicate.
    pub fn on_loaded(&mut self) {
        match self.data.load() {
            Ok(map) => self.registry.restore(map),
            Err(e) => warn!("failed to load data file: {e}, starting empty"),
        }

        for (owner, entries) in self.registry.snapshot() {
            for (structure, _) in entries {
                let Some(info) = self.world.structure_alive(structure) else {
                    debug!("structure {structure} no longer valid, skipping");
                    continue;
                };
                if self.config.require_permission
                    && !self.permissions.has_permission(owner, PERMISSION_KEY)
                {
                    debug!("permission required, skipping structure {structure}");
                    continue;
                }
                if self.config.use_zone_manager {
                    self.create_zone(info);
                }
            }
        }
    }

    /// A map wipe: forget every owner→zone mapping and persist the empty map.
    pub fn on_new_save(&mut self) {
        self.registry.clear();
        self.persist();
    }

    /// Erase every zone carrying our name tag from the external service.
    pub fn on_unload(&mut self) {
        let Some(zones) = &self.zones else {
            return;
        };
        for id in zones.zone_ids() {
            if zones.zone_name(&id).as_deref() == Some(ZONE_NAME_TAG) {
                zones.erase_zone(&id);
                info!("erased zone {id}");
            }
        }
    }

    // ── structure lifecycle events ───────────────────────────────

    pub fn handle_structure_spawned(&mut self, info: StructureInfo) {
        if !self.enabled {
            return;
        }
        if self.config.require_permission
            && !self.permissions.has_permission(info.owner, PERMISSION_KEY)
        {
            return;
        }
        // Limits and overlap are checked inside the registry.
        if self.config.use_zone_manager {
            self.create_zone(info);
        }
    }

    pub fn handle_structure_destroyed(&mut self, structure: StructureId) {
        let Some(zone) = self.registry.remove(structure) else {
            return;
        };
        if self.registry.release_if_unreferenced(&zone) && self.config.use_zone_manager {
            if let Some(zones) = &self.zones {
                zones.erase_zone(&zone);
            }
        }
        self.persist();
    }

    // ── harvesting events ────────────────────────────────────────

    /// A player is damaging a tree or ore node. Denials warn the actor once
    /// per (actor, zone). The ore config flag deliberately plays no part
    /// here; it only gates the gather paths.
    pub fn handle_resource_damage(
        &mut self,
        kind: ResourceKind,
        entity: EntityId,
        position: Position,
        actor: PlayerId,
    ) -> Verdict {
        debug!("resource damage: {kind:?} entity {entity} by {actor}");
        self.zone_verdict(entity, position, actor, true)
    }

    /// A dispenser is being gathered. Without the zone manager this falls
    /// back to raw proximity: any structure within the protection radius
    /// whose owner check fails cancels the gather. No warning either way.
    pub fn handle_dispenser_gather(
        &mut self,
        kind: ResourceKind,
        entity: EntityId,
        position: Position,
        actor: PlayerId,
    ) -> Verdict {
        if kind == ResourceKind::OreDeposit && !self.config.protect_ore_deposits {
            return Verdict::Pass;
        }
        if !self.config.use_zone_manager {
            if let Some(tc) = self.local_structure(position) {
                if !self.authz.is_authorized(&self.config, tc.owner, actor) {
                    debug!(
                        "protected {kind:?} within {} of structure {}",
                        self.config.protection_radius, tc.id
                    );
                    return Verdict::Cancel;
                }
            }
            return Verdict::Pass;
        }
        self.zone_verdict(entity, position, actor, false)
    }

    /// Bonus hit at the end of a dispenser: same zone decision as damage,
    /// minus the warning message.
    pub fn handle_dispenser_bonus(
        &mut self,
        kind: ResourceKind,
        entity: EntityId,
        position: Position,
        actor: PlayerId,
    ) -> Verdict {
        if kind == ResourceKind::OreDeposit && !self.config.protect_ore_deposits {
            return Verdict::Pass;
        }
        self.zone_verdict(entity, position, actor, false)
    }

    // ── internals ────────────────────────────────────────────────

    /// Shared zone-based decision: first tracked zone the resource sits in
    /// wins; authorized actors pass; everyone else is cancelled, optionally
    /// with a once-per-zone warning.
    fn zone_verdict(
        &mut self,
        entity: EntityId,
        position: Position,
        actor: PlayerId,
        notify: bool,
    ) -> Verdict {
        let memberships = self.entity_zones(entity);
        if memberships.is_empty() {
            return Verdict::Pass;
        }
        let Some(zone) = find_protected_zone(&memberships, self.registry.tracked_zones()).cloned()
        else {
            return Verdict::Pass;
        };

        if let Some(tc) = self.local_structure(position) {
            if self.authz.is_authorized(&self.config, tc.owner, actor) {
                return Verdict::Pass;
            }
        }

        debug!("protected resource in zone {zone}, denying {actor}");
        if notify && self.ledger.first_denial(actor, &zone) {
            if let Some(messenger) = &self.messenger {
                messenger.send(actor, &self.config.message);
            }
        }
        Verdict::Cancel
    }

    fn create_zone(&mut self, info: StructureInfo) {
        let Some(zones) = self.zones.clone() else {
            debug!("zone service absent, structure {} left unprotected", info.id);
            return;
        };
        let outcome = self.registry.create(
            &self.config,
            info.owner,
            info.id,
            info.position,
            zones.as_ref(),
        );
        match outcome {
            CreateOutcome::Created(zone) => {
                debug!("created zone {zone} for structure {}", info.id);
                self.persist();
            }
            CreateOutcome::Adopted(zone) => {
                debug!("adopted existing zone {zone} for structure {}", info.id);
                self.persist();
            }
            CreateOutcome::OverlapRefused(name) => {
                debug!("structure {} overlaps foreign zone {name}, skipped", info.id);
            }
            CreateOutcome::RejectedAtCapacity => {
                debug!("owner {} at zone limit, structure {} skipped", info.owner, info.id);
            }
        }
    }

    /// Nearest structure, consulted only when some authorization path could
    /// actually admit the actor.
    fn local_structure(&self, position: Position) -> Option<StructureInfo> {
        let c = &self.config;
        if c.allow_owner || c.use_friends || c.use_clans || c.use_teams {
            self.world.structure_near(position, c.protection_radius)
        } else {
            None
        }
    }

    fn entity_zones(&self, entity: EntityId) -> Vec<ZoneId> {
        match &self.zones {
            Some(zones) => zones.entity_zones(entity),
            None => Vec::new(),
        }
    }

    /// Persistence failures are logged, never propagated: the worst outcome
    /// is a mapping lost on restart, not a crashed host.
    fn persist(&mut self) {
        if let Err(e) = self.data.save(&self.registry.snapshot()) {
            warn!("failed to persist owner zone map: {e}");
        }
    }
}
