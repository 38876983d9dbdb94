//! Zone registry — owner → (structure → zone) bookkeeping with a bounded
//! per-owner capacity and two eviction policies.

use crate::config::ProtectionConfig;
use crate::services::ZoneService;
use crate::store::OwnerZoneMap;
use crate::ZONE_NAME_TAG;
use forestry_types::{PlayerId, Position, StructureId, ZoneId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Result of the capacity-bounded upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New structure recorded under the owner.
    Inserted,
    /// Structure was already tracked; its zone mapping was overwritten.
    Updated,
    /// Over the limit with `update_last`: the oldest entry was dropped.
    EvictedOldest(StructureId),
    /// Over the limit without `update_last`: the second-oldest entry was
    /// dropped while the head entry was retained. Known quirk, kept
    /// deliberately for behavior compatibility.
    EvictedSecond(StructureId),
    /// At the limit with `no_update`: nothing was changed.
    Rejected,
}

/// Result of zone creation for a newly placed structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A fresh zone was requested from the zone service and recorded.
    Created(ZoneId),
    /// The structure already sat in a zone carrying our name tag; that zone
    /// was adopted instead of creating a duplicate (reload idempotency).
    Adopted(ZoneId),
    /// A foreign zone covers the position and overlap is not allowed; no
    /// zone was produced and the structure is left untracked.
    OverlapRefused(String),
    /// Owner is at the limit with `no_update`; nothing was created.
    RejectedAtCapacity,
}

/// Owner → insertion-ordered structure→zone entries, plus the set of zone
/// ids this registry created or adopted ("tracked" zones).
///
/// Single-writer: all mutation goes through `&mut self` and each operation
/// completes before the next observes anything. Not designed for concurrent
/// mutation — a multi-threaded host must wrap the registry in one mutex.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    owners: HashMap<PlayerId, Vec<(StructureId, ZoneId)>>,
    tracked: HashSet<ZoneId>,
}

impl ZoneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this registry created or adopted the zone.
    #[must_use]
    pub fn is_tracked(&self, zone: &ZoneId) -> bool {
        self.tracked.contains(zone)
    }

    /// All tracked zone ids.
    #[must_use]
    pub fn tracked_zones(&self) -> &HashSet<ZoneId> {
        &self.tracked
    }

    /// The owner's entries in insertion order (empty when untracked).
    #[must_use]
    pub fn entries(&self, owner: PlayerId) -> &[(StructureId, ZoneId)] {
        self.owners.get(&owner).map_or(&[], Vec::as_slice)
    }

    /// The zone recorded for a structure, wherever it lives.
    #[must_use]
    pub fn zone_of(&self, structure: StructureId) -> Option<&ZoneId> {
        self.owners
            .values()
            .flatten()
            .find(|(sid, _)| *sid == structure)
            .map(|(_, zone)| zone)
    }

    /// Creates or adopts a protection zone for a newly placed structure.
    ///
    /// Only the structure's *first* reported zone is examined: a zone
    /// carrying our name tag is adopted; any other named zone counts as a
    /// foreign overlap. A stale id (no name) does not block creation.
    pub fn create(
        &mut self,
        config: &ProtectionConfig,
        owner: PlayerId,
        structure: StructureId,
        position: Position,
        zones: &dyn ZoneService,
    ) -> CreateOutcome {
        // Counting an absent owner as zero keeps the rejection total: once
        // this gate passes, the upsert below can no longer reject, so no
        // zone is requested or tracked for a doomed insertion.
        let count = self.owners.get(&owner).map_or(0, Vec::len);
        if count >= config.player_limit && config.no_update {
            debug!(
                "owner {owner} is at the limit of {} structures and no_update is set",
                config.player_limit
            );
            return CreateOutcome::RejectedAtCapacity;
        }

        let mut foreign: Option<String> = None;
        if let Some(zone) = zones.entity_zones(structure.into()).into_iter().next() {
            match zones.zone_name(&zone) {
                Some(name) if name == ZONE_NAME_TAG => {
                    debug!("structure {structure} sits in existing zone {zone}, adopting");
                    self.add_or_update(config, owner, structure, zone.clone());
                    self.tracked.insert(zone.clone());
                    return CreateOutcome::Adopted(zone);
                }
                name => foreign = name,
            }
        }

        if let Some(name) = foreign {
            if !name.is_empty() && !config.allow_zone_overlap {
                debug!("structure {structure} overlaps foreign zone {name}, skipping creation");
                return CreateOutcome::OverlapRefused(name);
            }
        }

        let zone = ZoneId::generate();
        debug!(
            "creating zone {zone} (radius {}) for structure {structure} at {position}",
            config.protection_radius
        );
        zones.create_or_update_zone(&zone, ZONE_NAME_TAG, config.protection_radius, position);
        self.add_or_update(config, owner, structure, zone.clone());
        self.tracked.insert(zone.clone());
        CreateOutcome::Created(zone)
    }

    /// Capacity-bounded upsert of a structure→zone mapping.
    ///
    /// With `count` entries already tracked for the owner and
    /// `limit = player_limit`:
    /// - `count >= limit` and `no_update`: rejected, no mutation;
    /// - `count > limit` and `update_last`: the oldest entry is evicted;
    /// - `count > limit` otherwise: the second-oldest entry is evicted and
    ///   the head entry survives every round (kept as-is, not "fixed");
    /// - else plain insert, or overwrite when the structure is known.
    pub fn add_or_update(
        &mut self,
        config: &ProtectionConfig,
        owner: PlayerId,
        structure: StructureId,
        zone: ZoneId,
    ) -> UpsertOutcome {
        let limit = config.player_limit;
        let entries = self.owners.entry(owner).or_default();
        let count = entries.len();

        if count >= limit && config.no_update {
            debug!("owner {owner} at limit {limit} with no_update, rejecting {structure}");
            return UpsertOutcome::Rejected;
        }

        if count > limit {
            // Evicted mappings keep their zone alive in the external
            // service (and in the tracked set) until unload.
            let index = if config.update_last {
                0
            } else {
                1.min(count - 1)
            };
            let (evicted, _) = entries.remove(index);
            debug!("owner {owner} over limit {limit}, evicting structure {evicted}");
            upsert_entry(entries, structure, zone);
            return if config.update_last {
                UpsertOutcome::EvictedOldest(evicted)
            } else {
                UpsertOutcome::EvictedSecond(evicted)
            };
        }

        if upsert_entry(entries, structure, zone) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        }
    }

    /// Erases a destroyed structure's entry, returning its zone.
    ///
    /// Unknown structures are a no-op. The owner's row may remain empty.
    /// Whether the zone itself can be deleted is a separate question —
    /// see [`release_if_unreferenced`](Self::release_if_unreferenced).
    pub fn remove(&mut self, structure: StructureId) -> Option<ZoneId> {
        for (owner, entries) in &mut self.owners {
            if let Some(index) = entries.iter().position(|(sid, _)| *sid == structure) {
                let (_, zone) = entries.remove(index);
                debug!("removing structure {structure} from owner {owner}");
                return Some(zone);
            }
        }
        None
    }

    /// Untracks the zone when no tracked structure references it anymore.
    /// Returns true when released — the caller then asks the zone service
    /// to delete it. A zone still shared (e.g. adopted by two structures)
    /// stays tracked and alive.
    pub fn release_if_unreferenced(&mut self, zone: &ZoneId) -> bool {
        let still_referenced = self.owners.values().flatten().any(|(_, z)| z == zone);
        if still_referenced {
            false
        } else {
            self.tracked.remove(zone);
            true
        }
    }

    /// Serializable snapshot of the owner→zone map.
    #[must_use]
    pub fn snapshot(&self) -> OwnerZoneMap {
        self.owners.clone()
    }

    /// Replaces all registry state from a persisted map and rebuilds the
    /// tracked-zone set from it.
    pub fn restore(&mut self, map: OwnerZoneMap) {
        self.tracked = map
            .values()
            .flatten()
            .map(|(_, zone)| zone.clone())
            .collect();
        self.owners = map;
    }

    /// Drops every entry and tracked zone (new-save semantics).
    pub fn clear(&mut self) {
        self.owners.clear();
        self.tracked.clear();
    }
}

/// Overwrites the structure's zone in place, or appends a new entry.
/// Returns true when an existing entry was overwritten.
fn upsert_entry(
    entries: &mut Vec<(StructureId, ZoneId)>,
    structure: StructureId,
    zone: ZoneId,
) -> bool {
    if let Some(entry) = entries.iter_mut().find(|(sid, _)| *sid == structure) {
        entry.1 = zone;
        true
    } else {
        entries.push((structure, zone));
        false
    }
}
