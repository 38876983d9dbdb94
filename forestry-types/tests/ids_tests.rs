use forestry_types::{EntityId, PlayerId, Position, StructureId, ZoneId};
use std::collections::HashSet;
use std::str::FromStr;

// ── PlayerId ──────────────────────────────────────────────────────

#[test]
fn player_id_roundtrips_raw_value() {
    let id = PlayerId::new(76561198000000001);
    assert_eq!(id.value(), 76561198000000001);
}

#[test]
fn player_id_display_and_parse() {
    let id = PlayerId::new(42);
    let parsed = PlayerId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn player_id_from_str_invalid() {
    assert!(PlayerId::from_str("not-a-number").is_err());
}

#[test]
fn player_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(PlayerId::new(7));
    set.insert(PlayerId::new(7));
    assert_eq!(set.len(), 1);
}

#[test]
fn player_id_serde_transparent() {
    let id = PlayerId::new(123);
    assert_eq!(serde_json::to_string(&id).unwrap(), "123");
    let back: PlayerId = serde_json::from_str("123").unwrap();
    assert_eq!(back, id);
}

// ── StructureId / EntityId ────────────────────────────────────────

#[test]
fn structure_id_converts_to_entity_id() {
    let sid = StructureId::new(900);
    let eid: EntityId = sid.into();
    assert_eq!(eid.value(), 900);
}

#[test]
fn structure_id_display_and_parse() {
    let sid = StructureId::new(555);
    assert_eq!(StructureId::from_str("555").unwrap(), sid);
}

// ── ZoneId ────────────────────────────────────────────────────────

#[test]
fn zone_id_generate_is_unique() {
    let a = ZoneId::generate();
    let b = ZoneId::generate();
    assert_ne!(a, b);
}

#[test]
fn zone_id_wraps_external_handle() {
    let z = ZoneId::new("39075429");
    assert_eq!(z.as_str(), "39075429");
    assert_eq!(z, ZoneId::from("39075429"));
}

#[test]
fn zone_id_serde_transparent() {
    let z = ZoneId::new("abc");
    assert_eq!(serde_json::to_string(&z).unwrap(), "\"abc\"");
}

// ── Position ──────────────────────────────────────────────────────

#[test]
fn position_is_plain_data() {
    let p = Position::new(1.0, 2.0, 3.0);
    assert_eq!(p.x, 1.0);
    assert_eq!(p.z, 3.0);
    assert_eq!(Position::default(), Position::new(0.0, 0.0, 0.0));
}
