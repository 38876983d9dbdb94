//! Core type definitions for the forestry protection engine.
//!
//! This crate defines the opaque identifiers and primitives shared by the
//! engine and the event gateway:
//! - Player, structure, and world-entity identifiers (numeric, host-assigned)
//! - Zone handles issued by or adopted from the external zone service
//! - World positions (passed through to the zone service, never interpreted)
//!
//! Everything host-specific (entity components, hit info, chat formatting)
//! stays on the other side of the gateway's service traits, not here.

mod ids;
mod position;
mod zone;

pub use ids::{EntityId, PlayerId, StructureId};
pub use position::Position;
pub use zone::ZoneId;
