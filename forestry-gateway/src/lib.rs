//! World-event gateway for the forestry protection engine.
//!
//! The host dispatches its world callbacks (structure spawned/destroyed,
//! resource damaged, dispenser gather/bonus) into one [`Gateway`] instance,
//! which consults the engine and answers with a [`Verdict`]. All handlers
//! are plain synchronous functions; nothing here registers itself anywhere.

mod events;
mod gateway;
mod world;

pub use events::{ResourceKind, Verdict};
pub use gateway::{Collaborators, Gateway};
pub use world::{StructureInfo, WorldQuery};
