//! Host world lookups the gateway depends on.

use forestry_types::{PlayerId, Position, StructureId};

/// A live building-privilege structure as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureInfo {
    pub id: StructureId,
    pub owner: PlayerId,
    pub position: Position,
}

/// Read-only window into the host world. Actual spatial queries are the
/// host's business; the gateway only consumes their results.
pub trait WorldQuery: Send + Sync {
    /// Any building-privilege structure within `radius` of the position.
    fn structure_near(&self, position: Position, radius: f32) -> Option<StructureInfo>;

    /// The structure, if it still exists in the world. Entities destroyed
    /// between event emission and handling resolve to `None`.
    fn structure_alive(&self, id: StructureId) -> Option<StructureInfo>;
}
