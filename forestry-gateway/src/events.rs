//! Event vocabulary shared with the host shim.

/// Kind of harvestable resource an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Tree,
    OreDeposit,
}

/// What the host should do with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Let the event proceed (we have no objection).
    Pass,
    /// Suppress the action: the resource is protected and the actor is not
    /// authorized.
    Cancel,
}

impl Verdict {
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}
