//! Storage-core error types.

use strata_util::PoolExhausted;

use crate::entity::EntityId;

/// Errors that can occur during entity/component operations.
///
/// All faults are local and synchronous; nothing is retried internally.
/// Callers decide whether a given fault is a bug or a benign condition to
/// skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// Lookup of an entity not registered in the store (attach-before-use
    /// violation).
    #[error("entity {0} has no component in this store")]
    NotFound(EntityId),

    /// Attach for an entity already registered in the store. Surfaced
    /// explicitly; the row already present is left untouched.
    #[error("entity {0} already has a component in this store")]
    AlreadyAttached(EntityId),

    /// An identifier pool has no identifiers left to allocate.
    #[error("identifier pool exhausted")]
    Exhausted,

    /// The identifier's generation does not match the world's: the entity
    /// was destroyed (and its index possibly reissued) after the
    /// identifier was captured.
    #[error("stale entity identifier {0}")]
    StaleEntity(EntityId),
}

impl From<PoolExhausted> for EcsError {
    fn from(_: PoolExhausted) -> Self {
        EcsError::Exhausted
    }
}
