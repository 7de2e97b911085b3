//! Entity identifiers.
//!
//! An [`EntityId`] is a lightweight handle with no inherent data: a 32-bit
//! index into world bookkeeping plus a 32-bit generation counter. Indices
//! are recycled after an entity is destroyed; the generation is bumped on
//! every destruction so a stale identifier captured across a
//! destroy-then-reallocate cycle is detectable instead of silently aliasing
//! the new entity.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Packed as `index | generation << 32`. Identifiers are unique among
/// currently-live entities; a destroyed entity's index may be reissued
/// under a higher generation, beginning a new, logically unrelated
/// lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The reserved "no entity" sentinel.
    ///
    /// Stamped into a store's identifier column when a slot is retired;
    /// never issued by a world.
    pub const INVALID: EntityId = EntityId(u64::MAX);

    /// Pack an index and generation into an identifier.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// The index portion.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// The generation portion.
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns `true` if this is the invalid-entity sentinel.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u64::MAX
    }

    /// The raw packed value (for logging or transport).
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuild an identifier from its packed value.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            write!(f, "EntityId(invalid)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_roundtrip() {
        let id = EntityId::new(12345, 678);
        assert_eq!(id.index(), 12345);
        assert_eq!(id.generation(), 678);
        assert_eq!(EntityId::from_bits(id.to_bits()), id);
    }

    #[test]
    fn test_invalid_sentinel() {
        assert!(EntityId::INVALID.is_invalid());
        assert!(!EntityId::new(0, 0).is_invalid());
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn test_same_index_different_generation_differ() {
        assert_ne!(EntityId::new(7, 0), EntityId::new(7, 1));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let id = EntityId::new(42, 3);
        let bytes = rmp_serde::to_vec(&id).unwrap();
        let restored: EntityId = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(id, restored);
    }
}
