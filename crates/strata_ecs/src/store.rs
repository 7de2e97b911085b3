//! Identifier-keyed component stores.
//!
//! A [`ComponentStore`] owns the parallel columns for one [`Row`] tuple,
//! keyed by entity identifier. Storage is accretive: a detached row frees
//! its slot index for reuse and stamps the identifier column with
//! [`EntityId::INVALID`], but never moves or erases payload data. That
//! keeps attach, detach, and lookup `O(1)` and leaves every already-issued
//! slot index stable, at the cost of bulk scans having to skip tombstoned
//! slots.

use std::collections::HashMap;

use strata_util::IdPool;

use crate::entity::EntityId;
use crate::error::EcsError;
use crate::row::Row;

/// Column storage for one fixed component tuple.
///
/// Each store owns one data column per tuple element, an implicit
/// identifier column marking which entity occupies each slot, an
/// entity-to-slot index, and its own slot [`IdPool`] (independent of the
/// world's entity pool).
///
/// # Examples
///
/// ```
/// use strata_ecs::{ComponentStore, EntityId};
///
/// let mut positions: ComponentStore<(f32, f32)> = ComponentStore::new();
/// let e = EntityId::new(0, 0);
/// positions.attach(e, (1.0, 2.0)).unwrap();
/// let (x, y) = positions.get(e).unwrap();
/// assert_eq!((*x, *y), (1.0, 2.0));
/// ```
pub struct ComponentStore<R: Row> {
    /// Identifier column, parallel to every data column. A slot holding
    /// [`EntityId::INVALID`] is a tombstone.
    ids: Vec<EntityId>,
    /// The data columns, one `Vec` per tuple element.
    columns: R::Columns,
    /// Entity to slot index.
    index: HashMap<EntityId, u32>,
    /// Recycling pool of slot indices.
    slots: IdPool,
}

impl<R: Row> ComponentStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            columns: R::Columns::default(),
            index: HashMap::new(),
            slots: IdPool::new(),
        }
    }

    /// Number of entities currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Attach a component row to an entity.
    ///
    /// Allocates a slot (reusing a retired one if available), stamps the
    /// identifier column, and writes the row, growing every column in
    /// lockstep.
    ///
    /// # Errors
    ///
    /// [`EcsError::AlreadyAttached`] if the entity is already registered
    /// here; the existing row is left untouched and no slot is consumed.
    /// [`EcsError::Exhausted`] if the slot pool is spent.
    pub fn attach(&mut self, id: EntityId, row: R) -> Result<(), EcsError> {
        if self.index.contains_key(&id) {
            return Err(EcsError::AlreadyAttached(id));
        }
        let slot = self.slots.allocate()?;
        let at = slot as usize;
        if self.ids.len() <= at {
            self.ids.resize(at + 1, EntityId::INVALID);
        }
        self.ids[at] = id;
        row.write(&mut self.columns, at);
        self.index.insert(id, slot);
        Ok(())
    }

    /// Detach the entity's component row.
    ///
    /// Frees the slot for reuse and tombstones the identifier column. The
    /// payload columns keep their last values; anyone walking raw columns
    /// must consult the identifier column, not the payloads.
    ///
    /// # Errors
    ///
    /// [`EcsError::NotFound`] if the entity is not registered here.
    pub fn detach(&mut self, id: EntityId) -> Result<(), EcsError> {
        let slot = self.index.remove(&id).ok_or(EcsError::NotFound(id))?;
        self.ids[slot as usize] = EntityId::INVALID;
        self.slots.free(slot);
        Ok(())
    }

    /// Borrow the entity's row, one reference per column.
    ///
    /// # Errors
    ///
    /// [`EcsError::NotFound`] if the entity is not registered here.
    pub fn get(&self, id: EntityId) -> Result<R::Ref<'_>, EcsError> {
        let slot = self.slot_of(id)?;
        Ok(R::read(&self.columns, slot))
    }

    /// Mutably borrow the entity's row.
    ///
    /// # Errors
    ///
    /// [`EcsError::NotFound`] if the entity is not registered here.
    pub fn get_mut(&mut self, id: EntityId) -> Result<R::Mut<'_>, EcsError> {
        let slot = self.slot_of(id)?;
        Ok(R::read_mut(&mut self.columns, slot))
    }

    /// Membership test against the entity index alone.
    #[must_use]
    pub fn has(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Membership test plus identifier-column agreement.
    ///
    /// The stricter predicate: also rejects an index entry whose slot was
    /// tombstoned by a write path that bypassed [`detach`](Self::detach).
    /// Bulk consumers should prefer this over [`has`](Self::has).
    #[must_use]
    pub fn is_valid(&self, id: EntityId) -> bool {
        self.index
            .get(&id)
            .is_some_and(|&slot| self.ids[slot as usize] == id)
    }

    /// The identifier column: which entity owns each slot.
    ///
    /// Index-aligned with [`columns`](Self::columns). Slots holding
    /// [`EntityId::INVALID`] are retired and their payloads are stale.
    #[must_use]
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// The raw data columns, index-aligned with the identifier column.
    #[must_use]
    pub fn columns(&self) -> &R::Columns {
        &self.columns
    }

    /// Mutable access to the raw data columns.
    ///
    /// Slot/identifier bookkeeping is not touched; callers may rewrite
    /// payloads but must not change column lengths.
    pub fn columns_mut(&mut self) -> &mut R::Columns {
        &mut self.columns
    }

    /// Iterate over live rows as `(entity, row_view)`, skipping
    /// tombstoned slots.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, R::Ref<'_>)> {
        self.ids
            .iter()
            .enumerate()
            .filter(|(_, id)| !id.is_invalid())
            .map(|(slot, &id)| (id, R::read(&self.columns, slot)))
    }

    /// Run `f` once per live row with mutable column access.
    ///
    /// This is the bulk, allocation-free scan: forward slot order,
    /// tombstones skipped. Rows attached to this store during the pass
    /// are not visited.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(EntityId, R::Mut<'_>)) {
        for slot in 0..self.ids.len() {
            let id = self.ids[slot];
            if id.is_invalid() {
                continue;
            }
            f(id, R::read_mut(&mut self.columns, slot));
        }
    }

    /// Truncate every column, clear the entity index, and reset the slot
    /// pool.
    pub fn clear(&mut self) {
        self.ids.clear();
        R::clear(&mut self.columns);
        self.index.clear();
        self.slots.clear();
    }

    fn slot_of(&self, id: EntityId) -> Result<usize, EcsError> {
        self.index
            .get(&id)
            .map(|&slot| slot as usize)
            .ok_or(EcsError::NotFound(id))
    }
}

impl<R: Row> Default for ComponentStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased store operations, used by a world to fan one operation out
/// across every store it owns.
pub trait AnyStore {
    /// Remove the entity's row if one is registered; silently a no-op
    /// otherwise. Worlds broadcast removal to every store without knowing
    /// which ones the entity touched.
    fn remove_entity(&mut self, id: EntityId);

    /// Reset the store to empty.
    fn clear(&mut self);

    /// Number of entities currently registered.
    fn len(&self) -> usize;

    /// Returns `true` if no entity is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Row> AnyStore for ComponentStore<R> {
    fn remove_entity(&mut self, id: EntityId) {
        let _ = self.detach(id);
    }

    fn clear(&mut self) {
        ComponentStore::clear(self);
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }
}
