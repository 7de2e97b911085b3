//! Borrowing entity handles.
//!
//! An [`EntityHandle`] pairs a mutable world borrow with one entity
//! identifier and scopes the usual component operations to that entity.
//! Handles are only produced by [`World::make_entity`] and
//! [`World::entity`]; the borrow lifetime guarantees a handle can never
//! outlive the world it points into.
//!
//! Store selection is a closure picking one member out of the world's
//! store tuple, e.g. `entity.attach(|s| &mut s.0, (1.0, 2.0))`.

use crate::entity::EntityId;
use crate::error::EcsError;
use crate::row::Row;
use crate::store::ComponentStore;
use crate::world::{StoreSet, World};

/// A non-owning reference to one entity inside a [`World`].
pub struct EntityHandle<'w, S: StoreSet> {
    world: &'w mut World<S>,
    id: EntityId,
}

impl<'w, S: StoreSet> EntityHandle<'w, S> {
    pub(crate) fn new(world: &'w mut World<S>, id: EntityId) -> Self {
        Self { world, id }
    }

    /// The identifier this handle is scoped to.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` while the entity has not been destroyed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.world.contains(self.id)
    }

    /// Attach a component row to this entity in the selected store.
    ///
    /// # Errors
    ///
    /// See [`ComponentStore::attach`].
    pub fn attach<R: Row>(
        &mut self,
        store: impl FnOnce(&mut S) -> &mut ComponentStore<R>,
        row: R,
    ) -> Result<(), EcsError> {
        store(self.world.stores_mut()).attach(self.id, row)
    }

    /// Detach this entity's row from the selected store.
    ///
    /// # Errors
    ///
    /// See [`ComponentStore::detach`].
    pub fn detach<R: Row>(
        &mut self,
        store: impl FnOnce(&mut S) -> &mut ComponentStore<R>,
    ) -> Result<(), EcsError> {
        store(self.world.stores_mut()).detach(self.id)
    }

    /// Borrow this entity's row in the selected store.
    ///
    /// # Errors
    ///
    /// See [`ComponentStore::get`].
    pub fn get<R: Row>(
        &self,
        store: impl FnOnce(&S) -> &ComponentStore<R>,
    ) -> Result<R::Ref<'_>, EcsError> {
        store(self.world.stores()).get(self.id)
    }

    /// Mutably borrow this entity's row in the selected store.
    ///
    /// # Errors
    ///
    /// See [`ComponentStore::get_mut`].
    pub fn get_mut<R: Row>(
        &mut self,
        store: impl FnOnce(&mut S) -> &mut ComponentStore<R>,
    ) -> Result<R::Mut<'_>, EcsError> {
        store(self.world.stores_mut()).get_mut(self.id)
    }

    /// Returns `true` if the selected store has a row for this entity.
    #[must_use]
    pub fn has<R: Row>(&self, store: impl FnOnce(&S) -> &ComponentStore<R>) -> bool {
        store(self.world.stores()).has(self.id)
    }

    /// Destroy the entity, consuming the handle.
    ///
    /// Delegates to [`World::remove_entity`]; consuming `self` is what
    /// keeps a destroyed handle from being used again.
    ///
    /// # Errors
    ///
    /// [`EcsError::StaleEntity`] if the entity was already destroyed
    /// through another path.
    pub fn destroy(self) -> Result<(), EcsError> {
        self.world.remove_entity(self.id)
    }
}

impl<S: StoreSet> std::fmt::Debug for EntityHandle<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityHandle").field("id", &self.id).finish()
    }
}
