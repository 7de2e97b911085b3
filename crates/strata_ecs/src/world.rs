//! The world: owner of every store, the entity pool, and the live list.
//!
//! A [`World`] is the unit of a whole simulation scene. It is the only
//! type allowed to create or destroy entities, and the only one that fans
//! an operation out across every store. Stores never reference the world
//! or each other.
//!
//! The store collection is fixed at compile time: a tuple of
//! [`ComponentStore`]s chosen by the caller, e.g.
//! `World<(ComponentStore<(f32, f32)>, ComponentStore<(String,)>)>`.
//!
//! Everything here is single-threaded and synchronous: every operation
//! runs to completion on the caller's thread. Bulk passes over different
//! stores are serialized by `&mut self`; per-store parallelism was
//! deliberately left out (see DESIGN.md).

use tracing::{debug, trace};

use strata_util::IdPool;

use crate::entity::EntityId;
use crate::error::EcsError;
use crate::handle::EntityHandle;
use crate::row::Row;
use crate::store::{AnyStore, ComponentStore};

/// A fixed, heterogeneous collection of component stores.
///
/// Implemented for tuples of [`ComponentStore`]s of arity 1 through 8.
/// Typed access is plain tuple-field access on the set; the world reaches
/// every member uniformly through [`AnyStore`] for fan-out operations.
pub trait StoreSet: Default {
    /// Number of stores in the set.
    const LEN: usize;

    /// Visit every store in declaration order.
    fn for_each_store(&mut self, f: &mut dyn FnMut(&mut dyn AnyStore));
}

macro_rules! impl_store_set {
    ($(($row:ident, $idx:tt)),+) => {
        impl<$($row: Row),+> StoreSet for ($(ComponentStore<$row>,)+) {
            const LEN: usize = [$($idx),+].len();

            fn for_each_store(&mut self, f: &mut dyn FnMut(&mut dyn AnyStore)) {
                $(f(&mut self.$idx);)+
            }
        }
    };
}

impl_store_set!((A, 0));
impl_store_set!((A, 0), (B, 1));
impl_store_set!((A, 0), (B, 1), (C, 2));
impl_store_set!((A, 0), (B, 1), (C, 2), (D, 3));
impl_store_set!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
impl_store_set!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
impl_store_set!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6));
impl_store_set!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6), (H, 7));

/// Entity removals queued during a bulk pass.
///
/// Passed to the closure of [`World::run`]. Removal requests are applied
/// after the pass returns, so row indices visited by the scan are never
/// reshuffled under the caller's feet. Requests that are stale or
/// duplicated by the time they apply are skipped.
#[derive(Debug, Default)]
pub struct Removals {
    ids: Vec<EntityId>,
}

impl Removals {
    /// Queue an entity for removal once the current pass finishes.
    pub fn remove(&mut self, id: EntityId) {
        self.ids.push(id);
    }

    /// Number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Bookkeeping for one entity index: its current generation and whether
/// the index is currently issued.
///
/// The `alive` flag makes liveness explicit rather than inferred from the
/// generation value alone: a forged identifier carrying a freed index and
/// a guessed future generation must not pass [`World::contains`], or a
/// removal through it would free the index a second time.
#[derive(Debug, Clone, Copy)]
struct EntitySlot {
    generation: u32,
    alive: bool,
}

impl EntitySlot {
    const fn vacant() -> Self {
        Self {
            generation: 0,
            alive: false,
        }
    }
}

/// Owner of a fixed store collection, the entity identifier pool, the
/// per-index generation table, and the authoritative live-entity list.
///
/// # Examples
///
/// ```
/// use strata_ecs::{ComponentStore, World};
///
/// type Stores = (ComponentStore<(f32, f32)>, ComponentStore<(String,)>);
///
/// let mut world: World<Stores> = World::new();
/// let mut entity = world.make_entity().unwrap();
/// entity.attach(|s| &mut s.0, (1.0, 2.0)).unwrap();
/// entity.attach(|s| &mut s.1, ("player".to_string(),)).unwrap();
/// ```
pub struct World<S: StoreSet> {
    stores: S,
    entity_pool: IdPool,
    /// Generation and liveness per entity index; the generation is bumped
    /// on every destruction.
    slots: Vec<EntitySlot>,
    /// Live entities in insertion order. Order is not preserved across
    /// interior removals (swap-remove).
    live: Vec<EntityId>,
}

impl<S: StoreSet> World<S> {
    /// Create a world with every store empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: S::default(),
            // u32::MAX is excluded so an entity index can never collide
            // with the EntityId::INVALID sentinel.
            entity_pool: IdPool::with_range(0, u32::MAX),
            slots: Vec::new(),
            live: Vec::new(),
        }
    }

    /// Mint a new entity and hand back its borrowing handle.
    ///
    /// Touches no store; components are attached separately.
    ///
    /// # Errors
    ///
    /// [`EcsError::Exhausted`] if the entity pool is spent.
    pub fn make_entity(&mut self) -> Result<EntityHandle<'_, S>, EcsError> {
        let index = self.entity_pool.allocate()?;
        let at = index as usize;
        if self.slots.len() <= at {
            self.slots.resize(at + 1, EntitySlot::vacant());
        }
        self.slots[at].alive = true;
        let id = EntityId::new(index, self.slots[at].generation);
        self.live.push(id);
        trace!(entity = %id, "entity created");
        Ok(EntityHandle::new(self, id))
    }

    /// Re-acquire a handle for a live entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::StaleEntity`] if the identifier's generation no longer
    /// matches (the entity was destroyed, and its index possibly reused).
    pub fn entity(&mut self, id: EntityId) -> Result<EntityHandle<'_, S>, EcsError> {
        if !self.contains(id) {
            return Err(EcsError::StaleEntity(id));
        }
        Ok(EntityHandle::new(self, id))
    }

    /// Destroy an entity: drop it from the live list, broadcast removal
    /// to every store, bump its generation, and recycle its index.
    ///
    /// Stores that never saw the entity treat the broadcast as a no-op.
    ///
    /// # Errors
    ///
    /// [`EcsError::StaleEntity`] on generation mismatch or an identifier
    /// this world never issued.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<(), EcsError> {
        if !self.contains(id) {
            return Err(EcsError::StaleEntity(id));
        }
        if let Some(pos) = self.live.iter().position(|&e| e == id) {
            self.live.swap_remove(pos);
        }
        self.stores.for_each_store(&mut |store| store.remove_entity(id));
        let slot = &mut self.slots[id.index() as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.alive = false;
        self.entity_pool.free(id.index());
        trace!(entity = %id, "entity destroyed");
        Ok(())
    }

    /// Reset the whole scene: clear every store, the entity pool, the
    /// generation table, and the live list.
    ///
    /// Identifiers used before the clear may be reissued afterwards.
    pub fn clear(&mut self) {
        self.stores.for_each_store(&mut |store| store.clear());
        self.entity_pool.clear();
        self.slots.clear();
        self.live.clear();
        debug!("world cleared");
    }

    /// Returns `true` if the identifier names a currently-live entity.
    ///
    /// Both halves matter: the index must be currently issued (alive) and
    /// the generation must match. Generation alone is not liveness — an
    /// identifier this world never minted could otherwise carry a freed
    /// index with its post-bump generation and pass.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        !id.is_invalid()
            && self
                .slots
                .get(id.index() as usize)
                .is_some_and(|slot| slot.alive && slot.generation == id.generation())
    }

    /// Currently-live entities.
    ///
    /// Insertion order until the first interior removal; not stable
    /// afterwards.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.live
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    /// Shared access to the store collection.
    #[must_use]
    pub fn stores(&self) -> &S {
        &self.stores
    }

    /// Mutable access to the store collection; typed per-store access is
    /// tuple-field access (`&mut world.stores_mut().0`).
    pub fn stores_mut(&mut self) -> &mut S {
        &mut self.stores
    }

    /// Run one bulk pass over the stores.
    ///
    /// The closure receives the store collection and a [`Removals`]
    /// queue. The idiomatic per-tick shape is one `run` call per store
    /// the caller wants advanced: scan that store's live rows, mutate
    /// payloads in place, and queue entities judged dead. Removals apply
    /// after the closure returns, so a scan never observes its own
    /// removals and visited slots are never reshuffled mid-pass.
    ///
    /// The borrow rules enforce the one genuinely unsafe interleaving the
    /// accretive layout has: a retained row reference cannot coexist with
    /// a same-store attach (column growth may reallocate).
    pub fn run<T>(&mut self, pass: impl FnOnce(&mut S, &mut Removals) -> T) -> T {
        let mut removals = Removals::default();
        let out = pass(&mut self.stores, &mut removals);
        for id in removals.ids.drain(..) {
            // Stale or duplicate requests are skipped, not faults.
            let _ = self.remove_entity(id);
        }
        out
    }

    /// Apply `f` once per store, in declaration order.
    pub fn for_each_store(&mut self, mut f: impl FnMut(&mut dyn AnyStore)) {
        self.stores.for_each_store(&mut f);
    }
}

impl<S: StoreSet> Default for World<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TwoStores = (ComponentStore<(i32,)>, ComponentStore<(f32,)>);

    #[test]
    fn test_make_entity_touches_no_store() {
        let mut world: World<TwoStores> = World::new();
        let id = world.make_entity().unwrap().id();
        assert_eq!(id, EntityId::new(0, 0));
        assert_eq!(world.entity_count(), 1);
        assert!(world.stores().0.is_empty());
        assert!(world.stores().1.is_empty());
    }

    #[test]
    fn test_removal_fans_out_and_tolerates_unregistered_stores() {
        let mut world: World<TwoStores> = World::new();
        let id = world.make_entity().unwrap().id();
        // Attach to the first store only; the second store's removal
        // broadcast must be a no-op, not a fault.
        world.stores_mut().0.attach(id, (7,)).unwrap();

        world.remove_entity(id).unwrap();

        assert_eq!(world.entity_count(), 0);
        assert!(!world.stores().0.has(id));
        assert!(!world.stores().1.has(id));
    }

    #[test]
    fn test_removal_drops_exactly_one_live_entry() {
        let mut world: World<TwoStores> = World::new();
        let a = world.make_entity().unwrap().id();
        let b = world.make_entity().unwrap().id();
        let c = world.make_entity().unwrap().id();

        world.remove_entity(b).unwrap();

        let live = world.entities();
        assert_eq!(live.len(), 2);
        assert!(live.contains(&a));
        assert!(live.contains(&c));
    }

    #[test]
    fn test_recycled_index_gets_new_generation() {
        let mut world: World<TwoStores> = World::new();
        let first = world.make_entity().unwrap().id();
        world.remove_entity(first).unwrap();

        let second = world.make_entity().unwrap().id();
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        assert!(world.contains(second));
        assert!(!world.contains(first));
    }

    #[test]
    fn test_stale_identifier_faults() {
        let mut world: World<TwoStores> = World::new();
        let id = world.make_entity().unwrap().id();
        world.remove_entity(id).unwrap();

        assert_eq!(world.remove_entity(id), Err(EcsError::StaleEntity(id)));
        assert!(world.entity(id).is_err());
    }

    #[test]
    fn test_forged_identifier_for_freed_index_is_rejected() {
        let mut world: World<TwoStores> = World::new();
        let real = world.make_entity().unwrap().id();
        world.remove_entity(real).unwrap();

        // A fabricated identifier carrying the freed index and its
        // post-destruction generation was never issued by this world.
        // Accepting it would free index 0 a second time and let two
        // later entities share one identifier.
        let forged = EntityId::new(real.index(), real.generation() + 1);
        assert!(!world.contains(forged));
        assert_eq!(
            world.remove_entity(forged),
            Err(EcsError::StaleEntity(forged))
        );

        let a = world.make_entity().unwrap().id();
        let b = world.make_entity().unwrap().id();
        assert_ne!(a, b);
        assert_ne!(a.index(), b.index());
    }

    #[test]
    fn test_clear_resets_fully() {
        let mut world: World<TwoStores> = World::new();
        let a = world.make_entity().unwrap().id();
        let b = world.make_entity().unwrap().id();
        world.stores_mut().0.attach(a, (1,)).unwrap();
        world.stores_mut().1.attach(b, (2.0,)).unwrap();

        world.clear();

        assert_eq!(world.entity_count(), 0);
        assert!(world.stores().0.is_empty());
        assert!(world.stores().1.is_empty());
        assert!(!world.stores().0.has(a));

        // Identifiers restart: the first post-clear entity may equal a
        // pre-clear one.
        let fresh = world.make_entity().unwrap().id();
        assert_eq!(fresh, a);
    }

    #[test]
    fn test_run_applies_removals_after_the_pass() {
        let mut world: World<TwoStores> = World::new();
        let mut ids = Vec::new();
        for value in 0..4 {
            let id = world.make_entity().unwrap().id();
            world.stores_mut().0.attach(id, (value,)).unwrap();
            ids.push(id);
        }

        // Scan the first store, doubling survivors and queueing odd
        // values for removal.
        let visited = world.run(|stores, removals| {
            let mut visited = 0;
            stores.0.for_each_mut(|id, (value,)| {
                visited += 1;
                if *value % 2 == 1 {
                    removals.remove(id);
                } else {
                    *value *= 2;
                }
            });
            visited
        });

        assert_eq!(visited, 4);
        assert_eq!(world.entity_count(), 2);
        assert!(world.contains(ids[0]));
        assert!(!world.contains(ids[1]));
        assert!(!world.contains(ids[3]));
        assert_eq!(*world.stores().0.get(ids[2]).unwrap().0, 4);
    }

    #[test]
    fn test_run_skips_duplicate_and_stale_removal_requests() {
        let mut world: World<TwoStores> = World::new();
        let id = world.make_entity().unwrap().id();
        world.run(|_, removals| {
            removals.remove(id);
            removals.remove(id); // duplicate, applied once
            assert_eq!(removals.len(), 2);
        });
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_for_each_store_visits_in_declaration_order() {
        let mut world: World<TwoStores> = World::new();
        let a = world.make_entity().unwrap().id();
        world.stores_mut().0.attach(a, (1,)).unwrap();
        world.stores_mut().1.attach(a, (2.0,)).unwrap();

        let mut lens = Vec::new();
        world.for_each_store(|store| lens.push(store.len()));
        assert_eq!(lens, vec![1, 1]);
        assert_eq!(TwoStores::LEN, 2);
    }
}
