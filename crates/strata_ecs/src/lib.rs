//! # strata_ecs
//!
//! A small entity/component storage core: heterogeneous stores of typed
//! component columns, attached to opaque entity identifiers, iterated in
//! bulk, and removed without invalidating anyone else's identifiers.
//!
//! This crate provides:
//!
//! - [`EntityId`] — generation-tagged entity identifiers with an invalid
//!   sentinel.
//! - [`Row`] — a fixed component tuple and its struct-of-arrays columns.
//! - [`ComponentStore`] — accretive, slot-stable column storage for one
//!   row type, with `O(1)` attach/detach/lookup.
//! - [`World`] — owner of a compile-time-fixed tuple of stores, the
//!   entity pool, and the live-entity list; the only fan-out point.
//! - [`EntityHandle`] — a borrowing convenience handle scoped to one
//!   entity.
//! - [`EcsError`] — the fault taxonomy (`NotFound`, `AlreadyAttached`,
//!   `Exhausted`, `StaleEntity`).
//!
//! ## Design notes
//!
//! Stores never compact. Detaching stamps the identifier column with
//! [`EntityId::INVALID`] and recycles the slot; payload columns keep
//! their last values. Bulk scans therefore filter on the identifier
//! column, and slot indices already handed out stay valid for the
//! store's whole lifetime. This favors per-tick iteration speed and
//! simplicity over memory reclamation, which suits small-churn
//! populations (tens to low thousands of entities).
//!
//! The whole core is single-threaded and synchronous; see `World` for
//! the per-tick calling convention.

pub mod entity;
pub mod error;
pub mod handle;
pub mod row;
pub mod store;
pub mod world;

pub use entity::EntityId;
pub use error::EcsError;
pub use handle::EntityHandle;
pub use row::Row;
pub use store::{AnyStore, ComponentStore};
pub use world::{Removals, StoreSet, World};
