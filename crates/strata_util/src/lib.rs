//! # strata_util
//!
//! Small shared utilities for the strata storage core.
//!
//! This crate provides:
//!
//! - [`IdPool`] — an `O(1)` allocate/free pool of small unsigned integer
//!   identifiers with LIFO recycling.
//! - [`PoolExhausted`] — the error returned when a pool has no identifiers
//!   left to hand out.

pub mod id_pool;

pub use id_pool::{IdPool, PoolExhausted};
