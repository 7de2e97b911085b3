//! Recycling identifier pool.
//!
//! An [`IdPool`] hands out `u32` identifiers from a configurable range.
//! Freed identifiers are queued and reissued before any never-used value,
//! most recently freed first. Allocation and free are both `O(1)` and no
//! two concurrently-live identifiers are ever equal, provided the caller
//! frees only identifiers it actually holds.

use thiserror::Error;

/// The pool has no identifiers left to allocate.
///
/// Only reachable once the configured maximum has been reached and the
/// free list is empty — practically never with the full `u32` range, but
/// a defined, checkable outcome rather than silent wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier pool exhausted")]
pub struct PoolExhausted;

/// Allocates and recycles `u32` identifiers.
///
/// Identifiers start at a configured minimum and grow monotonically until
/// the configured maximum (exclusive). Freed identifiers are reissued in
/// LIFO order before the never-used counter advances.
///
/// `free` performs no validation: double-freeing an identifier or freeing
/// one that was never allocated corrupts the uniqueness guarantee. That
/// contract is the caller's responsibility, not checked here.
///
/// # Examples
///
/// ```
/// use strata_util::IdPool;
///
/// let mut pool = IdPool::new();
/// let a = pool.allocate().unwrap();
/// let b = pool.allocate().unwrap();
/// assert_ne!(a, b);
///
/// pool.free(a);
/// assert_eq!(pool.allocate().unwrap(), a);
/// ```
#[derive(Debug, Clone)]
pub struct IdPool {
    /// Next never-used identifier.
    next: u32,
    /// Recycled identifiers, reissued from the back.
    free_ids: Vec<u32>,
    /// First allocatable identifier.
    min: u32,
    /// One past the last allocatable identifier.
    max: u32,
}

impl IdPool {
    /// Create a pool spanning the full `u32` range.
    #[must_use]
    pub fn new() -> Self {
        Self::with_range(0, u32::MAX)
    }

    /// Create a pool issuing identifiers in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn with_range(min: u32, max: u32) -> Self {
        assert!(min <= max, "invalid pool range: {min} > {max}");
        Self {
            next: min,
            free_ids: Vec::new(),
            min,
            max,
        }
    }

    /// Allocate an identifier.
    ///
    /// Returns the most recently freed identifier if any are queued,
    /// otherwise the next never-used value.
    ///
    /// # Errors
    ///
    /// Returns [`PoolExhausted`] when the range is spent and nothing is
    /// queued for reuse.
    pub fn allocate(&mut self) -> Result<u32, PoolExhausted> {
        if let Some(id) = self.free_ids.pop() {
            return Ok(id);
        }
        if self.next == self.max {
            return Err(PoolExhausted);
        }
        let id = self.next;
        self.next += 1;
        Ok(id)
    }

    /// Return an identifier to the pool for reuse.
    ///
    /// Unconditional: the pool does not verify that `id` was allocated or
    /// is not already queued.
    pub fn free(&mut self, id: u32) {
        self.free_ids.push(id);
    }

    /// Reset the pool to its initial state.
    ///
    /// Empties the free list and rewinds the counter to the minimum. Every
    /// previously issued identifier is invalid from the caller's point of
    /// view and may be reissued.
    pub fn clear(&mut self) {
        self.free_ids.clear();
        self.next = self.min;
    }

    /// Number of identifiers currently queued for reuse.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_ids.len()
    }

    /// Number of identifiers handed out and not returned.
    #[must_use]
    pub fn live_count(&self) -> usize {
        (self.next - self.min) as usize - self.free_ids.len()
    }
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new()
    }
}
