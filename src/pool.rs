//! Fixed-capacity storage for live star entities.

use smallvec::SmallVec;

use crate::constants::STAR_CAPACITY;
use crate::host::EntityHandle;

/// A bounded, append-only collection of spawned star handles.
///
/// The capacity is fixed when the pool is created and the pool can never
/// grow past it; a push against a full pool is rejected rather than
/// queued. Handles stay in spawn order until [`StarPool::clear`].
#[derive(Debug)]
pub struct StarPool {
    stars: SmallVec<[EntityHandle; STAR_CAPACITY]>,
    capacity: usize,
}

impl StarPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            stars: SmallVec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stars.len() >= self.capacity
    }

    /// Appends a star unless the pool is at capacity. Returns whether the
    /// handle was stored.
    pub fn push(&mut self, star: EntityHandle) -> bool {
        if self.is_full() {
            return false;
        }
        self.stars.push(star);
        true
    }

    /// Live stars, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.stars.iter().copied()
    }

    /// Forgets every live handle. The entities themselves are host-owned
    /// and are torn down with their scene, not by the pool.
    pub fn clear(&mut self) {
        self.stars.clear();
    }
}
