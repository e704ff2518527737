//! Bounded-reuse entity pool
//!
//! Entities move between two owned lists: `in_use` and a free list. Nothing is
//! dropped once created, so the total only ever grows to the historical peak of
//! concurrent spawns. Spawning pops from the back of the free list, recycling
//! pushes to the front.

use std::collections::VecDeque;

/// Something that can live in an [`EntityPool`]
pub trait Pooled {
    /// Stable id assigned at construction
    fn pool_id(&self) -> u32;
    /// Entering active use
    fn on_acquire(&mut self);
    /// Returning to the free list
    fn on_release(&mut self);
}

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    in_use: Vec<T>,
    free: VecDeque<T>,
    /// Entities ever constructed (also the next id)
    created: u32,
}

impl<T: Pooled> Default for EntityPool<T> {
    fn default() -> Self {
        Self {
            in_use: Vec::new(),
            free: VecDeque::new(),
            created: 0,
        }
    }
}

impl<T: Pooled> EntityPool<T> {
    /// Pool with `count` entities already constructed and waiting
    pub fn with_preallocated(count: usize, mut make: impl FnMut(u32) -> T) -> Self {
        let mut pool = Self::default();
        for _ in 0..count {
            let id = pool.next_id();
            let mut entity = make(id);
            entity.on_release();
            pool.free.push_back(entity);
        }
        pool.check_invariants();
        pool
    }

    fn next_id(&mut self) -> u32 {
        let id = self.created;
        self.created += 1;
        id
    }

    /// Take an entity from the free list, or construct one when it is empty
    pub fn acquire(&mut self, make: impl FnOnce(u32) -> T) -> &mut T {
        let mut entity = match self.free.pop_back() {
            Some(entity) => entity,
            None => {
                let id = self.next_id();
                make(id)
            }
        };
        entity.on_acquire();
        self.in_use.push(entity);
        self.check_invariants();
        let last = self.in_use.len() - 1;
        &mut self.in_use[last]
    }

    /// Return the in-use entity at `index` to the free list.
    ///
    /// Removal swaps the last in-use entity into `index`; callers walking the
    /// list must re-examine that slot.
    pub fn release(&mut self, index: usize) -> u32 {
        let mut entity = self.in_use.swap_remove(index);
        let id = entity.pool_id();
        entity.on_release();
        self.free.push_front(entity);
        self.check_invariants();
        id
    }

    /// Return every in-use entity to the free list
    pub fn release_all(&mut self) {
        while let Some(mut entity) = self.in_use.pop() {
            entity.on_release();
            self.free.push_front(entity);
        }
        self.check_invariants();
    }

    pub fn in_use(&self) -> &[T] {
        &self.in_use
    }

    pub fn in_use_mut(&mut self) -> &mut [T] {
        &mut self.in_use
    }

    pub fn free(&self) -> impl Iterator<Item = &T> {
        self.free.iter()
    }

    pub fn active_len(&self) -> usize {
        self.in_use.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Entities ever constructed
    pub fn total(&self) -> usize {
        self.created as usize
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }

    /// Every constructed entity is in exactly one list
    fn check_invariants(&self) {
        assert_eq!(
            self.in_use.len() + self.free.len(),
            self.created as usize,
            "entity pool lost track of an entity"
        );
        #[cfg(debug_assertions)]
        {
            let mut ids: Vec<u32> = self
                .in_use
                .iter()
                .chain(self.free.iter())
                .map(Pooled::pool_id)
                .collect();
            ids.sort_unstable();
            ids.dedup();
            debug_assert_eq!(ids.len(), self.created as usize, "entity held by both lists");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Slot {
        id: u32,
        active: bool,
    }

    impl Pooled for Slot {
        fn pool_id(&self) -> u32 {
            self.id
        }
        fn on_acquire(&mut self) {
            self.active = true;
        }
        fn on_release(&mut self) {
            self.active = false;
        }
    }

    fn slot(id: u32) -> Slot {
        Slot { id, active: true }
    }

    #[test]
    fn test_preallocated_reuse_before_growth() {
        let mut pool = EntityPool::with_preallocated(2, slot);
        assert_eq!(pool.free_len(), 2);
        assert!(pool.free().all(|p| !p.active));

        pool.acquire(slot);
        pool.acquire(slot);
        assert_eq!(pool.total(), 2);

        // Free list exhausted, third acquire constructs
        let third = pool.acquire(slot);
        assert_eq!(third.id, 2);
        assert!(third.active);
        assert_eq!(pool.total(), 3);
    }

    #[test]
    fn test_release_goes_to_front_and_spawn_pops_back() {
        let mut pool = EntityPool::with_preallocated(3, slot);
        // Free list back is id 2
        assert_eq!(pool.acquire(slot).id, 2);
        assert_eq!(pool.acquire(slot).id, 1);
        // Released entity goes to the front, so id 0 is still handed out next
        let released = pool.release(0);
        assert_eq!(released, 2);
        assert_eq!(pool.acquire(slot).id, 0);
        assert_eq!(pool.acquire(slot).id, 2);
    }

    #[test]
    fn test_release_all() {
        let mut pool = EntityPool::with_preallocated(1, slot);
        for _ in 0..4 {
            pool.acquire(slot);
        }
        pool.release_all();
        assert!(pool.is_empty());
        assert_eq!(pool.free_len(), 4);
        assert_eq!(pool.total(), 4);
    }

    proptest! {
        #[test]
        fn prop_total_conserved(ops in prop::collection::vec(any::<(bool, u8)>(), 1..300)) {
            let mut pool = EntityPool::with_preallocated(5, slot);
            let mut last_total = pool.total();
            for (spawn, pick) in ops {
                if spawn || pool.is_empty() {
                    pool.acquire(slot);
                } else {
                    let idx = pick as usize % pool.active_len();
                    pool.release(idx);
                }
                prop_assert_eq!(pool.active_len() + pool.free_len(), pool.total());
                prop_assert!(pool.total() >= last_total);
                last_total = pool.total();
            }
        }
    }
}
