//! Pre-sized arena of order slots
//!
//! All orders live in one fixed-capacity arena so the hot path never touches
//! the allocator. Slots are handed out from a monotone cursor, and released
//! slots go onto a free list for reuse, so capacity bounds *concurrent
//! outstanding* orders rather than lifetime submissions.

use crate::order::{Order, SlotIdx};

/// Fixed-capacity order arena with free-list reclamation
pub struct OrderPool {
    slots: Vec<Order>,
    free: Vec<SlotIdx>,
    capacity: usize,
}

impl OrderPool {
    /// Create a pool that can hold up to `capacity` outstanding orders
    ///
    /// # Panics
    /// Panics if `capacity` exceeds the slot index range.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            u32::try_from(capacity).is_ok(),
            "pool capacity {capacity} exceeds slot index range"
        );
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
        }
    }

    /// Claim a slot for `order`; returns `None` when the pool is exhausted
    ///
    /// Never allocates past the capacity fixed at construction.
    #[inline]
    #[allow(clippy::cast_possible_truncation)] // len < capacity <= u32::MAX
    pub fn alloc(&mut self, order: Order) -> Option<SlotIdx> {
        if let Some(idx) = self.free.pop() {
            self.slots[idx.index()] = order;
            return Some(idx);
        }
        if self.slots.len() < self.capacity {
            let idx = SlotIdx(self.slots.len() as u32);
            self.slots.push(order);
            return Some(idx);
        }
        None
    }

    /// Return a slot to the free list
    ///
    /// The caller must have unlinked the order from any level first.
    #[inline]
    pub fn release(&mut self, idx: SlotIdx) {
        self.free.push(idx);
    }

    /// Borrow the order in `idx`
    ///
    /// # Panics
    /// Panics if `idx` was never handed out by this pool.
    #[inline]
    #[must_use]
    pub fn get(&self, idx: SlotIdx) -> &Order {
        &self.slots[idx.index()]
    }

    /// Mutably borrow the order in `idx`
    ///
    /// # Panics
    /// Panics if `idx` was never handed out by this pool.
    #[inline]
    pub fn get_mut(&mut self, idx: SlotIdx) -> &mut Order {
        &mut self.slots[idx.index()]
    }

    /// Maximum number of outstanding orders
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently handed out
    #[inline]
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
