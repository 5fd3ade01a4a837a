//! Bounded single-producer/single-consumer queue for report delivery
//!
//! A fixed-capacity ring with monotone head/tail counters masked onto a
//! power-of-two buffer. The producer publishes each slot with a release
//! store on `head`; the consumer acquires `head`, reads the slot, and
//! publishes `tail` with release. Full pushes return `false` (no
//! overwrite), empty pops return `None`, and neither side ever blocks.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![allow(unsafe_code)] // Raw slot access in the ring buffer

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free bounded SPSC queue
///
/// At most one thread may push and at most one thread may pop at any time;
/// the two may be different threads. This is a usage contract, not a
/// compile-time guarantee, exactly as for the producer/consumer sides of a
/// shared ring.
pub struct SpscQueue<T> {
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    mask: usize,
    /// Producer cursor (monotone, masked on access)
    head: CachePadded<AtomicUsize>,
    /// Consumer cursor (monotone, masked on access)
    tail: CachePadded<AtomicUsize>,
    /// Producer's last observed tail, refreshed only when the ring looks full
    cached_tail: CachePadded<UnsafeCell<usize>>,
    /// Consumer's last observed head, refreshed only when the ring looks empty
    cached_head: CachePadded<UnsafeCell<usize>>,
}

unsafe impl<T: Send> Send for SpscQueue<T> {}
unsafe impl<T: Send> Sync for SpscQueue<T> {}

impl<T> SpscQueue<T> {
    /// Create a queue holding at least `capacity` entries
    ///
    /// The capacity is rounded up to the next power of two so indices can
    /// be masked instead of taken modulo.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");
        let capacity = capacity.next_power_of_two();

        let buffer = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            buffer,
            mask: capacity - 1,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            cached_tail: CachePadded::new(UnsafeCell::new(0)),
            cached_head: CachePadded::new(UnsafeCell::new(0)),
        }
    }

    /// Number of entries the queue can hold
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Push an entry; returns `false` if the queue is full
    ///
    /// Producer side only.
    #[inline]
    #[must_use = "a rejected push means the entry was dropped"]
    pub fn push(&self, value: T) -> bool {
        let head = self.head.load(Ordering::Relaxed);

        // Cheap full check against the cached tail; refresh once before
        // giving up.
        let cached = unsafe { *self.cached_tail.get() };
        if head.wrapping_sub(cached) == self.capacity() {
            let tail = self.tail.load(Ordering::Acquire);
            unsafe { *self.cached_tail.get() = tail };
            if head.wrapping_sub(tail) == self.capacity() {
                return false;
            }
        }

        unsafe {
            (*self.buffer[head & self.mask].get()).write(value);
        }
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest entry; returns `None` if the queue is empty
    ///
    /// Consumer side only.
    #[inline]
    #[must_use]
    pub fn pop(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);

        let cached = unsafe { *self.cached_head.get() };
        if tail == cached {
            let head = self.head.load(Ordering::Acquire);
            unsafe { *self.cached_head.get() = head };
            if tail == head {
                return None;
            }
        }

        let value = unsafe { (*self.buffer[tail & self.mask].get()).assume_init_read() };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(value)
    }

    /// Number of entries currently queued
    ///
    /// Approximate under concurrent access.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// Check if the queue is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Drop for SpscQueue<T> {
    fn drop(&mut self) {
        // Exclusive access here; drain whatever was never consumed.
        while self.pop().is_some() {}
    }
}
