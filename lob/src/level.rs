//! One price level: a FIFO queue of resting orders at the same price

use crate::order::SlotIdx;
use crate::pool::OrderPool;
use common::{Px, Qty};

/// FIFO queue of orders at a single price
///
/// Ordering within a level is strict arrival order at this level; the head
/// is the oldest resting order. `total_volume` and `order_count` are
/// maintained incrementally on every mutation.
#[derive(Debug)]
pub struct PriceLevel {
    price: Px,
    total_volume: u64,
    order_count: u32,
    head: Option<SlotIdx>,
    tail: Option<SlotIdx>,
}

impl PriceLevel {
    pub(crate) const fn new(price: Px) -> Self {
        Self {
            price,
            total_volume: 0,
            order_count: 0,
            head: None,
            tail: None,
        }
    }

    /// Price of this level
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Px {
        self.price
    }

    /// Sum of remaining quantity over all orders at this level
    #[inline]
    #[must_use]
    pub const fn total_volume(&self) -> u64 {
        self.total_volume
    }

    /// Number of orders queued at this level
    #[inline]
    #[must_use]
    pub const fn order_count(&self) -> u32 {
        self.order_count
    }

    /// Whether the level has no orders left
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Oldest resting order at this level
    #[inline]
    pub(crate) const fn head(&self) -> Option<SlotIdx> {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> Option<SlotIdx> {
        self.tail
    }

    /// Append `idx` at the tail and fold its quantity into the counters
    pub(crate) fn push_back(&mut self, pool: &mut OrderPool, idx: SlotIdx) {
        debug_assert_eq!(pool.get(idx).price, self.price);

        let tail = self.tail;
        {
            let order = pool.get_mut(idx);
            order.prev = tail;
            order.next = None;
        }
        match tail {
            Some(tail_idx) => pool.get_mut(tail_idx).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);

        self.total_volume += pool.get(idx).remaining_quantity.as_u64();
        self.order_count += 1;
    }

    /// Unlink `idx` in O(1) via its own neighbour indices
    pub(crate) fn unlink(&mut self, pool: &mut OrderPool, idx: SlotIdx) {
        let (prev, next, remaining) = {
            let order = pool.get(idx);
            (order.prev, order.next, order.remaining_quantity)
        };

        match prev {
            Some(prev_idx) => pool.get_mut(prev_idx).next = next,
            None => self.head = next,
        }
        match next {
            Some(next_idx) => pool.get_mut(next_idx).prev = prev,
            None => self.tail = prev,
        }

        self.total_volume -= remaining.as_u64();
        self.order_count -= 1;

        let order = pool.get_mut(idx);
        order.prev = None;
        order.next = None;
    }

    /// Subtract a fill from the aggregate volume
    #[inline]
    pub(crate) fn reduce_volume(&mut self, qty: Qty) {
        self.total_volume -= qty.as_u64();
    }

    /// Replace one order's contribution to the aggregate volume
    #[inline]
    pub(crate) fn adjust_volume(&mut self, old: Qty, new: Qty) {
        self.total_volume = self.total_volume - old.as_u64() + new.as_u64();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use common::{OrderType, Side, Ts};

    const PX: Px = Px::from_u32(100_000);

    fn alloc(pool: &mut OrderPool, id: u64, qty: u32) -> SlotIdx {
        pool.alloc(Order::new(
            id,
            Ts::from_nanos(id),
            PX,
            Qty::from_u32(qty),
            Side::Sell,
            OrderType::Limit,
        ))
        .unwrap()
    }

    #[test]
    fn test_push_back_is_fifo() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(PX);

        let a = alloc(&mut pool, 1, 10);
        let b = alloc(&mut pool, 2, 20);
        let c = alloc(&mut pool, 3, 30);
        level.push_back(&mut pool, a);
        level.push_back(&mut pool, b);
        level.push_back(&mut pool, c);

        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_volume(), 60);
        assert_eq!(level.head(), Some(a));
        assert_eq!(level.tail(), Some(c));
        assert_eq!(pool.get(a).next, Some(b));
        assert_eq!(pool.get(b).next, Some(c));
        assert_eq!(pool.get(c).prev, Some(b));
    }

    #[test]
    fn test_unlink_middle() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(PX);

        let a = alloc(&mut pool, 1, 10);
        let b = alloc(&mut pool, 2, 20);
        let c = alloc(&mut pool, 3, 30);
        level.push_back(&mut pool, a);
        level.push_back(&mut pool, b);
        level.push_back(&mut pool, c);

        level.unlink(&mut pool, b);

        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_volume(), 40);
        assert_eq!(pool.get(a).next, Some(c));
        assert_eq!(pool.get(c).prev, Some(a));
        assert!(pool.get(b).prev.is_none() && pool.get(b).next.is_none());
    }

    #[test]
    fn test_unlink_head_and_tail() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(PX);

        let a = alloc(&mut pool, 1, 10);
        let b = alloc(&mut pool, 2, 20);
        level.push_back(&mut pool, a);
        level.push_back(&mut pool, b);

        level.unlink(&mut pool, a);
        assert_eq!(level.head(), Some(b));
        assert_eq!(level.tail(), Some(b));

        level.unlink(&mut pool, b);
        assert!(level.is_empty());
        assert_eq!(level.total_volume(), 0);
        assert_eq!(level.head(), None);
        assert_eq!(level.tail(), None);
    }

    #[test]
    fn test_adjust_volume() {
        let mut pool = OrderPool::new(8);
        let mut level = PriceLevel::new(PX);

        let a = alloc(&mut pool, 1, 100);
        level.push_back(&mut pool, a);

        level.adjust_volume(Qty::from_u32(100), Qty::from_u32(40));
        assert_eq!(level.total_volume(), 40);

        level.adjust_volume(Qty::from_u32(40), Qty::from_u32(60));
        assert_eq!(level.total_volume(), 60);
    }
}
