//! Per-symbol order book: two ladders, an id map, and the matching loop

use crate::ladder::Ladder;
use crate::order::SlotIdx;
use crate::pool::OrderPool;
use ahash::AHashMap;
use common::{ExecutionReport, OrderType, Px, Qty, Side, Symbol};
use smallvec::SmallVec;

/// Fills produced by one incoming order
///
/// Most aggressors touch only a few passive orders, so the burst stays
/// inline; deep sweeps spill to the heap.
pub type ReportBurst = SmallVec<[ExecutionReport; 8]>;

/// Snapshot of one side's top of book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelView {
    /// Level price
    pub price: Px,
    /// Sum of remaining quantity at the level
    pub total_volume: u64,
    /// Number of orders queued at the level
    pub order_count: u32,
}

/// Integrity violations reported by [`OrderBook::audit`]
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// A level's cached volume disagrees with its FIFO contents
    #[error("level {price} volume {actual} != FIFO sum {expected}")]
    LevelVolumeMismatch {
        /// Level price
        price: Px,
        /// Volume found by walking the FIFO
        expected: u64,
        /// Volume the level reports
        actual: u64,
    },
    /// A level's order count disagrees with its FIFO length
    #[error("level {price} count {actual} != FIFO length {expected}")]
    LevelCountMismatch {
        /// Level price
        price: Px,
        /// Count found by walking the FIFO
        expected: u32,
        /// Count the level reports
        actual: u32,
    },
    /// An order is queued under a level with a different price or side
    #[error("order {id} does not belong at level {price}")]
    MisfiledOrder {
        /// Order id
        id: u64,
        /// Level price
        price: Px,
    },
    /// A resting order has zero remaining quantity
    #[error("resting order {id} has zero remaining quantity")]
    ZeroRestingOrder {
        /// Order id
        id: u64,
    },
    /// Neighbour indices do not form a consistent doubly-linked FIFO
    #[error("broken FIFO linkage at order {id}")]
    BrokenLink {
        /// Order id
        id: u64,
    },
    /// A queued order is missing from (or mismapped in) the id map
    #[error("order {id} missing from id map")]
    UnmappedOrder {
        /// Order id
        id: u64,
    },
    /// The cached best price disagrees with the index extreme
    #[error("stale best on {side:?}: cached {cached:?}, index {actual:?}")]
    StaleBest {
        /// Affected side
        side: Side,
        /// Cached best price
        cached: Option<Px>,
        /// Extreme derived from the index
        actual: Option<Px>,
    },
    /// Resting liquidity crosses: best bid at or above best ask
    #[error("crossed book: bid {bid} >= ask {ask}")]
    CrossedBook {
        /// Best bid price
        bid: Px,
        /// Best ask price
        ask: Px,
    },
    /// The id map and the ladders disagree on how many orders rest
    #[error("id map holds {mapped} orders, ladders hold {linked}")]
    OrderCountMismatch {
        /// Orders in the id map
        mapped: usize,
        /// Orders reachable through the ladders
        linked: u64,
    },
}

/// Two-sided limit order book for a single symbol
pub struct OrderBook {
    symbol: Symbol,
    bids: Ladder,
    asks: Ladder,
    orders: AHashMap<u64, SlotIdx>,
    order_count: u64,
    match_count: u64,
}

impl OrderBook {
    /// Create an empty book
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            orders: AHashMap::new(),
            order_count: 0,
            match_count: 0,
        }
    }

    /// Symbol this book trades
    #[inline]
    #[must_use]
    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether an incoming order would execute immediately
    ///
    /// Market orders always go through the matching loop; limit orders only
    /// when they cross the opposite best.
    #[must_use]
    pub fn is_aggressive(&self, side: Side, kind: OrderType, price: Px) -> bool {
        match kind {
            OrderType::Market => true,
            OrderType::Limit => match side {
                Side::Buy => self.asks.best_price().is_some_and(|ask| price >= ask),
                Side::Sell => self.bids.best_price().is_some_and(|bid| price <= bid),
            },
        }
    }

    /// Rest `incoming` on its side of the book
    ///
    /// The order must have remaining quantity; the level is created on first
    /// use and the id map gains the order.
    pub fn insert(&mut self, pool: &mut OrderPool, incoming: SlotIdx) {
        let (id, side, price) = {
            let order = pool.get(incoming);
            debug_assert!(!order.remaining_quantity.is_zero());
            (order.id, order.side, order.price)
        };

        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        ladder.get_or_insert(price).push_back(pool, incoming);

        self.orders.insert(id, incoming);
        self.order_count += 1;
    }

    /// Remove a resting order by id; unknown ids are a no-op
    ///
    /// Returns whether an order was removed. The slot goes back to the pool.
    pub fn cancel(&mut self, pool: &mut OrderPool, order_id: u64) -> bool {
        let Some(&idx) = self.orders.get(&order_id) else {
            return false;
        };
        let (side, price) = {
            let order = pool.get(idx);
            (order.side, order.price)
        };

        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = ladder.level_mut(price) {
            level.unlink(pool, idx);
            if level.is_empty() {
                ladder.remove(price);
            }
        }

        self.orders.remove(&order_id);
        self.order_count -= 1;
        pool.release(idx);
        true
    }

    /// Change a resting order's remaining quantity in place
    ///
    /// FIFO position is preserved; a zero quantity converts to a cancel.
    /// Unknown ids are a no-op. Returns whether anything changed.
    pub fn modify(&mut self, pool: &mut OrderPool, order_id: u64, new_quantity: Qty) -> bool {
        if new_quantity.is_zero() {
            return self.cancel(pool, order_id);
        }
        let Some(&idx) = self.orders.get(&order_id) else {
            return false;
        };
        let (side, price, old) = {
            let order = pool.get(idx);
            (order.side, order.price, order.remaining_quantity)
        };

        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = ladder.level_mut(price) {
            level.adjust_volume(old, new_quantity);
        }

        let order = pool.get_mut(idx);
        order.remaining_quantity = new_quantity;
        if new_quantity > order.original_quantity {
            order.original_quantity = new_quantity;
        }
        true
    }

    /// Match `incoming` against resting liquidity
    ///
    /// Walks contra levels best-outward and each level's FIFO head-to-tail,
    /// emitting one report per fill at the passive price. Fully filled
    /// passives are unlinked, erased, and released; depleted levels are
    /// deleted with the best cache advanced to the next level out. The
    /// incoming order is left with whatever quantity could not execute;
    /// resting it (or releasing the slot) is the caller's decision.
    pub fn match_incoming(&mut self, pool: &mut OrderPool, incoming: SlotIdx) -> ReportBurst {
        let mut reports = ReportBurst::new();
        let (aggressor_id, side, kind, limit, timestamp) = {
            let order = pool.get(incoming);
            (order.id, order.side, order.kind, order.price, order.timestamp)
        };

        loop {
            if pool.get(incoming).remaining_quantity.is_zero() {
                break;
            }

            let contra = match side {
                Side::Buy => &mut self.asks,
                Side::Sell => &mut self.bids,
            };
            let Some(contra_price) = contra.best_price() else {
                break;
            };
            if kind == OrderType::Limit && !crosses(side, limit, contra_price) {
                break;
            }
            let Some(level) = contra.level_mut(contra_price) else {
                break;
            };

            let mut passive = level.head();
            while let Some(passive_idx) = passive {
                let incoming_rem = pool.get(incoming).remaining_quantity;
                if incoming_rem.is_zero() {
                    break;
                }
                let passive_rem = pool.get(passive_idx).remaining_quantity;
                let match_qty = incoming_rem.min(passive_rem);

                self.match_count += 1;
                reports.push(ExecutionReport {
                    order_id: aggressor_id,
                    match_id: self.match_count,
                    timestamp,
                    price: contra_price,
                    executed_quantity: match_qty,
                    side,
                    is_full_fill: incoming_rem == match_qty,
                });

                pool.get_mut(incoming).remaining_quantity -= match_qty;
                pool.get_mut(passive_idx).remaining_quantity -= match_qty;
                level.reduce_volume(match_qty);

                let next = pool.get(passive_idx).next;
                if pool.get(passive_idx).remaining_quantity.is_zero() {
                    level.unlink(pool, passive_idx);
                    self.orders.remove(&pool.get(passive_idx).id);
                    self.order_count -= 1;
                    pool.release(passive_idx);
                }
                passive = next;
            }

            if level.is_empty() {
                contra.remove(contra_price);
            } else {
                break;
            }
        }

        reports
    }

    /// Top of the bid side
    #[must_use]
    pub fn best_bid(&self) -> Option<LevelView> {
        self.bids.best().map(|level| LevelView {
            price: level.price(),
            total_volume: level.total_volume(),
            order_count: level.order_count(),
        })
    }

    /// Top of the ask side
    #[must_use]
    pub fn best_ask(&self) -> Option<LevelView> {
        self.asks.best().map(|level| LevelView {
            price: level.price(),
            total_volume: level.total_volume(),
            order_count: level.order_count(),
        })
    }

    /// Best ask minus best bid in ticks; zero if either side is empty
    #[must_use]
    pub fn spread(&self) -> u32 {
        match (self.bids.best_price(), self.asks.best_price()) {
            (Some(bid), Some(ask)) => ask.as_u32() - bid.as_u32(),
            _ => 0,
        }
    }

    /// Resting volume across all bid levels
    #[must_use]
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.total_volume()
    }

    /// Resting volume across all ask levels
    #[must_use]
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.total_volume()
    }

    /// Number of resting orders
    #[inline]
    #[must_use]
    pub const fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Number of fills matched since the book was created
    #[inline]
    #[must_use]
    pub const fn match_count(&self) -> u64 {
        self.match_count
    }

    /// Bid-side ladder
    #[inline]
    #[must_use]
    pub const fn bids(&self) -> &Ladder {
        &self.bids
    }

    /// Ask-side ladder
    #[inline]
    #[must_use]
    pub const fn asks(&self) -> &Ladder {
        &self.asks
    }

    /// Cross-check every structural invariant of the book
    ///
    /// Walks both ladders, every FIFO, and the id map, verifying counters,
    /// linkage, best caches, and the uncrossed-book property. Intended for
    /// tests and offline validation; the hot path never calls it.
    ///
    /// # Errors
    /// Returns the first [`BookError`] violation found.
    pub fn audit(&self, pool: &OrderPool) -> Result<(), BookError> {
        let mut linked: u64 = 0;

        for ladder in [&self.bids, &self.asks] {
            let side = ladder.side();
            let derived = ladder.derived_best();
            if ladder.best_price() != derived {
                return Err(BookError::StaleBest {
                    side,
                    cached: ladder.best_price(),
                    actual: derived,
                });
            }

            for level in ladder.iter() {
                let mut volume: u64 = 0;
                let mut count: u32 = 0;
                let mut prev: Option<SlotIdx> = None;
                let mut cursor = level.head();

                while let Some(idx) = cursor {
                    let order = pool.get(idx);
                    if order.prev != prev {
                        return Err(BookError::BrokenLink { id: order.id });
                    }
                    if order.price != level.price() || order.side != side {
                        return Err(BookError::MisfiledOrder {
                            id: order.id,
                            price: level.price(),
                        });
                    }
                    if order.remaining_quantity.is_zero() {
                        return Err(BookError::ZeroRestingOrder { id: order.id });
                    }
                    match self.orders.get(&order.id) {
                        Some(&mapped) if mapped == idx => {}
                        _ => return Err(BookError::UnmappedOrder { id: order.id }),
                    }

                    volume += order.remaining_quantity.as_u64();
                    count += 1;
                    prev = Some(idx);
                    cursor = order.next;
                }

                if level.tail() != prev {
                    let id = prev.map_or(0, |idx| pool.get(idx).id);
                    return Err(BookError::BrokenLink { id });
                }
                if volume != level.total_volume() {
                    return Err(BookError::LevelVolumeMismatch {
                        price: level.price(),
                        expected: volume,
                        actual: level.total_volume(),
                    });
                }
                if count != level.order_count() {
                    return Err(BookError::LevelCountMismatch {
                        price: level.price(),
                        expected: count,
                        actual: level.order_count(),
                    });
                }
                linked += u64::from(count);
            }
        }

        if linked != self.order_count || linked != self.orders.len() as u64 {
            return Err(BookError::OrderCountMismatch {
                mapped: self.orders.len(),
                linked,
            });
        }

        if let (Some(bid), Some(ask)) = (self.bids.best_price(), self.asks.best_price()) {
            if ask < bid {
                return Err(BookError::CrossedBook { bid, ask });
            }
        }

        Ok(())
    }
}

/// Whether a limit price reaches the contra level price
#[inline]
fn crosses(side: Side, limit: Px, contra: Px) -> bool {
    match side {
        Side::Buy => limit >= contra,
        Side::Sell => limit <= contra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use common::Ts;

    fn book() -> (OrderBook, OrderPool) {
        (OrderBook::new(Symbol::new("TEST")), OrderPool::new(1024))
    }

    fn submit(
        book: &mut OrderBook,
        pool: &mut OrderPool,
        id: u64,
        price: u32,
        qty: u32,
        side: Side,
    ) -> ReportBurst {
        submit_kind(book, pool, id, price, qty, side, OrderType::Limit)
    }

    fn submit_kind(
        book: &mut OrderBook,
        pool: &mut OrderPool,
        id: u64,
        price: u32,
        qty: u32,
        side: Side,
        kind: OrderType,
    ) -> ReportBurst {
        let order = Order::new(
            id,
            Ts::from_nanos(id),
            Px::from_u32(price),
            Qty::from_u32(qty),
            side,
            kind,
        );
        let idx = pool.alloc(order).unwrap();
        let reports = if book.is_aggressive(side, kind, Px::from_u32(price)) {
            book.match_incoming(pool, idx)
        } else {
            ReportBurst::new()
        };
        if kind == OrderType::Limit && !pool.get(idx).remaining_quantity.is_zero() {
            book.insert(pool, idx);
        } else {
            pool.release(idx);
        }
        reports
    }

    #[test]
    fn test_resting_orders_build_book() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        submit(&mut book, &mut pool, 2, 100_100, 100, Side::Sell);

        let bid = book.best_bid().unwrap();
        let ask = book.best_ask().unwrap();
        assert_eq!(bid.price, Px::from_u32(100_000));
        assert_eq!(bid.total_volume, 100);
        assert_eq!(ask.price, Px::from_u32(100_100));
        assert_eq!(book.spread(), 100);
        assert_eq!(book.order_count(), 2);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_exact_price_cross_matches() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Sell);
        let reports = submit(&mut book, &mut pool, 2, 100_000, 100, Side::Buy);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].order_id, 2);
        assert_eq!(reports[0].match_id, 1);
        assert_eq!(reports[0].price, Px::from_u32(100_000));
        assert_eq!(reports[0].executed_quantity, Qty::from_u32(100));
        assert!(reports[0].is_full_fill);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert_eq!(book.order_count(), 0);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_partial_fill_rests_remainder() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Sell);
        let reports = submit(&mut book, &mut pool, 2, 100_000, 150, Side::Buy);

        assert_eq!(reports.len(), 1);
        assert!(!reports[0].is_full_fill);
        assert_eq!(reports[0].executed_quantity, Qty::from_u32(100));

        let bid = book.best_bid().unwrap();
        assert_eq!(bid.price, Px::from_u32(100_000));
        assert_eq!(bid.total_volume, 50);
        assert!(book.best_ask().is_none());
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_price_improvement_goes_to_aggressor() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Sell);
        let reports = submit(&mut book, &mut pool, 2, 101_000, 100, Side::Buy);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].price, Px::from_u32(100_000));
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_walk_levels_best_outward() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 50, Side::Sell);
        submit(&mut book, &mut pool, 2, 100_000, 50, Side::Sell);
        submit(&mut book, &mut pool, 3, 100_100, 50, Side::Sell);

        let reports = submit(&mut book, &mut pool, 4, 100_100, 120, Side::Buy);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].price, Px::from_u32(100_000));
        assert_eq!(reports[0].executed_quantity, Qty::from_u32(50));
        assert_eq!(reports[1].price, Px::from_u32(100_000));
        assert_eq!(reports[1].executed_quantity, Qty::from_u32(50));
        assert_eq!(reports[2].price, Px::from_u32(100_100));
        assert_eq!(reports[2].executed_quantity, Qty::from_u32(20));
        assert!(reports[2].is_full_fill);
        assert!(!reports[0].is_full_fill && !reports[1].is_full_fill);

        let ask = book.best_ask().unwrap();
        assert_eq!(ask.price, Px::from_u32(100_100));
        assert_eq!(ask.total_volume, 30);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_fifo_priority_within_level() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 50, Side::Sell);
        submit(&mut book, &mut pool, 2, 100_000, 50, Side::Sell);

        let reports = submit(&mut book, &mut pool, 3, 100_000, 60, Side::Buy);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].executed_quantity, Qty::from_u32(50));
        assert_eq!(reports[1].executed_quantity, Qty::from_u32(10));

        // id=1 is gone, id=2 keeps the level with 40 left
        let ask = book.best_ask().unwrap();
        assert_eq!(ask.total_volume, 40);
        assert_eq!(ask.order_count, 1);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_market_order_never_rests() {
        let (mut book, mut pool) = book();
        let reports =
            submit_kind(&mut book, &mut pool, 1, 0, 100, Side::Buy, OrderType::Market);
        assert!(reports.is_empty());
        assert_eq!(book.order_count(), 0);
        assert!(book.best_bid().is_none());
        assert_eq!(pool.outstanding(), 0);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_market_order_sweeps() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 50, Side::Sell);
        submit(&mut book, &mut pool, 2, 100_100, 50, Side::Sell);

        let reports =
            submit_kind(&mut book, &mut pool, 3, 0, 80, Side::Buy, OrderType::Market);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].price, Px::from_u32(100_000));
        assert_eq!(reports[1].price, Px::from_u32(100_100));
        assert_eq!(reports[1].executed_quantity, Qty::from_u32(30));
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_cancel_removes_empty_level() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);

        assert!(book.cancel(&mut pool, 1));
        assert!(book.best_bid().is_none());
        assert_eq!(book.order_count(), 0);
        assert_eq!(pool.outstanding(), 0);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_cancel_unknown_is_noop() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        assert!(!book.cancel(&mut pool, 99));
        assert_eq!(book.order_count(), 1);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_cancel_keeps_other_orders_at_level() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        submit(&mut book, &mut pool, 2, 100_000, 200, Side::Buy);

        assert!(book.cancel(&mut pool, 1));
        let bid = book.best_bid().unwrap();
        assert_eq!(bid.total_volume, 200);
        assert_eq!(bid.order_count, 1);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_modify_decrease_keeps_position() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Sell);
        submit(&mut book, &mut pool, 2, 100_000, 100, Side::Sell);

        assert!(book.modify(&mut pool, 1, Qty::from_u32(40)));
        let ask = book.best_ask().unwrap();
        assert_eq!(ask.total_volume, 140);

        // id=1 still fills first
        let reports = submit(&mut book, &mut pool, 3, 100_000, 40, Side::Buy);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].executed_quantity, Qty::from_u32(40));
        let ask = book.best_ask().unwrap();
        assert_eq!(ask.total_volume, 100);
        assert_eq!(ask.order_count, 1);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_modify_to_zero_cancels() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        assert!(book.modify(&mut pool, 1, Qty::ZERO));
        assert!(book.best_bid().is_none());
        assert_eq!(book.order_count(), 0);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_modify_unknown_is_noop() {
        let (mut book, mut pool) = book();
        assert!(!book.modify(&mut pool, 5, Qty::from_u32(10)));
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_modify_increase_lifts_original() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        assert!(book.modify(&mut pool, 1, Qty::from_u32(250)));

        let bid = book.best_bid().unwrap();
        assert_eq!(bid.total_volume, 250);
        book.audit(&pool).unwrap();
    }

    #[test]
    fn test_match_ids_are_monotone_per_book() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 50, Side::Sell);
        submit(&mut book, &mut pool, 2, 100_000, 50, Side::Sell);
        let first = submit(&mut book, &mut pool, 3, 100_000, 50, Side::Buy);
        let second = submit(&mut book, &mut pool, 4, 100_000, 50, Side::Buy);

        assert_eq!(first[0].match_id, 1);
        assert_eq!(second[0].match_id, 2);
        assert_eq!(book.match_count(), 2);
    }

    #[test]
    fn test_add_then_cancel_restores_prior_state() {
        let (mut book, mut pool) = book();
        submit(&mut book, &mut pool, 1, 100_000, 100, Side::Buy);
        let bid_before = book.best_bid();
        let volume_before = book.total_bid_volume();

        submit(&mut book, &mut pool, 2, 100_200, 75, Side::Buy);
        assert!(book.cancel(&mut pool, 2));

        assert_eq!(book.best_bid(), bid_before);
        assert_eq!(book.total_bid_volume(), volume_before);
        assert_eq!(book.order_count(), 1);
        book.audit(&pool).unwrap();
    }
}
