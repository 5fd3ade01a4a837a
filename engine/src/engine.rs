//! Matching engine: symbol directory, order pool, and report queue

use crate::config::EngineConfig;
use ahash::AHashMap;
use bus::SpscQueue;
use common::{ExecutionReport, OrderType, Px, Qty, Side, Symbol, Ts};
use lob::{Order, OrderBook, OrderPool};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Execution-report queue depth (power of two)
const EXECUTION_QUEUE_CAPACITY: usize = 65_536;

/// How many capacity failures share one diagnostic line
const SUPPRESS_EVERY: u64 = 100_000;

/// Entry point for order events across all symbols
///
/// Owns one book per symbol, the shared order pool, and the SPSC queue that
/// carries execution reports to a single external consumer. All book
/// mutations happen through `&mut self` on one logical executor, so arrival
/// order into [`MatchingEngine::submit_order`] is the time component of
/// price-time priority. Counters and the running flag may be observed from
/// other threads.
pub struct MatchingEngine {
    config: EngineConfig,
    books: AHashMap<Symbol, OrderBook>,
    pool: OrderPool,
    reports: Arc<SpscQueue<ExecutionReport>>,
    total_orders: AtomicU64,
    total_matches: AtomicU64,
    pool_exhausted: AtomicU64,
    reports_dropped: AtomicU64,
    running: AtomicBool,
}

impl MatchingEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let pool = OrderPool::new(config.order_pool_size);
        let books = AHashMap::with_capacity(config.num_symbols);
        Self {
            books,
            pool,
            reports: Arc::new(SpscQueue::with_capacity(EXECUTION_QUEUE_CAPACITY)),
            total_orders: AtomicU64::new(0),
            total_matches: AtomicU64::new(0),
            pool_exhausted: AtomicU64::new(0),
            reports_dropped: AtomicU64::new(0),
            running: AtomicBool::new(false),
            config,
        }
    }

    /// Submit an order for `symbol`
    ///
    /// Aggressive orders match immediately; each fill is pushed onto the
    /// execution queue. A limit remainder rests in the book. Returns `false`
    /// without touching any book when the quantity is zero or the order pool
    /// is exhausted — capacity failures are counted, never propagated.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_order(
        &mut self,
        symbol: &str,
        order_id: u64,
        timestamp: Ts,
        price: Px,
        quantity: Qty,
        side: Side,
        kind: OrderType,
    ) -> bool {
        if quantity.is_zero() {
            return false;
        }

        let sym = Symbol::new(symbol);
        let book = self
            .books
            .entry(sym)
            .or_insert_with(|| OrderBook::new(sym));

        let order = Order::new(order_id, timestamp, price, quantity, side, kind);
        let Some(idx) = self.pool.alloc(order) else {
            let failures = self.pool_exhausted.fetch_add(1, Ordering::Relaxed);
            if self.config.enable_logging && failures % SUPPRESS_EVERY == 0 {
                warn!(order_id, "order pool exhausted, dropping submission");
            }
            return false;
        };

        if book.is_aggressive(side, kind, price) {
            let burst = book.match_incoming(&mut self.pool, idx);
            let total = burst.len();
            let mut pushed = 0;
            for report in burst {
                if !self.reports.push(report) {
                    break;
                }
                pushed += 1;
                self.total_matches.fetch_add(1, Ordering::Release);
            }
            if pushed < total {
                let dropped = (total - pushed) as u64;
                let seen = self.reports_dropped.fetch_add(dropped, Ordering::Relaxed);
                if self.config.enable_logging && seen % SUPPRESS_EVERY == 0 {
                    warn!(order_id, dropped, "execution queue full, dropping reports");
                }
            }
        }

        if kind == OrderType::Limit && !self.pool.get(idx).remaining_quantity.is_zero() {
            book.insert(&mut self.pool, idx);
        } else {
            self.pool.release(idx);
        }

        self.total_orders.fetch_add(1, Ordering::Release);
        true
    }

    /// Cancel a resting order; unknown symbol or id is a no-op
    pub fn cancel_order(&mut self, symbol: &str, order_id: u64) {
        let sym = Symbol::new(symbol);
        if let Some(book) = self.books.get_mut(&sym) {
            book.cancel(&mut self.pool, order_id);
        }
    }

    /// Change a resting order's quantity; unknown symbol or id is a no-op
    ///
    /// Zero quantity cancels the order.
    pub fn modify_order(&mut self, symbol: &str, order_id: u64, new_quantity: Qty) {
        let sym = Symbol::new(symbol);
        if let Some(book) = self.books.get_mut(&sym) {
            book.modify(&mut self.pool, order_id, new_quantity);
        }
    }

    /// The book for `symbol`, if any orders have been submitted to it
    #[must_use]
    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(&Symbol::new(symbol))
    }

    /// Handle to the execution-report queue
    ///
    /// The engine is the producer; at most one consumer thread may pop.
    #[must_use]
    pub fn execution_queue(&self) -> Arc<SpscQueue<ExecutionReport>> {
        Arc::clone(&self.reports)
    }

    /// The shared order pool (observational)
    #[must_use]
    pub fn pool(&self) -> &OrderPool {
        &self.pool
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Orders accepted since construction
    #[must_use]
    pub fn total_orders(&self) -> u64 {
        self.total_orders.load(Ordering::Relaxed)
    }

    /// Execution reports successfully queued since construction
    #[must_use]
    pub fn total_matches(&self) -> u64 {
        self.total_matches.load(Ordering::Relaxed)
    }

    /// Submissions rejected because the pool was exhausted
    #[must_use]
    pub fn pool_exhausted(&self) -> u64 {
        self.pool_exhausted.load(Ordering::Relaxed)
    }

    /// Reports lost to a full execution queue
    #[must_use]
    pub fn reports_dropped(&self) -> u64 {
        self.reports_dropped.load(Ordering::Relaxed)
    }

    /// Mark the engine running (advisory)
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Mark the engine stopped (advisory)
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the engine is marked running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
