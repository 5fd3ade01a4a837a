//! Price-time-priority limit order book
//!
//! Per-symbol two-sided book built from three pieces: a pre-sized arena of
//! order slots with intrusive FIFO linkage, price levels queued strictly by
//! arrival, and a per-side ordered ladder with a cached best price. The
//! matching loop is a continuous double-auction over that structure,
//! emitting one execution report per fill at the passive price.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)] // Duplicates arrive via the bench dev-dependencies
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod book;
pub mod ladder;
pub mod level;
pub mod order;
pub mod pool;

pub use book::{BookError, LevelView, OrderBook, ReportBurst};
pub use ladder::Ladder;
pub use level::PriceLevel;
pub use order::{Order, SlotIdx};
pub use pool::OrderPool;
