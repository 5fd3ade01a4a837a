//! Matching engine over per-symbol order books
//!
//! Routes submit/cancel/modify events by symbol, owns the shared order pool
//! and the SPSC execution-report queue, and tracks aggregate counters that
//! other threads may observe.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)] // Duplicates arrive via the test dev-dependencies
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::MatchingEngine;
