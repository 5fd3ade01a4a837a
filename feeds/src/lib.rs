//! Market-data feed collaborators for the matching engine
//!
//! Translates framed wire messages into engine API calls. The engine core
//! knows nothing about wire formats; everything here sits strictly on the
//! producer side of its API.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod itch;

pub use itch::{FeedError, ItchReplay, ReplayStats};
