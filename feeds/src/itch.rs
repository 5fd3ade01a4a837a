//! ITCH-style feed replay into the matching engine
//!
//! Frames are length-prefixed: a big-endian u16 payload length, a one-byte
//! message type, then the payload. Recognised types are `A` (add order),
//! `X` (order cancel), and `D` (order delete); everything else is skipped
//! by length. Prices are fixed-point with 4 implied decimals and symbols
//! are 8 right-space-padded ASCII bytes, matching the book's native types.

use ahash::AHashMap;
use common::{OrderType, Px, Qty, Side, Symbol, Ts};
use engine::MatchingEngine;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::info;

const MSG_ADD_ORDER: u8 = b'A';
const MSG_ORDER_CANCEL: u8 = b'X';
const MSG_ORDER_DELETE: u8 = b'D';

/// Add-order body: locate u16, tracking u16, timestamp u64, order_ref u64,
/// side u8, shares u32, stock [u8; 8], price u32
const ADD_ORDER_LEN: usize = 37;
/// Cancel body: locate u16, tracking u16, timestamp u64, order_ref u64,
/// cancelled shares u32
const ORDER_CANCEL_LEN: usize = 24;
/// Delete body: locate u16, tracking u16, timestamp u64, order_ref u64
const ORDER_DELETE_LEN: usize = 20;

/// Replay failures that abort the run
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Underlying reader failed
    #[error("feed I/O: {0}")]
    Io(#[from] io::Error),
}

/// Per-replay message accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Complete frames decoded
    pub frames: u64,
    /// Add-order messages applied
    pub adds: u64,
    /// Cancel messages applied
    pub cancels: u64,
    /// Delete messages applied
    pub deletes: u64,
    /// Frames of unrecognised type, skipped by length
    pub unknown: u64,
    /// Frames shorter than their declared body, dropped
    pub malformed: u64,
    /// Cancels/deletes whose order was never seen in an add
    pub unmapped: u64,
}

/// Replays ITCH-style byte streams into a [`MatchingEngine`]
///
/// The wire carries no symbol on cancels and deletes, so the replayer
/// remembers each add's order→symbol association and routes through it.
#[derive(Default)]
pub struct ItchReplay {
    symbols: AHashMap<u64, Symbol>,
}

impl ItchReplay {
    /// Create a replayer with an empty order→symbol map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a file into `engine`
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] if the file cannot be opened or read.
    pub fn replay_file(
        &mut self,
        path: &Path,
        engine: &mut MatchingEngine,
    ) -> Result<ReplayStats, FeedError> {
        let file = File::open(path)?;
        self.replay(BufReader::new(file), engine)
    }

    /// Replay a framed byte stream into `engine`
    ///
    /// A stream ending cleanly between frames terminates the replay; a
    /// stream truncated mid-frame drops that frame and terminates. A frame
    /// whose payload is shorter than its message type requires is dropped
    /// and the replay continues.
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] on any reader failure other than clean EOF.
    pub fn replay<R: Read>(
        &mut self,
        mut reader: R,
        engine: &mut MatchingEngine,
    ) -> Result<ReplayStats, FeedError> {
        let mut stats = ReplayStats::default();
        let mut payload = Vec::new();

        loop {
            let mut header = [0u8; 2];
            match reader.read_exact(&mut header) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            }
            let length = usize::from(u16::from_be_bytes(header));
            if length == 0 {
                stats.malformed += 1;
                continue;
            }

            let mut kind = [0u8; 1];
            if read_body(&mut reader, &mut kind).is_break() {
                stats.malformed += 1;
                break;
            }
            payload.resize(length - 1, 0);
            if read_body(&mut reader, &mut payload).is_break() {
                stats.malformed += 1;
                break;
            }

            stats.frames += 1;
            self.dispatch(kind[0], &payload, engine, &mut stats);

            if stats.frames % 1_000_000 == 0 {
                info!(frames = stats.frames, "replay progress");
            }
        }

        Ok(stats)
    }

    fn dispatch(
        &mut self,
        kind: u8,
        payload: &[u8],
        engine: &mut MatchingEngine,
        stats: &mut ReplayStats,
    ) {
        match kind {
            MSG_ADD_ORDER if payload.len() >= ADD_ORDER_LEN => {
                self.handle_add(payload, engine);
                stats.adds += 1;
            }
            MSG_ORDER_CANCEL if payload.len() >= ORDER_CANCEL_LEN => {
                if self.cancel_by_ref(be_u64(&payload[12..20]), engine) {
                    stats.cancels += 1;
                } else {
                    stats.unmapped += 1;
                }
            }
            MSG_ORDER_DELETE if payload.len() >= ORDER_DELETE_LEN => {
                if self.cancel_by_ref(be_u64(&payload[12..20]), engine) {
                    stats.deletes += 1;
                } else {
                    stats.unmapped += 1;
                }
            }
            MSG_ADD_ORDER | MSG_ORDER_CANCEL | MSG_ORDER_DELETE => stats.malformed += 1,
            _ => stats.unknown += 1,
        }
    }

    fn handle_add(&mut self, payload: &[u8], engine: &mut MatchingEngine) {
        let timestamp = be_u64(&payload[4..12]);
        let order_ref = be_u64(&payload[12..20]);
        let side = if payload[20] == b'B' { Side::Buy } else { Side::Sell };
        let shares = be_u32(&payload[21..25]);
        let mut stock = [0u8; 8];
        stock.copy_from_slice(&payload[25..33]);
        let price = be_u32(&payload[33..37]);

        let symbol = Symbol::from_bytes(stock);
        self.symbols.insert(order_ref, symbol);
        engine.submit_order(
            symbol.as_str(),
            order_ref,
            Ts::from_nanos(timestamp),
            Px::from_u32(price),
            Qty::from_u32(shares),
            side,
            OrderType::Limit,
        );
    }

    fn cancel_by_ref(&mut self, order_ref: u64, engine: &mut MatchingEngine) -> bool {
        match self.symbols.remove(&order_ref) {
            Some(symbol) => {
                engine.cancel_order(symbol.as_str(), order_ref);
                true
            }
            None => false,
        }
    }
}

/// Read a full body, distinguishing mid-frame truncation from I/O failure
fn read_body<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::ops::ControlFlow<()> {
    match reader.read_exact(buf) {
        Ok(()) => std::ops::ControlFlow::Continue(()),
        Err(_) => std::ops::ControlFlow::Break(()),
    }
}

#[inline]
fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline]
fn be_u64(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}
