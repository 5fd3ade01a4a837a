//! Order attributes and the execution report wire shape

use crate::types::{Px, Qty, Ts};
use serde::{Deserialize, Serialize};

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bid)
    Buy = 0,
    /// Sell side (ask/offer)
    Sell = 1,
}

impl Side {
    /// Check if this is the buy side
    #[inline]
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Get the opposite side
    #[inline]
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderType {
    /// Rest at the limit price if not immediately matched
    Limit = 0,
    /// Execute against resting liquidity only, never rests
    Market = 1,
}

/// One fill between an aggressor and a passive order
///
/// `match_id` values are monotone increasing per book, starting at 1.
/// `price` is the passive order's price; price improvement goes to the
/// aggressor. `is_full_fill` is true iff this fill brings the aggressor's
/// remaining quantity to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Aggressor order id
    pub order_id: u64,
    /// Per-book match sequence number
    pub match_id: u64,
    /// Aggressor's timestamp
    pub timestamp: Ts,
    /// Execution price (the passive order's price)
    pub price: Px,
    /// Quantity traded in this fill
    pub executed_quantity: Qty,
    /// Aggressor side
    pub side: Side,
    /// Whether the aggressor is fully filled by this report
    pub is_full_fill: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_operations() {
        assert!(Side::Buy.is_buy());
        assert!(!Side::Sell.is_buy());
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_report_serde() -> Result<(), Box<dyn std::error::Error>> {
        let report = ExecutionReport {
            order_id: 42,
            match_id: 7,
            timestamp: Ts::from_nanos(1_000_000),
            price: Px::from_u32(100_000),
            executed_quantity: Qty::from_u32(50),
            side: Side::Buy,
            is_full_fill: true,
        };
        let encoded = bincode::serialize(&report)?;
        let decoded: ExecutionReport = bincode::deserialize(&encoded)?;
        assert_eq!(report, decoded);
        Ok(())
    }
}
