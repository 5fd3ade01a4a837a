//! Pool-resident order record with intrusive FIFO linkage

use common::{OrderType, Px, Qty, Side, Ts};

/// Index of an order slot in the [`crate::OrderPool`]
///
/// Resting orders reference their FIFO neighbours by slot index rather than
/// by owning pointer, so unlinking stays O(1) without cyclic ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotIdx(pub(crate) u32);

impl SlotIdx {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A resting or incoming order
#[derive(Debug, Clone)]
pub struct Order {
    /// Producer-assigned unique id
    pub id: u64,
    /// Producer-supplied timestamp
    pub timestamp: Ts,
    /// Limit price in ticks (ignored for matching of market orders)
    pub price: Px,
    /// Quantity at submission
    pub original_quantity: Qty,
    /// Quantity still unfilled
    pub remaining_quantity: Qty,
    /// Buy or sell
    pub side: Side,
    /// Limit or market
    pub kind: OrderType,
    /// Previous order in the level FIFO (towards the head)
    pub(crate) prev: Option<SlotIdx>,
    /// Next order in the level FIFO (towards the tail)
    pub(crate) next: Option<SlotIdx>,
}

impl Order {
    /// Create a fresh, unlinked order
    #[must_use]
    pub fn new(id: u64, timestamp: Ts, price: Px, quantity: Qty, side: Side, kind: OrderType) -> Self {
        Self {
            id,
            timestamp,
            price,
            original_quantity: quantity,
            remaining_quantity: quantity,
            side,
            kind,
            prev: None,
            next: None,
        }
    }

    /// Whether the order has been completely filled
    #[inline]
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }
}
