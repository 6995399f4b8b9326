/// Fixed-layout record standing in for an order-book event — the
/// motivating payload for this queue, used only by the benchmark and its
/// tests. Not part of the library's public contract.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEvent {
    /// Per-producer monotonically increasing (wrapping) sequence number.
    pub sequence: u64,
    pub instrument_id: u32,
    pub price_ticks: i64,
    pub quantity: u32,
    pub side: Side,
}

/// Which side of the book an event belongs to.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl OrderEvent {
    /// Builds a deterministic event from a producer id and a per-producer
    /// sequence counter, for use by the benchmark's producer loop.
    #[must_use]
    pub fn synthetic(producer_id: u32, sequence: u64) -> Self {
        Self {
            sequence,
            instrument_id: producer_id,
            price_ticks: (sequence % 1_000_000) as i64,
            quantity: 100,
            side: if sequence % 2 == 0 { Side::Buy } else { Side::Sell },
        }
    }
}
