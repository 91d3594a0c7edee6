//! Timestamp-based debounce filter, one per input line.
//!
//! A raw edge is accepted only if the millisecond clock has advanced more
//! than [`DEBOUNCE_WINDOW_MS`] since the last accepted edge on the same
//! line; anything closer is mechanical bounce and is discarded.  Nothing
//! blocks: a single human press produces exactly one accepted event, and
//! the processor goes straight back to idle.
//!
//! Clock source: the monotonic microsecond uptime counter, read in the ISR
//! and truncated to milliseconds (see `drivers::hw_init`).  Its ~1 ms
//! granularity is far finer than the 50 ms window, so a coarse-clock
//! "still bouncing vs. no activity" conflation cannot occur here.
//!
//! [`DEBOUNCE_WINDOW_MS`]: crate::config::DEBOUNCE_WINDOW_MS

use crate::config::DEBOUNCE_WINDOW_MS;

/// Per-line debounce state: the last accepted edge timestamp.
///
/// Reset at startup, updated on every accepted edge, never removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceFilter {
    last_accepted_ms: Option<u32>,
}

impl DebounceFilter {
    pub const fn new() -> Self {
        Self {
            last_accepted_ms: None,
        }
    }

    /// Evaluate a raw edge stamped `edge_ms`.  Returns `true` if the edge
    /// is accepted (and becomes the new reference point).
    ///
    /// `wrapping_sub` keeps the comparison correct across the u32
    /// millisecond counter rollover (~49.7 days).
    pub fn accept(&mut self, edge_ms: u32) -> bool {
        match self.last_accepted_ms {
            Some(last) if edge_ms.wrapping_sub(last) <= DEBOUNCE_WINDOW_MS => false,
            _ => {
                self.last_accepted_ms = Some(edge_ms);
                true
            }
        }
    }
}
