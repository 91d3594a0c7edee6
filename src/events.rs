//! Pending-event flags — the sole channel between interrupt context and the
//! cooperative loop.
//!
//! ISRs only ever *set* flags (plus the raw edge timestamp); the loop is the
//! only clearer.  The loop always clears a flag **before** performing the
//! work it signals, so an interrupt re-firing mid-processing re-sets the
//! flag for the next pass instead of being lost.  With exactly one consumer
//! and set-only producers, no locks are needed.
//!
//! ```text
//! ┌─────────────┐  set   ┌──────────────┐  take  ┌──────────────┐
//! │ GPIO ISR    │──────▶ │  EventFlags  │──────▶ │  Scheduler   │
//! │ Timer ISR   │──────▶ │  (atomics)   │        │  loop        │
//! └─────────────┘        └──────────────┘        └──────────────┘
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::input::{InputLine, LINE_COUNT};

/// The flag set.  A single static instance ([`FLAGS`]) is shared between
/// the ISRs and the loop; tests construct their own instances.
pub struct EventFlags {
    /// Periodic timer fired; a pulse is owed.
    pulse_due: AtomicBool,
    /// Rate changed; the timer needs the stop-drain-program-start sequence.
    /// Kept in the flag set for uniformity even though it is only ever
    /// written from loop context in this design.
    reconfigure_due: AtomicBool,
    /// Raw (not yet debounced) edge pending, per line.
    edge_pending: [AtomicBool; LINE_COUNT],
    /// Millisecond timestamp of the most recent raw edge, per line.
    edge_at_ms: [AtomicU32; LINE_COUNT],
}

/// Shared instance wired to the hardware ISRs.
pub static FLAGS: EventFlags = EventFlags::new();

impl EventFlags {
    pub const fn new() -> Self {
        Self {
            pulse_due: AtomicBool::new(false),
            reconfigure_due: AtomicBool::new(false),
            edge_pending: [const { AtomicBool::new(false) }; LINE_COUNT],
            edge_at_ms: [const { AtomicU32::new(0) }; LINE_COUNT],
        }
    }

    // ── Producers (ISR context: acknowledge, set, return) ────────

    /// Record a raw edge on `line` at `now_ms`.  ISR-safe: two atomic
    /// stores, no blocking.
    pub fn edge_isr(&self, line: InputLine, now_ms: u32) {
        let i = line.index();
        self.edge_at_ms[i].store(now_ms, Ordering::Relaxed);
        self.edge_pending[i].store(true, Ordering::Release);
    }

    /// Record a periodic timer tick.  ISR-safe.
    pub fn tick_isr(&self) {
        self.pulse_due.store(true, Ordering::Release);
    }

    // ── Consumer (loop context) ──────────────────────────────────

    /// Take the pending edge on `line`, clearing the flag first.  Returns
    /// the raw edge timestamp if one was pending.
    ///
    /// An edge arriving between the swap and the timestamp load simply
    /// refreshes the timestamp and re-sets the flag for the next pass.
    pub fn take_edge(&self, line: InputLine) -> Option<u32> {
        let i = line.index();
        if self.edge_pending[i].swap(false, Ordering::Acquire) {
            Some(self.edge_at_ms[i].load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// Take the pulse-due flag (cleared before the pulse is fired).
    pub fn take_pulse_due(&self) -> bool {
        self.pulse_due.swap(false, Ordering::Acquire)
    }

    /// Request timer reprogramming (loop context, after a rate change).
    pub fn request_reconfigure(&self) {
        self.reconfigure_due.store(true, Ordering::Release);
    }

    /// Take the reconfigure flag (cleared before the timer is touched).
    pub fn take_reconfigure(&self) -> bool {
        self.reconfigure_due.swap(false, Ordering::Acquire)
    }

    /// Whether any work is pending.  Drives the active/idle decision.
    pub fn any_pending(&self) -> bool {
        self.pulse_due.load(Ordering::Acquire)
            || self.reconfigure_due.load(Ordering::Acquire)
            || self
                .edge_pending
                .iter()
                .any(|f| f.load(Ordering::Acquire))
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}
