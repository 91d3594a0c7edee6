//! Rate model: the user-adjustable BPM value and its bounds.

use crate::config::{BPM_DEFAULT, BPM_MAX, BPM_MIN, BPM_STEP};

/// Owns the current rate.  Mutated only in [`BPM_STEP`]-sized moves, always
/// re-clamped to `[BPM_MIN, BPM_MAX]`.  All inputs are internally generated,
/// so there are no error conditions — a move at a bound is simply a no-op,
/// and the return value says so, letting callers skip a pointless timer
/// reprogramming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateControl {
    bpm: u16,
}

impl RateControl {
    /// Start at the power-on default.
    pub const fn new() -> Self {
        Self { bpm: BPM_DEFAULT }
    }

    /// Current rate in BPM.
    pub const fn current(&self) -> u16 {
        self.bpm
    }

    /// Move one step up.  Returns `true` if the rate actually changed.
    pub fn increase(&mut self) -> bool {
        let next = self.bpm.saturating_add(BPM_STEP).min(BPM_MAX);
        let changed = next != self.bpm;
        self.bpm = next;
        changed
    }

    /// Move one step down.  Returns `true` if the rate actually changed.
    pub fn decrease(&mut self) -> bool {
        let next = self.bpm.saturating_sub(BPM_STEP).max(BPM_MIN);
        let changed = next != self.bpm;
        self.bpm = next;
        changed
    }
}

impl Default for RateControl {
    fn default() -> Self {
        Self::new()
    }
}
