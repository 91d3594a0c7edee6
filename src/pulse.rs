//! Pulse actuator: drive the output pin active for a fixed width.
//!
//! Uses an active busy-wait rather than a sleep: the width is tens of
//! milliseconds against an idle budget of hundreds, and keeping a second
//! wake-capable timer alive through idle would cost more than the brief
//! awake window (measured on the reference hardware).

use crate::config::PULSE_WIDTH_MS;
use crate::ports::{Clock, PulsePin};

/// Emits fixed-width pulses.  No error conditions; the only side effect is
/// the externally observable pin transition.
#[derive(Debug, Clone, Copy)]
pub struct PulseActuator {
    width_ms: u32,
}

impl PulseActuator {
    pub const fn new() -> Self {
        Self {
            width_ms: PULSE_WIDTH_MS,
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_width(width_ms: u32) -> Self {
        Self { width_ms }
    }

    /// Assert the pin, busy-wait the configured width, deassert.
    ///
    /// Always leaves the pin inactive on return — flags set by interrupts
    /// during the wait are handled by the next loop pass, never here.
    pub fn fire(&self, pin: &mut impl PulsePin, clock: &impl Clock) {
        pin.set_active();
        clock.busy_wait_ms(self.width_ms);
        pin.set_inactive();
    }
}

impl Default for PulseActuator {
    fn default() -> Self {
        Self::new()
    }
}
