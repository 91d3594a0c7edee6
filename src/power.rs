//! Power manager: decide when it is safe to suspend, and do it.

use log::trace;

use crate::events::EventFlags;
use crate::ports::SuspendPort;

/// Logical power state, derived fresh each loop pass from the pending
/// flags.  Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    /// Work pending (mid pulse, mid debounce, or flags set) — stay awake.
    Active,
    /// Nothing pending — suspended until a wake source fired.
    #[default]
    Idle,
}

/// Arbitrates between active processing and low-power idle.
#[derive(Debug, Default)]
pub struct PowerManager {
    /// Completed suspend/wake cycles, for diagnostics.
    idle_cycles: u32,
}

impl PowerManager {
    pub const fn new() -> Self {
        Self { idle_cycles: 0 }
    }

    /// Suspend iff no work is pending.
    ///
    /// Checking the flags *after* the loop drained them closes the race
    /// where an interrupt fires between the last take and this call: the
    /// flag it set keeps us in `Active` and the next pass services it
    /// immediately instead of sleeping on it.
    pub fn enter_idle(&mut self, flags: &EventFlags, suspend: &mut impl SuspendPort) -> PowerState {
        if flags.any_pending() {
            return PowerState::Active;
        }
        suspend.enter_idle();
        self.idle_cycles = self.idle_cycles.wrapping_add(1);
        trace!("woke from idle (cycle {})", self.idle_cycles);
        PowerState::Idle
    }

    pub fn idle_cycles(&self) -> u32 {
        self.idle_cycles
    }
}
