//! System configuration parameters.
//!
//! All values are compile-time constants: the device has no persistent
//! storage and reinitializes to these defaults on every power-on/reset.

// --- Rate (beats per minute) ---

/// Lowest selectable rate.
pub const BPM_MIN: u16 = 40;
/// Highest selectable rate.
pub const BPM_MAX: u16 = 155;
/// Rate after power-on/reset.
pub const BPM_DEFAULT: u16 = 100;
/// Button press moves the rate by this much.
pub const BPM_STEP: u16 = 5;

// --- Timing ---

/// Output pin stays asserted this long per beat.
pub const PULSE_WIDTH_MS: u32 = 50;
/// Edges on a line closer together than this are treated as switch bounce.
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

// --- Supervision ---

/// Watchdog resets the system if the loop misses heartbeats for this long.
/// Independent of the pulse rate.
pub const WATCHDOG_TIMEOUT_MS: u32 = 8_000;

/// Upper bound on waiting for the periodic timer to report quiescence after
/// a stop request.  Expiry is treated as a hardware-contract violation and
/// escalates to a watchdog reset.
pub const TIMER_DRAIN_TIMEOUT_MS: u32 = 100;
/// Poll interval while draining the timer.
pub const TIMER_DRAIN_POLL_MS: u32 = 1;
