//! GPIO pin assignments for the pulsebeat board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Pulse output
// ---------------------------------------------------------------------------

/// Digital output asserted active-high for
/// [`PULSE_WIDTH_MS`](crate::config::PULSE_WIDTH_MS) per beat.
pub const PULSE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Buttons (active-low momentary switches with pull-ups, falling-edge ISR)
// ---------------------------------------------------------------------------

/// Raise the rate by one step.
pub const BTN_INCREASE_GPIO: i32 = 6;
/// Lower the rate by one step.
pub const BTN_DECREASE_GPIO: i32 = 7;
/// Third button, debounced but currently unassigned.
pub const BTN_RESERVED_GPIO: i32 = 8;
