//! Port traits — the boundary between the scheduler core and the hardware.
//!
//! ```text
//!   Driver ──▶ Port trait ──▶ PulseScheduler (core)
//! ```
//!
//! Drivers (ESP-IDF peripherals, or mocks in host tests) implement these
//! traits; the scheduler consumes them via generics and never touches
//! hardware directly.

use crate::error::TimerError;

// ───────────────────────────────────────────────────────────────
// Periodic timer
// ───────────────────────────────────────────────────────────────

/// The periodic wake-up timer.
///
/// Reprogramming a live timer yields undefined periods on at least one
/// hardware family this design targets, so the scheduler always drives the
/// stop → drain → program → start sequence and implementations must report
/// quiescence truthfully through [`is_stopped`](TickTimer::is_stopped).
pub trait TickTimer {
    /// Tick frequency of the underlying counter, in Hz.
    fn tick_rate_hz(&self) -> u32;

    /// Latch the period for the next [`start`](TickTimer::start).  Takes
    /// effect only on start; never touches a running timer.
    fn program_period(&mut self, ticks: u64);

    /// Start periodic operation at the latched period.
    fn start(&mut self) -> Result<(), TimerError>;

    /// Request the timer to stop.  Quiescence may lag the request; poll
    /// [`is_stopped`](TickTimer::is_stopped) before reprogramming.
    fn stop(&mut self) -> Result<(), TimerError>;

    /// Whether the timer has fully drained and is safe to reprogram.
    fn is_stopped(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Pulse output pin
// ───────────────────────────────────────────────────────────────

/// The active-high output line.  Infallible: GPIO writes on the targets we
/// care about cannot fail once the pin is configured.
pub trait PulsePin {
    fn set_active(&mut self);
    fn set_inactive(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus the *bounded busy-wait* primitive.
///
/// Busy-waiting is deliberately a different API from suspension
/// ([`SuspendPort`]): the pulse width and debounce-style waits must keep
/// the CPU awake and return after a known duration, while `enter_idle` may
/// sleep indefinitely until a wake source fires.
pub trait Clock {
    /// Milliseconds since boot (wraps at `u32::MAX`, ~49.7 days).
    fn now_ms(&self) -> u32;

    /// Spin for `ms` milliseconds without suspending.
    fn busy_wait_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Watchdog
// ───────────────────────────────────────────────────────────────

/// The reset supervisor.  Arming (with
/// [`WATCHDOG_TIMEOUT_MS`](crate::config::WATCHDOG_TIMEOUT_MS)) happens at
/// driver construction; the loop only heartbeats.
pub trait WatchdogPort {
    /// Acknowledge liveness.  Must be called every loop pass.
    fn heartbeat(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Low-power idle
// ───────────────────────────────────────────────────────────────

/// The suspension primitive.
///
/// Contract: enter the lowest power state that keeps the periodic timer
/// running (hard requirement, not a tuning choice), arm every input line's
/// edge wake, suspend, and on wake restore whatever clock configuration the
/// low-power state reset.  Guaranteed to return, because the periodic timer
/// is always an armed wake source.
pub trait SuspendPort {
    fn enter_idle(&mut self);
}
