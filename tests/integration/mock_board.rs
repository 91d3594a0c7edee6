//! Mock port implementations for integration tests.
//!
//! The timer mock records every call so tests can assert on the full
//! stop/drain/program/start history without touching real peripherals; the
//! pin and clock share a fake millisecond counter so pulse timing is
//! observable.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use pulsebeat::error::TimerError;
use pulsebeat::events::EventFlags;
use pulsebeat::ports::{Clock, PulsePin, SuspendPort, TickTimer, WatchdogPort};
use pulsebeat::scheduler::Board;

// ── Timer call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOp {
    ProgramPeriod(u64),
    Start,
    Stop,
}

// ── MockTimer ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTimer {
    pub ops: Vec<TimerOp>,
    /// When set, the timer never reports quiescence after a stop request.
    pub sticky_active: bool,
    running: bool,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn programmed_periods(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TimerOp::ProgramPeriod(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl TickTimer for MockTimer {
    fn tick_rate_hz(&self) -> u32 {
        1_000_000
    }

    fn program_period(&mut self, ticks: u64) {
        assert!(
            self.is_stopped(),
            "period programmed while the timer was still active"
        );
        self.ops.push(TimerOp::ProgramPeriod(ticks));
    }

    fn start(&mut self) -> Result<(), TimerError> {
        self.ops.push(TimerOp::Start);
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TimerError> {
        self.ops.push(TimerOp::Stop);
        if !self.sticky_active {
            self.running = false;
        }
        Ok(())
    }

    fn is_stopped(&self) -> bool {
        !self.running
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// Records `(level, now_ms)` for every transition.
pub struct MockPin {
    pub transitions: Vec<(bool, u32)>,
    pub now: Rc<Cell<u32>>,
}

impl PulsePin for MockPin {
    fn set_active(&mut self) {
        self.transitions.push((true, self.now.get()));
    }

    fn set_inactive(&mut self) {
        self.transitions.push((false, self.now.get()));
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Fake clock: `busy_wait_ms` advances the shared counter instantly, and an
/// optional interrupt hook fires once during the first wait, simulating an
/// ISR landing while the loop is mid-pulse.
pub struct MockClock {
    pub now: Rc<Cell<u32>>,
    pub tick_during_wait: Option<Arc<EventFlags>>,
    fired: Cell<bool>,
}

impl MockClock {
    pub fn new(now: Rc<Cell<u32>>) -> Self {
        Self {
            now,
            tick_during_wait: None,
            fired: Cell::new(false),
        }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn busy_wait_ms(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
        if let Some(flags) = &self.tick_during_wait {
            if !self.fired.replace(true) {
                flags.tick_isr();
            }
        }
    }
}

// ── MockWatchdog / MockSuspend ────────────────────────────────

#[derive(Default)]
pub struct MockWatchdog {
    pub heartbeats: u32,
}

impl WatchdogPort for MockWatchdog {
    fn heartbeat(&mut self) {
        self.heartbeats += 1;
    }
}

#[derive(Default)]
pub struct MockSuspend {
    pub suspends: u32,
}

impl SuspendPort for MockSuspend {
    fn enter_idle(&mut self) {
        self.suspends += 1;
    }
}

// ── Assembly ──────────────────────────────────────────────────

pub type MockBoard = Board<MockTimer, MockPin, MockClock, MockWatchdog, MockSuspend>;

/// A fully mocked board with the pin and clock sharing one fake counter.
pub fn mock_board() -> MockBoard {
    let now = Rc::new(Cell::new(0));
    Board {
        timer: MockTimer::new(),
        pulse_pin: MockPin {
            transitions: Vec::new(),
            now: now.clone(),
        },
        clock: MockClock::new(now),
        watchdog: MockWatchdog::default(),
        power: MockSuspend::default(),
    }
}
