//! The cooperative scheduler loop tying the core together.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Wake Sources                           │
//! │                                                              │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐                │
//! │   │ Timer ISR │  │ Inc/Dec   │  │ Reserved  │                │
//! │   │ (tick)    │  │ edge ISRs │  │ edge ISR  │                │
//! │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘                │
//! │         ▼              ▼              ▼                      │
//! │   ┌────────────────────────────────────────────────────┐     │
//! │   │               EventFlags (atomics)                 │     │
//! │   └───────────────────────┬────────────────────────────┘     │
//! │                           ▼                                  │
//! │   heartbeat → debounce/dispatch → reprogram → pulse → idle   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each pass runs the five steps in that fixed order and only then hands
//! control to the power manager.  There is no terminal state; the loop runs
//! until power loss, and the watchdog is the only recovery mechanism.

use heapless::Vec;
use log::{error, info};

use crate::config::{TIMER_DRAIN_POLL_MS, TIMER_DRAIN_TIMEOUT_MS};
use crate::debounce::DebounceFilter;
use crate::error::{Result, TimerError};
use crate::events::EventFlags;
use crate::input::{self, InputLine, LINE_COUNT};
use crate::period;
use crate::ports::{Clock, PulsePin, SuspendPort, TickTimer, WatchdogPort};
use crate::power::{PowerManager, PowerState};
use crate::pulse::PulseActuator;
use crate::rate::RateControl;

/// One implementation of each port, grouped so scheduler signatures stay
/// readable and tests can assemble mock boards field by field.
pub struct Board<T, P, C, W, S>
where
    T: TickTimer,
    P: PulsePin,
    C: Clock,
    W: WatchdogPort,
    S: SuspendPort,
{
    pub timer: T,
    pub pulse_pin: P,
    pub clock: C,
    pub watchdog: W,
    pub power: S,
}

/// The adaptive rate-controlled pulse scheduler.
pub struct PulseScheduler {
    rate: RateControl,
    filters: [DebounceFilter; LINE_COUNT],
    actuator: PulseActuator,
    power: PowerManager,
}

impl PulseScheduler {
    pub const fn new() -> Self {
        Self {
            rate: RateControl::new(),
            filters: [DebounceFilter::new(); LINE_COUNT],
            actuator: PulseActuator::new(),
            power: PowerManager::new(),
        }
    }

    /// Current rate in BPM.
    pub const fn current_rate(&self) -> u16 {
        self.rate.current()
    }

    /// Program the timer for the default rate and start it.  Call once
    /// before the first [`run_once`](Self::run_once).
    pub fn start<T, P, C, W, S>(&self, board: &mut Board<T, P, C, W, S>) -> Result<()>
    where
        T: TickTimer,
        P: PulsePin,
        C: Clock,
        W: WatchdogPort,
        S: SuspendPort,
    {
        let bpm = self.rate.current();
        let ticks = period::ticks_for_rate(bpm, board.timer.tick_rate_hz());
        board.timer.program_period(ticks);
        board.timer.start()?;
        info!(
            "pulse timer started: {} BPM, {} ms period, {} ticks",
            bpm,
            period::period_ms(bpm),
            ticks
        );
        Ok(())
    }

    /// One full scheduler pass, in fixed order:
    ///
    /// 1. watchdog heartbeat — unconditionally, so a stuck pass still gets
    ///    reset instead of lying silent past the timeout;
    /// 2. debounce + dispatch every pending raw edge;
    /// 3. reprogram the timer if the rate changed (stop, drain, program,
    ///    restart);
    /// 4. fire the pulse if one is due;
    /// 5. hand control to the power manager.
    ///
    /// Returns the power state entered, or the timer error that should end
    /// the loop (the caller stops heartbeating and the watchdog resets).
    pub fn run_once<T, P, C, W, S>(
        &mut self,
        flags: &EventFlags,
        board: &mut Board<T, P, C, W, S>,
    ) -> Result<PowerState>
    where
        T: TickTimer,
        P: PulsePin,
        C: Clock,
        W: WatchdogPort,
        S: SuspendPort,
    {
        board.watchdog.heartbeat();

        // Flags are taken (cleared) before any work happens, so edges and
        // ticks landing mid-pass are deferred to the next pass, not lost.
        let mut accepted: Vec<InputLine, LINE_COUNT> = Vec::new();
        for line in InputLine::ALL {
            if let Some(edge_ms) = flags.take_edge(line) {
                if self.filters[line.index()].accept(edge_ms) {
                    accepted.push(line).ok();
                }
            }
        }
        for line in accepted {
            if input::dispatch(line, &mut self.rate) {
                flags.request_reconfigure();
            }
        }

        if flags.take_reconfigure() {
            self.reprogram(board)?;
        }

        if flags.take_pulse_due() {
            self.actuator.fire(&mut board.pulse_pin, &board.clock);
        }

        Ok(self.power.enter_idle(flags, &mut board.power))
    }

    /// Stop-drain-program-restart.  Mandatory sequence: reprogramming a
    /// live timer yields undefined period values on at least one hardware
    /// family this design targets.
    fn reprogram<T, P, C, W, S>(&mut self, board: &mut Board<T, P, C, W, S>) -> Result<()>
    where
        T: TickTimer,
        P: PulsePin,
        C: Clock,
        W: WatchdogPort,
        S: SuspendPort,
    {
        board.timer.stop()?;

        // Bounded drain wait.  The hardware contract says the timer stops
        // promptly; if it never does, give up and let the watchdog reset.
        let mut waited_ms = 0;
        while !board.timer.is_stopped() {
            if waited_ms >= TIMER_DRAIN_TIMEOUT_MS {
                error!("timer refused to quiesce after {waited_ms} ms");
                return Err(TimerError::StuckActive.into());
            }
            board.clock.busy_wait_ms(TIMER_DRAIN_POLL_MS);
            waited_ms += TIMER_DRAIN_POLL_MS;
        }

        let bpm = self.rate.current();
        let ticks = period::ticks_for_rate(bpm, board.timer.tick_rate_hz());
        board.timer.program_period(ticks);
        board.timer.start()?;
        info!(
            "timer reprogrammed: {} BPM, {} ms period, {} ticks",
            bpm,
            period::period_ms(bpm),
            ticks
        );
        Ok(())
    }
}

impl Default for PulseScheduler {
    fn default() -> Self {
        Self::new()
    }
}
