//! Scheduler loop integration tests against the mock board.
//!
//! Every test constructs its own `EventFlags` instance, so tests stay
//! independent of the hardware-wired static and of each other.

use std::sync::Arc;

use pulsebeat::config::{BPM_DEFAULT, BPM_MAX, PULSE_WIDTH_MS, TIMER_DRAIN_TIMEOUT_MS};
use pulsebeat::error::{Error, TimerError};
use pulsebeat::events::EventFlags;
use pulsebeat::input::InputLine;
use pulsebeat::ports::Clock;
use pulsebeat::power::PowerState;
use pulsebeat::scheduler::PulseScheduler;

use crate::mock_board::{mock_board, TimerOp};

#[test]
fn start_programs_default_rate_then_starts() {
    let mut board = mock_board();
    let sched = PulseScheduler::new();

    sched.start(&mut board).unwrap();

    // 100 BPM → 600 ms → 600_000 µs-ticks at 1 MHz.
    assert_eq!(
        board.timer.ops,
        vec![TimerOp::ProgramPeriod(600_000), TimerOp::Start]
    );
}

#[test]
fn tick_fires_one_full_width_pulse_then_idles() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.tick_isr();
    let state = sched.run_once(&flags, &mut board).unwrap();

    assert_eq!(
        board.pulse_pin.transitions,
        vec![(true, 0), (false, PULSE_WIDTH_MS)]
    );
    assert_eq!(state, PowerState::Idle);
    assert_eq!(board.power.suspends, 1);
}

#[test]
fn pass_without_events_only_heartbeats_and_idles() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    let state = sched.run_once(&flags, &mut board).unwrap();

    assert!(board.pulse_pin.transitions.is_empty());
    assert_eq!(board.timer.ops.len(), 2, "no reprogram without a rate change");
    assert_eq!(state, PowerState::Idle);
    assert_eq!(board.watchdog.heartbeats, 1);
}

#[test]
fn heartbeat_runs_every_pass() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    for _ in 0..5 {
        sched.run_once(&flags, &mut board).unwrap();
    }

    assert_eq!(board.watchdog.heartbeats, 5);
}

#[test]
fn increase_press_reprograms_with_stop_before_program() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.edge_isr(InputLine::Increase, 1_000);
    sched.run_once(&flags, &mut board).unwrap();

    assert_eq!(sched.current_rate(), BPM_DEFAULT + 5);
    // 105 BPM → 571 ms → 571_000 ticks.  Strict ordering after the initial
    // program+start: stop, then program, then restart.
    assert_eq!(
        board.timer.ops[2..],
        [
            TimerOp::Stop,
            TimerOp::ProgramPeriod(571_000),
            TimerOp::Start
        ]
    );
}

#[test]
fn bounce_burst_mutates_rate_once() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    // Clean press, a bounce 20 ms later, then a clean press 100 ms after
    // the first.
    for edge_ms in [1_000, 1_020, 1_100] {
        flags.edge_isr(InputLine::Increase, edge_ms);
        sched.run_once(&flags, &mut board).unwrap();
    }

    assert_eq!(sched.current_rate(), BPM_DEFAULT + 10);
    assert_eq!(
        board.timer.programmed_periods(),
        vec![600_000, 571_000, 545_000],
        "the bounce must not reach the timer"
    );
}

#[test]
fn rate_clamps_at_max_and_clamped_presses_do_not_reprogram() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    // (155 − 100) / 5 = 11 presses reach the ceiling; the rest are no-ops.
    let mut edge_ms = 1_000;
    for _ in 0..15 {
        flags.edge_isr(InputLine::Increase, edge_ms);
        sched.run_once(&flags, &mut board).unwrap();
        edge_ms += 100;
    }

    assert_eq!(sched.current_rate(), BPM_MAX);
    let periods = board.timer.programmed_periods();
    assert_eq!(periods.len(), 1 + 11, "clamped presses must not touch the timer");
    // 155 BPM → 387 ms → 387_000 ticks.
    assert_eq!(*periods.last().unwrap(), 387_000);
}

#[test]
fn decrease_press_lowers_rate() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.edge_isr(InputLine::Decrease, 500);
    sched.run_once(&flags, &mut board).unwrap();

    assert_eq!(sched.current_rate(), BPM_DEFAULT - 5);
}

#[test]
fn reserved_press_is_debounced_but_changes_nothing() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.edge_isr(InputLine::Reserved, 500);
    let state = sched.run_once(&flags, &mut board).unwrap();

    assert_eq!(sched.current_rate(), BPM_DEFAULT);
    assert_eq!(board.timer.ops.len(), 2, "no reprogram for the reserved line");
    assert_eq!(state, PowerState::Idle, "the edge must still be consumed");
}

#[test]
fn simultaneous_increase_and_decrease_cancel_out() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.edge_isr(InputLine::Increase, 700);
    flags.edge_isr(InputLine::Decrease, 700);
    sched.run_once(&flags, &mut board).unwrap();

    // Both lines dispatch (per-line debounce), net rate unchanged, and the
    // timer ends up programmed back at the default period.
    assert_eq!(sched.current_rate(), BPM_DEFAULT);
    assert_eq!(*board.timer.programmed_periods().last().unwrap(), 600_000);
}

#[test]
fn stuck_timer_drain_times_out_with_an_error() {
    let flags = EventFlags::new();
    let mut board = mock_board();
    board.timer.sticky_active = true;
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.edge_isr(InputLine::Increase, 1_000);
    let err = sched.run_once(&flags, &mut board).unwrap_err();

    assert_eq!(err, Error::Timer(TimerError::StuckActive));
    // The drain wait is bounded: the clock advanced by the timeout, not
    // forever.
    assert_eq!(board.clock.now_ms(), TIMER_DRAIN_TIMEOUT_MS);
    // Stop was requested but no new period was programmed.
    assert_eq!(*board.timer.ops.last().unwrap(), TimerOp::Stop);
}

#[test]
fn tick_landing_mid_pulse_defers_to_next_pass() {
    let flags = Arc::new(EventFlags::new());
    let mut board = mock_board();
    board.clock.tick_during_wait = Some(flags.clone());
    let mut sched = PulseScheduler::new();
    sched.start(&mut board).unwrap();

    flags.tick_isr();
    let state = sched.run_once(&flags, &mut board).unwrap();

    // The tick that fired during the pulse width keeps us awake...
    assert_eq!(state, PowerState::Active);
    assert_eq!(board.power.suspends, 0, "must not sleep on pending work");
    assert_eq!(board.pulse_pin.transitions.len(), 2);

    // ...and the next pass services it as a second pulse.
    let state = sched.run_once(&flags, &mut board).unwrap();
    assert_eq!(state, PowerState::Idle);
    assert_eq!(board.pulse_pin.transitions.len(), 4);
    assert!(!board.pulse_pin.transitions.last().unwrap().0);
}
