//! Pulsebeat firmware — main entry point.
//!
//! Hexagonal layering: hardware drivers implement the port traits, and the
//! scheduler core runs the adaptive rate-controlled pulse loop against them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Drivers (outer ring)                      │
//! │                                                              │
//! │  EspTickTimer   PulseOutput   Uptime   TaskWatchdog          │
//! │  (TickTimer)    (PulsePin)    (Clock)  (WatchdogPort)        │
//! │  LightSleep                                                  │
//! │  (SuspendPort)                                               │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ──────────────────     │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │          PulseScheduler (pure logic)                 │    │
//! │  │  RateControl · DebounceFilter · PulseActuator        │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use pulsebeat::drivers;
use pulsebeat::events;
use pulsebeat::scheduler::{Board, PulseScheduler};

#[cfg(target_os = "espidf")]
use pulsebeat::drivers::sleep::LightSleep;
#[cfg(target_os = "espidf")]
use pulsebeat::drivers::tick_timer::EspTickTimer;
#[cfg(target_os = "espidf")]
use pulsebeat::drivers::watchdog::TaskWatchdog;

#[cfg(not(target_os = "espidf"))]
use pulsebeat::drivers::sleep::SimSleep;
#[cfg(not(target_os = "espidf"))]
use pulsebeat::drivers::tick_timer::SimTickTimer;
#[cfg(not(target_os = "espidf"))]
use pulsebeat::drivers::watchdog::SimWatchdog;

use pulsebeat::drivers::pulse_out::PulseOutput;
use pulsebeat::drivers::uptime::Uptime;

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger_init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Pulsebeat v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Watchdog first ─────────────────────────────────────
    // Armed before any peripheral bring-up so a hang anywhere in init
    // still ends in a reset instead of a silent brick.
    #[cfg(target_os = "espidf")]
    let watchdog = TaskWatchdog::arm().map_err(|e| anyhow::anyhow!("{e}"))?;
    #[cfg(not(target_os = "espidf"))]
    let watchdog = SimWatchdog::arm().map_err(|e| anyhow::anyhow!("{e}"))?;

    // ── 3. Peripheral bring-up ────────────────────────────────
    // Init failure is critical: log and halt, and let the watchdog
    // reset the chip after the timeout.
    if let Err(e) = bring_up() {
        error!("hardware bring-up failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Assemble the board ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    let mut board = Board {
        timer: EspTickTimer::new().map_err(|e| anyhow::anyhow!("{e}"))?,
        pulse_pin: PulseOutput::new(),
        clock: Uptime::new(),
        watchdog,
        power: LightSleep::new().map_err(|e| anyhow::anyhow!("{e}"))?,
    };
    #[cfg(not(target_os = "espidf"))]
    let mut board = Board {
        timer: SimTickTimer::new().map_err(|e| anyhow::anyhow!("{e}"))?,
        pulse_pin: PulseOutput::new(),
        clock: Uptime::new(),
        watchdog,
        power: SimSleep::new().map_err(|e| anyhow::anyhow!("{e}"))?,
    };

    // ── 5. Scheduler loop ─────────────────────────────────────
    let mut sched = PulseScheduler::new();
    if let Err(e) = sched.start(&mut board) {
        error!("timer start failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    info!("System ready. Entering scheduler loop.");

    loop {
        if let Err(e) = sched.run_once(&events::FLAGS, &mut board) {
            // Stop heartbeating and let the watchdog reset the chip.
            error!("scheduler error: {} — awaiting watchdog reset", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    }
}

/// GPIO directions, pulls, and button edge ISRs, in dependency order.
fn bring_up() -> pulsebeat::error::Result<()> {
    drivers::hw_init::configure_output()?;
    drivers::hw_init::configure_inputs()?;
    drivers::hw_init::init_isr_service()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn env_logger_init() {
    // Host simulation runs without the ESP-IDF logger; fall back to a
    // minimal stderr logger so `info!` output is visible.
    struct StderrLogger;
    impl log::Log for StderrLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }
        fn log(&self, record: &log::Record) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
        fn flush(&self) {}
    }
    static LOGGER: StderrLogger = StderrLogger;
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Info);
}
