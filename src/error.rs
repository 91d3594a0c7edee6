//! Unified error types for the pulsebeat firmware.
//!
//! The taxonomy is deliberately narrow: this is a closed embedded system
//! with no external fallible I/O.  Rate clamping is not an error, and loop
//! lockups are recovered only by the watchdog.  All variants are `Copy` so
//! they can be passed around without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral bring-up failed.
    Init(&'static str),
    /// The periodic timer misbehaved.
    Timer(TimerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Timer(e) => write!(f, "timer: {e}"),
        }
    }
}

/// Errors from the periodic timer peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Timer handle could not be created.
    CreateFailed(i32),
    /// Start request was rejected.
    StartFailed(i32),
    /// Stop request was rejected.
    StopFailed(i32),
    /// Timer never reported quiescence after a stop request.  The caller
    /// escalates by halting heartbeats so the watchdog resets the system.
    StuckActive,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed(rc) => write!(f, "create failed (rc={rc})"),
            Self::StartFailed(rc) => write!(f, "start failed (rc={rc})"),
            Self::StopFailed(rc) => write!(f, "stop failed (rc={rc})"),
            Self::StuckActive => write!(f, "still active after stop request"),
        }
    }
}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
