//! Pulsebeat firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within the driver modules.

#![deny(unused_must_use)]

pub mod config;
pub mod debounce;
pub mod error;
pub mod events;
pub mod input;
pub mod period;
pub mod pins;
pub mod ports;
pub mod power;
pub mod pulse;
pub mod rate;
pub mod scheduler;

pub mod drivers;
