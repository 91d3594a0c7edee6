//! Hardware drivers implementing the port traits.
//!
//! Real implementations target ESP-IDF and are guarded by
//! `#[cfg(target_os = "espidf")]`; host builds get logging simulation stubs
//! so the whole crate (and its tests) compiles anywhere.

pub mod hw_init;
pub mod pulse_out;
pub mod sleep;
pub mod tick_timer;
pub mod uptime;
pub mod watchdog;
