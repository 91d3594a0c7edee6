//! Periodic tick timer driver on top of `esp_timer`.
//!
//! `esp_timer` counts microseconds, so the tick rate is fixed at 1 MHz and
//! tick counts map 1:1 to the period in µs.  The callback runs in timer-task
//! context and only sets the pulse-due flag.

use crate::error::TimerError;
use crate::ports::TickTimer;

#[cfg(target_os = "espidf")]
pub use espidf::EspTickTimer;

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_svc::sys::*;

    use super::*;
    use crate::events::FLAGS;

    /// Microseconds per `esp_timer` tick count unit.
    const TICK_RATE_HZ: u32 = 1_000_000;

    unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
        FLAGS.tick_isr();
    }

    /// Periodic timer backed by an `esp_timer` handle.
    pub struct EspTickTimer {
        handle: esp_timer_handle_t,
        period_ticks: u64,
    }

    impl EspTickTimer {
        /// Create the timer handle.  Does not start it.
        pub fn new() -> Result<Self, TimerError> {
            let args = esp_timer_create_args_t {
                callback: Some(tick_cb),
                arg: core::ptr::null_mut(),
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: b"pulse_tick\0".as_ptr() as *const _,
                skip_unhandled_events: true,
            };
            let mut handle: esp_timer_handle_t = core::ptr::null_mut();
            // SAFETY: args outlives the call; handle is written on ESP_OK only.
            let ret = unsafe { esp_timer_create(&args, &mut handle) };
            if ret != ESP_OK {
                return Err(TimerError::CreateFailed(ret));
            }
            Ok(Self {
                handle,
                period_ticks: 0,
            })
        }
    }

    impl TickTimer for EspTickTimer {
        fn tick_rate_hz(&self) -> u32 {
            TICK_RATE_HZ
        }

        fn program_period(&mut self, ticks: u64) {
            self.period_ticks = ticks;
        }

        fn start(&mut self) -> Result<(), TimerError> {
            // SAFETY: handle is valid for the lifetime of self.
            let ret = unsafe { esp_timer_start_periodic(self.handle, self.period_ticks) };
            if ret != ESP_OK {
                return Err(TimerError::StartFailed(ret));
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<(), TimerError> {
            // SAFETY: handle is valid for the lifetime of self.
            let ret = unsafe { esp_timer_stop(self.handle) };
            // ESP_ERR_INVALID_STATE means it was already stopped.
            if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
                return Err(TimerError::StopFailed(ret));
            }
            Ok(())
        }

        fn is_stopped(&self) -> bool {
            // SAFETY: handle is valid for the lifetime of self.
            !unsafe { esp_timer_is_active(self.handle) }
        }
    }

    // Not Drop-deleted: the timer lives for the whole firmware run.
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Host-build stand-in: records the latched period and running state so the
/// binary's bring-up path compiles and logs sensibly off-target.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimTickTimer {
    period_ticks: u64,
    running: bool,
}

#[cfg(not(target_os = "espidf"))]
impl SimTickTimer {
    pub fn new() -> Result<Self, TimerError> {
        Ok(Self::default())
    }
}

#[cfg(not(target_os = "espidf"))]
impl TickTimer for SimTickTimer {
    fn tick_rate_hz(&self) -> u32 {
        1_000_000
    }

    fn program_period(&mut self, ticks: u64) {
        self.period_ticks = ticks;
    }

    fn start(&mut self) -> Result<(), TimerError> {
        log::debug!("tick_timer(sim): start, period {} ticks", self.period_ticks);
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TimerError> {
        log::debug!("tick_timer(sim): stop");
        self.running = false;
        Ok(())
    }

    fn is_stopped(&self) -> bool {
        !self.running
    }
}
