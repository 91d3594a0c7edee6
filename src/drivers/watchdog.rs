//! Task watchdog driver.
//!
//! The watchdog is the only recovery path for a wedged loop, so it is armed
//! at construction time — before any peripheral bring-up — and the scheduler
//! heartbeats it once per pass.  A missed heartbeat for
//! [`WATCHDOG_TIMEOUT_MS`](crate::config::WATCHDOG_TIMEOUT_MS) resets the
//! chip.

use crate::ports::WatchdogPort;

#[cfg(target_os = "espidf")]
pub use espidf::TaskWatchdog;

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_svc::sys::*;
    use log::info;

    use super::*;
    use crate::config::WATCHDOG_TIMEOUT_MS;
    use crate::error::{Error, Result};

    /// Task watchdog (TWDT) wrapper subscribing the current (main) task.
    pub struct TaskWatchdog;

    impl TaskWatchdog {
        /// Reconfigure the TWDT to the firmware timeout and subscribe the
        /// calling task.  Must be called from the task that will heartbeat.
        pub fn arm() -> Result<Self> {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: WATCHDOG_TIMEOUT_MS,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: reconfigures the already-initialized TWDT; called once
            // from main before the loop.
            unsafe {
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    return Err(Error::Init("watchdog reconfigure failed"));
                }
                let ret = esp_task_wdt_add(core::ptr::null_mut());
                if ret != ESP_OK && ret != ESP_ERR_INVALID_ARG {
                    return Err(Error::Init("watchdog task subscribe failed"));
                }
            }
            info!("watchdog armed: {} ms timeout", WATCHDOG_TIMEOUT_MS);
            Ok(Self)
        }
    }

    impl WatchdogPort for TaskWatchdog {
        fn heartbeat(&mut self) {
            // SAFETY: the calling task was subscribed in arm().
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimWatchdog {
    heartbeats: u64,
}

#[cfg(not(target_os = "espidf"))]
impl SimWatchdog {
    pub fn arm() -> crate::error::Result<Self> {
        log::info!("watchdog(sim): armed");
        Ok(Self::default())
    }
}

#[cfg(not(target_os = "espidf"))]
impl WatchdogPort for SimWatchdog {
    fn heartbeat(&mut self) {
        self.heartbeats += 1;
    }
}
