//! Low-power idle driver.
//!
//! Light sleep keeps RAM and peripheral state but halts the CPU, so the
//! suspend path arms two wake sources before every entry: the three button
//! lines (level wake, buttons are active-low) and a one-shot timer wake
//! aligned to the next pending `esp_timer` alarm.  The timer wake is what
//! makes [`SuspendPort::enter_idle`] guaranteed to return.

use crate::ports::SuspendPort;

#[cfg(target_os = "espidf")]
pub use espidf::LightSleep;

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_svc::sys::*;
    use log::{debug, warn};

    use super::*;
    use crate::error::{Error, Result};
    use crate::pins;

    /// Light-sleep suspension with button + timer wake sources.
    pub struct LightSleep;

    impl LightSleep {
        /// Enable GPIO wake on the button lines.  Wake configuration is
        /// sticky across sleep entries, so this runs once.
        pub fn new() -> Result<Self> {
            let button_pins = [
                pins::BTN_INCREASE_GPIO,
                pins::BTN_DECREASE_GPIO,
                pins::BTN_RESERVED_GPIO,
            ];
            // SAFETY: pins were configured as inputs during bring-up.
            unsafe {
                for &pin in &button_pins {
                    let ret = gpio_wakeup_enable(pin, gpio_int_type_t_GPIO_INTR_LOW_LEVEL);
                    if ret != ESP_OK {
                        return Err(Error::Init("button wake enable failed"));
                    }
                }
                let ret = esp_sleep_enable_gpio_wakeup();
                if ret != ESP_OK {
                    return Err(Error::Init("GPIO wake source enable failed"));
                }
            }
            Ok(Self)
        }
    }

    impl SuspendPort for LightSleep {
        fn enter_idle(&mut self) {
            // SAFETY: sleep entry from the main task with wake sources armed.
            unsafe {
                // esp_timer alarms do not fire during light sleep; mirror the
                // next alarm into the sleep timer so the tick is never late.
                let now_us = esp_timer_get_time();
                let next_alarm_us = esp_timer_get_next_alarm();
                if next_alarm_us > now_us {
                    esp_sleep_enable_timer_wakeup((next_alarm_us - now_us) as u64);
                }

                let ret = esp_light_sleep_start();
                if ret != ESP_OK {
                    // Sleep rejected (e.g. a wake source already pending);
                    // fall through to an active pass.
                    warn!("light sleep rejected (rc={ret})");
                    return;
                }

                let cause = esp_sleep_get_wakeup_cause();
                debug!("woke from light sleep (cause={cause})");
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Host-build stand-in: a short real sleep so a simulated loop does not
/// spin a core at 100 %.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimSleep;

#[cfg(not(target_os = "espidf"))]
impl SimSleep {
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self)
    }
}

#[cfg(not(target_os = "espidf"))]
impl SuspendPort for SimSleep {
    fn enter_idle(&mut self) {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
