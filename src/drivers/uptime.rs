//! Monotonic clock driver.

use crate::ports::Clock;

/// Milliseconds-since-boot clock with a bounded busy-wait.
///
/// On target this reads the `esp_timer` microsecond counter; on the host it
/// measures from process start.  `now_ms` wraps at `u32::MAX` (~49.7 days),
/// which the debounce filter handles with wrapping arithmetic.
pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    started: std::time::Instant,
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            started: std::time::Instant::now(),
        }
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl Clock for Uptime {
    fn now_ms(&self) -> u32 {
        // SAFETY: plain counter read, callable from any context.
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000) as u32
    }

    fn busy_wait_ms(&self, ms: u32) {
        // Busy-wait, not vTaskDelay: the pulse width must hold the pin level
        // without yielding to the idle task (which could enter sleep).
        // SAFETY: plain calibrated spin loop.
        unsafe {
            esp_idf_svc::sys::esp_rom_delay_us(ms * 1_000);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Clock for Uptime {
    fn now_ms(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }

    fn busy_wait_ms(&self, ms: u32) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_millis(u64::from(ms));
        while std::time::Instant::now() < deadline {
            core::hint::spin_loop();
        }
    }
}
