//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and pulls and registers the button edge ISRs
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! scheduler loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::{Error, Result};
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::events::FLAGS;
#[cfg(target_os = "espidf")]
use crate::input::InputLine;

/// Configure the pulse output pin: push-pull output, driven low before the
/// loop starts so no spurious pulse appears at boot.
#[cfg(target_os = "espidf")]
pub fn configure_output() -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PULSE_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: called once from main() before the loop; single-threaded.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK {
        return Err(Error::Init("pulse output GPIO config failed"));
    }
    unsafe { gpio_set_level(pins::PULSE_GPIO, 0) };
    info!("hw_init: pulse output configured (GPIO{})", pins::PULSE_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_output() -> Result<()> {
    log::info!("hw_init(sim): output config skipped");
    Ok(())
}

/// Configure the three button lines: inputs with pull-ups, falling-edge
/// interrupt (buttons are active-low).
#[cfg(target_os = "espidf")]
pub fn configure_inputs() -> Result<()> {
    let button_pins = [
        pins::BTN_INCREASE_GPIO,
        pins::BTN_DECREASE_GPIO,
        pins::BTN_RESERVED_GPIO,
    ];

    for &pin in &button_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        // SAFETY: called once from main() before the loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK {
            return Err(Error::Init("button GPIO config failed"));
        }
    }

    info!("hw_init: button inputs configured (inc/dec/reserved)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_inputs() -> Result<()> {
    log::info!("hw_init(sim): input config skipped");
    Ok(())
}

// ── GPIO ISR service ──────────────────────────────────────────
//
// Each ISR does exactly three things: the edge-detect hardware has already
// acknowledged the event by the time we run, we stamp the edge with the
// monotonic millisecond clock, set the line's pending flag, and return.
// No blocking, no timer access.

#[cfg(target_os = "espidf")]
fn edge_from_isr(line: InputLine) {
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR context.
    let now_ms = ((unsafe { esp_timer_get_time() }) / 1_000) as u32;
    FLAGS.edge_isr(line, now_ms);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn btn_increase_isr(_arg: *mut core::ffi::c_void) {
    edge_from_isr(InputLine::Increase);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn btn_decrease_isr(_arg: *mut core::ffi::c_void) {
    edge_from_isr(InputLine::Decrease);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn btn_reserved_isr(_arg: *mut core::ffi::c_void) {
    edge_from_isr(InputLine::Reserved);
}

/// Install the per-pin GPIO ISR service and register the button handlers.
/// Call after [`configure_inputs`] and before the scheduler loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<()> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The registered handlers
    // are static functions that only set atomic flags.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(Error::Init("GPIO ISR service install failed"));
        }

        let handlers: [(i32, unsafe extern "C" fn(*mut core::ffi::c_void)); 3] = [
            (pins::BTN_INCREASE_GPIO, btn_increase_isr),
            (pins::BTN_DECREASE_GPIO, btn_decrease_isr),
            (pins::BTN_RESERVED_GPIO, btn_reserved_isr),
        ];
        for (pin, handler) in handlers {
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            let ret = gpio_isr_handler_add(pin, Some(handler), core::ptr::null_mut());
            if ret != ESP_OK {
                return Err(Error::Init("button ISR registration failed"));
            }
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (3 button lines)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<()> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

/// Set the level of an already-configured output pin.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: writes to an already-configured output pin; main loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}
