//! Pulse output pin drivers.

use crate::pins;
use crate::ports::PulsePin;

/// The board's pulse line, backed by the GPIO configured in
/// [`hw_init::configure_output`](super::hw_init::configure_output).
#[derive(Debug, Default)]
pub struct PulseOutput;

impl PulseOutput {
    pub const fn new() -> Self {
        Self
    }
}

impl PulsePin for PulseOutput {
    fn set_active(&mut self) {
        super::hw_init::gpio_write(pins::PULSE_GPIO, true);
    }

    fn set_inactive(&mut self) {
        super::hw_init::gpio_write(pins::PULSE_GPIO, false);
    }
}

/// Adapter for boards wired through `embedded-hal` pin types instead of a
/// raw GPIO number (e.g. an `esp-idf-hal` `PinDriver`).  GPIO writes on an
/// already-configured pin cannot fail on the supported targets, so the
/// error leg is discarded.
pub struct HalPulsePin<P>(pub P);

impl<P: embedded_hal::digital::OutputPin> PulsePin for HalPulsePin<P> {
    fn set_active(&mut self) {
        self.0.set_high().ok();
    }

    fn set_inactive(&mut self) {
        self.0.set_low().ok();
    }
}
