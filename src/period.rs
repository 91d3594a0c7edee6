//! Period translation: BPM → milliseconds → hardware timer ticks.
//!
//! Pure functions of their inputs, callable outside any critical section.

/// Beat period in milliseconds, `floor(60000 / rate)`.
///
/// Callers accept the quantization: at 155 BPM this yields 387 ms, not an
/// exact fraction.
pub fn period_ms(bpm: u16) -> u32 {
    debug_assert!(bpm > 0);
    60_000 / u32::from(bpm)
}

/// Tick count for one beat period at the given timer tick frequency,
/// rounded to the nearest representable count.
///
/// Never returns 0 — a zero-period timer would fire back-to-back and the
/// loop could never drain it.
pub fn ticks_for_rate(bpm: u16, tick_hz: u32) -> u64 {
    let ms = u64::from(period_ms(bpm));
    let ticks = (ms * u64::from(tick_hz) + 500) / 1000;
    ticks.max(1)
}
