//! Input lines and the dispatcher mapping accepted edges to rate mutations.

use log::{debug, info};

use crate::rate::RateControl;

/// Number of physical input lines.
pub const LINE_COUNT: usize = 3;

/// The fixed set of button lines.  Each is independently debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    /// Raise the rate by one step.
    Increase,
    /// Lower the rate by one step.
    Decrease,
    /// Debounced like the others but produces no mutation.  Reserved for
    /// future behavior — this is intentional, not a bug.
    Reserved,
}

impl InputLine {
    /// All lines, in flag-array order.
    pub const ALL: [InputLine; LINE_COUNT] =
        [InputLine::Increase, InputLine::Decrease, InputLine::Reserved];

    /// Index into the per-line flag/filter arrays.
    pub const fn index(self) -> usize {
        match self {
            InputLine::Increase => 0,
            InputLine::Decrease => 1,
            InputLine::Reserved => 2,
        }
    }
}

/// Apply the rate mutation for a debounce-accepted edge on `line`.
///
/// Returns `true` if the rate changed and the timer therefore needs
/// reprogramming.  A press at a bound clamps silently and returns `false`.
pub fn dispatch(line: InputLine, rate: &mut RateControl) -> bool {
    let changed = match line {
        InputLine::Increase => rate.increase(),
        InputLine::Decrease => rate.decrease(),
        InputLine::Reserved => {
            debug!("reserved line pressed, ignored");
            false
        }
    };
    if changed {
        info!("rate -> {} BPM", rate.current());
    }
    changed
}
