//! Per-cycle clock sampling.
//!
//! Once per control cycle the machine samples the clock source and asks
//! [`tick`] which clock fields moved since the values last recorded in
//! [`SharedState`].  Each moved field becomes one bus event, in fixed
//! hour → minute → second order.
//!
//! The comparison is deliberately against the *stale* state: the ticker
//! never writes `SharedState`, only the Monitoring mode's record handlers
//! do.  While Configuration mode is active nothing records, so every cycle
//! reports all three fields as changed — the extra topics simply fan out
//! to however many subscribers the active mode registered (possibly none).

use heapless::Vec;

use crate::bus::Topic;
use crate::fsm::context::SharedState;

/// A wall-clock sample from the [`ClockSource`](crate::app::ports::ClockSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Minute of hour, 0–59.
    pub minute: u8,
    /// Second of minute, 0–59.
    pub second: u8,
}

/// Ordered change set produced by one tick: at most one entry per field.
pub type TickChanges = Vec<(Topic, u8), 3>;

/// Compare `now` against the last-recorded clock fields and return the
/// events to publish.  A field that matches its recorded value emits
/// nothing; an unrecorded field (`None`) always differs.
pub fn tick(now: WallTime, state: &SharedState) -> TickChanges {
    let mut changes = TickChanges::new();

    if state.current_hour != Some(now.hour) {
        let _ = changes.push((Topic::HourChange, now.hour));
    }
    if state.current_minute != Some(now.minute) {
        let _ = changes.push((Topic::MinuteChange, now.minute));
    }
    if state.current_second != Some(now.second) {
        let _ = changes.push((Topic::SecondChange, now.second));
    }

    changes
}
