//! Shared runtime state threaded through every event handler.
//!
//! `SharedState` is the single record the ticker compares against and the
//! mode handlers write into.  It lives for the whole process: fields start
//! unset and are populated incrementally as the Monitoring mode observes
//! clock changes, and nothing clears them on a mode switch.

/// The process-lifetime runtime state record.
///
/// Writers are exactly the handlers the active mode registers — the ticker
/// and the controller itself only read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharedState {
    /// Last second recorded by `RecordSecond` (0–59).
    pub current_second: Option<u8>,
    /// Last minute recorded by `RecordMinute` (0–59).
    pub current_minute: Option<u8>,
    /// Last hour recorded by `RecordHour` (0–23).
    pub current_hour: Option<u8>,
    /// Day/night classification. Written only by `ClassifyDayNight`;
    /// unset until the first hour change observed in Monitoring mode.
    pub is_day: Option<bool>,
    /// Name of the profile most recently applied in Configuration mode.
    pub active_profile: Option<&'static str>,
}

impl SharedState {
    /// Fresh state with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Night is the conservative default: an unclassified system treats
    /// sound alerts as night-time observations until the first hour change.
    pub fn is_daytime(&self) -> bool {
        self.is_day.unwrap_or(false)
    }
}
