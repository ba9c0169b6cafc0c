//! Per-mode subscription tables and pure reaction helpers.
//!
//! Each mode is defined by a static table of `(Topic, Handler)` pairs — no
//! closures, no dynamic dispatch, no heap.  Installing a mode swaps the
//! bus's whole active set for its table; the handler bodies live in the
//! [`ModeMachine`](super::ModeMachine) dispatch match.
//!
//! ```text
//!  CONFIGURATION ──[button]──▶ StateChange(0) ──▶ MONITORING
//!       ▲                                             │
//!       └───────── StateChange(1) ◀──[button]─────────┘
//! ```

use super::ModeId;
use crate::bus::{Handler, Topic};

// ═══════════════════════════════════════════════════════════════
//  Subscription tables
// ═══════════════════════════════════════════════════════════════

/// Configuration mode: browse the catalog with the pot, confirm with the
/// button.  Registration order is dispatch order.
pub const CONFIGURATION_TABLE: &[(Topic, Handler)] = &[
    (Topic::SecondChange, Handler::EvaluatePotentiometer),
    (Topic::ProfileSelect, Handler::ApplyProfile),
    (Topic::SecondChange, Handler::PollButton),
    (Topic::ButtonClicked, Handler::RequestModeSwitch),
];

/// Monitoring mode: record the clock, classify day/night, watch sound
/// and keep the LCD status line fresh.
pub const MONITORING_TABLE: &[(Topic, Handler)] = &[
    (Topic::HourChange, Handler::RecordHour),
    (Topic::HourChange, Handler::ClassifyDayNight),
    (Topic::MinuteChange, Handler::RecordMinute),
    (Topic::MinuteChange, Handler::SampleTempHumidity),
    (Topic::SecondChange, Handler::RecordSecond),
    (Topic::SecondChange, Handler::SampleSound),
    (Topic::SecondChange, Handler::PollButton),
    (Topic::SecondChange, Handler::RefreshDisplay),
    (Topic::ButtonClicked, Handler::RequestModeSwitch),
];

/// The subscription table a freshly installed `mode` registers.
pub fn subscriptions(mode: ModeId) -> &'static [(Topic, Handler)] {
    match mode {
        ModeId::Configuration => CONFIGURATION_TABLE,
        ModeId::Monitoring => MONITORING_TABLE,
    }
}

// ═══════════════════════════════════════════════════════════════
//  Mode-switch wire codes
// ═══════════════════════════════════════════════════════════════

/// `StateChange` payload published when leaving Configuration.
pub const PROMOTE_TO_MONITORING: u8 = 0;
/// `StateChange` payload published when leaving Monitoring.
pub const DEMOTE_TO_CONFIGURATION: u8 = 1;

// ═══════════════════════════════════════════════════════════════
//  Backlight colours
// ═══════════════════════════════════════════════════════════════

/// Daytime backlight — green.
pub const COLOUR_DAY: (u8, u8, u8) = (0, 255, 0);
/// Night backlight — red alert tint.
pub const COLOUR_NIGHT: (u8, u8, u8) = (255, 0, 0);

// ═══════════════════════════════════════════════════════════════
//  Pure reaction helpers
// ═══════════════════════════════════════════════════════════════

/// Derive a catalog index from a raw potentiometer reading.
///
/// The scaling divides by catalog length and then by 100, stepping down by
/// one when the value lands past the catalog length — a wraparound artifact
/// of the selector hardware that deployed units depend on.  Kept exactly;
/// the result can still land *at* the catalog length (raw 900 with three
/// entries), which [`clamp_profile_index`] absorbs at the apply step.
pub fn profile_index_from_pot(raw: u16, catalog_len: usize) -> usize {
    let mut reading = f32::from(raw) / catalog_len as f32 / 100.0;
    if reading > catalog_len as f32 {
        reading -= 1.0;
    }
    reading.floor() as usize
}

/// Clamp a derived index into the catalog. Returns the index unchanged
/// when already in range.
pub fn clamp_profile_index(index: usize, catalog_len: usize) -> usize {
    index.min(catalog_len.saturating_sub(1))
}

/// Inclusive day window: `start..=end` is day, everything else night.
pub fn in_day_window(hour: u8, start: u8, end: u8) -> bool {
    hour >= start && hour <= end
}
