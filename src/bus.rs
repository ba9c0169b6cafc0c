//! Topic-based subscription registry.
//!
//! The bus is the coordination primitive between the ticker and whichever
//! operating mode is active.  Handlers are not closures: each one is a
//! [`Handler`] tag naming a reaction the mode controller knows how to run,
//! so the registry stays `Copy`-cheap and free of object capture.
//!
//! ```text
//! ┌──────────┐ publish  ┌───────────────────┐ snapshot ┌──────────────┐
//! │ Ticker   │─────────▶│    EventBus        │─────────▶│ ModeMachine  │
//! │ Handlers │          │ topic → [Handler]  │          │ (dispatch)   │
//! └──────────┘          └───────────────────┘          └──────────────┘
//! ```
//!
//! Dispatch itself lives in [`crate::fsm::ModeMachine`], which owns the
//! bus and the hardware borrows; publishing snapshots the topic's handler
//! list first, so a handler that re-enters publish — or swaps the whole
//! subscription set during a mode switch — never invalidates an iteration
//! already in progress.

use heapless::Vec;
use log::warn;

/// Maximum subscribers per topic.
/// Monitoring registers four handlers on `SecondChange`; eight leaves room.
pub const TOPIC_CAPACITY: usize = 8;

/// The closed set of event topics flowing through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Topic {
    /// Wall-clock hour rolled over; payload = new hour (0–23).
    HourChange = 0,
    /// Wall-clock minute rolled over; payload = new minute (0–59).
    MinuteChange = 1,
    /// Wall-clock second rolled over; payload = new second (0–59).
    SecondChange = 2,
    /// A catalog index was derived from the potentiometer; payload = index.
    ProfileSelect = 3,
    /// The push-button read asserted; no payload.
    ButtonClicked = 4,
    /// A mode switch was requested; payload = 0 (to Monitoring) or
    /// 1 (to Configuration).  The one topic [`EventBus::reset`] preserves.
    StateChange = 5,
}

impl Topic {
    /// Total number of topics — sizes the registry array.
    pub const COUNT: usize = 6;
}

/// Named reactions the mode controller can run.
///
/// Subscription tables map topics to these tags; the same tag may be
/// registered more than once and fires once per registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    // ── Configuration mode ────────────────────────────────
    /// Read the potentiometer and publish the derived catalog index.
    EvaluatePotentiometer,
    /// Apply a catalog index: record the profile and show it on the LCD.
    ApplyProfile,

    // ── Monitoring mode ───────────────────────────────────
    /// Record the hour payload into shared state.
    RecordHour,
    /// Classify day/night from the hour and drive the backlight colour.
    ClassifyDayNight,
    /// Record the minute payload into shared state.
    RecordMinute,
    /// Gated DHT sample on quarter-hour minutes.
    SampleTempHumidity,
    /// Record the second payload into shared state.
    RecordSecond,
    /// Read the sound sensor and run the alert path above threshold.
    SampleSound,
    /// Re-read the DHT and rewrite the LCD status line.
    RefreshDisplay,

    // ── Shared by both modes ──────────────────────────────
    /// Poll the push-button and publish `ButtonClicked` when asserted.
    PollButton,
    /// Publish `StateChange` with the code that leaves the active mode.
    RequestModeSwitch,

    // ── Controller ────────────────────────────────────────
    /// Decode a `StateChange` payload and install the target mode.
    /// Registered once at startup; the sole survivor of [`EventBus::reset`].
    ModeSwitch,
}

/// A snapshot of one topic's subscribers, in registration order.
pub type HandlerList = Vec<Handler, TOPIC_CAPACITY>;

/// Per-topic ordered subscription registry.
///
/// Purely in-memory; injected into the mode controller rather than living
/// in a process-wide static, which keeps the mode-switch reset auditable.
pub struct EventBus {
    lists: [HandlerList; Topic::COUNT],
}

impl EventBus {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            lists: core::array::from_fn(|_| HandlerList::new()),
        }
    }

    /// Append `handler` to `topic`'s list.
    ///
    /// No uniqueness constraint: a handler registered twice fires twice.
    /// Returns `false` if the topic's bucket is full (subscription dropped).
    pub fn subscribe(&mut self, topic: Topic, handler: Handler) -> bool {
        let ok = self.lists[topic as usize].push(handler).is_ok();
        if !ok {
            warn!("bus: {topic:?} bucket full, dropped {handler:?}");
        }
        ok
    }

    /// Clone `topic`'s handler list for dispatch.
    ///
    /// An empty list means publishing on this topic is a no-op, not an error.
    pub fn snapshot(&self, topic: Topic) -> HandlerList {
        self.lists[topic as usize].clone()
    }

    /// Number of subscribers currently registered on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.lists[topic as usize].len()
    }

    /// Clear every subscription except the `StateChange` bucket.
    ///
    /// This is how control returns to the single top-level mode-switch
    /// listener between mode installations: stale handlers from the
    /// outgoing mode cannot fire after a switch.
    pub fn reset(&mut self) {
        for (idx, list) in self.lists.iter_mut().enumerate() {
            if idx != Topic::StateChange as usize {
                list.clear();
            }
        }
    }

    /// Atomically replace the active set: reset, then subscribe `table`
    /// in order.  The `StateChange` bucket is carried across unchanged.
    pub fn install(&mut self, table: &[(Topic, Handler)]) {
        self.reset();
        for &(topic, handler) in table {
            let _ = self.subscribe(topic, handler);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
