//! Two-mode controller and synchronous dispatch engine.
//!
//! Classic embedded pattern: a closed set of modes, each described by a
//! static subscription table, driven by a single logical thread.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ModeMachine                                               │
//! │  ┌──────────┬──────────────────────────────────────────┐   │
//! │  │ ModeId    │ subscription table                       │   │
//! │  ├──────────┼──────────────────────────────────────────┤   │
//! │  │ Config    │ second → pot, button; select → apply …   │   │
//! │  │ Monitor   │ hour → record, classify; second → … …    │   │
//! │  └──────────┴──────────────────────────────────────────┘   │
//! │        bus: EventBus      state: SharedState               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each cycle the machine samples the clock (via the caller), asks the
//! ticker which fields moved, and publishes one event per moved field.
//! Publishing snapshots the topic's handler list and invokes each handler
//! synchronously in registration order; a handler that publishes recurses
//! depth-first before the outer publish returns.  A `StateChange` dispatch
//! tears the active set down and installs the target mode's table — the
//! `StateChange` bucket itself survives the teardown, so the controller
//! keeps listening for the next switch.

pub mod context;
pub mod modes;

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, PinMode, SensorGateway, TextDisplay};
use crate::bus::{EventBus, Handler, Topic};
use crate::config::{PROFILE_CATALOG, SystemConfig};
use crate::error::{Error, Result};
use crate::pins;
use crate::ticker::{self, WallTime};
use context::SharedState;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// The two mutually exclusive operating modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModeId {
    /// Operator browses the profile catalog with the potentiometer.
    Configuration = 0,
    /// Continuous environmental monitoring.
    Monitoring = 1,
}

impl ModeId {
    /// The `StateChange` payload this mode's button press publishes.
    pub fn switch_code(self) -> u8 {
        match self {
            Self::Configuration => modes::PROMOTE_TO_MONITORING,
            Self::Monitoring => modes::DEMOTE_TO_CONFIGURATION,
        }
    }

    /// Decode a `StateChange` payload into the mode it installs.
    pub fn from_switch_code(code: u8) -> Option<Self> {
        match code {
            modes::PROMOTE_TO_MONITORING => Some(Self::Monitoring),
            modes::DEMOTE_TO_CONFIGURATION => Some(Self::Configuration),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode machine
// ---------------------------------------------------------------------------

/// The mode controller.
///
/// Owns the bus, the shared runtime state and the active mode identity.
/// Hardware is not owned — every entry point borrows the gateway/display
/// for the duration of one dispatch cascade, keeping the core testable
/// against in-memory boards.
pub struct ModeMachine {
    bus: EventBus,
    state: SharedState,
    config: SystemConfig,
    active: ModeId,
}

impl ModeMachine {
    /// Construct the machine with Configuration mode installed.
    ///
    /// The `ModeSwitch` listener registered here is the only subscription
    /// that survives mode teardowns for the life of the process.
    pub fn new(config: SystemConfig) -> Self {
        let mut bus = EventBus::new();
        bus.subscribe(Topic::StateChange, Handler::ModeSwitch);
        bus.install(modes::subscriptions(ModeId::Configuration));
        Self {
            bus,
            state: SharedState::new(),
            config,
            active: ModeId::Configuration,
        }
    }

    /// The currently active mode.
    pub fn active_mode(&self) -> ModeId {
        self.active
    }

    /// Read-only view of the shared runtime state.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Read-only view of the subscription registry (test observability).
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle's event cascade for the given clock sample:
    /// publish a change event per clock field that moved, in
    /// hour → minute → second order.
    ///
    /// A hardware error aborts the rest of the cascade; the caller logs
    /// it and retries on the next cycle.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorGateway + TextDisplay),
        sink: &mut impl EventSink,
        now: WallTime,
    ) -> Result<()> {
        for (topic, value) in ticker::tick(now, &self.state) {
            self.publish(hw, sink, topic, Some(value))?;
        }
        Ok(())
    }

    /// Publish an event: invoke every subscriber of `topic` once,
    /// synchronously, in registration order.
    ///
    /// No subscribers is a no-op, not an error.  The handler list is
    /// snapshotted first, so re-entrant publishes and mid-cascade mode
    /// switches cannot disturb the iteration in progress.
    pub fn publish(
        &mut self,
        hw: &mut (impl SensorGateway + TextDisplay),
        sink: &mut impl EventSink,
        topic: Topic,
        payload: Option<u8>,
    ) -> Result<()> {
        for handler in self.bus.snapshot(topic) {
            self.invoke(hw, sink, handler, payload)?;
        }
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────

    /// Tear down the active subscription set and install `target`'s table.
    ///
    /// Always a full rebuild, even when `target` is already active — a
    /// re-installation is observable via the emitted `ModeChanged`.
    fn install_mode(&mut self, target: ModeId, sink: &mut impl EventSink) {
        let from = self.active;
        self.bus.install(modes::subscriptions(target));
        self.active = target;
        info!("mode installed: {:?} -> {:?}", from, target);
        sink.emit(&AppEvent::ModeChanged { from, to: target });
    }

    /// Run one handler.  Handlers may publish, which recurses back into
    /// [`Self::publish`] before this call returns.
    fn invoke(
        &mut self,
        hw: &mut (impl SensorGateway + TextDisplay),
        sink: &mut impl EventSink,
        handler: Handler,
        payload: Option<u8>,
    ) -> Result<()> {
        match handler {
            // ── Configuration mode ────────────────────────────
            Handler::EvaluatePotentiometer => {
                let raw = hw.read_analog(pins::POTENTIOMETER_PIN)?;
                let index = modes::profile_index_from_pot(raw, PROFILE_CATALOG.len());
                debug!("pot raw {} -> catalog index {}", raw, index);
                self.publish(hw, sink, Topic::ProfileSelect, Some(index as u8))?;
            }

            Handler::ApplyProfile => {
                let Some(index) = payload else {
                    return skip_missing_payload(handler);
                };
                let mut idx = index as usize;
                if idx >= PROFILE_CATALOG.len() {
                    warn!("profile index {} out of range, clamping", idx);
                    idx = modes::clamp_profile_index(idx, PROFILE_CATALOG.len());
                }
                let name = PROFILE_CATALOG[idx];
                self.state.active_profile = Some(name);
                hw.set_text(name)?;
                sink.emit(&AppEvent::ProfileApplied { index: idx, name });
            }

            // ── Monitoring mode ───────────────────────────────
            Handler::RecordHour => {
                let Some(hour) = payload else {
                    return skip_missing_payload(handler);
                };
                self.state.current_hour = Some(hour);
            }

            Handler::ClassifyDayNight => {
                let Some(hour) = payload else {
                    return skip_missing_payload(handler);
                };
                let day = modes::in_day_window(
                    hour,
                    self.config.day_start_hour,
                    self.config.day_end_hour,
                );
                self.state.is_day = Some(day);
                let (r, g, b) = if day {
                    modes::COLOUR_DAY
                } else {
                    modes::COLOUR_NIGHT
                };
                hw.set_colour(r, g, b)?;
                debug!(
                    "hour {}: classified {}",
                    hour,
                    if day { "daytime" } else { "night" }
                );
            }

            Handler::RecordMinute => {
                let Some(minute) = payload else {
                    return skip_missing_payload(handler);
                };
                self.state.current_minute = Some(minute);
            }

            Handler::SampleTempHumidity => {
                let Some(minute) = payload else {
                    return skip_missing_payload(handler);
                };
                if minute % self.config.dht_sample_gate_minutes != 0 {
                    return Ok(());
                }
                // Reading retained for the alerting hook; nothing consumes
                // it yet beyond the gateway access itself.
                let (temperature, humidity) = hw.read_temperature_humidity(pins::DHT_PIN)?;
                debug!(
                    "quarter-hour sample: {:.1} C, {:.1} %RH",
                    temperature, humidity
                );
            }

            Handler::RecordSecond => {
                let Some(second) = payload else {
                    return skip_missing_payload(handler);
                };
                self.state.current_second = Some(second);
            }

            Handler::SampleSound => {
                let level = hw.read_analog(pins::SOUND_PIN)?;
                if level < self.config.sound_threshold {
                    return Ok(());
                }
                let daytime = self.state.is_daytime();
                info!(
                    "sound level {} at/above threshold during {}",
                    level,
                    if daytime { "daytime" } else { "night" }
                );
                sink.emit(&AppEvent::NoiseDetected { level, daytime });
            }

            Handler::RefreshDisplay => {
                let (temperature, humidity) = hw.read_temperature_humidity(pins::DHT_PIN)?;
                let line = format!("Hum {:.1} temp {:.1}", humidity, temperature);
                hw.set_text(&line)?;
            }

            // ── Shared ────────────────────────────────────────
            Handler::PollButton => {
                hw.set_pin_mode(pins::BUTTON_PIN, PinMode::Input)?;
                if hw.read_digital(pins::BUTTON_PIN)? {
                    debug!("button asserted");
                    self.publish(hw, sink, Topic::ButtonClicked, None)?;
                }
            }

            Handler::RequestModeSwitch => {
                let code = self.active.switch_code();
                self.publish(hw, sink, Topic::StateChange, Some(code))?;
            }

            // ── Controller ────────────────────────────────────
            Handler::ModeSwitch => {
                let Some(code) = payload else {
                    return skip_missing_payload(handler);
                };
                match ModeId::from_switch_code(code) {
                    Some(target) => self.install_mode(target, sink),
                    None => return Err(Error::InvalidTransition(code)),
                }
            }
        }
        Ok(())
    }
}

/// A payload-carrying topic arrived without its payload.  Unreachable from
/// the shipped producers; skip the reaction rather than crash the cycle.
fn skip_missing_payload(handler: Handler) -> Result<()> {
    warn!("{:?}: missing payload, reaction skipped", handler);
    Ok(())
}
