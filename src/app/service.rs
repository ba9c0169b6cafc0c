//! Control loop — the cycle driver.
//!
//! One cycle = clock sample → ticker change set → handler cascade → fixed
//! delay.  The delay is injectable so tests run a bounded number of cycles
//! with a zero interval and stay deterministic; the shipped binary runs
//! [`ControlLoop::run`] forever at the configured 1 Hz.
//!
//! ```text
//!  ClockSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │      ControlLoop        │
//! SensorGateway ◀──│   ModeMachine · Ticker  │──▶ TextDisplay
//!                  └────────────────────────┘
//! ```

use std::time::Duration;

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::{ClockSource, EventSink, SensorGateway, TextDisplay};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::fsm::{ModeId, ModeMachine};

/// Drives the mode machine one cycle at a time.
pub struct ControlLoop {
    machine: ModeMachine,
    cycle_interval: Duration,
    cycle_count: u64,
}

impl ControlLoop {
    /// Construct the loop with the interval from `config`.
    pub fn new(config: SystemConfig) -> Self {
        let cycle_interval = Duration::from_millis(u64::from(config.cycle_interval_ms));
        Self::with_interval(config, cycle_interval)
    }

    /// Construct with an explicit inter-cycle delay (tests pass zero).
    pub fn with_interval(config: SystemConfig, cycle_interval: Duration) -> Self {
        Self {
            machine: ModeMachine::new(config),
            cycle_interval,
            cycle_count: 0,
        }
    }

    /// Announce startup on the sink.  Call once before the first cycle.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let mode = self.machine.active_mode();
        sink.emit(&AppEvent::Started(mode));
        info!("control loop started in {:?}", mode);
    }

    /// Execute exactly one cycle.  A hardware error aborts the cycle's
    /// remaining cascade and surfaces here.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorGateway + TextDisplay),
        clock: &impl ClockSource,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.cycle_count += 1;
        let now = clock.now();
        self.machine.run_cycle(hw, sink, now)
    }

    /// Run a bounded number of cycles, absorbing per-cycle failures the
    /// same way the unbounded loop does.
    pub fn run_for(
        &mut self,
        cycles: u64,
        hw: &mut (impl SensorGateway + TextDisplay),
        clock: &impl ClockSource,
        sink: &mut impl EventSink,
    ) {
        for _ in 0..cycles {
            if let Err(e) = self.run_cycle(hw, clock, sink) {
                error!("cycle {} aborted: {}", self.cycle_count, e);
            }
            if !self.cycle_interval.is_zero() {
                std::thread::sleep(self.cycle_interval);
            }
        }
    }

    /// Run forever.  A failed cycle is logged and the loop proceeds to
    /// the next iteration; only process termination exits.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorGateway + TextDisplay),
        clock: &impl ClockSource,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            if let Err(e) = self.run_cycle(hw, clock, sink) {
                error!("cycle {} aborted: {}", self.cycle_count, e);
            }
            std::thread::sleep(self.cycle_interval);
        }
    }

    /// The mode machine (state and bus observability).
    pub fn machine(&self) -> &ModeMachine {
        &self.machine
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Currently active mode, straight from the machine.
    pub fn mode(&self) -> ModeId {
        self.machine.active_mode()
    }
}
