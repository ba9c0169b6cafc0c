//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the process logger (serial console on the deployed board).  A future
//! networked telemetry adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::ProfileApplied { index, name } => {
                info!("PROF  | [{}] {}", index, name);
            }
            AppEvent::NoiseDetected { level, daytime } => {
                warn!(
                    "NOISE | level={} during {}",
                    level,
                    if *daytime { "daytime" } else { "night" }
                );
            }
        }
    }
}
