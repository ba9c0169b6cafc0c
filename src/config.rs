//! System configuration parameters
//!
//! All tunable parameters for the RoomSense controller, plus the compiled-in
//! monitoring-profile catalog the Configuration mode browses.

use serde::{Deserialize, Serialize};

/// Ordered catalog of selectable monitoring profiles.
///
/// Index-addressable; selection is derived from the potentiometer reading
/// each cycle and never persisted.
pub const PROFILE_CATALOG: [&str; 3] = ["baseline", "sensitive", "night"];

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sound ---
    /// Analog sound level (0-1023) at or above which the alert path runs
    pub sound_threshold: u16,

    // --- Day/night window ---
    /// First hour of the day classified as daytime (inclusive)
    pub day_start_hour: u8,
    /// Last hour of the day classified as daytime (inclusive)
    pub day_end_hour: u8,

    // --- Sampling ---
    /// Minute-of-hour multiple that gates the periodic DHT sample
    pub dht_sample_gate_minutes: u8,

    // --- Timing ---
    /// Control cycle interval (milliseconds)
    pub cycle_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sound
            sound_threshold: 500,

            // Day runs 08:00–16:59; everything else is night
            day_start_hour: 8,
            day_end_hour: 16,

            // Sampling
            dht_sample_gate_minutes: 15,

            // Timing
            cycle_interval_ms: 1000, // 1 Hz
        }
    }
}
