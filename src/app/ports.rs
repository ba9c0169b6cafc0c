//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModeMachine / ControlLoop (domain)
//! ```
//!
//! Driven adapters (the sensor gateway, the LCD, the wall clock, event
//! sinks, config storage) implement these traits.  The domain consumes
//! them via generics, so the core never touches a sensor bus directly and
//! the whole controller runs against in-memory boards in tests.

use crate::config::SystemConfig;
use crate::error::{DisplayError, SensorError};
use crate::ticker::WallTime;

// ───────────────────────────────────────────────────────────────
// Sensor gateway (driven adapter: board → domain)
// ───────────────────────────────────────────────────────────────

/// Direction a digital pin is driven in before access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Read/write access to the numbered sensor ports on the board.
///
/// Pins are the fixed assignments in [`crate::pins`]; implementations may
/// reject pins they don't know about.
pub trait SensorGateway {
    /// Read an analog port. Full scale is 0–1023.
    fn read_analog(&mut self, pin: u8) -> Result<u16, SensorError>;

    /// Read a digital port level.
    fn read_digital(&mut self, pin: u8) -> Result<bool, SensorError>;

    /// Set a digital port's direction before reading or writing it.
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), SensorError>;

    /// Read the DHT module: `(temperature °C, relative humidity %)`.
    fn read_temperature_humidity(&mut self, pin: u8) -> Result<(f32, f32), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Display (driven adapter: domain → RGB text LCD)
// ───────────────────────────────────────────────────────────────

/// The RGB-backlit character display.
pub trait TextDisplay {
    /// Replace the display text.
    fn set_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Set the backlight colour.
    fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Clock source (driven adapter: host RTC → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock supplier sampled once per control cycle.
pub trait ClockSource {
    fn now(&self) -> WallTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go — serial log today,
/// anything else tomorrow.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting: invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigStore {
    /// Load configuration from storage.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigStore`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
