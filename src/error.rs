//! Unified error types for the RoomSense firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the control loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed up through the
//! dispatch cascade without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned out-of-range data.
    Sensor(SensorError),
    /// A display write failed.
    Display(DisplayError),
    /// A mode-switch event carried a payload that maps to no mode.
    InvalidTransition(u8),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::InvalidTransition(code) => write!(f, "invalid mode-switch code: {code}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Analog read returned an error or timed out on the sensor bus.
    AnalogReadFailed,
    /// Digital read returned an error.
    DigitalReadFailed,
    /// Pin-mode change was rejected by the gateway.
    PinModeFailed,
    /// DHT read failed its checksum or timed out.
    DhtReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnalogReadFailed => write!(f, "analog read failed"),
            Self::DigitalReadFailed => write!(f, "digital read failed"),
            Self::PinModeFailed => write!(f, "pin mode change failed"),
            Self::DhtReadFailed => write!(f, "DHT read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Text write to the LCD failed (bus timeout or NACK).
    TextWriteFailed,
    /// Backlight colour write failed.
    ColorWriteFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextWriteFailed => write!(f, "text write failed"),
            Self::ColorWriteFailed => write!(f, "colour write failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
