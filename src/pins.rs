//! Port/pin assignments for the RoomSense main board.
//!
//! Single source of truth — every handler references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! The board exposes GrovePi-style numbered ports: analog reads address the
//! `A*` header, digital reads and pin-mode writes address the `D*` header.

// ---------------------------------------------------------------------------
// Sensors — Analog
// ---------------------------------------------------------------------------

/// Rotary potentiometer — profile selector knob. Analog port A0, 0–1023.
pub const POTENTIOMETER_PIN: u8 = 0;

/// Sound sensor (electret + amplifier). Analog port A1, 0–1023.
pub const SOUND_PIN: u8 = 1;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT temperature/humidity sensor on digital port D3.
/// The gateway selects the blue (DHT11) module variant internally.
pub const DHT_PIN: u8 = 3;

/// Momentary push-button on digital port D4. Reads HIGH while held.
pub const BUTTON_PIN: u8 = 4;

// ---------------------------------------------------------------------------
// Analog range
// ---------------------------------------------------------------------------

/// Full-scale analog reading from the board ADC.
pub const ANALOG_MAX: u16 = 1023;
