//! Mock board for integration tests.
//!
//! Records every gateway and display call so tests can assert on the full
//! access history without touching a real sensor bus.

use roomsense::app::events::AppEvent;
use roomsense::app::ports::{EventSink, PinMode, SensorGateway, TextDisplay};
use roomsense::error::{DisplayError, SensorError};
use roomsense::pins;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCall {
    SetPinMode { pin: u8, mode: PinMode },
    ReadAnalog { pin: u8 },
    ReadDigital { pin: u8 },
    ReadDht { pin: u8 },
    SetText { text: String },
    SetColour { r: u8, g: u8, b: u8 },
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub pot_raw: u16,
    pub sound_raw: u16,
    pub button_pressed: bool,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub analog_fault: Option<SensorError>,
    pub calls: Vec<BoardCall>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            pot_raw: 0,
            sound_raw: 0,
            button_pressed: false,
            temperature_c: 21.0,
            humidity_pct: 45.0,
            analog_fault: None,
            calls: Vec::new(),
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            BoardCall::SetText { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_colour(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            BoardCall::SetColour { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn dht_read_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BoardCall::ReadDht { .. }))
            .count()
    }

    pub fn pin_mode_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BoardCall::SetPinMode { .. }))
            .count()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorGateway for MockBoard {
    fn read_analog(&mut self, pin: u8) -> Result<u16, SensorError> {
        self.calls.push(BoardCall::ReadAnalog { pin });
        if let Some(fault) = self.analog_fault {
            return Err(fault);
        }
        match pin {
            pins::POTENTIOMETER_PIN => Ok(self.pot_raw),
            pins::SOUND_PIN => Ok(self.sound_raw),
            _ => Err(SensorError::AnalogReadFailed),
        }
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, SensorError> {
        self.calls.push(BoardCall::ReadDigital { pin });
        match pin {
            pins::BUTTON_PIN => Ok(self.button_pressed),
            _ => Err(SensorError::DigitalReadFailed),
        }
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), SensorError> {
        self.calls.push(BoardCall::SetPinMode { pin, mode });
        Ok(())
    }

    fn read_temperature_humidity(&mut self, pin: u8) -> Result<(f32, f32), SensorError> {
        self.calls.push(BoardCall::ReadDht { pin });
        if pin != pins::DHT_PIN {
            return Err(SensorError::DhtReadFailed);
        }
        Ok((self.temperature_c, self.humidity_pct))
    }
}

impl TextDisplay for MockBoard {
    fn set_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.calls.push(BoardCall::SetText {
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), DisplayError> {
        self.calls.push(BoardCall::SetColour { r, g, b });
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn mode_changes(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ModeChanged { .. }))
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
