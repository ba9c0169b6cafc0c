//! Simulated board — in-memory sensor gateway and display.
//!
//! Stands in for the physical board everywhere the real bus is absent:
//! the bench binary, unit tests, integration tests.  Readings are plain
//! public fields a test (or the bench harness) pokes between cycles; the
//! display side records the latest text and backlight colour.

use crate::app::ports::{PinMode, SensorGateway, TextDisplay};
use crate::error::{DisplayError, SensorError};
use crate::pins;

/// In-memory board with injectable readings.
pub struct SimBoard {
    /// Potentiometer reading returned for A0.
    pub pot_raw: u16,
    /// Sound level returned for A1.
    pub sound_raw: u16,
    /// Button level returned for D4.
    pub button_pressed: bool,
    /// DHT temperature (°C).
    pub temperature_c: f32,
    /// DHT relative humidity (%).
    pub humidity_pct: f32,
    /// When set, every analog read fails with this error.
    pub analog_fault: Option<SensorError>,
    /// Count of DHT reads served (distinguishes the two read paths).
    pub dht_reads: u32,

    text: String,
    colour: (u8, u8, u8),
    last_pin_mode: Option<(u8, PinMode)>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            pot_raw: 512,
            sound_raw: 0,
            button_pressed: false,
            temperature_c: 21.0,
            humidity_pct: 45.0,
            analog_fault: None,
            dht_reads: 0,
            text: String::new(),
            colour: (0, 0, 0),
            last_pin_mode: None,
        }
    }

    /// Latest display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Latest backlight colour.
    pub fn colour(&self) -> (u8, u8, u8) {
        self.colour
    }

    /// Most recent pin-mode change, if any.
    pub fn last_pin_mode(&self) -> Option<(u8, PinMode)> {
        self.last_pin_mode
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorGateway for SimBoard {
    fn read_analog(&mut self, pin: u8) -> Result<u16, SensorError> {
        if let Some(fault) = self.analog_fault {
            return Err(fault);
        }
        match pin {
            pins::POTENTIOMETER_PIN => Ok(self.pot_raw.min(pins::ANALOG_MAX)),
            pins::SOUND_PIN => Ok(self.sound_raw.min(pins::ANALOG_MAX)),
            _ => Err(SensorError::AnalogReadFailed),
        }
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, SensorError> {
        match pin {
            pins::BUTTON_PIN => Ok(self.button_pressed),
            _ => Err(SensorError::DigitalReadFailed),
        }
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), SensorError> {
        self.last_pin_mode = Some((pin, mode));
        Ok(())
    }

    fn read_temperature_humidity(&mut self, pin: u8) -> Result<(f32, f32), SensorError> {
        if pin != pins::DHT_PIN {
            return Err(SensorError::DhtReadFailed);
        }
        self.dht_reads += 1;
        Ok((self.temperature_c, self.humidity_pct))
    }
}

impl TextDisplay for SimBoard {
    fn set_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.text.clear();
        self.text.push_str(text);
        Ok(())
    }

    fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), DisplayError> {
        self.colour = (r, g, b);
        Ok(())
    }
}
