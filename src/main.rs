//! RoomSense — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  SimBoard           LocalClock          LogEventSink     │
//! │  (Sensor+Display)   (ClockSource)       (EventSink)      │
//! │  FileConfigStore                                         │
//! │  (ConfigStore)                                           │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           ControlLoop (pure logic)                 │  │
//! │  │  ModeMachine · EventBus · Ticker                   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The shipped binary drives the simulated board; the physical gateway is
//! an external collaborator wired in by the deployment image.

use anyhow::Result;
use log::{info, warn};

use roomsense::adapters::clock::LocalClock;
use roomsense::adapters::config_file::FileConfigStore;
use roomsense::adapters::log_sink::LogEventSink;
use roomsense::adapters::sim::SimBoard;
use roomsense::app::ports::{ConfigError, ConfigStore};
use roomsense::app::service::ControlLoop;
use roomsense::config::SystemConfig;

/// Config file path, overridable for multi-unit bench setups.
const CONFIG_PATH_ENV: &str = "ROOMSENSE_CONFIG";
const CONFIG_PATH_DEFAULT: &str = "roomsense.json";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("RoomSense v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from disk (or defaults) ────────────────
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_PATH_DEFAULT.to_string());
    let store = FileConfigStore::new(&config_path);
    let config = match store.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            info!("no config at {}, using defaults", config_path);
            SystemConfig::default()
        }
        Err(e) => {
            warn!("config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 3. Construct adapters ─────────────────────────────────
    let mut board = SimBoard::new();
    let clock = LocalClock;
    let mut sink = LogEventSink::new();

    // ── 4. Control loop ───────────────────────────────────────
    let mut control = ControlLoop::new(config);
    control.start(&mut sink);

    info!("System ready. Entering control loop.");
    control.run(&mut board, &clock, &mut sink)
}
