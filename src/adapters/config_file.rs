//! JSON-file configuration store.
//!
//! Persists [`SystemConfig`] as a JSON document next to the binary (or
//! wherever the boot script points it).  Load follows the firmware's
//! first-boot rule: a missing file is `NotFound`, which the caller turns
//! into defaults; a present-but-unparseable file is `Corrupted` rather
//! than silently replaced.

use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigStore};
use crate::config::SystemConfig;

/// Config store backed by a JSON file.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if cfg.sound_threshold > 1023 {
        return Err(ConfigError::ValidationFailed(
            "sound_threshold must be 0–1023",
        ));
    }
    if cfg.day_start_hour > 23 || cfg.day_end_hour > 23 {
        return Err(ConfigError::ValidationFailed(
            "day window hours must be 0–23",
        ));
    }
    if cfg.day_start_hour >= cfg.day_end_hour {
        return Err(ConfigError::ValidationFailed(
            "day_start_hour must be < day_end_hour",
        ));
    }
    if !(1..60).contains(&cfg.dht_sample_gate_minutes) {
        return Err(ConfigError::ValidationFailed(
            "dht_sample_gate_minutes must be 1–59",
        ));
    }
    if !(100..=60_000).contains(&cfg.cycle_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "cycle_interval_ms must be 100–60000",
        ));
    }
    Ok(())
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|_| ConfigError::IoError)?;
        let cfg: SystemConfig =
            serde_json::from_str(&raw).map_err(|_| ConfigError::Corrupted)?;
        validate_config(&cfg)?;
        info!("config loaded from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let raw = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        std::fs::write(&self.path, raw).map_err(|_| ConfigError::IoError)?;
        info!("config saved to {}", self.path.display());
        Ok(())
    }
}
