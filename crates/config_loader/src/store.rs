//! ConfigStore - owns the persisted settings and edits the base time.
//!
//! Edits report whether the binding changed; the caller must then reset the
//! sync engine.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use contracts::ContractError;
use tracing::{info, instrument};

use crate::iso8601::parse_iso8601;
use crate::{BaseTimeSetting, ConfigLoader, RealtimeConfig};

/// Configuration file plus its in-memory settings
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: RealtimeConfig,
}

impl ConfigStore {
    /// Load an existing configuration file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ContractError> {
        let path = path.into();
        let config = ConfigLoader::load_from_path(&path)?;
        Ok(Self { path, config })
    }

    /// Load the file, or start from defaults when it does not exist yet
    pub fn open_or_default(path: impl Into<PathBuf>) -> Result<Self, ContractError> {
        let path = path.into();
        if path.exists() {
            return Self::open(path);
        }
        info!(path = %path.display(), "Config file not found, starting from defaults");
        Ok(Self {
            path,
            config: RealtimeConfig::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RealtimeConfig {
        &mut self.config
    }

    /// Bind simulation time zero to `at`
    ///
    /// Returns true when the binding changed.
    pub fn set_base_time(&mut self, at: DateTime<Utc>) -> bool {
        self.replace(BaseTimeSetting::At(at))
    }

    /// Parse and bind an ISO-8601 value typed by the user
    ///
    /// Malformed input is rejected here and leaves the setting untouched.
    pub fn set_base_time_str(&mut self, value: &str) -> Result<bool, ContractError> {
        let at = parse_iso8601(value)?;
        Ok(self.set_base_time(at))
    }

    /// Bind simulation time zero to the current instant
    pub fn set_base_time_now(&mut self, now: DateTime<Utc>) -> bool {
        self.set_base_time(now)
    }

    /// Clear the binding
    pub fn unset_base_time(&mut self) -> bool {
        self.replace(BaseTimeSetting::Unset)
    }

    /// Write the settings back to `path`, in the format its extension names
    #[instrument(name = "config_store_save", skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), ContractError> {
        ConfigLoader::save_to_path(&self.config, &self.path)
    }

    fn replace(&mut self, setting: BaseTimeSetting) -> bool {
        let before = self.config.binding();
        self.config.base_time = setting;
        let after = self.config.binding();
        info!(base_time = %self.config.base_time, "Base time updated");
        before != after
    }
}
