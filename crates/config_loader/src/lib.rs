//! # Config Loader
//!
//! Configuration loading and persistence.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate engine tuning and the warp table
//! - Persist base-time edits (set / now / unset)
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("realtime.toml")).unwrap();
//! println!("Base time: {}", config.base_time);
//! ```

mod iso8601;
mod parser;
mod settings;
mod store;
mod validator;

pub use iso8601::{format_iso8601, parse_iso8601};
pub use parser::ConfigFormat;
pub use settings::{BaseTimeSetting, RealtimeConfig, WarpConfig, UNSET_VALUE};
pub use store::ConfigStore;

use contracts::ContractError;
use std::path::Path;
use tracing::instrument;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    #[instrument(name = "config_load", skip_all, fields(path = %path.display()))]
    pub fn load_from_path(path: &Path) -> Result<RealtimeConfig, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<RealtimeConfig, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Non-fatal issues worth showing the user
    pub fn collect_warnings(config: &RealtimeConfig) -> Vec<String> {
        validator::collect_warnings(config)
    }

    /// Serialize RealtimeConfig to TOML string
    pub fn to_toml(config: &RealtimeConfig) -> Result<String, ContractError> {
        ConfigFormat::Toml.encode(config)
    }

    /// Serialize RealtimeConfig to JSON string
    pub fn to_json(config: &RealtimeConfig) -> Result<String, ContractError> {
        ConfigFormat::Json.encode(config)
    }

    /// Write configuration to `path`, format chosen by extension
    pub fn save_to_path(config: &RealtimeConfig, path: &Path) -> Result<(), ContractError> {
        let content = ConfigFormat::from_path(path)?.encode(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ConfigLoader {
    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<RealtimeConfig, ContractError> {
        let config = format.decode(content)?;
        validator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
base_time = "2024-05-01T12:00:00Z"

[engine]
min_catch_up_s = 1.0
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.binding(),
            Some(parse_iso8601("2024-05-01T12:00:00Z").unwrap())
        );
        assert_eq!(config.engine.tolerance_s, 10.0);
    }

    #[test]
    fn test_round_trip_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_round_trip_json() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[warp]
rates = [2.0, 4.0]
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("index 0 must be 1x"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigLoader::load_from_path(Path::new("realtime.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }
}
