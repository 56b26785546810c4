//! Persisted realtime settings.

use chrono::{DateTime, Utc};
use contracts::{
    BaseTimeSource, ContractError, DisplaySettings, SyncEngineConfig, WarpRateTable,
    DEFAULT_WARP_RATES,
};
use serde::{Deserialize, Serialize};

use crate::iso8601::{format_iso8601, parse_iso8601};

/// Persisted marker for an absent base time
pub const UNSET_VALUE: &str = "UNSET";

/// Complete persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Real instant bound to simulation time zero
    #[serde(default = "missing_base_time")]
    pub base_time: BaseTimeSetting,

    /// Render dates in local time instead of UTC (display only)
    #[serde(default)]
    pub use_local_time: bool,

    /// Engine tuning
    #[serde(default)]
    pub engine: SyncEngineConfig,

    /// Warp multiplier ladder
    #[serde(default)]
    pub warp: WarpConfig,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            base_time: BaseTimeSetting::Unset,
            use_local_time: false,
            engine: SyncEngineConfig::default(),
            warp: WarpConfig::default(),
        }
    }
}

impl RealtimeConfig {
    /// The bound instant, if the setting holds a valid one
    pub fn binding(&self) -> Option<DateTime<Utc>> {
        match self.base_time {
            BaseTimeSetting::At(at) => Some(at),
            _ => None,
        }
    }
}

impl BaseTimeSource for RealtimeConfig {
    fn base_time(&self) -> Option<DateTime<Utc>> {
        self.binding()
    }
}

impl DisplaySettings for RealtimeConfig {
    fn use_local_time(&self) -> bool {
        self.use_local_time
    }
}

fn missing_base_time() -> BaseTimeSetting {
    tracing::warn!("base_time not found in config, treating as unset");
    BaseTimeSetting::Unset
}

/// Base time as stored
///
/// Malformed values are kept as `Invalid` so they can be reported, and never
/// bind the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BaseTimeSetting {
    Unset,
    At(DateTime<Utc>),
    Invalid(String),
}

impl From<String> for BaseTimeSetting {
    fn from(value: String) -> Self {
        if value == UNSET_VALUE {
            return Self::Unset;
        }
        match parse_iso8601(&value) {
            Ok(at) => Self::At(at),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse base_time");
                Self::Invalid(value)
            }
        }
    }
}

impl From<BaseTimeSetting> for String {
    fn from(setting: BaseTimeSetting) -> Self {
        match setting {
            BaseTimeSetting::At(at) => format_iso8601(&at),
            BaseTimeSetting::Unset | BaseTimeSetting::Invalid(_) => UNSET_VALUE.to_string(),
        }
    }
}

impl std::fmt::Display for BaseTimeSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseTimeSetting::Unset => write!(f, "not set"),
            BaseTimeSetting::At(at) => write!(f, "{}", format_iso8601(at)),
            BaseTimeSetting::Invalid(raw) => write!(f, "invalid ({raw})"),
        }
    }
}

/// Warp ladder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpConfig {
    /// Ascending multipliers, index 0 must be 1x
    #[serde(default = "default_rates")]
    pub rates: Vec<f64>,
}

fn default_rates() -> Vec<f64> {
    DEFAULT_WARP_RATES.to_vec()
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            rates: default_rates(),
        }
    }
}

impl WarpConfig {
    /// Validated rate table
    pub fn table(&self) -> Result<WarpRateTable, ContractError> {
        WarpRateTable::new(self.rates.clone())
    }
}
