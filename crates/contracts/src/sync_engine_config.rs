//! Sync engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

/// Sync engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEngineConfig {
    /// Offset magnitude (seconds) still considered synchronized
    #[serde(default = "default_tolerance_s")]
    pub tolerance_s: f64,

    /// Host seconds to wait after activation before requiring a base time
    #[serde(default = "default_grace_period_s")]
    pub grace_period_s: f64,

    /// Minimum projected seconds a chosen warp rate must take to close the gap
    ///
    /// Lower values pick faster rates and catch up more aggressively.
    #[serde(default = "default_min_catch_up_s")]
    pub min_catch_up_s: f64,
}

fn default_tolerance_s() -> f64 {
    10.0
}

fn default_grace_period_s() -> f64 {
    3.0
}

fn default_min_catch_up_s() -> f64 {
    0.2
}

impl Default for SyncEngineConfig {
    fn default() -> Self {
        Self {
            tolerance_s: default_tolerance_s(),
            grace_period_s: default_grace_period_s(),
            min_catch_up_s: default_min_catch_up_s(),
        }
    }
}
