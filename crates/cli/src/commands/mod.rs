//! Command implementations.

mod base_time;
mod info;
mod run;
mod validate;

pub use base_time::{run_now, run_set, run_unset};
pub use info::run_info;
pub use run::run_sync;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, RealtimeConfig};

use crate::error::CliError;

/// Load and validate a configuration file that must already exist
fn load_config(path: &Path) -> Result<RealtimeConfig> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }
    ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
