//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, RealtimeConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    base_time: String,
    use_local_time: bool,
    tolerance_s: f64,
    grace_period_s: f64,
    min_catch_up_s: f64,
    warp_rate_count: usize,
    max_multiplier: f64,
}

impl From<&RealtimeConfig> for ConfigSummary {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            base_time: config.base_time.to_string(),
            use_local_time: config.use_local_time,
            tolerance_s: config.engine.tolerance_s,
            grace_period_s: config.engine.grace_period_s,
            min_catch_up_s: config.engine.min_catch_up_s,
            warp_rate_count: config.warp.rates.len(),
            max_multiplier: config.warp.rates.last().copied().unwrap_or(1.0),
        }
    }
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::config_validation(result.error.unwrap_or_default()).into())
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = ConfigLoader::collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: (!warnings.is_empty()).then_some(warnings),
                summary: Some(ConfigSummary::from(&config)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Base time: {}", summary.base_time);
            println!("  Local time display: {}", summary.use_local_time);
            println!(
                "  Tolerance: {}s, grace: {}s, min catch-up: {}s",
                summary.tolerance_s, summary.grace_period_s, summary.min_catch_up_s
            );
            println!(
                "  Warp rates: {} (up to {}x)",
                summary.warp_rate_count, summary.max_multiplier
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
