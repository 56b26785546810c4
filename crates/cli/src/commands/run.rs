//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::session::{SessionOptions, SyncSession};

/// Execute the `run` command
pub async fn run_sync(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let config = super::load_config(&args.config)?;
    for warning in config_loader::ConfigLoader::collect_warnings(&config) {
        warn!("{warning}");
    }

    let options = session_options(args)?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!("Metrics endpoint available on port {}", args.metrics_port);
    }

    let mut session =
        SyncSession::new(config, options).context("Failed to create sync session")?;

    info!(
        ticks = args.ticks,
        tick_ms = args.tick_ms,
        dt = options.dt,
        "Starting sync session..."
    );

    let ticks = (args.ticks != 0).then_some(args.ticks);
    let report = session
        .run(ticks, Duration::from_millis(args.tick_ms), shutdown_signal())
        .await;

    info!(
        ticks = report.summary.total_ticks,
        state = %report.final_state,
        duration_secs = report.duration.as_secs_f64(),
        "Session finished"
    );
    report.print_summary();

    Ok(())
}

/// Translate CLI flags into session options
fn session_options(args: &RunArgs) -> Result<SessionOptions, CliError> {
    if args.tick_ms == 0 {
        return Err(CliError::invalid_argument("tick-ms", "must be > 0"));
    }
    let dt = args.dt.unwrap_or(args.tick_ms as f64 / 1_000.0);
    if !dt.is_finite() || dt <= 0.0 {
        return Err(CliError::invalid_argument(
            "dt",
            format!("must be a positive number of seconds, got {dt}"),
        ));
    }
    if !args.start_offset.is_finite() {
        return Err(CliError::invalid_argument("start-offset", "must be finite"));
    }
    Ok(SessionOptions {
        dt,
        virtual_clock: args.virtual_clock,
        start_offset_s: args.start_offset,
        ui_open: args.ui_open,
    })
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
