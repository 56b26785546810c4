//! # Realtime Sync CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 配置加载与验证
//! - 基准时间编辑 (set / now / unset)
//! - 模拟宿主上的同步运行与优雅关闭

mod cli;
mod commands;
mod error;
mod session;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_now, run_set, run_sync, run_unset, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        default_log_level: default_log_level(&cli).to_string(),
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Realtime Sync CLI starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_sync(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
        Commands::Set(args) => run_set(args),
        Commands::Now(args) => run_now(args),
        Commands::Unset(args) => run_unset(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Log level used when RUST_LOG is not set
fn default_log_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        return "warn";
    }
    match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
