//! `info` command implementation.

use anyhow::{Context, Result};
use clock_format::{DateTimeFormatter, RealtimeFormatter};
use config_loader::RealtimeConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    base_time: String,
    bound: bool,
    use_local_time: bool,
    engine: EngineInfo,
    warp_rates: Vec<f64>,
    simulated: SimulatedInfo,
}

#[derive(Serialize)]
struct EngineInfo {
    tolerance_s: f64,
    grace_period_s: f64,
    min_catch_up_s: f64,
}

#[derive(Serialize)]
struct SimulatedInfo {
    ut: f64,
    date: String,
    time_stamp: String,
    day_seconds: i64,
    year_seconds: i64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let config = super::load_config(&args.config)?;
    let info = build_config_info(&config, args.ut);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(config: &RealtimeConfig, ut: f64) -> ConfigInfo {
    let formatter = RealtimeFormatter::new(config);

    ConfigInfo {
        base_time: config.base_time.to_string(),
        bound: config.binding().is_some(),
        use_local_time: config.use_local_time,
        engine: EngineInfo {
            tolerance_s: config.engine.tolerance_s,
            grace_period_s: config.engine.grace_period_s,
            min_catch_up_s: config.engine.min_catch_up_s,
        },
        warp_rates: config.warp.rates.clone(),
        simulated: SimulatedInfo {
            ut,
            date: formatter.print_date(ut, true, true),
            time_stamp: formatter.print_time_stamp(ut, true, true),
            day_seconds: formatter.day(),
            year_seconds: formatter.year(),
        },
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Realtime Sync Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🕒 Base Time");
    println!("   ├─ Value: {}", info.base_time);
    println!("   ├─ Bound: {}", info.bound);
    println!("   └─ Local time display: {}", info.use_local_time);

    println!("\n⚙️  Engine");
    println!("   ├─ Tolerance: {}s", info.engine.tolerance_s);
    println!("   ├─ Grace period: {}s", info.engine.grace_period_s);
    println!("   └─ Min catch-up: {}s", info.engine.min_catch_up_s);

    println!("\n⏩ Warp Rates ({})", info.warp_rates.len());
    for (i, rate) in info.warp_rates.iter().enumerate() {
        let prefix = if i == info.warp_rates.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        println!("   {} [{}] {}x", prefix, i, rate);
    }

    println!("\n📅 Simulation time {}s", info.simulated.ut);
    println!("   ├─ Date: {}", info.simulated.date);
    println!("   ├─ Time stamp: {}", info.simulated.time_stamp);
    println!(
        "   └─ Day / year: {}s / {}s",
        info.simulated.day_seconds, info.simulated.year_seconds
    );

    println!();
}
