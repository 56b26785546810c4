//! Catch-up Demo
//!
//! Starts a simulated host a day behind real time and ticks the sync engine
//! on a virtual wall clock until it has caught up.
//!
//! Run with: cargo run -p demos --bin catch_up_demo [config.toml] [offset_s]

use std::path::Path;

use chrono::Utc;
use clock_format::{DateTimeFormatter, RealtimeFormatter};
use config_loader::{BaseTimeSetting, ConfigLoader, RealtimeConfig};
use contracts::{ClockSource, Notice, SyncState, WarpController};
use sim_host::{SimHostConfig, SimulatedHost, WallClockMode};
use sync_engine::{offset_seconds, SyncEngine, TickContext};

const DT: f64 = 0.1;
const MAX_TICKS: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => {
            tracing::info!(path = %path, "Loading config");
            ConfigLoader::load_from_path(Path::new(&path))?
        }
        None => RealtimeConfig::default(),
    };
    let start_offset = args
        .next()
        .map(|s| s.parse::<f64>())
        .transpose()?
        .unwrap_or(-86_400.0);

    // Bind so that the simulation starts `start_offset` away from now
    let now = Utc::now();
    let simulation_seconds = 1_000_000.0;
    let base = now
        - chrono::TimeDelta::seconds(simulation_seconds as i64)
        + chrono::TimeDelta::milliseconds((start_offset * 1_000.0) as i64);
    config.base_time = BaseTimeSetting::At(base);

    let mut host = SimulatedHost::new(SimHostConfig {
        simulation_seconds,
        wall_clock: WallClockMode::Virtual(now),
        rates: config.warp.table()?,
    });
    let mut engine = SyncEngine::new(config.engine.clone());
    let mut notices: Vec<Notice> = Vec::new();
    let formatter = RealtimeFormatter::new(&config);

    let mut last_state = engine.state();
    for tick in 0..MAX_TICKS {
        let state = engine.tick(TickContext {
            clock: &host.clock,
            gate: &host.gate,
            base_time: &config,
            warp: &mut host.warp,
            notifier: &mut notices,
        });

        if state != last_state || tick % 50 == 0 {
            let offset = offset_seconds(
                base,
                host.clock.simulation_seconds(),
                host.clock.now_real(),
            );
            println!(
                "tick {tick:>5}  {state:<14} warp {:>8}x  offset {:>12.3}s  sim {}",
                host.warp.active_rate(),
                offset,
                formatter.print_date(host.clock.simulation_seconds(), true, true),
            );
            last_state = state;
        }

        if state == SyncState::Synchronized && notices.iter().any(|n| *n == Notice::CaughtUp) {
            println!("\nCaught up after {tick} ticks");
            break;
        }
        if state == SyncState::Inactive {
            println!("\nSynchronization stopped");
            break;
        }

        host.advance(DT);
    }

    println!("\nNotices:");
    for notice in &notices {
        println!("  - {notice}");
    }
    println!("Final warp index: {}", host.warp.current_rate_index());

    Ok(())
}
