//! SyncSession - one engine, one simulated host, one settings snapshot.
//!
//! Each tick mirrors a host frame: the engine ticks against the host's
//! collaborators, then the host advances by `dt`.

use std::future::Future;
use std::time::{Duration, Instant};

use clock_format::{DateTimeFormatter, RealtimeFormatter};
use config_loader::RealtimeConfig;
use contracts::{ClockSource, ContractError, Notice, Notifier, WarpController};
use observability::SyncStatsAggregator;
use sim_host::{SimHostConfig, SimulatedHost, WallClockMode};
use sync_engine::{offset_seconds, seconds_between, LogNotifier, SyncEngine, SyncState, TickContext};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::RunReport;

/// Session options
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Host seconds advanced per tick
    pub dt: f64,
    /// Virtual wall clock instead of the system clock
    pub virtual_clock: bool,
    /// Initial offset against real time (only with a binding)
    pub start_offset_s: f64,
    /// Status window open
    pub ui_open: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            virtual_clock: false,
            start_offset_s: 0.0,
            ui_open: false,
        }
    }
}

/// Logs notices and keeps them until the session drains them into stats
struct SessionNotifier {
    log: LogNotifier,
    pending: Vec<Notice>,
}

impl Notifier for SessionNotifier {
    fn notify(&mut self, notice: &Notice) {
        self.log.notify(notice);
        self.pending.push(notice.clone());
    }
}

/// Engine plus simulated host
pub struct SyncSession {
    engine: SyncEngine,
    host: SimulatedHost,
    config: RealtimeConfig,
    notifier: SessionNotifier,
    stats: SyncStatsAggregator,
    dt: f64,
}

impl SyncSession {
    /// Build a session from validated settings
    ///
    /// With a binding, simulation time starts `start_offset_s` away from real
    /// time; without one it starts at zero.
    pub fn new(config: RealtimeConfig, options: SessionOptions) -> Result<Self, ContractError> {
        let rates = config.warp.table()?;
        let now = chrono::Utc::now();
        let wall_clock = if options.virtual_clock {
            WallClockMode::Virtual(now)
        } else {
            WallClockMode::System
        };
        let simulation_seconds = config
            .binding()
            .map(|base| (seconds_between(base, now) + options.start_offset_s).max(0.0))
            .unwrap_or(0.0);

        info!(
            base_time = %config.base_time,
            simulation_seconds,
            virtual_clock = options.virtual_clock,
            dt = options.dt,
            "Creating sync session"
        );

        let mut engine = SyncEngine::new(config.engine.clone());
        engine.set_user_interface_open(options.ui_open);

        Ok(Self {
            engine,
            host: SimulatedHost::new(SimHostConfig {
                simulation_seconds,
                wall_clock,
                rates,
            }),
            config,
            notifier: SessionNotifier {
                log: LogNotifier::new("session"),
                pending: Vec::new(),
            },
            stats: SyncStatsAggregator::new(),
            dt: options.dt,
        })
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn host(&self) -> &SimulatedHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut SimulatedHost {
        &mut self.host
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    pub fn stats(&self) -> &SyncStatsAggregator {
        &self.stats
    }

    /// Replace the settings
    ///
    /// A changed binding resets the engine. Changed engine tuning stops any
    /// warp and starts a fresh engine with the new tuning. The warp table is
    /// owned by the host and is not replaced.
    pub fn apply_config(&mut self, config: RealtimeConfig) {
        let binding_changed = self.config.binding() != config.binding();
        let tuning_changed = self.config.engine != config.engine;
        self.config = config;

        if binding_changed || tuning_changed {
            self.engine.reset(&mut self.host.warp);
        }
        if tuning_changed {
            info!(tuning = ?self.config.engine, "Engine tuning changed, rebuilding engine");
            let ui_open = self.engine.user_interface_open();
            self.engine = SyncEngine::new(self.config.engine.clone());
            self.engine.set_user_interface_open(ui_open);
        }
    }

    /// One host frame
    pub fn step(&mut self) -> SyncState {
        let before = self.engine.state();
        let index_before = self.host.warp.current_rate_index();
        let paused = self.host.gate.paused;

        let after = self.engine.tick(TickContext {
            clock: &self.host.clock,
            gate: &self.host.gate,
            base_time: &self.config,
            warp: &mut self.host.warp,
            notifier: &mut self.notifier,
        });

        self.stats.on_tick(paused);
        if before != after {
            self.stats.on_transition(before, after);
        }
        for notice in self.notifier.pending.drain(..) {
            self.stats.on_notice(&notice);
        }
        if self.host.warp.current_rate_index() != index_before {
            self.stats.on_warp_change(self.host.warp.active_rate());
        }
        if let (false, Some(base)) = (paused, self.config.binding()) {
            let offset = offset_seconds(
                base,
                self.host.clock.simulation_seconds(),
                self.host.clock.now_real(),
            );
            self.stats.on_offset(offset);
        }

        self.host.advance(self.dt);
        after
    }

    /// Tick on `period` until `ticks` have run or `shutdown` resolves
    pub async fn run<F>(&mut self, ticks: Option<u64>, period: Duration, shutdown: F) -> RunReport
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut completed = 0u64;
        let mut interrupted = false;
        loop {
            if ticks.is_some_and(|n| completed >= n) {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {
                    let state = self.step();
                    completed += 1;
                    debug!(tick = completed, state = %state, "Tick complete");
                }
                _ = &mut shutdown => {
                    warn!(ticks = completed, "Received shutdown signal, stopping session");
                    interrupted = true;
                    break;
                }
            }
        }

        self.report(started.elapsed(), interrupted)
    }

    /// Snapshot of the session for printing
    pub fn report(&self, duration: Duration, interrupted: bool) -> RunReport {
        let formatter = RealtimeFormatter::new(&self.config);
        let snapshot = self.host.snapshot();
        RunReport {
            duration,
            interrupted,
            final_state: self.engine.state(),
            simulated_date: formatter.print_date(snapshot.simulation_seconds, true, true),
            snapshot,
            summary: self.stats.summary(),
        }
    }
}
