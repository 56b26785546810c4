//! SimulatedHost - clock, warp control and gate advanced together.

use chrono::{DateTime, Utc};
use contracts::{ClockSource, WarpController, WarpRateTable};
use serde::Serialize;

use crate::{SimClock, SimGate, SimWarpController, WallClockMode};

/// Simulated host configuration
#[derive(Debug, Clone)]
pub struct SimHostConfig {
    /// Simulation seconds at start
    pub simulation_seconds: f64,
    pub wall_clock: WallClockMode,
    pub rates: WarpRateTable,
}

impl Default for SimHostConfig {
    fn default() -> Self {
        Self {
            simulation_seconds: 0.0,
            wall_clock: WallClockMode::System,
            rates: WarpRateTable::default(),
        }
    }
}

/// In-process host
///
/// Fields are public so a tick can borrow the clock and gate shared while
/// the warp controller is borrowed mutably.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    pub clock: SimClock,
    pub warp: SimWarpController,
    pub gate: SimGate,
}

/// Point-in-time view of the host, for reports
#[derive(Debug, Clone, Serialize)]
pub struct HostSnapshot {
    pub host_seconds: f64,
    pub simulation_seconds: f64,
    pub now_real: DateTime<Utc>,
    pub warp_index: usize,
    pub multiplier: f64,
    pub paused: bool,
}

impl SimulatedHost {
    pub fn new(config: SimHostConfig) -> Self {
        Self {
            clock: SimClock::new(config.simulation_seconds, config.wall_clock),
            warp: SimWarpController::new(config.rates),
            gate: SimGate::default(),
        }
    }

    /// Advance one frame of `dt` host seconds
    ///
    /// Simulation time moves by `dt` times the active multiplier, or not at
    /// all while paused. Host and wall time always move.
    pub fn advance(&mut self, dt: f64) {
        let multiplier = if self.gate.paused {
            0.0
        } else {
            self.warp.active_rate()
        };
        self.clock.advance(dt, multiplier);
    }

    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            host_seconds: self.clock.host_seconds(),
            simulation_seconds: self.clock.simulation_seconds(),
            now_real: self.clock.now_real(),
            warp_index: self.warp.current_rate_index(),
            multiplier: self.warp.active_rate(),
            paused: self.gate.paused,
        }
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new(SimHostConfig::default())
    }
}
