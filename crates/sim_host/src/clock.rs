//! Simulation clock with a system or virtual wall clock.

use chrono::{DateTime, TimeDelta, Utc};
use contracts::ClockSource;

/// Source of the wall-clock instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClockMode {
    /// Read `Utc::now()` on every query
    System,
    /// Deterministic clock starting at the given instant, advanced by `dt`
    Virtual(DateTime<Utc>),
}

/// 模拟时钟
#[derive(Debug, Clone)]
pub struct SimClock {
    host_seconds: f64,
    simulation_seconds: f64,
    mode: WallClockMode,
    virtual_now: Option<DateTime<Utc>>,
}

impl SimClock {
    pub fn new(simulation_seconds: f64, mode: WallClockMode) -> Self {
        let virtual_now = match mode {
            WallClockMode::System => None,
            WallClockMode::Virtual(start) => Some(start),
        };
        Self {
            host_seconds: 0.0,
            simulation_seconds,
            mode,
            virtual_now,
        }
    }

    pub fn mode(&self) -> WallClockMode {
        self.mode
    }

    /// Advance host time by `dt` and simulation time by `dt * multiplier`
    ///
    /// Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f64, multiplier: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.host_seconds += dt;
        self.simulation_seconds += dt * multiplier;
        if let Some(now) = self.virtual_now {
            let step = TimeDelta::nanoseconds((dt * 1e9).round() as i64);
            self.virtual_now = Some(now.checked_add_signed(step).unwrap_or(now));
        }
    }

    /// Jump the simulation clock, e.g. when a save is loaded
    pub fn set_simulation_seconds(&mut self, seconds: f64) {
        self.simulation_seconds = seconds;
    }
}

impl ClockSource for SimClock {
    fn host_seconds(&self) -> f64 {
        self.host_seconds
    }

    fn simulation_seconds(&self) -> f64 {
        self.simulation_seconds
    }

    fn now_real(&self) -> DateTime<Utc> {
        self.virtual_now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_virtual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut clock = SimClock::new(0.0, WallClockMode::Virtual(start));
        clock.advance(0.5, 10.0);
        clock.advance(0.5, 10.0);

        assert_eq!(clock.host_seconds(), 1.0);
        assert_eq!(clock.simulation_seconds(), 10.0);
        assert_eq!(clock.now_real(), start + TimeDelta::seconds(1));
    }

    #[test]
    fn test_ignores_bad_steps() {
        let mut clock = SimClock::new(5.0, WallClockMode::System);
        clock.advance(-1.0, 1.0);
        clock.advance(f64::NAN, 1.0);
        assert_eq!(clock.host_seconds(), 0.0);
        assert_eq!(clock.simulation_seconds(), 5.0);
    }

    #[test]
    fn test_set_simulation_seconds_keeps_wall_clock() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut clock = SimClock::new(10.0, WallClockMode::Virtual(start));
        clock.set_simulation_seconds(7_200.0);
        assert_eq!(clock.simulation_seconds(), 7_200.0);
        assert_eq!(clock.host_seconds(), 0.0);
        assert_eq!(clock.now_real(), start);
    }

    #[test]
    fn test_system_clock_is_live() {
        let clock = SimClock::new(0.0, WallClockMode::System);
        let before = Utc::now();
        assert!(clock.now_real() >= before);
    }
}
