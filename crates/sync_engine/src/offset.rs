//! Offset between projected simulation real time and the wall clock.

use chrono::{DateTime, Utc};

/// Signed seconds from `from` to `to`
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

/// Offset of the simulation against real time
///
/// `(base + simulation_seconds) - now`, positive when the simulation is ahead.
/// Evaluated as `simulation_seconds - (now - base)` so large simulation times
/// never leave the representable date range.
pub fn offset_seconds(base: DateTime<Utc>, simulation_seconds: f64, now: DateTime<Utc>) -> f64 {
    simulation_seconds - seconds_between(base, now)
}
