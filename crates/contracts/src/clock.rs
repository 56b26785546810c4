//! Clock sources and the base-time binding.
//!
//! The engine never owns a clock: it reads the host through these traits once
//! per tick, so tests and simulated hosts can supply deterministic time.

use chrono::{DateTime, Utc};

/// Clock readings supplied by the host
pub trait ClockSource {
    /// Monotonic host frame time in seconds (drives grace intervals)
    fn host_seconds(&self) -> f64;

    /// Elapsed simulation seconds since the simulation epoch
    ///
    /// Monotonic, never resets during a run.
    fn simulation_seconds(&self) -> f64;

    /// Current wall-clock instant, queried fresh on every call
    fn now_real(&self) -> DateTime<Utc>;
}

/// Read access to the base-time binding
///
/// Owned by the configuration store; the engine only ever reads it.
/// `None` means synchronization cannot activate.
pub trait BaseTimeSource {
    fn base_time(&self) -> Option<DateTime<Utc>>;
}

impl BaseTimeSource for Option<DateTime<Utc>> {
    fn base_time(&self) -> Option<DateTime<Utc>> {
        *self
    }
}

impl<T: BaseTimeSource + ?Sized> BaseTimeSource for &T {
    fn base_time(&self) -> Option<DateTime<Utc>> {
        (**self).base_time()
    }
}

/// Presentation settings read by date formatters
pub trait DisplaySettings: BaseTimeSource {
    /// Render dates in the local time zone instead of UTC
    fn use_local_time(&self) -> bool;
}

impl<T: DisplaySettings + ?Sized> DisplaySettings for &T {
    fn use_local_time(&self) -> bool {
        (**self).use_local_time()
    }
}
