//! # Clock Format
//!
//! Date-printing decorator for simulation timestamps.
//!
//! When a base time is bound, simulation seconds are shown as real calendar
//! dates (`base + t`); otherwise calls fall through to the host calendar
//! formatter. The decorator only observes configuration and never influences
//! the sync engine.

mod calendar;
mod realtime;

pub use calendar::CalendarFormatter;
pub use realtime::RealtimeFormatter;

/// Date formatting interface of the host
pub trait DateTimeFormatter {
    /// Seconds per minute
    fn minute(&self) -> i64;
    /// Seconds per hour
    fn hour(&self) -> i64;
    /// Seconds per day
    fn day(&self) -> i64;
    /// Seconds per year
    fn year(&self) -> i64;

    /// Absolute date for a simulation timestamp
    fn print_date(&self, time: f64, include_time: bool, include_seconds: bool) -> String;

    fn print_date_compact(&self, time: f64, include_time: bool, include_seconds: bool) -> String {
        self.print_date(time, include_time, include_seconds)
    }

    /// Duration in calendar units
    fn print_date_delta(
        &self,
        time: f64,
        include_time: bool,
        include_seconds: bool,
        use_abs: bool,
    ) -> String;

    /// Clock-style timestamp, optionally prefixed by day and year
    fn print_time_stamp(&self, time: f64, days: bool, years: bool) -> String;
}
