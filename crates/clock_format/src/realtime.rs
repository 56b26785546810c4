//! Real-date decorator over a host formatter.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::{DateTime, Local, TimeDelta, Utc};
use contracts::DisplaySettings;
use tracing::info;

use crate::{CalendarFormatter, DateTimeFormatter};

const EARTH_MINUTE: i64 = 60;
const EARTH_HOUR: i64 = 3_600;
const EARTH_DAY: i64 = 86_400;
const EARTH_YEAR: i64 = 365 * EARTH_DAY;

/// Prints simulation time as `base + t` once a base time is bound
///
/// Unbound settings, and every delta or timestamp request, fall through to
/// `inner`. Each distinct fallthrough signature is logged once.
pub struct RealtimeFormatter<S, F = CalendarFormatter> {
    settings: S,
    inner: F,
    seen: RefCell<HashSet<String>>,
}

impl<S: DisplaySettings> RealtimeFormatter<S, CalendarFormatter> {
    pub fn new(settings: S) -> Self {
        Self::with_inner(settings, CalendarFormatter::default())
    }
}

impl<S: DisplaySettings, F: DateTimeFormatter> RealtimeFormatter<S, F> {
    pub fn with_inner(settings: S, inner: F) -> Self {
        Self {
            settings,
            inner,
            seen: RefCell::new(HashSet::new()),
        }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Fallthrough signatures logged so far
    pub fn seen_invocations(&self) -> Vec<String> {
        let mut seen: Vec<String> = self.seen.borrow().iter().cloned().collect();
        seen.sort();
        seen
    }

    fn bound(&self) -> bool {
        self.settings.base_time().is_some()
    }

    fn note_fallthrough(&self, signature: String) {
        let mut seen = self.seen.borrow_mut();
        if !seen.contains(&signature) {
            info!(call = %signature, "Date formatting delegated to host calendar");
            seen.insert(signature);
        }
    }

    fn instant(&self, time: f64) -> Option<DateTime<Utc>> {
        let base = self.settings.base_time()?;
        if !time.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_milliseconds((time * 1_000.0).round() as i64)?;
        base.checked_add_signed(delta)
    }

    fn render(&self, at: DateTime<Utc>, include_time: bool, include_seconds: bool) -> String {
        let pattern = match (include_time, include_seconds) {
            (false, _) => "%Y-%m-%d",
            (true, false) => "%Y-%m-%d %H:%M%:z",
            (true, true) => "%Y-%m-%d %H:%M:%S%:z",
        };
        if self.settings.use_local_time() {
            at.with_timezone(&Local).format(pattern).to_string()
        } else {
            at.format(pattern).to_string()
        }
    }
}

impl<S: DisplaySettings, F: DateTimeFormatter> DateTimeFormatter for RealtimeFormatter<S, F> {
    fn minute(&self) -> i64 {
        if self.bound() {
            EARTH_MINUTE
        } else {
            self.inner.minute()
        }
    }

    fn hour(&self) -> i64 {
        if self.bound() {
            EARTH_HOUR
        } else {
            self.inner.hour()
        }
    }

    fn day(&self) -> i64 {
        if self.bound() {
            EARTH_DAY
        } else {
            self.inner.day()
        }
    }

    fn year(&self) -> i64 {
        if self.bound() {
            EARTH_YEAR
        } else {
            self.inner.year()
        }
    }

    fn print_date(&self, time: f64, include_time: bool, include_seconds: bool) -> String {
        match self.instant(time) {
            Some(at) => self.render(at, include_time, include_seconds),
            None => {
                self.note_fallthrough(format!("print_date({include_time}, {include_seconds})"));
                self.inner.print_date(time, include_time, include_seconds)
            }
        }
    }

    fn print_date_compact(&self, time: f64, include_time: bool, include_seconds: bool) -> String {
        match self.instant(time) {
            Some(at) => self.render(at, include_time, include_seconds),
            None => {
                self.note_fallthrough(format!(
                    "print_date_compact({include_time}, {include_seconds})"
                ));
                self.inner.print_date_compact(time, include_time, include_seconds)
            }
        }
    }

    fn print_date_delta(
        &self,
        time: f64,
        include_time: bool,
        include_seconds: bool,
        use_abs: bool,
    ) -> String {
        self.note_fallthrough(format!(
            "print_date_delta({include_time}, {include_seconds}, {use_abs})"
        ));
        self.inner
            .print_date_delta(time, include_time, include_seconds, use_abs)
    }

    fn print_time_stamp(&self, time: f64, days: bool, years: bool) -> String {
        self.note_fallthrough(format!("print_time_stamp({days}, {years})"));
        self.inner.print_time_stamp(time, days, years)
    }
}
