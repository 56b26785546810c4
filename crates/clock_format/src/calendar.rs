//! Default formatter over a fixed simulation calendar.

use crate::DateTimeFormatter;

/// Calendar formatter
///
/// Counts years and days from simulation time zero using a fixed day length
/// and year length. Defaults to the host's short-day calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFormatter {
    hours_per_day: i64,
    days_per_year: i64,
}

impl CalendarFormatter {
    pub fn new(hours_per_day: u32, days_per_year: u32) -> Self {
        Self {
            hours_per_day: i64::from(hours_per_day.max(1)),
            days_per_year: i64::from(days_per_year.max(1)),
        }
    }

    /// Earth calendar (24h days, 365d years)
    pub fn earth() -> Self {
        Self::new(24, 365)
    }

    fn split(&self, time: f64) -> Parts {
        // `as` saturates at the i64 bounds; the magnitude is taken unsigned
        let total = time.floor() as i64;
        let negative = total < 0;
        let mut rest = total.unsigned_abs();
        let unit = |size: i64| size.unsigned_abs();

        let years = rest / unit(self.year());
        rest %= unit(self.year());
        let days = rest / unit(self.day());
        rest %= unit(self.day());
        let hours = rest / unit(self.hour());
        rest %= unit(self.hour());
        let minutes = rest / unit(self.minute());
        let seconds = rest % unit(self.minute());

        Parts {
            negative,
            years,
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

impl Default for CalendarFormatter {
    fn default() -> Self {
        Self::new(6, 426)
    }
}

struct Parts {
    negative: bool,
    years: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl DateTimeFormatter for CalendarFormatter {
    fn minute(&self) -> i64 {
        60
    }

    fn hour(&self) -> i64 {
        3_600
    }

    fn day(&self) -> i64 {
        self.hours_per_day * self.hour()
    }

    fn year(&self) -> i64 {
        self.days_per_year * self.day()
    }

    fn print_date(&self, time: f64, include_time: bool, include_seconds: bool) -> String {
        let p = self.split(time.max(0.0));
        let date = format!("Year {}, Day {}", p.years + 1, p.days + 1);
        match (include_time, include_seconds) {
            (false, _) => date,
            (true, false) => format!("{date} - {:02}:{:02}", p.hours, p.minutes),
            (true, true) => format!(
                "{date} - {:02}:{:02}:{:02}",
                p.hours, p.minutes, p.seconds
            ),
        }
    }

    fn print_date_delta(
        &self,
        time: f64,
        include_time: bool,
        include_seconds: bool,
        use_abs: bool,
    ) -> String {
        let p = self.split(time);
        let mut parts = Vec::new();
        if p.years > 0 {
            parts.push(format!("{}y", p.years));
        }
        if p.days > 0 || !parts.is_empty() {
            parts.push(format!("{}d", p.days));
        }
        if include_time {
            if p.hours > 0 || !parts.is_empty() {
                parts.push(format!("{}h", p.hours));
            }
            if p.minutes > 0 || !parts.is_empty() {
                parts.push(format!("{}m", p.minutes));
            }
            if include_seconds {
                parts.push(format!("{}s", p.seconds));
            }
        }
        if parts.is_empty() {
            parts.push(if include_time { "0m".into() } else { "0d".into() });
        }

        let body = parts.join(" ");
        if p.negative && !use_abs {
            format!("-{body}")
        } else {
            body
        }
    }

    fn print_time_stamp(&self, time: f64, days: bool, years: bool) -> String {
        let p = self.split(time.max(0.0));
        let clock = format!("{:02}:{:02}:{:02}", p.hours, p.minutes, p.seconds);
        match (years, days) {
            (true, _) => format!("Y{}, D{:02}, {clock}", p.years + 1, p.days + 1),
            (false, true) => format!("D{:02}, {clock}", p.days + 1),
            (false, false) => clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        let cal = CalendarFormatter::default();
        assert_eq!(cal.day(), 21_600);
        assert_eq!(cal.year(), 426 * 21_600);
        assert_eq!(CalendarFormatter::earth().day(), 86_400);
    }

    #[test]
    fn test_print_date() {
        let cal = CalendarFormatter::default();
        assert_eq!(cal.print_date(0.0, false, false), "Year 1, Day 1");
        // 1 day + 1h 2m 3s in 6h days
        let t = 21_600.0 + 3_723.0;
        assert_eq!(cal.print_date(t, true, true), "Year 1, Day 2 - 01:02:03");
        assert_eq!(cal.print_date(t, true, false), "Year 1, Day 2 - 01:02");
    }

    #[test]
    fn test_print_date_delta() {
        let cal = CalendarFormatter::earth();
        assert_eq!(cal.print_date_delta(100.0, true, true, true), "1m 40s");
        assert_eq!(cal.print_date_delta(-100.0, true, true, false), "-1m 40s");
        assert_eq!(cal.print_date_delta(-100.0, true, true, true), "1m 40s");
        assert_eq!(cal.print_date_delta(90_061.0, true, false, true), "1d 1h 1m");
        assert_eq!(cal.print_date_delta(5.0, false, false, true), "0d");
    }

    #[test]
    fn test_print_date_delta_saturates_out_of_range() {
        let cal = CalendarFormatter::earth();
        let floor = "292471208677y 195d 15h 30m 8s";
        assert_eq!(cal.print_date_delta(-1.0e19, true, true, true), floor);
        assert_eq!(
            cal.print_date_delta(f64::NEG_INFINITY, true, true, false),
            format!("-{floor}")
        );
        assert_eq!(cal.print_date_delta(f64::NAN, true, true, false), "0s");
        assert!(cal.print_date(f64::INFINITY, true, true).starts_with("Year "));
    }

    #[test]
    fn test_print_time_stamp() {
        let cal = CalendarFormatter::earth();
        assert_eq!(cal.print_time_stamp(3_723.0, false, false), "01:02:03");
        assert_eq!(cal.print_time_stamp(86_400.0, true, false), "D02, 00:00:00");
        assert_eq!(cal.print_time_stamp(0.0, true, true), "Y1, D01, 00:00:00");
    }
}
