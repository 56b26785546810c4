//! ISO-8601 base time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use contracts::ContractError;

/// Parse an ISO-8601 instant, normalized to UTC
///
/// Accepts RFC 3339 with any offset, or a bare date-time which is taken as UTC.
pub fn parse_iso8601(value: &str) -> Result<DateTime<Utc>, ContractError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ContractError::invalid_base_time(value, e.to_string()))
}

/// Format an instant as round-trippable UTC ISO-8601 (`Z` suffix)
pub fn format_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc() {
        let dt = parse_iso8601("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(format_iso8601(&dt), "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_parse_offset_normalizes_to_utc() {
        let dt = parse_iso8601("2024-05-01T14:30:00+02:00").unwrap();
        assert_eq!(format_iso8601(&dt), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_parse_fraction_and_bare() {
        let dt = parse_iso8601("2024-05-01T12:00:00.1234567").unwrap();
        assert_eq!(dt.timestamp_subsec_nanos(), 123_456_700);
        assert_eq!(parse_iso8601(&format_iso8601(&dt)).unwrap(), dt);
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_iso8601("yesterday").unwrap_err();
        assert!(matches!(err, ContractError::InvalidBaseTime { .. }));
    }
}
