use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::record::EpochMillis;

/// Extended and basic forms with a `±hh`, `±hhmm` or `±hh:mm` offset.
const OFFSET_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Parses an ISO-8601 timestamp into epoch milliseconds.
///
/// A trailing `Z` means UTC. A timestamp without any offset is read as UTC.
/// Both `.` and `,` are accepted as the decimal separator.
/// Sub-millisecond precision is truncated toward zero.
pub fn iso8601_to_millis(value: &str) -> Result<EpochMillis, chrono::ParseError> {
    let rfc3339_err = match DateTime::parse_from_rfc3339(value) {
        Ok(instant) => return Ok(truncated_millis(&instant)),
        Err(err) => err,
    };

    let normalized = normalize(value);

    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(&normalized, format) {
            return Ok(truncated_millis(&instant));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(truncated_millis(&Utc.from_utc_datetime(&naive)));
        }
    }

    for format in DATE_FORMATS {
        let midnight = NaiveDate::parse_from_str(&normalized, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        if let Some(naive) = midnight {
            return Ok(truncated_millis(&Utc.from_utc_datetime(&naive)));
        }
    }

    Err(rfc3339_err)
}

/// `,` becomes `.` and a trailing `Z` becomes `+00:00`.
fn normalize(value: &str) -> String {
    let value = value.replace(',', ".");
    match value.strip_suffix(['Z', 'z']) {
        Some(stem) => format!("{stem}+00:00"),
        None => value,
    }
}

fn truncated_millis<Tz: TimeZone>(instant: &DateTime<Tz>) -> EpochMillis {
    let secs = instant.timestamp();
    let nanos = instant.timestamp_subsec_nanos();
    let floored = secs * 1_000 + EpochMillis::from(nanos / 1_000_000);
    // `timestamp()` floors, so a pre-epoch instant with a sub-millisecond
    // remainder sits one millisecond below its truncated value.
    if secs < 0 && nanos % 1_000_000 != 0 {
        floored + 1
    } else {
        floored
    }
}
