// crates/segmark-core/src/timecode.rs
//
// Millisecond <-> time-string conversion.
//
// Canonical source for every timestamp the tool writes or reads: project
// files, the numeric edit fields, the ruler, and the IN/OUT readouts.
//
// Accepted input shapes for parse():
//   H:MM:SS[.fff]   MM:SS[.fff]   S[.fff]
// `.` and `,` are both accepted as the fraction separator.

use crate::error::TimeCodeError;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR:   u64 = 60 * MS_PER_MINUTE;

/// Format milliseconds as `HH:MM:SS.mmm`.
///
/// The hours field grows past two digits for very long media; it never wraps
/// at 24h.
///
/// ```
/// use segmark_core::timecode::format;
/// assert_eq!(format(0),         "00:00:00.000");
/// assert_eq!(format(3_723_456), "01:02:03.456");
/// assert_eq!(format(360_000_000), "100:00:00.000");
/// ```
pub fn format(ms: u64) -> String {
    let h     = ms / MS_PER_HOUR;
    let m     = (ms / MS_PER_MINUTE) % 60;
    let s     = (ms / MS_PER_SECOND) % 60;
    let milli = ms % MS_PER_SECOND;
    format!("{h:02}:{m:02}:{s:02}.{milli:03}")
}

/// Parse a time string back into milliseconds.
///
/// Hour and minute fields must be plain integers; anything else is an error.
/// The seconds field is lenient: an empty or unreadable seconds component
/// counts as zero. Fraction digits past the third are truncated.
///
/// ```
/// use segmark_core::timecode::parse;
/// assert_eq!(parse("01:02:03.456").unwrap(), 3_723_456);
/// assert_eq!(parse("2:30,5").unwrap(),       150_500);
/// assert_eq!(parse("42").unwrap(),           42_000);
/// assert!(parse("aa:00:01").is_err());
/// ```
pub fn parse(text: &str) -> Result<u64, TimeCodeError> {
    let trimmed = text.trim();
    let fields: Vec<&str> = trimmed.split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [s]       => (0, 0, *s),
        [m, s]    => (0, whole_field(trimmed, m, "minutes")?, *s),
        [h, m, s] => (
            whole_field(trimmed, h, "hours")?,
            whole_field(trimmed, m, "minutes")?,
            *s,
        ),
        _ => return Err(TimeCodeError::TooManyFields(trimmed.to_string())),
    };

    Ok(hours.saturating_mul(MS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(MS_PER_MINUTE))
        .saturating_add(seconds_field(seconds)))
}

/// Compact seconds readout, e.g. `12.34s`. Used for the IN/OUT labels.
///
/// ```
/// use segmark_core::timecode::format_seconds;
/// assert_eq!(format_seconds(1_234), "1.23s");
/// ```
pub fn format_seconds(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / MS_PER_SECOND as f64)
}

/// Short ruler label.
///
/// | Range     | Format      | Example    |
/// |-----------|-------------|------------|
/// | >= 1 h    | `H:MM:SS`   | `1:04:35`  |
/// | < 1 h     | `MM:SS`     | `03:07`    |
///
/// Sub-second positions get a tenths digit so half-second ticks stay
/// distinguishable: `00:01.5`.
pub fn format_ruler(ms: u64) -> String {
    let total_s = ms / MS_PER_SECOND;
    let tenths  = (ms % MS_PER_SECOND) / 100;
    let base = if total_s >= 3600 {
        format!("{}:{:02}:{:02}", total_s / 3600, (total_s % 3600) / 60, total_s % 60)
    } else {
        format!("{:02}:{:02}", total_s / 60, total_s % 60)
    };
    if tenths > 0 { format!("{base}.{tenths}") } else { base }
}

fn whole_field(text: &str, field: &str, name: &'static str) -> Result<u64, TimeCodeError> {
    field.trim().parse::<u64>().map_err(|_| TimeCodeError::BadField {
        text:  text.to_string(),
        field: name,
    })
}

/// `SS[.fff]` -> milliseconds. Unreadable input is zero.
fn seconds_field(field: &str) -> u64 {
    let field = field.trim();
    let (whole, frac) = match field.find(|c: char| c == '.' || c == ',') {
        Some(i) => (&field[..i], &field[i + 1..]),
        None    => (field, ""),
    };

    let whole_ms = if whole.is_empty() {
        Some(0)
    } else {
        whole.parse::<u64>().ok().map(|s| s.saturating_mul(MS_PER_SECOND))
    };

    let frac_ms = if frac.chars().all(|c| c.is_ascii_digit()) {
        // Right-pad to three digits, then drop anything finer than 1 ms.
        let digits: String = frac.chars().chain("000".chars()).take(3).collect();
        digits.parse::<u64>().ok()
    } else {
        None
    };

    match (whole_ms, frac_ms) {
        (Some(w), Some(f)) => w.saturating_add(f),
        _ => {
            log::debug!("[timecode] unreadable seconds field {field:?}, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_reference_values() {
        for ms in [0, 999, 1000, 59_999, 3_600_000, 86_399_999] {
            assert_eq!(parse(&format(ms)).unwrap(), ms, "round trip failed for {ms}");
        }
    }

    #[test]
    fn format_is_exact_and_truncating() {
        assert_eq!(format(3_723_456), "01:02:03.456");
        assert_eq!(format(999),       "00:00:00.999");
        assert_eq!(format(59_999),    "00:00:59.999");
    }

    #[test]
    fn hours_are_unbounded() {
        assert_eq!(format(90_000_000), "25:00:00.000");
        assert_eq!(parse("25:00:00.000").unwrap(), 90_000_000);
    }

    #[test]
    fn accepts_one_two_and_three_fields() {
        assert_eq!(parse("5").unwrap(),          5_000);
        assert_eq!(parse("5.25").unwrap(),       5_250);
        assert_eq!(parse("01:05").unwrap(),      65_000);
        assert_eq!(parse("1:01:05.1").unwrap(),  3_665_100);
    }

    #[test]
    fn comma_fraction_separator() {
        assert_eq!(parse("00:00:01,250").unwrap(), 1_250);
    }

    #[test]
    fn extra_fraction_digits_truncate() {
        assert_eq!(parse("0.123999").unwrap(), 123);
    }

    #[test]
    fn lenient_seconds_field() {
        assert_eq!(parse("").unwrap(),       0);
        assert_eq!(parse("01:02:").unwrap(), 3_720_000);
        assert_eq!(parse("00:01:xx").unwrap(), 60_000);
    }

    #[test]
    fn strict_hour_and_minute_fields() {
        assert!(matches!(
            parse("ab:00:01"),
            Err(TimeCodeError::BadField { field: "hours", .. })
        ));
        assert!(matches!(
            parse("00:zz:01"),
            Err(TimeCodeError::BadField { field: "minutes", .. })
        ));
        assert!(matches!(parse("1:2:3:4"), Err(TimeCodeError::TooManyFields(_))));
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(parse("  00:00:02.000 ").unwrap(), 2_000);
    }

    #[test]
    fn ruler_labels() {
        assert_eq!(format_ruler(0),          "00:00");
        assert_eq!(format_ruler(187_000),    "03:07");
        assert_eq!(format_ruler(3_875_000),  "1:04:35");
        assert_eq!(format_ruler(1_500),      "00:01.5");
    }
}
