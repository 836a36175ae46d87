use std::sync::LazyLock;

use regex::Regex;

use super::snapshot::Timestamp;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^top - ([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])")
        .expect("snapshot header pattern is valid")
});

// Longest leading decimal number, optionally signed, with an optional exponent.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number pattern is valid")
});

/// Suffix marking a value given in mebibytes instead of kibibytes.
pub const MEGA_SUFFIX: char = 'm';
pub const MEGA_FACTOR: f64 = 1024.0;

/// Match a snapshot header (`top - HH:MM:SS ...`) and return its clock time.
pub fn parse_header(line: &str) -> Option<Timestamp> {
    let caps = HEADER.captures(line)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
    Some(Timestamp {
        hour: field(1)?,
        minute: field(2)?,
        second: field(3)?,
    })
}

/// Parse a metric field such as `2048`, `12.5` or `100m`.
///
/// The number is the longest leading decimal prefix of the field. A trailing
/// `m` scales it by 1024; any other trailing character leaves it unscaled.
/// Returns `None` when the field has no leading number at all.
pub fn parse_scaled_value(field: &str) -> Option<f64> {
    let number = LEADING_NUMBER.find(field)?;
    let value: f64 = number.as_str().parse().ok()?;
    if field.ends_with(MEGA_SUFFIX) {
        Some(value * MEGA_FACTOR)
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_extracts_time() {
        let ts = parse_header("top - 14:05:32 up 12 days,  3:01,  2 users").unwrap();
        assert_eq!((ts.hour, ts.minute, ts.second), (14, 5, 32));
    }

    #[test]
    fn header_bounds() {
        assert!(parse_header("top - 00:00:00").is_some());
        assert!(parse_header("top - 23:59:59").is_some());
        assert!(parse_header("top - 24:00:00").is_none());
        assert!(parse_header("top - 12:60:00").is_none());
        assert!(parse_header("top - 12:00:60").is_none());
    }

    #[test]
    fn header_requires_prefix_at_line_start() {
        assert!(parse_header(" top - 10:00:00").is_none());
        assert!(parse_header("Tasks: 120 total").is_none());
        assert!(parse_header("top - 1:00:00").is_none());
        assert!(parse_header("").is_none());
    }

    #[test]
    fn plain_values_are_unscaled() {
        assert_eq!(parse_scaled_value("2048"), Some(2048.0));
        assert_eq!(parse_scaled_value("12.5"), Some(12.5));
        assert_eq!(parse_scaled_value("0.0"), Some(0.0));
    }

    #[test]
    fn mega_suffix_scales() {
        assert_eq!(parse_scaled_value("2048m"), Some(2048.0 * 1024.0));
        assert_eq!(parse_scaled_value("1.5m"), Some(1.5 * 1024.0));
    }

    #[test]
    fn other_suffixes_are_ignored() {
        assert_eq!(parse_scaled_value("3g"), Some(3.0));
        assert_eq!(parse_scaled_value("100k"), Some(100.0));
        assert_eq!(parse_scaled_value("100M"), Some(100.0));
    }

    #[test]
    fn non_numeric_fields_fail() {
        assert_eq!(parse_scaled_value("S"), None);
        assert_eq!(parse_scaled_value("root"), None);
        assert_eq!(parse_scaled_value("m"), None);
        assert_eq!(parse_scaled_value(""), None);
    }
}
