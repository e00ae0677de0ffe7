//! Date-range scope parsing.
//!
//! A scope is a comma-separated list of `start::end` pairs, each endpoint in
//! the canonical UTC format (`2024-02-01T00:00Z`):
//!
//! ```text
//! 2024-01-01T00:00Z::2024-01-05T00:00Z, 2024-01-03T00:00Z::2024-01-07T00:00Z
//! ```
//!
//! Parsing is all-or-nothing: the first malformed token (left to right) fails
//! the whole scope.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{CoordError, Result, ScopeFault};

/// Canonical UTC date format shared by both range endpoints.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Separates the start and end dates of one range.
pub const RANGE_SEPARATOR: &str = "::";

/// Separates ranges within a scope.
pub const SCOPE_DELIMITER: char = ',';

/// Parse text in the canonical UTC format.
pub fn parse_utc(text: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, UTC_FORMAT).map(|dt| dt.and_utc())
}

/// Render an instant in the canonical UTC format.
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format(UTC_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// A validated, inclusive `[start, end]` window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Self, ScopeFault> {
        if start > end {
            return Err(ScopeFault::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split `scope` into validated date ranges for `job_id`.
///
/// Fails with `InvalidArgument` when either input is blank and with
/// `MalformedScope` on the first bad token. Ranges come back in the order
/// they were written.
pub fn parse_scope(job_id: &str, scope: &str) -> Result<Vec<DateRange>> {
    require_non_blank(job_id, "jobId")?;
    require_non_blank(scope, "scope")?;

    scope
        .split(SCOPE_DELIMITER)
        .map(str::trim)
        .map(parse_range)
        .collect()
}

/// Parse a single trimmed `start::end` token.
pub fn parse_range(token: &str) -> Result<DateRange> {
    if !token.contains(RANGE_SEPARATOR) {
        return Err(CoordError::malformed(token, ScopeFault::MissingSeparator));
    }

    let parts: Vec<&str> = token.split(RANGE_SEPARATOR).map(str::trim).collect();
    let (start, end) = match parts.as_slice() {
        [start, end] if !start.is_empty() && !end.is_empty() => (*start, *end),
        _ => return Err(CoordError::malformed(token, ScopeFault::ExpectedTwoDates)),
    };

    let start = parse_endpoint(token, start)?;
    let end = parse_endpoint(token, end)?;
    DateRange::new(start, end).map_err(|fault| CoordError::malformed(token, fault))
}

fn parse_endpoint(token: &str, value: &str) -> Result<DateTime<Utc>> {
    parse_utc(value).map_err(|source| {
        CoordError::malformed(
            token,
            ScopeFault::InvalidDate {
                value: value.to_string(),
                source,
            },
        )
    })
}

fn require_non_blank(value: &str, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoordError::InvalidArgument { name });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn malformed(err: CoordError) -> (String, ScopeFault) {
        match err {
            CoordError::MalformedScope { token, reason } => (token, reason),
            other => panic!("expected MalformedScope, got {other:?}"),
        }
    }

    #[test]
    fn parse_utc_accepts_canonical_format() {
        assert_eq!(parse_utc("2024-02-01T13:45Z").unwrap(), utc(2024, 2, 1, 13, 45));
    }

    #[test]
    fn parse_utc_rejects_other_formats() {
        assert!(parse_utc("2024-02-01").is_err());
        assert!(parse_utc("2024-02-01T13:45:00Z").is_err());
        assert!(parse_utc("2024-02-01T13:45").is_err());
        assert!(parse_utc("2024-13-01T00:00Z").is_err());
    }

    #[test]
    fn format_utc_inverts_parse_utc() {
        let ts = utc(2024, 2, 29, 23, 59);
        assert_eq!(format_utc(ts), "2024-02-29T23:59Z");
        assert_eq!(parse_utc(&format_utc(ts)).unwrap(), ts);
    }

    #[test]
    fn single_range() {
        let ranges = parse_scope("job-7", "2024-02-01T00:00Z::2024-02-02T00:00Z").unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start(), utc(2024, 2, 1, 0, 0));
        assert_eq!(ranges[0].end(), utc(2024, 2, 2, 0, 0));
    }

    #[test]
    fn multiple_ranges_keep_written_order_and_trim_whitespace() {
        let ranges = parse_scope(
            "job-7",
            " 2024-03-01T00:00Z :: 2024-03-02T00:00Z ,2024-01-01T00:00Z::2024-01-05T00:00Z",
        )
        .unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].start(), utc(2024, 3, 1, 0, 0));
        assert_eq!(ranges[1].end(), utc(2024, 1, 5, 0, 0));
    }

    #[test]
    fn equal_endpoints_are_a_valid_range() {
        let ranges = parse_scope("job-7", "2024-02-01T10:00Z::2024-02-01T10:00Z").unwrap();
        assert_eq!(ranges[0].start(), utc(2024, 2, 1, 10, 0));
        assert_eq!(ranges[0].end(), utc(2024, 2, 1, 10, 0));
    }

    #[test]
    fn blank_job_id_is_invalid_argument() {
        for job in ["", "   "] {
            let err = parse_scope(job, "abc").unwrap_err();
            assert!(
                matches!(err, CoordError::InvalidArgument { name: "jobId" }),
                "got {err:?}"
            );
        }
    }

    #[test]
    fn blank_scope_is_invalid_argument() {
        let err = parse_scope("job-7", " ").unwrap_err();
        assert!(matches!(err, CoordError::InvalidArgument { name: "scope" }));
    }

    #[test]
    fn token_without_separator_is_cited() {
        let err = parse_scope("job-7", "abc").unwrap_err();
        assert!(err.to_string().contains("'abc'"), "message: {err}");
        let (token, reason) = malformed(err);
        assert_eq!(token, "abc");
        assert!(matches!(reason, ScopeFault::MissingSeparator));
    }

    #[test]
    fn trailing_comma_leaves_an_empty_token() {
        let (token, reason) =
            malformed(parse_scope("job-7", "2024-02-01T00:00Z::2024-02-02T00:00Z,").unwrap_err());
        assert_eq!(token, "");
        assert!(matches!(reason, ScopeFault::MissingSeparator));
    }

    #[test]
    fn missing_side_of_separator() {
        for token in ["2024-02-01T00:00Z::", "::2024-02-01T00:00Z", "::", " :: "] {
            let (_, reason) = malformed(parse_range(token.trim()).unwrap_err());
            assert!(
                matches!(reason, ScopeFault::ExpectedTwoDates),
                "{token}: {reason:?}"
            );
        }
    }

    #[test]
    fn repeated_separator_is_malformed() {
        let scope = "2024-02-01T00:00Z::2024-02-02T00:00Z::2024-02-03T00:00Z";
        let (token, reason) = malformed(parse_scope("job-7", scope).unwrap_err());
        assert_eq!(token, scope);
        assert!(matches!(reason, ScopeFault::ExpectedTwoDates));
    }

    #[test]
    fn unparseable_date_embeds_value() {
        let (_, reason) =
            malformed(parse_scope("job-7", "2024-02-01T00:00Z::tomorrow").unwrap_err());
        match reason {
            ScopeFault::InvalidDate { value, .. } => assert_eq!(value, "tomorrow"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn start_after_end_names_both_instants() {
        let err = parse_scope("job-7", "2024-02-02T00:00Z::2024-02-01T00:00Z").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2024-02-02T00:00Z"), "message: {msg}");
        assert!(msg.contains("2024-02-01T00:00Z"), "message: {msg}");
        match malformed(err).1 {
            ScopeFault::StartAfterEnd { start, end } => {
                assert_eq!(start, utc(2024, 2, 2, 0, 0));
                assert_eq!(end, utc(2024, 2, 1, 0, 0));
            }
            other => panic!("expected StartAfterEnd, got {other:?}"),
        }
    }

    #[test]
    fn first_malformed_token_wins() {
        let (token, _) = malformed(
            parse_scope("job-7", "2024-02-01T00:00Z::2024-02-02T00:00Z,first,second::").unwrap_err(),
        );
        assert_eq!(token, "first");
    }
}
