//! Time related utils.

use chrono::NaiveDateTime;
use chrono::Utc;

use crate::Error;

/// DateTime in UTC, the only timezone signing works in.
pub type DateTime = chrono::DateTime<Utc>;

/// Take the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Date format: "20220313"
const DATE: &str = "%Y%m%d";

/// ISO 8601 basic format: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Format the 8-digit date-only form used in credential scope and key
/// derivation.
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format the full `x-amz-date` timestamp.
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse a `YYYYMMDD'T'HHMMSS'Z'` timestamp as supplied by callers.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, ISO8601)
        .map_err(|e| Error::context_invalid(format!("timestamp {s:?} is malformed")).with_source(e))?;
    Ok(t.and_utc())
}
