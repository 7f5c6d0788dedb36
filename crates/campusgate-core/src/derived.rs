//! Metrics and orderings derived from retrieved result sets.

use campusgate_store::Document;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Sentinel reported when a student has no attendance rows.
pub const NO_ATTENDANCE: &str = "--";

/// Overall attendance: a whole percentage, or `"--"` when nothing was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceOverall {
    Percent(u32),
    NoRecords,
}

impl Serialize for AttendanceOverall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Percent(p) => serializer.serialize_u32(*p),
            Self::NoRecords => serializer.serialize_str(NO_ATTENDANCE),
        }
    }
}

/// `round(100 * present / total)`, counting a row as present when its
/// `Status` equals "present" ignoring case.
pub fn overall_attendance(rows: &[Document]) -> AttendanceOverall {
    let total = rows.len();
    if total == 0 {
        return AttendanceOverall::NoRecords;
    }
    let present = rows
        .iter()
        .filter(|row| {
            row.get("Status")
                .and_then(Value::as_str)
                .is_some_and(|s| s.trim().eq_ignore_ascii_case("present"))
        })
        .count();
    let percent = (100.0 * present as f64 / total as f64).round() as u32;
    AttendanceOverall::Percent(percent)
}

/// Integer reading of a value stored as a number or numeric string.
/// Fractions truncate; anything unparseable reads as 0.
pub fn parse_lenient_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Stable ascending sort on the integer reading of `attribute`.
pub fn sort_by_numeric_key(documents: &mut [Document], attribute: &str) {
    documents.sort_by_key(|doc| parse_lenient_int(doc.get(attribute)));
}

/// Parses a date or timestamp attribute. Accepts `YYYY-MM-DD`, RFC 3339 and
/// naive `YYYY-MM-DDTHH:MM:SS` forms.
pub fn parse_timestamp(value: Option<&Value>) -> Option<NaiveDateTime> {
    let raw = value?.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Stable descending sort on a timestamp attribute. Unparseable or missing
/// timestamps sort last.
pub fn sort_newest_first(documents: &mut [Document], attribute: &str) {
    documents.sort_by(|a, b| {
        parse_timestamp(b.get(attribute)).cmp(&parse_timestamp(a.get(attribute)))
    });
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
