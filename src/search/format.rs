//! Leaf value formatting
//!
//! Produces the raw and the human-readable rendering of a primitive JSON
//! value. Timestamps are rendered in UTC with a fixed policy, so output never
//! depends on the process locale or timezone.

use chrono::{DateTime, Datelike, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

/// Timestamps eligible for date formatting
/// Format: 2020-12-02T11:34:00.000Z
pub static ISO_TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$")
        .expect("Invalid ISO_TIMESTAMP_RE regex")
});

/// Naming conventions used when rendering timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPolicy {
    pub month_names: [&'static str; 12],
    /// Markers for the morning and afternoon halves of the 12-hour clock
    pub meridiem: [&'static str; 2],
    pub zone_label: &'static str,
}

impl FormatPolicy {
    pub const DEFAULT: FormatPolicy = FormatPolicy {
        month_names: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        meridiem: ["AM", "PM"],
        zone_label: "GMT",
    };

    /// Render as `Dec 2, 2020, 11:34:00 AM GMT`
    pub fn render_timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        let (is_pm, hour) = timestamp.hour12();
        format!(
            "{} {}, {:04}, {}:{:02}:{:02} {} {}",
            self.month_names[timestamp.month0() as usize],
            timestamp.day(),
            timestamp.year(),
            hour,
            timestamp.minute(),
            timestamp.second(),
            self.meridiem[usize::from(is_pm)],
            self.zone_label
        )
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Format a leaf value with the default policy, returning `(raw, formatted)`
pub fn format_value(value: Option<&Value>) -> (Option<String>, Option<String>) {
    format_value_with(value, &FormatPolicy::DEFAULT)
}

/// Format a leaf value, returning `(raw, formatted)`.
///
/// Absent values yield `(None, None)`; every present value yields both.
pub fn format_value_with(
    value: Option<&Value>,
    policy: &FormatPolicy,
) -> (Option<String>, Option<String>) {
    let Some(value) = value else {
        return (None, None);
    };

    match value {
        Value::String(s) => {
            let formatted = format_timestamp(s, policy).unwrap_or_else(|| s.clone());
            (Some(s.clone()), Some(formatted))
        }
        Value::Number(n) => {
            let s = format_number(n);
            (Some(s.clone()), Some(s))
        }
        Value::Bool(b) => (Some(b.to_string()), Some(b.to_string())),
        Value::Null => (Some("null".to_string()), Some("null".to_string())),
        // Containers are never formatted by the walker; coerce best-effort
        Value::Array(_) | Value::Object(_) => {
            let s = value.to_string();
            (Some(s.clone()), Some(s))
        }
    }
}

/// Minimal decimal representation: `10.0 -> "10"`, `76.45 -> "76.45"`
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // -0.0 prints as "-0"
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= EXPONENT_ABOVE || f.abs() < EXPONENT_BELOW => format_exponent(f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Magnitudes at or above this render in exponent form
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero magnitudes below this render in exponent form
const EXPONENT_BELOW: f64 = 1e-6;

/// `1.5e300 -> "1.5e+300"`, `1e-7 -> "1e-7"`
fn format_exponent(f: f64) -> String {
    let s = format!("{:e}", f);
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => s,
    }
}

/// Reformat an ISO-8601 UTC timestamp, or `None` if `s` is not one
pub fn format_timestamp(s: &str, policy: &FormatPolicy) -> Option<String> {
    if !ISO_TIMESTAMP_RE.is_match(s) {
        return None;
    }

    // Shape matched; the calendar fields may still be invalid (month 13, ...)
    let timestamp = DateTime::parse_from_rfc3339(s).ok()?.with_timezone(&Utc);
    // Leap seconds (`:60`) parse but would render as `:59`
    if timestamp.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(policy.render_timestamp(&timestamp))
}
