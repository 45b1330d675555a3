//! Normalization of loosely formatted zoning ratios.
//!
//! Parcel attribute tables carry coverage and floor-area ratios in whatever
//! form the source agency used: `0.6`, `60`, `"60%"`, `"250*"`, `" 1,200 "`.
//! Both conversions here are total: anything unparseable resolves to the
//! caller-supplied default.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// First signed decimal or exponential token in a string.
static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("number token pattern is valid")
});

/// Bare coverage values at or above this are read as whole-unit percentages ("60" is 60%).
/// Values between 1 and this threshold are over-unity ratios and clamp to 1.
/// A `%` suffix marks any value above 1 as a percentage; "0.5%" stays a ratio.
pub const COVERAGE_PERCENT_THRESHOLD: f64 = 2.0;

/// Floor-area ratios above this are read as percentages ("180" is 180%, "2.5" is 2.5x).
/// This is a policy choice for typical zoning tables, not a universal law:
/// a genuine multiplier above 10 cannot be expressed without a percent form.
pub const FLOOR_AREA_PERCENT_THRESHOLD: f64 = 10.0;

/// Parse the first number out of arbitrary text, ignoring thousands separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() { return None }

    NUMBER_TOKEN.find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Extract a number from a raw attribute value.
/// Strings are scanned for a numeric token; other non-numeric values yield `None`.
pub fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Whether a raw value is written with an explicit percent sign.
fn is_percent_text(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.contains('%'))
}

/// Normalize a site-coverage ratio into `[0, 1]`.
pub fn coverage_ratio(raw: Option<&Value>, default: f64) -> f64 {
    let parsed = raw.and_then(|value| {
        value_to_number(value).map(|v| (v, is_percent_text(value)))
    });

    let v = match parsed {
        Some((v, true)) if v > 1.0 => v / 100.0,
        Some((v, false)) if v >= COVERAGE_PERCENT_THRESHOLD => v / 100.0,
        Some((v, _)) => v,
        None if default >= COVERAGE_PERCENT_THRESHOLD => default / 100.0,
        None => default,
    };
    v.clamp(0.0, 1.0)
}

/// Normalize a floor-area ratio into `[0, ∞)`.
pub fn floor_area_ratio(raw: Option<&Value>, default: f64) -> f64 {
    let mut v = raw.and_then(value_to_number).unwrap_or(default);
    if v > FLOOR_AREA_PERCENT_THRESHOLD { v /= 100.0 }
    v.max(0.0)
}
