//! Normalization of human-readable view counts.
//!
//! The catalog stores views the way the site displays them ("1.2K", "3M",
//! plain "500", or a bare number). Ranking needs a single integer scale.
//! Normalization is total: anything unparseable counts as zero.

use serde_json::Value;

use crate::catalog::TextOrNumber;

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

/// Normalize an optional `views` field to an integer count.
pub fn normalize_views(views: Option<&TextOrNumber>) -> u64 {
    match views {
        None => 0,
        Some(TextOrNumber::Number(n)) => clamp_count(n.as_f64().unwrap_or(0.0)),
        Some(TextOrNumber::Text(s)) => parse_abbreviated(s),
    }
}

/// Normalize a raw JSON `views` value. Used by the filter layer, where
/// items arrive as untyped values.
pub fn normalize_views_value(views: Option<&Value>) -> u64 {
    match views {
        Some(Value::Number(n)) => clamp_count(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => parse_abbreviated(s),
        _ => 0,
    }
}

/// Parse an abbreviated count string. A trailing `K` or `M` (case-sensitive)
/// scales a decimal prefix; anything else keeps only its digits.
fn parse_abbreviated(s: &str) -> u64 {
    let s = s.trim();
    if let Some(prefix) = s.strip_suffix('K') {
        scaled(prefix, THOUSAND)
    } else if let Some(prefix) = s.strip_suffix('M') {
        scaled(prefix, MILLION)
    } else {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }
}

fn scaled(prefix: &str, factor: f64) -> u64 {
    match prefix.trim().parse::<f64>() {
        Ok(n) => clamp_count(n * factor),
        Err(_) => 0,
    }
}

fn clamp_count(n: f64) -> u64 {
    if n.is_finite() && n > 0.0 {
        n as u64
    } else {
        0
    }
}
