//! Lenient numeric input handling
//!
//! Numeric fields never fail to parse: malformed input, whether typed on the
//! command line or read from an imported file, becomes zero at the point of
//! entry.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Parse a user-entered amount, defaulting to zero when it is not a number
///
/// Accepts formats: "10.50", "-10.50", "$10.50", "1,250", " 7 "
pub fn parse_amount(input: &str) -> f64 {
    let s = input.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => 0.0,
    }
}

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl From<RawNumber> for f64 {
    fn from(raw: RawNumber) -> Self {
        match raw {
            RawNumber::Number(n) => finite_or_zero(n),
            RawNumber::Text(s) => parse_amount(&s),
            RawNumber::Other(_) => 0.0,
        }
    }
}

/// Deserialize any value as an `f64`, mapping non-numeric input to zero
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer).map(f64::from)
}

/// Deserialize any value as a non-negative whole count, mapping malformed input to zero
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(value.round().clamp(0.0, u32::MAX as f64) as u32)
}

/// Optional variant of [`lenient_f64`]; `null` stays absent
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(f64::from))
}

/// Optional variant of [`lenient_count`]; `null` stays absent
pub fn lenient_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.map(|value| value.round().clamp(0.0, u32::MAX as f64) as u32))
}
