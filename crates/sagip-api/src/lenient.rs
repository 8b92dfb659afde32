// Lenient field decoders for the PHP backend.
//
// The backend serializes straight from MySQL rows, so numbers arrive as
// JSON numbers or numeric strings depending on the driver, and missing
// coordinates show up as `null`, `""`, or `"0"`. These helpers accept all
// of those shapes and never fail the surrounding record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier as sent by the backend: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

fn parse_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Non-negative count; anything unparseable or negative decodes as 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = match &value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(f64_to_u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(f64_to_u64))
        }
        _ => None,
    };
    Ok(n.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn f64_to_u64(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.trunc() as u64
    } else {
        0
    }
}

/// Optional decimal; `null`, `""`, and garbage decode as `None`.
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_f64(&value))
}

/// Optional text; numbers are stringified, blank strings become `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Required text that tolerates `null` (decodes as empty).
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::count")]
        n: u32,
        #[serde(default, deserialize_with = "super::optional_f64")]
        x: Option<f64>,
        #[serde(default, deserialize_with = "super::optional_string")]
        s: Option<String>,
    }

    fn probe(v: serde_json::Value) -> Probe {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn counts_accept_numbers_and_strings() {
        assert_eq!(probe(json!({"n": 50})).n, 50);
        assert_eq!(probe(json!({"n": "50"})).n, 50);
        assert_eq!(probe(json!({"n": " 12 "})).n, 12);
        assert_eq!(probe(json!({"n": "12.0"})).n, 12);
    }

    #[test]
    fn bad_counts_decode_as_zero() {
        assert_eq!(probe(json!({"n": null})).n, 0);
        assert_eq!(probe(json!({"n": "n/a"})).n, 0);
        assert_eq!(probe(json!({"n": -4})).n, 0);
        assert_eq!(probe(json!({})).n, 0);
    }

    #[test]
    fn coordinates_tolerate_blank_and_null() {
        assert_eq!(probe(json!({"x": "14.17"})).x, Some(14.17));
        assert_eq!(probe(json!({"x": 121.24})).x, Some(121.24));
        assert_eq!(probe(json!({"x": ""})).x, None);
        assert_eq!(probe(json!({"x": null})).x, None);
    }

    #[test]
    fn strings_stringify_numbers() {
        assert_eq!(probe(json!({"s": 639_171_234_567_i64})).s.as_deref(), Some("639171234567"));
        assert_eq!(probe(json!({"s": "  "})).s, None);
    }
}
