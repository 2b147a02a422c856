//! Lenient deserializers for lengths coming from hand-edited catalog feeds
//! and drag payloads, where `60`, `60.0` and `"60"` must all mean 60 cm.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a JSON number or numeric string as `f64`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Rounds a JSON length to whole grid units.
pub fn units<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from_value(&value)
        .map(|n| n.round() as i32)
        .ok_or_else(|| D::Error::custom(format!("expected a length, got {}", value)))
}

/// Like [`units`] but absent or `null` becomes `None`.
pub fn units_opt<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => number_from_value(&value)
            .map(|n| Some(n.round() as i32))
            .ok_or_else(|| D::Error::custom(format!("expected a length, got {}", value))),
    }
}

/// A list of lengths; entries that are not numbers are skipped.
pub fn units_vec<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .iter()
        .filter_map(number_from_value)
        .map(|n| n.round() as i32)
        .collect())
}

/// A list where `null` means empty.
pub fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A signed percentage; anything that is not a number reads as `None`.
pub fn percent_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }))
}
