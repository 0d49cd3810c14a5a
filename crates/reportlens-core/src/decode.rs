//! Field-level deserializers for loosely typed producer output.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(v @ (Value::Number(_) | Value::String(_))) => {
            Ok(number_from_value(&v).map(finite_or_zero).unwrap_or(0.0))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a number, found {}",
            value_kind(&other)
        ))),
    }
}

pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v @ (Value::Number(_) | Value::String(_))) => {
            Ok(number_from_value(&v).filter(|n| n.is_finite()))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a number, found {}",
            value_kind(&other)
        ))),
    }
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0)),
        Some(Value::String(s)) => Ok(s.trim().parse::<i64>().unwrap_or(0)),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            value_kind(&other)
        ))),
    }
}

fn lenient_string<'de, D>(deserializer: D, when_null: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(when_null.to_string()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            value_kind(&other)
        ))),
    }
}

pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer, "")
}

pub(crate) fn string_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer, crate::model::UNKNOWN)
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Role-to-fields map. Null, absent and an empty array all decode as no roles; AI-generated
/// pages emit `[]` when told to drop projections.
pub(crate) fn projection_map<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(IndexMap::new()),
        Some(Value::Array(items)) if items.is_empty() => Ok(IndexMap::new()),
        Some(v @ Value::Object(_)) => serde_json::from_value(v).map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!(
            "expected a map of projection roles, found {}",
            value_kind(&other)
        ))),
    }
}
