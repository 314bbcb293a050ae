//! Lenient readers for loosely-typed API payloads.
//!
//! The admin API mixes booleans with `0`/`1` and numeric ids with string ids,
//! so flags and ids are read with the same truthiness a browser client applies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null`, `false`, `0` and `""` are false; everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a field as a flag; a missing field is false.
pub fn field_is_truthy(body: &Value, field: &str) -> bool {
    body.get(field).is_some_and(is_truthy)
}

/// Renders an id as the string persisted in the session store.
pub fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Serde adapter for boolean fields that may arrive as `0`/`1`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}

/// Serde adapter for text fields the API may send as `null`; both `null`
/// and a missing field read as `""`.
pub fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter for integer ids that may arrive as numeric strings.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("id {n} is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("id `{s}` is not an integer"))),
        other => Err(serde::de::Error::custom(format!("unexpected id {other}"))),
    }
}
