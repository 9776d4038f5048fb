//! Lenient deserializers.
//!
//! YAML written by hand is full of `key:` with no value and numbers where
//! strings are meant. These helpers turn `null` into the type's default and
//! scalars into their string form.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_yaml_ng::{Mapping, Value};

/// `null` or missing becomes `T::default()`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any scalar as a string; `null` as the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).map_err(serde::de::Error::custom)
}

/// Mapping of scalars as strings, keys included; `null` as an empty map.
pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(k, v)| {
            let k = scalar_to_string(k).map_err(serde::de::Error::custom)?;
            scalar_to_string(v)
                .map(|v| (k.clone(), v))
                .map_err(|e| serde::de::Error::custom(format!("{}: {}", k, e)))
        })
        .collect()
}

/// Sequence of scalars as strings. A single scalar becomes a one-element
/// list; `null` becomes empty.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .map(scalar_to_string)
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom),
        other => scalar_to_string(other)
            .map(|s| vec![s])
            .map_err(serde::de::Error::custom),
    }
}

/// Server `count`: `null` or missing means 1.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1))
}

fn scalar_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err("expected a scalar value, found a collection".to_string())
        }
    }
}
