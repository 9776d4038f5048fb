//! Raw YAML document editing.
//!
//! Backs `credentials set`: load the whole document, walk a dot path creating
//! intermediate maps, set the leaf, and serialize everything again. List
//! indices are not supported; every segment is a map key.

use serde_yaml_ng::{Mapping, Value};

use crate::error::ConfigError;

type Result<T> = std::result::Result<T, ConfigError>;

/// Decode a YAML document. An empty document decodes to `Null`.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_yaml_ng::from_slice(bytes).map_err(ConfigError::Parse)
}

/// Encode a YAML document.
pub fn encode(doc: &Value) -> Result<Vec<u8>> {
    serde_yaml_ng::to_string(doc)
        .map(String::into_bytes)
        .map_err(ConfigError::Serialize)
}

/// Interpret a command-line value as a YAML scalar.
///
/// `true`, `42` and `1.5` become bool and numbers; anything that would parse
/// as a collection, or not at all, stays a plain string. Quote a value to
/// force a string: `'"42"'`.
pub fn parse_scalar(raw: &str) -> Value {
    match serde_yaml_ng::from_str::<Value>(raw) {
        Ok(v @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => v,
        Ok(Value::Null) if raw.trim().is_empty() => Value::String(String::new()),
        Ok(Value::Null) => Value::Null,
        _ => Value::String(raw.to_string()),
    }
}

fn segments(path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if path.trim().is_empty() || parts.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

/// Set `path` to `value`, creating intermediate maps as needed.
///
/// # Errors
///
/// `InvalidPath` for empty segments, `PathConflict` when an existing
/// intermediate value is not a map.
pub fn set_path(doc: &mut Value, path: &str, value: Value) -> Result<()> {
    let parts = segments(path)?;
    let (leaf, parents) = parts
        .split_last()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_string()))?;

    let mut current = doc;
    for (depth, segment) in parents.iter().enumerate() {
        let map = as_mapping(current, path, &parts[..depth])?;
        current = map
            .entry(Value::String(segment.to_string()))
            .or_insert(Value::Null);
    }

    let map = as_mapping(current, path, parents)?;
    map.insert(Value::String(leaf.to_string()), value);
    Ok(())
}

/// Look up `path`, if every segment exists.
pub fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path).ok()?;
    parts
        .into_iter()
        .try_fold(doc, |current, segment| current.as_mapping()?.get(segment))
}

/// Turn `Null` into an empty map, then borrow the map.
fn as_mapping<'a>(value: &'a mut Value, path: &str, at: &[&str]) -> Result<&'a mut Mapping> {
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    match value {
        Value::Mapping(map) => Ok(map),
        _ => Err(ConfigError::PathConflict {
            path: path.to_string(),
            segment: if at.is_empty() {
                "(root)".to_string()
            } else {
                at.join(".")
            },
        }),
    }
}

/// Decode, set one value, and re-encode a whole document.
pub fn set_value(yaml: &[u8], path: &str, raw: &str) -> Result<Vec<u8>> {
    let mut doc = decode(yaml)?;
    set_path(&mut doc, path, parse_scalar(raw))?;
    encode(&doc)
}
