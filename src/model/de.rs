//! Lenient deserializers for editor output
//!
//! The editor emits loosely typed JSON. A field of the wrong type is treated
//! the same as a missing one, so none of these ever fail.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Deepest array/object nesting accepted in a stored or submitted document
///
/// Well above anything an editor produces, and low enough that rendering and
/// dropping a tree stay within a thread's stack.
pub const MAX_NESTING: usize = 1024;

/// Parse JSON of any nesting depth
///
/// serde_json stops at 128 levels by default; here the limit is lifted and
/// the stack grows on demand instead.
pub fn from_slice_deep<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// How deeply arrays and objects nest in raw JSON text
///
/// Counts brackets outside of strings without building anything, so it is
/// safe to run on untrusted input before parsing.
pub fn nesting_depth(bytes: &[u8]) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for &b in bytes {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// How deeply arrays and objects nest in a parsed value
pub fn value_depth(value: &Value) -> usize {
    let mut max = 0;
    let mut stack = vec![(value, 0)];
    while let Some((value, depth)) = stack.pop() {
        match value {
            Value::Array(items) => {
                max = max.max(depth + 1);
                stack.extend(items.iter().map(|item| (item, depth + 1)));
            }
            Value::Object(map) => {
                max = max.max(depth + 1);
                stack.extend(map.values().map(|item| (item, depth + 1)));
            }
            _ => {}
        }
    }
    max
}

/// Deserialize `null` as the default value of `T`
pub fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Any non-string value becomes the empty string
pub fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Any non-string value becomes `None`
pub fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Integers, integral floats and numeric strings are all accepted
pub(crate) fn int_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    match map.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn object_field(map: &Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.get(key) {
        Some(Value::Object(attrs)) => attrs.clone(),
        _ => Map::new(),
    }
}

pub(crate) fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match map.get(key) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_field_shapes() {
        let map = json!({"a": 3, "b": 4.0, "c": "5", "d": 2.5, "e": true});
        let map = map.as_object().unwrap();
        assert_eq!(int_field(map, "a"), Some(3));
        assert_eq!(int_field(map, "b"), Some(4));
        assert_eq!(int_field(map, "c"), Some(5));
        assert_eq!(int_field(map, "d"), None);
        assert_eq!(int_field(map, "e"), None);
        assert_eq!(int_field(map, "missing"), None);
    }

    fn nested(depth: usize) -> String {
        let mut text = String::from("\"x\"");
        for _ in 0..depth {
            text = format!("{{\"content\": [{}]}}", text);
        }
        text
    }

    #[test]
    fn test_depths_agree() {
        let text = r#"{"a": [1, {"b": "[[[{"}], "c": "\"]"}"#;
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(nesting_depth(text.as_bytes()), 3);
        assert_eq!(value_depth(&value), 3);
        assert_eq!(nesting_depth(b"7"), 0);
        assert_eq!(value_depth(&json!(7)), 0);
    }

    #[test]
    fn test_from_slice_deep_past_default_limit() {
        let text = nested(300);
        assert!(serde_json::from_str::<Value>(&text).is_err());
        let value: Value = from_slice_deep(text.as_bytes()).unwrap();
        assert_eq!(value_depth(&value), 600);
        assert_eq!(nesting_depth(text.as_bytes()), 600);
    }

    #[test]
    fn test_from_slice_deep_rejects_trailing_data() {
        assert!(from_slice_deep::<Value>(b"{} {}").is_err());
    }

    #[test]
    fn test_array_field_wrong_type() {
        let map = json!({"content": "not an array"});
        assert!(array_field(map.as_object().unwrap(), "content").is_empty());
    }
}
