//! Nested translation JSON → flat key map.

use indexmap::IndexMap;
use serde_json::Value;

/// Flatten a nested JSON object into a separator-joined key map.
///
/// Only string leaves are kept. Numbers, booleans, arrays and `null` are
/// dropped, as are properties with an empty name (their subtrees included).
/// A non-object root yields an empty map. Result order follows the source.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use translation_directory::flatten::flatten_json;
///
/// let json = json!({
///     "common": {
///         "hello": "Hello",
///         "count": 3
///     }
/// });
///
/// let flattened = flatten_json(&json, ".");
/// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
/// assert_eq!(flattened.len(), 1);
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str) -> IndexMap<String, String> {
    let mut result = IndexMap::new();
    if let Value::Object(map) = json {
        flatten_object(map, separator, None, &mut result);
    }
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_object(
    map: &serde_json::Map<String, Value>,
    separator: &str,
    prefix: Option<&str>,
    result: &mut IndexMap<String, String>,
) {
    for (key, value) in map {
        if key.is_empty() {
            continue;
        }
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match value {
            Value::String(s) => {
                result.insert(full_key, s.clone());
            }
            Value::Object(child) => flatten_object(child, separator, Some(&full_key), result),
            _ => {
                tracing::trace!(key = %full_key, "Dropping non-string translation value");
            }
        }
    }
}
