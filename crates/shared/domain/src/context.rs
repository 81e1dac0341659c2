//! Diagnostic key/value maps and how nested scopes combine them.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Insertion-ordered diagnostic map attached to records.
pub type ContextMap = Map<String, Value>;

/// Combines an enclosing scope's map with an inner one.
///
/// Every key of `inner` wins, including when both values are maps: nested maps
/// are replaced wholesale, never unioned. Keys only present in `outer` keep
/// their position; new keys from `inner` are appended in their own order.
/// Neither input is modified.
///
/// ```rust
/// use errata_domain::merge;
/// use serde_json::json;
///
/// let outer = json!({ "a": { "x": 1 }, "b": 2 }).as_object().cloned().unwrap();
/// let inner = json!({ "a": { "y": 2 } }).as_object().cloned().unwrap();
///
/// let merged = merge(&outer, &inner);
/// assert_eq!(merged["a"], json!({ "y": 2 }));
/// assert_eq!(merged["b"], json!(2));
/// ```
#[must_use]
pub fn merge(outer: &ContextMap, inner: &ContextMap) -> ContextMap {
    let mut merged = outer.clone();
    for (key, value) in inner {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Renders a context or detail value for humans.
///
/// Strings are shown without quotes; everything else uses its JSON form.
#[must_use]
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ContextMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn inner_replaces_nested_maps() {
        let merged = merge(&map(json!({ "a": { "x": 1 } })), &map(json!({ "a": { "y": 2 } })));
        assert_eq!(Value::Object(merged), json!({ "a": { "y": 2 } }));
    }

    #[test]
    fn outer_only_keys_are_kept_in_place() {
        let outer = map(json!({ "first": 1, "shared": "outer", "last": 3 }));
        let inner = map(json!({ "shared": "inner", "extra": true }));

        let merged = merge(&outer, &inner);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "shared", "last", "extra"]);
        assert_eq!(merged["shared"], json!("inner"));
    }

    #[test]
    fn inputs_are_untouched() {
        let outer = map(json!({ "k": 1 }));
        let inner = map(json!({ "k": 2 }));
        let _ = merge(&outer, &inner);
        assert_eq!(outer["k"], json!(1));
        assert_eq!(inner["k"], json!(2));
    }

    #[test]
    fn display_degrades_gracefully() {
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!([1, "two"])), r#"[1,"two"]"#);
        assert_eq!(display_value(&json!({ "n": 1.5 })), r#"{"n":1.5}"#);
    }
}
