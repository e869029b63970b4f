//! Form value sources.
//!
//! The decoder never parses request bodies itself. It asks a [`FormSource`]
//! for one value per field name, and an empty string means the field is
//! absent. Adapt whatever your HTTP layer produces (parsed query strings,
//! decoded form bodies) to this trait.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// Single-value lookup of form fields by name.
pub trait FormSource {
    /// The value submitted under `name`, or the empty string if absent.
    fn value(&self, name: &str) -> String;
}

impl<S: BuildHasher> FormSource for HashMap<String, String, S> {
    fn value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl<S: BuildHasher> FormSource for HashMap<&str, &str, S> {
    fn value(&self, name: &str) -> String {
        self.get(name).map(|v| v.to_string()).unwrap_or_default()
    }
}

impl FormSource for BTreeMap<String, String> {
    fn value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// Ordered key/value pairs. The first pair with a matching key wins.
impl<K: AsRef<str>, V: AsRef<str>> FormSource for [(K, V)] {
    fn value(&self, name: &str) -> String {
        self.iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_ref().to_string())
            .unwrap_or_default()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FormSource for Vec<(K, V)> {
    fn value(&self, name: &str) -> String {
        self.as_slice().value(name)
    }
}

impl<T: FormSource + ?Sized> FormSource for &T {
    fn value(&self, name: &str) -> String {
        (**self).value(name)
    }
}

/// JSON object fields.
///
/// Strings are used verbatim and numbers and booleans are rendered as text.
/// Arrays read as a repeated key, so their first element is used. `null` and
/// nested objects read as absent.
impl FormSource for Map<String, Value> {
    fn value(&self, name: &str) -> String {
        self.get(name).map(json_scalar).unwrap_or_default()
    }
}

/// A JSON value; anything but an object has no fields.
impl FormSource for Value {
    fn value(&self, name: &str) -> String {
        match self {
            Value::Object(map) => map.value(name),
            _ => String::new(),
        }
    }
}

fn json_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.first().map(json_scalar).unwrap_or_default(),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// Adapts a lookup function into a [`FormSource`].
///
/// ```rust
/// use pint::{FnSource, FormSource};
///
/// let source = FnSource(|name: &str| if name == "user" { "ann".to_string() } else { String::new() });
/// assert_eq!(source.value("user"), "ann");
/// assert_eq!(source.value("other"), "");
/// ```
pub struct FnSource<F>(pub F);

impl<F> FormSource for FnSource<F>
where
    F: Fn(&str) -> String,
{
    fn value(&self, name: &str) -> String {
        (self.0)(name)
    }
}

/// Adapts a lookup function returning `Option` into a [`FormSource`];
/// `None` reads as absent.
pub struct OptionFnSource<F>(pub F);

impl<F> FormSource for OptionFnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn value(&self, name: &str) -> String {
        (self.0)(name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_sources() {
        let owned: HashMap<String, String> =
            [("a".to_string(), "1".to_string())].into_iter().collect();
        assert_eq!(owned.value("a"), "1");
        assert_eq!(owned.value("b"), "");

        let borrowed: HashMap<&str, &str> = [("a", "2")].into_iter().collect();
        assert_eq!(borrowed.value("a"), "2");
    }

    #[test]
    fn test_btree_map_source() {
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), "v".to_string());
        assert_eq!(map.value("k"), "v");
        assert_eq!(map.value("missing"), "");
    }

    #[test]
    fn test_pairs_first_match_wins() {
        let pairs = vec![("tag", "first"), ("tag", "second")];
        assert_eq!(pairs.value("tag"), "first");
        assert_eq!(pairs[..].value("none"), "");
    }

    #[test]
    fn test_option_fn_source() {
        let source = OptionFnSource(|name: &str| (name == "x").then(|| "y".to_string()));
        assert_eq!(source.value("x"), "y");
        assert_eq!(source.value("z"), "");
    }

    #[test]
    fn test_json_object_source() {
        let body = serde_json::json!({
            "name": "ann",
            "age": 30,
            "ratio": 0.5,
            "admin": true,
            "nick": null,
            "tags": ["first", "second"],
            "address": { "city": "Oslo" }
        });
        assert_eq!(body.value("name"), "ann");
        assert_eq!(body.value("age"), "30");
        assert_eq!(body.value("ratio"), "0.5");
        assert_eq!(body.value("admin"), "true");
        assert_eq!(body.value("nick"), "");
        assert_eq!(body.value("tags"), "first");
        assert_eq!(body.value("address"), "");
        assert_eq!(body.value("missing"), "");

        let Value::Object(map) = &body else { unreachable!() };
        assert_eq!(map.value("name"), "ann");
    }

    #[test]
    fn test_json_non_object_has_no_fields() {
        assert_eq!(serde_json::json!([1, 2]).value("0"), "");
        assert_eq!(Value::Null.value("x"), "");
    }

    #[test]
    fn test_reference_source() {
        let pairs = vec![("a".to_string(), "b".to_string())];
        let by_ref: &Vec<(String, String)> = &pairs;
        assert_eq!(FormSource::value(&by_ref, "a"), "b");
    }
}
