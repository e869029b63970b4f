//! Field tag parsing.
//!
//! A tag is the string attached to a record field with `#[pint("...")]`.
//! Its grammar is `name[,opt[:value]]*`:
//!
//! ```text
//! age,min:13,max:99
//! ^^^ ^^^^^^ ^^^^^^
//! name  options
//! ```
//!
//! The name may be empty (`,omitempty`), in which case the field's own
//! identifier is used. There is no escaping, so a literal comma or colon cannot
//! appear inside a name or value.

use std::collections::HashMap;

/// Option that marks a field as allowed to be absent.
pub const OMIT_EMPTY: &str = "omitempty";

/// Option naming the formatting handler to run before coercion.
pub const FORMAT: &str = "format";

/// Option holding the inclusive lower bound for numeric fields.
pub const MIN: &str = "min";

/// Option holding the inclusive upper bound for numeric fields.
pub const MAX: &str = "max";

/// Options parsed from the part of a tag after the first comma.
///
/// Keys without a value (such as `omitempty`) map to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    options: HashMap<String, String>,
}

impl TagOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an option is present, with or without a value.
    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    /// Get the value of an option if it is present.
    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    /// Number of distinct options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if no options were given.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over `(option, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, option: &str, value: &str) {
        self.options.insert(option.to_string(), value.to_string());
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for TagOptions {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (option, value) in iter {
            options.insert(option, value);
        }
        options
    }
}

/// Split a raw tag into its name and options.
///
/// # Example
///
/// ```rust
/// use pint::tag::parse_tag;
///
/// let (name, options) = parse_tag("age,min:13,omitempty");
/// assert_eq!(name, "age");
/// assert_eq!(options.get("min"), Some("13"));
/// assert!(options.contains("omitempty"));
/// ```
pub fn parse_tag(tag: &str) -> (String, TagOptions) {
    match tag.split_once(',') {
        Some((name, rest)) => (name.to_string(), parse_options(rest)),
        None => (tag.to_string(), TagOptions::new()),
    }
}

fn parse_options(options: &str) -> TagOptions {
    options
        .split(',')
        .map(|part| part.split_once(':').unwrap_or((part, "")))
        .collect()
}
