//! Extracted attribute storage and the required-attribute set

use std::collections::BTreeSet;

/// Attributes required for a page to count as valid unless overridden
pub const DEFAULT_REQUIRED: [&str; 4] = ["title", "type", "image", "url"];

/// Insertion-ordered map of attribute key to extracted value.
///
/// A key with a `None` value was looked for by a scraper that found nothing.
/// That still counts as present; only a missing key means "never extracted".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, Option<String>)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored under `key`; `None` when unset or set to nothing
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).and_then(|v| v.as_deref())
    }

    /// Raw entry lookup, distinguishing "absent" from "present but empty"
    pub fn entry(&self, key: &str) -> Option<&Option<String>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Set of attribute keys a page must provide to be valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredAttrs(BTreeSet<String>);

impl RequiredAttrs {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Required keys not present in `items`
    pub fn missing_from<'a>(&'a self, items: &AttributeMap) -> Vec<&'a str> {
        self.iter().filter(|key| !items.contains_key(key)).collect()
    }

    /// Whether every required key is present in `items`, regardless of value
    pub fn is_satisfied_by(&self, items: &AttributeMap) -> bool {
        self.iter().all(|key| items.contains_key(key))
    }
}

impl Default for RequiredAttrs {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED)
    }
}

impl<S: Into<String>> FromIterator<S> for RequiredAttrs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
