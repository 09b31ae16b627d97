//! Display mappings: the renderer-neutral shape every command prints.
//!
//! Keys live in a `BTreeMap`, so iteration is already sorted by key string.
//! Lists keep insertion order here; renderers sort them on output.

use std::collections::BTreeMap;

use serde::Serialize;

/// Value stored under one key of a [`DisplayMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

/// Ordered mapping from label to value.
pub type DisplayMap = BTreeMap<String, DisplayValue>;

/// Anything a renderer can print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Displayable {
    Text(String),
    List(Vec<String>),
    Map(DisplayMap),
}

impl From<DisplayMap> for Displayable {
    fn from(map: DisplayMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<String>> for Displayable {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Build a map of text values, skipping entries whose value is `None`.
#[must_use]
pub fn text_map<'a>(entries: impl IntoIterator<Item = (&'a str, Option<String>)>) -> DisplayMap {
    entries
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), DisplayValue::Text(v))))
        .collect()
}
