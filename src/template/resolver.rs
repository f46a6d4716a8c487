//! Attribute bindings for fragment templates

use std::collections::HashMap;
use std::fmt::Display;

use serde::Serialize;

/// Named attribute values bound into a fragment template.
///
/// Every value is text. An absent optional value is bound as the empty
/// string, which `{{#if name}}` treats as false.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Create an empty set of bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value
    pub fn with(mut self, name: &str, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind a value, or the empty string when there is none
    pub fn with_opt<V: Display>(mut self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.insert(name, v),
            None => self.insert(name, ""),
        }
        self
    }

    fn insert(&mut self, name: &str, value: impl Display) {
        self.values.insert(name.to_string(), value.to_string());
    }
}
