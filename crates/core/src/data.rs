//! Side-data bag attached to every tree node.
//!
//! The bag is an open `String -> serde_json::Value` map that carries
//! rendering hints from tree transforms to the serializer. Two keys have a
//! fixed meaning, mirroring the mdast-to-hast convention:
//!
//! - [`ELEMENT_NAME_KEY`] (`hName`): element to render the node as.
//! - [`PROPERTIES_KEY`] (`hProperties`): element properties, of which
//!   [`CLASS_NAME_KEY`] (`className`) holds the space-joined class list.
//!
//! Every other key is carried through untouched for caller-defined use.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the element name override.
pub const ELEMENT_NAME_KEY: &str = "hName";
/// Key holding the element properties object.
pub const PROPERTIES_KEY: &str = "hProperties";
/// Property key (inside [`PROPERTIES_KEY`]) holding class names.
pub const CLASS_NAME_KEY: &str = "className";

/// Open key-value map of rendering hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Data(Map<String, Value>);

impl Data {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag whose properties hold only the given class names.
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.set_class_name(class_name);
        data
    }

    /// Returns true when no key is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: every key of `other` overrides the same key of `self`.
    ///
    /// Nested objects are replaced, not merged.
    pub fn merge(mut self, other: Data) -> Data {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
        self
    }

    /// Element name override, if any.
    pub fn element_name(&self) -> Option<&str> {
        self.0.get(ELEMENT_NAME_KEY).and_then(Value::as_str)
    }

    /// Sets the element name override.
    pub fn set_element_name(&mut self, name: impl Into<String>) {
        self.0
            .insert(ELEMENT_NAME_KEY.to_string(), Value::String(name.into()));
    }

    /// Element properties object, if any.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get(PROPERTIES_KEY).and_then(Value::as_object)
    }

    /// Class names as a single space-joined string.
    ///
    /// Accepts both a string and a list of strings under `className`.
    pub fn class_name(&self) -> Option<String> {
        match self.properties()?.get(CLASS_NAME_KEY)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        }
    }

    /// Replaces the properties object with `{ className }`.
    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        let mut properties = Map::new();
        properties.insert(
            CLASS_NAME_KEY.to_string(),
            Value::String(class_name.into()),
        );
        self.0
            .insert(PROPERTIES_KEY.to_string(), Value::Object(properties));
    }
}

impl From<Map<String, Value>> for Data {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
