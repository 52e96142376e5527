//! Generic events as carried by the event bus.
//!
//! A [`GenericEvent`] is a topic plus a flat map of named [`PropertyValue`]s.
//! It knows nothing about distribution; see
//! [`DistributionEvent`](super::DistributionEvent) for the typed view.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat property map of a generic event.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value.
///
/// Serialized untagged, so a property map reads as plain JSON:
/// `{"distribution.type": "ADD", "distribution.paths": ["/a"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A string.
    String(String),
    /// An ordered list of strings.
    StringArray(Vec<String>),
    /// A 64-bit integer, e.g. a timestamp.
    Long(i64),
    /// A flag.
    Boolean(bool),
}

impl PropertyValue {
    /// Returns a short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::StringArray(_) => "string array",
            PropertyValue::Long(_) => "long",
            PropertyValue::Boolean(_) => "boolean",
        }
    }

    /// Returns the string if this is a [`PropertyValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the strings if this is a [`PropertyValue::StringArray`].
    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StringArray(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`PropertyValue::Long`].
    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::StringArray(values) => write!(f, "[{}]", values.join(", ")),
            PropertyValue::Long(value) => write!(f, "{value}"),
            PropertyValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::StringArray(values)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

/// A topic plus a flat property map, the unit of exchange on the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericEvent {
    topic: String,
    #[serde(default)]
    properties: Properties,
}

impl GenericEvent {
    /// Creates an event without properties.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            properties: Properties::new(),
        }
    }

    /// Creates an event with the given properties.
    pub fn with_properties(topic: impl Into<String>, properties: Properties) -> Self {
        Self {
            topic: topic.into(),
            properties,
        }
    }

    /// Adds or replaces a property (builder pattern).
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Adds or replaces a property.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Returns the topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Returns `true` if the property is present.
    pub fn contains_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Returns the property names in sorted order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns all properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Consumes the event, returning its properties.
    pub fn into_properties(self) -> Properties {
        self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_access() {
        let event = GenericEvent::new("a/b")
            .with_property("name", "value")
            .with_property("count", 3i64)
            .with_property("paths", vec!["/x".to_string()]);

        assert_eq!(event.topic(), "a/b");
        assert_eq!(event.property("name").and_then(PropertyValue::as_str), Some("value"));
        assert_eq!(event.property("count").and_then(PropertyValue::as_long), Some(3));
        assert_eq!(
            event.property("paths").and_then(PropertyValue::as_string_array),
            Some(&["/x".to_string()][..])
        );
        assert!(!event.contains_property("missing"));
        assert_eq!(
            event.property_names().collect::<Vec<_>>(),
            vec!["count", "name", "paths"]
        );
    }

    #[test]
    fn test_json_shape() {
        let event = GenericEvent::new("a/b")
            .with_property("flag", true)
            .with_property("paths", vec!["/x".to_string(), "/y".to_string()]);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "a/b",
                "properties": { "flag": true, "paths": ["/x", "/y"] }
            })
        );

        let back: GenericEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_display_values() {
        assert_eq!(PropertyValue::from("x").to_string(), "x");
        assert_eq!(PropertyValue::Long(42).to_string(), "42");
        assert_eq!(
            PropertyValue::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
    }
}
