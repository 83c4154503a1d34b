//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `Attrs`: owned attribute map with convenient getters
//! - `parse_boolean`: lenient boolean parsing for catalog flags

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::BytesStart;

use crate::xml::errors::DeserializeError;

/// A parsed attribute map that owns decoded string values.
///
/// Use this instead of repeatedly iterating over `BytesStart::attributes()`
/// and calling `decode_and_unescape_value` for each attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    map: HashMap<String, String>,
    /// The element name for log messages
    element_name: String,
}

impl Attrs {
    /// Create an empty Attrs for an element built programmatically.
    pub fn empty(element_name: impl Into<String>) -> Self {
        Self {
            map: HashMap::new(),
            element_name: element_name.into(),
        }
    }

    /// Parse attributes from a `BytesStart` event.
    ///
    /// This decodes and unescapes all attribute values once, storing them in a HashMap.
    pub fn from_start<R: BufRead>(
        start: &BytesStart<'_>,
        reader: &Reader<R>,
    ) -> Result<Self, DeserializeError> {
        let element_name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut map = HashMap::new();

        for attr_result in start.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            map.insert(key, value);
        }

        Ok(Self { map, element_name })
    }

    /// Get the element name this Attrs was parsed from.
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Get an optional string attribute.
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// Get an optional string attribute as an owned String.
    pub fn get_opt_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    /// Get an optional bool attribute.
    ///
    /// Missing and unrecognised values both yield `None`.
    pub fn get_opt_bool(&self, key: &str) -> Option<bool> {
        self.get_opt(key).and_then(parse_boolean)
    }

    /// Get a bool attribute, falling back to `default` when missing or malformed.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_opt_bool(key).unwrap_or(default)
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }
}

/// Parse a catalog flag.
///
/// Recognizes "true"/"on"/"yes"/"1" and "false"/"off"/"no"/"0" (case-insensitive).
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
