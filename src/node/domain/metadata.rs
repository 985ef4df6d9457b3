//! Free-form node metadata.

use super::NodeDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open mapping from string keys to arbitrary JSON values.
///
/// Stored as JSONB so callers can attach any descriptive data without schema
/// changes. Absence is always represented as an empty mapping, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeMetadata(Map<String, Value>);

impl NodeMetadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds metadata from a JSON value.
    ///
    /// `null` is treated as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`NodeDomainError::MetadataNotAnObject`] for any value that is
    /// neither an object nor `null`.
    pub fn from_value(value: Value) -> Result<Self, NodeDomainError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(entries) => Ok(Self(entries)),
            other => Err(NodeDomainError::MetadataNotAnObject(other.to_string())),
        }
    }

    /// Sets a single entry, returning the updated metadata.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Shallow-merges `patch` into this mapping.
    ///
    /// Keys in `patch` are added or overwritten; keys absent from `patch` are
    /// preserved. Nested objects are replaced wholesale, not merged.
    pub fn merge(&mut self, patch: &Self) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the metadata as a JSON object value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for NodeMetadata {
    fn from(entries: Map<String, Value>) -> Self {
        Self(entries)
    }
}
