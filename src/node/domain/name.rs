//! Validated node display name.

use super::NodeDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a node name, matching the `VARCHAR(255)` column.
const MAX_NAME_LENGTH: usize = 255;

/// Free-form display label for a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Creates a validated node name.
    ///
    /// The value is kept exactly as supplied.
    ///
    /// # Errors
    ///
    /// Returns [`NodeDomainError::EmptyNodeName`] when the value is empty or
    /// whitespace only, or [`NodeDomainError::NodeNameTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, NodeDomainError> {
        let raw = value.into();

        if raw.trim().is_empty() {
            return Err(NodeDomainError::EmptyNodeName);
        }

        if raw.chars().count() > MAX_NAME_LENGTH {
            return Err(NodeDomainError::NodeNameTooLong(raw));
        }

        Ok(Self(raw))
    }

    /// Wraps a name read back from storage without validating it.
    ///
    /// Rows written by other tools may hold names that [`Self::new`] would
    /// reject; they are still returned as stored.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the node name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
