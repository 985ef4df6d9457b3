//! Node fingerprint, the natural key for registration.

use super::NodeDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a fingerprint, matching the `VARCHAR(255)` column.
const MAX_FINGERPRINT_LENGTH: usize = 255;

/// Caller-supplied key identifying a physical or logical node.
///
/// Fingerprints are compared by exact match, so the value is kept verbatim:
/// no trimming and no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Creates a validated fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`NodeDomainError::EmptyFingerprint`] when the value is empty or
    /// whitespace only, or [`NodeDomainError::FingerprintTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, NodeDomainError> {
        let raw = value.into();

        if raw.trim().is_empty() {
            return Err(NodeDomainError::EmptyFingerprint);
        }

        if raw.chars().count() > MAX_FINGERPRINT_LENGTH {
            return Err(NodeDomainError::FingerprintTooLong(raw));
        }

        Ok(Self(raw))
    }

    /// Wraps a fingerprint read back from storage without validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
