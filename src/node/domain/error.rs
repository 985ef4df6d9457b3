//! Error types for node domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing node domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeDomainError {
    /// The node name is empty after trimming.
    #[error("node name must not be empty")]
    EmptyNodeName,

    /// The node name exceeds the 255-character storage limit.
    #[error("node name exceeds 255 character limit: {0}")]
    NodeNameTooLong(String),

    /// The fingerprint is empty or whitespace only.
    #[error("fingerprint must not be empty")]
    EmptyFingerprint,

    /// The fingerprint exceeds the 255-character storage limit.
    #[error("fingerprint exceeds 255 character limit: {0}")]
    FingerprintTooLong(String),

    /// Metadata was supplied as a JSON value other than an object.
    #[error("node metadata must be a JSON object, got {0}")]
    MetadataNotAnObject(String),
}

/// Error returned while parsing node status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown node status: {0}")]
pub struct ParseNodeStatusError(pub String);
