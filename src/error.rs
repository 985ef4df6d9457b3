//! Top-level error type for the node registry binary and server.

use crate::node::ports::NodeRegistryError;
use thiserror::Error;

/// Errors raised while configuring, starting or running the service.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Storage could not be reached or prepared.
    #[error("storage error: {0}")]
    Storage(#[from] NodeRegistryError),

    /// Socket or other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for service-level operations.
pub type Result<T> = std::result::Result<T, Error>;
