//! Translation of service failures into HTTP responses.

use crate::node::{ports::NodeRegistryError, services::NodeRegistryServiceError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Fixed message for lookups and deletions of unknown nodes.
pub const NODE_NOT_FOUND: &str = "Node not found";

/// Error body shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// Failure returned from an HTTP handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No node matches the requested identifier.
    #[error("Node not found")]
    NotFound,

    /// The request body could not be parsed into the expected shape.
    #[error("{detail}")]
    MalformedBody {
        /// Status chosen by the JSON extractor (400, 415 or 422).
        status: StatusCode,
        /// Extractor message.
        detail: String,
    },

    /// The body parsed but failed domain validation.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness conflict survived the registration retry.
    #[error("{0}")]
    Conflict(String),

    /// Storage failure; details are logged, not returned.
    #[error("internal server error")]
    Internal,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<NodeRegistryServiceError> for ApiError {
    fn from(err: NodeRegistryServiceError) -> Self {
        match err {
            NodeRegistryServiceError::Domain(domain) => Self::Validation(domain.to_string()),
            NodeRegistryServiceError::Repository(NodeRegistryError::NotFound(_)) => Self::NotFound,
            NodeRegistryServiceError::Repository(
                conflict @ (NodeRegistryError::DuplicateFingerprint(_)
                | NodeRegistryError::DuplicateNode(_)),
            ) => Self::Conflict(conflict.to_string()),
            NodeRegistryServiceError::Repository(other) => {
                error!(error = %other, "node registry storage failure");
                Self::Internal
            }
        }
    }
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedBody { status, .. } => *status,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            Self::NotFound => NODE_NOT_FOUND.to_owned(),
            Self::Internal => "Internal server error".to_owned(),
            other => other.to_string(),
        };
        (self.status(), Json(ErrorBody { detail })).into_response()
    }
}
