//! Request and response bodies.

use crate::node::{
    domain::{Node, NodeMetadata, NodeStatus},
    services::RegisterNodeRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterNodeBody {
    /// Display name for a new node.
    pub name: String,
    /// Unique node fingerprint.
    pub fingerprint: String,
    /// Optional metadata; `null` and absence both mean "no metadata".
    #[serde(default)]
    pub metadata: Option<NodeMetadata>,
}

impl From<RegisterNodeBody> for RegisterNodeRequest {
    fn from(body: RegisterNodeBody) -> Self {
        Self::new(body.name, body.fingerprint).with_metadata(body.metadata.unwrap_or_default())
    }
}

/// Wire representation of a node.
///
/// The stored column is `node_metadata`; on the wire the field is always
/// `metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeResponse {
    /// Node identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique fingerprint.
    pub fingerprint: String,
    /// Lifecycle status.
    pub status: NodeStatus,
    /// Creation timestamp.
    pub registered_at: DateTime<Utc>,
    /// Latest sighting timestamp.
    pub last_seen: DateTime<Utc>,
    /// Free-form metadata, never `null`.
    pub metadata: NodeMetadata,
}

impl From<&Node> for NodeResponse {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().into_inner(),
            name: node.name().as_str().to_owned(),
            fingerprint: node.fingerprint().as_str().to_owned(),
            status: node.status(),
            registered_at: node.registered_at(),
            last_seen: node.last_seen(),
            metadata: node.metadata().clone(),
        }
    }
}

/// Acknowledgement returned by `DELETE /{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Always `"deleted"`.
    pub status: String,
}

impl DeletedResponse {
    /// Builds the deletion acknowledgement.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_owned(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
}
