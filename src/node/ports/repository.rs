//! Repository port for node persistence.

use crate::node::domain::{Fingerprint, Node, NodeId, Reregistration};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for node registry operations.
pub type NodeRegistryResult<T> = Result<T, NodeRegistryError>;

/// Node registry persistence contract.
///
/// Every method runs as one atomic unit against the store: it either commits
/// completely or fails without side effects.
#[async_trait]
pub trait NodeRegistryRepository: Send + Sync {
    /// Stores a newly registered node and returns it as stored.
    ///
    /// The returned node carries the values the store kept, which may differ
    /// from the input where the store narrows them (timestamp precision).
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::DuplicateFingerprint`] when another node
    /// already holds the fingerprint, or [`NodeRegistryError::DuplicateNode`]
    /// when the identifier already exists.
    async fn insert(&self, node: &Node) -> NodeRegistryResult<Node>;

    /// Applies a repeat registration to the node holding `fingerprint`.
    ///
    /// The lookup, merge and write happen atomically, so concurrent
    /// re-registrations of the same fingerprint never lose each other's
    /// metadata keys. Returns the updated node as stored, or `None` when no
    /// node holds the fingerprint.
    async fn reregister(
        &self,
        fingerprint: &Fingerprint,
        reregistration: &Reregistration,
    ) -> NodeRegistryResult<Option<Node>>;

    /// Finds a node by identifier.
    ///
    /// Returns `None` when the node does not exist.
    async fn find_by_id(&self, id: NodeId) -> NodeRegistryResult<Option<Node>>;

    /// Finds a node by fingerprint.
    ///
    /// Returns `None` when no node has the given fingerprint.
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> NodeRegistryResult<Option<Node>>;

    /// Returns every node ordered by registration time, then identifier.
    async fn list_all(&self) -> NodeRegistryResult<Vec<Node>>;

    /// Permanently removes a node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::NotFound`] when the node does not exist.
    async fn delete(&self, id: NodeId) -> NodeRegistryResult<()>;
}

/// Errors returned by node registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NodeRegistryError {
    /// A node with the same identifier already exists.
    #[error("duplicate node identifier: {0}")]
    DuplicateNode(NodeId),

    /// A node with the same fingerprint already exists.
    #[error("duplicate node fingerprint: {0}")]
    DuplicateFingerprint(Fingerprint),

    /// The node was not found.
    #[error("node not found: {0}")]
    NotFound(NodeId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NodeRegistryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
