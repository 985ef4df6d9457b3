//! Service layer for node registration and lookup.
//!
//! Provides [`NodeRegistryService`] which coordinates fingerprint-keyed
//! registration, listing, lookup and removal of nodes.

use crate::node::{
    domain::{Fingerprint, Node, NodeDomainError, NodeId, NodeMetadata, NodeName, Reregistration},
    ports::{NodeRegistryError, NodeRegistryRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for registering a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNodeRequest {
    name: String,
    fingerprint: String,
    metadata: NodeMetadata,
}

impl RegisterNodeRequest {
    /// Creates a request with empty metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingerprint: fingerprint.into(),
            metadata: NodeMetadata::new(),
        }
    }

    /// Sets the metadata supplied with the registration.
    #[must_use]
    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Service-level errors for node registry operations.
#[derive(Debug, Error)]
pub enum NodeRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] NodeDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NodeRegistryError),
}

impl NodeRegistryServiceError {
    /// Returns whether the error means the requested node does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(NodeRegistryError::NotFound(_)))
    }
}

/// Result type for node registry service operations.
pub type NodeRegistryServiceResult<T> = Result<T, NodeRegistryServiceError>;

/// Node registration and lookup orchestration service.
pub struct NodeRegistryService<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for NodeRegistryService<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> NodeRegistryService<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new node registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a node, or refreshes it when the fingerprint is known.
    ///
    /// A known fingerprint is marked active, its `last_seen` moves forward and
    /// the supplied metadata is shallow-merged into the stored mapping. The
    /// stored name is kept. An unknown fingerprint creates a new node.
    ///
    /// When a concurrent registration inserts the same fingerprint between
    /// the lookup and the insert, the insert is retried once as a
    /// re-registration so the caller still receives the single stored node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryServiceError`] when input validation fails or
    /// the repository rejects persistence.
    pub async fn register(&self, request: RegisterNodeRequest) -> NodeRegistryServiceResult<Node> {
        let RegisterNodeRequest {
            name,
            fingerprint,
            metadata,
        } = request;

        let node_name = NodeName::new(name)?;
        let node_fingerprint = Fingerprint::new(fingerprint)?;

        let reregistration = Reregistration::new(metadata.clone(), &*self.clock);
        if let Some(existing) = self
            .repository
            .reregister(&node_fingerprint, &reregistration)
            .await?
        {
            debug!(node_id = %existing.id(), fingerprint = %node_fingerprint, "node re-registered");
            return Ok(existing);
        }

        let node = Node::register(node_name, node_fingerprint, metadata, &*self.clock);
        match self.repository.insert(&node).await {
            Ok(stored) => {
                info!(node_id = %stored.id(), fingerprint = %stored.fingerprint(), "node registered");
                Ok(stored)
            }
            Err(NodeRegistryError::DuplicateFingerprint(taken)) => {
                warn!(fingerprint = %taken, "concurrent registration detected, merging instead");
                self.repository
                    .reregister(&taken, &reregistration)
                    .await?
                    .ok_or_else(|| NodeRegistryError::DuplicateFingerprint(taken).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns every registered node ordered by registration time.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list(&self) -> NodeRegistryServiceResult<Vec<Node>> {
        Ok(self.repository.list_all().await?)
    }

    /// Finds a node by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::NotFound`] (wrapped) when no node has the
    /// identifier, or [`NodeRegistryServiceError::Repository`] when
    /// persistence lookup fails.
    pub async fn get(&self, id: NodeId) -> NodeRegistryServiceResult<Node> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| NodeRegistryError::NotFound(id).into())
    }

    /// Finds a node by fingerprint.
    ///
    /// Returns `Ok(None)` when no node holds the fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryServiceError::Domain`] when the fingerprint
    /// fails validation, or [`NodeRegistryServiceError::Repository`] when
    /// persistence lookup fails.
    pub async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> NodeRegistryServiceResult<Option<Node>> {
        let node_fingerprint = Fingerprint::new(fingerprint)?;
        Ok(self
            .repository
            .find_by_fingerprint(&node_fingerprint)
            .await?)
    }

    /// Permanently deletes a node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::NotFound`] (wrapped) when no node has the
    /// identifier, or [`NodeRegistryServiceError::Repository`] when
    /// persistence fails.
    pub async fn delete(&self, id: NodeId) -> NodeRegistryServiceResult<()> {
        self.repository.delete(id).await?;
        info!(node_id = %id, "node deleted");
        Ok(())
    }
}
