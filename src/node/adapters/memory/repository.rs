//! In-memory node registry used by tests and the `memory` storage backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::node::{
    domain::{Fingerprint, Node, NodeId, Reregistration},
    ports::{NodeRegistryError, NodeRegistryRepository, NodeRegistryResult},
};

/// Thread-safe in-memory node registry repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNodeRegistry {
    state: Arc<RwLock<InMemoryRegistryState>>,
}

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    nodes: HashMap<NodeId, Node>,
    fingerprint_index: HashMap<Fingerprint, NodeId>,
}

impl InMemoryNodeRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> NodeRegistryResult<RwLockReadGuard<'_, InMemoryRegistryState>> {
        self.state
            .read()
            .map_err(|err| NodeRegistryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> NodeRegistryResult<RwLockWriteGuard<'_, InMemoryRegistryState>> {
        self.state
            .write()
            .map_err(|err| NodeRegistryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl NodeRegistryRepository for InMemoryNodeRegistry {
    async fn insert(&self, node: &Node) -> NodeRegistryResult<Node> {
        let mut state = self.write()?;

        if state.nodes.contains_key(&node.id()) {
            return Err(NodeRegistryError::DuplicateNode(node.id()));
        }

        if state.fingerprint_index.contains_key(node.fingerprint()) {
            return Err(NodeRegistryError::DuplicateFingerprint(
                node.fingerprint().clone(),
            ));
        }

        state
            .fingerprint_index
            .insert(node.fingerprint().clone(), node.id());
        state.nodes.insert(node.id(), node.clone());
        Ok(node.clone())
    }

    async fn reregister(
        &self,
        fingerprint: &Fingerprint,
        reregistration: &Reregistration,
    ) -> NodeRegistryResult<Option<Node>> {
        let mut guard = self.write()?;
        let state = &mut *guard;

        let Some(id) = state.fingerprint_index.get(fingerprint) else {
            return Ok(None);
        };
        let Some(node) = state.nodes.get_mut(id) else {
            return Ok(None);
        };

        node.reregister(reregistration);
        Ok(Some(node.clone()))
    }

    async fn find_by_id(&self, id: NodeId) -> NodeRegistryResult<Option<Node>> {
        let state = self.read()?;
        Ok(state.nodes.get(&id).cloned())
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> NodeRegistryResult<Option<Node>> {
        let state = self.read()?;
        let node = state
            .fingerprint_index
            .get(fingerprint)
            .and_then(|id| state.nodes.get(id))
            .cloned();
        Ok(node)
    }

    async fn list_all(&self) -> NodeRegistryResult<Vec<Node>> {
        let state = self.read()?;
        let mut nodes: Vec<Node> = state.nodes.values().cloned().collect();
        nodes.sort_by_key(|node| (node.registered_at(), node.id()));
        Ok(nodes)
    }

    async fn delete(&self, id: NodeId) -> NodeRegistryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .nodes
            .remove(&id)
            .ok_or(NodeRegistryError::NotFound(id))?;
        state.fingerprint_index.remove(removed.fingerprint());
        Ok(())
    }
}
