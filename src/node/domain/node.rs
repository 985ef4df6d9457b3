//! Node aggregate root.

use super::{Fingerprint, NodeId, NodeMetadata, NodeName, NodeStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered node aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    name: NodeName,
    fingerprint: Fingerprint,
    status: NodeStatus,
    registered_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    metadata: NodeMetadata,
}

/// Parameter object for reconstructing a persisted node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNodeData {
    /// Persisted node identifier.
    pub id: NodeId,
    /// Persisted display name.
    pub name: NodeName,
    /// Persisted fingerprint.
    pub fingerprint: Fingerprint,
    /// Persisted lifecycle status.
    pub status: NodeStatus,
    /// Persisted creation timestamp.
    pub registered_at: DateTime<Utc>,
    /// Persisted latest sighting timestamp.
    pub last_seen: DateTime<Utc>,
    /// Persisted metadata.
    pub metadata: NodeMetadata,
}

/// A repeat registration observed for an already known fingerprint.
///
/// Carries the metadata patch and the moment the node was seen so the merge
/// can be applied inside a storage transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reregistration {
    metadata: NodeMetadata,
    seen_at: DateTime<Utc>,
}

impl Reregistration {
    /// Captures a re-registration at the current clock time.
    #[must_use]
    pub fn new(metadata: NodeMetadata, clock: &impl Clock) -> Self {
        Self {
            metadata,
            seen_at: clock.utc(),
        }
    }

    /// Returns the metadata patch.
    #[must_use]
    pub const fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    /// Returns the observation timestamp.
    #[must_use]
    pub const fn seen_at(&self) -> DateTime<Utc> {
        self.seen_at
    }
}

impl Node {
    /// Creates a freshly registered node with `Active` status.
    ///
    /// `registered_at` and `last_seen` are both set to the current clock time.
    #[must_use]
    pub fn register(
        name: NodeName,
        fingerprint: Fingerprint,
        metadata: NodeMetadata,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: NodeId::new(),
            name,
            fingerprint,
            status: NodeStatus::Active,
            registered_at: timestamp,
            last_seen: timestamp,
            metadata,
        }
    }

    /// Reconstructs a node from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNodeData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            fingerprint: data.fingerprint,
            status: data.status,
            registered_at: data.registered_at,
            last_seen: data.last_seen,
            metadata: data.metadata,
        }
    }

    /// Returns the node identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &NodeName {
        &self.name
    }

    /// Returns the fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> NodeStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the latest sighting timestamp.
    #[must_use]
    pub const fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    /// Applies a repeat registration.
    ///
    /// Marks the node active, shallow-merges the metadata patch and moves
    /// `last_seen` forward. The name is left untouched. `last_seen` never
    /// moves backwards, so `registered_at <= last_seen` holds even with a
    /// skewed clock.
    pub fn reregister(&mut self, reregistration: &Reregistration) {
        self.status = NodeStatus::Active;
        self.metadata.merge(reregistration.metadata());
        self.last_seen = self.last_seen.max(reregistration.seen_at());
    }
}
