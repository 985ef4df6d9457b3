//! Domain model for node registration.
//!
//! The node domain models identity, fingerprint-keyed registration, lifecycle
//! status and free-form metadata. All infrastructure concerns are kept outside
//! the domain boundary.

mod error;
mod fingerprint;
mod ids;
mod metadata;
mod name;
mod node;
mod status;

pub use error::{NodeDomainError, ParseNodeStatusError};
pub use fingerprint::Fingerprint;
pub use ids::NodeId;
pub use metadata::NodeMetadata;
pub use name::NodeName;
pub use node::{Node, PersistedNodeData, Reregistration};
pub use status::NodeStatus;
