//! Port contracts for node registration.
//!
//! Ports define infrastructure-agnostic interfaces used by the node registry
//! service.

pub mod repository;

pub use repository::{NodeRegistryError, NodeRegistryRepository, NodeRegistryResult};
