//! Node registration and lookup.
//!
//! Nodes are named entities identified by a caller-supplied fingerprint.
//! Registration is idempotent per fingerprint: re-registering refreshes the
//! node's `last_seen` timestamp and merges its metadata. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
