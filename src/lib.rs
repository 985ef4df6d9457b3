//! Node registry: fingerprint-keyed registration and lookup of nodes.
//!
//! Nodes are named entities identified by a caller-supplied fingerprint.
//! Registering an unknown fingerprint creates a node; registering a known one
//! refreshes it and merges its metadata. Nodes can be listed, fetched by
//! identifier and deleted.
//!
//! # Architecture
//!
//! The registry follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, in-memory)
//!
//! # Modules
//!
//! - [`node`]: Node domain, repository port, adapters and service
//! - [`api`]: HTTP routes over the registry service
//! - [`config`]: Command-line and environment configuration
//! - [`telemetry`]: Logging setup

pub mod api;
pub mod config;
pub mod error;
pub mod node;
pub mod telemetry;

pub use error::{Error, Result};
