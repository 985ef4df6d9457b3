//! In-memory adapters for node registry persistence.

mod repository;

pub use repository::InMemoryNodeRegistry;
