//! `PostgreSQL` adapters for node registry persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_NODES_SQL, NodePgPool, PostgresNodeRegistry};
