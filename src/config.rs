//! Command-line and environment configuration.

use crate::api::{ApiServerConfig, DEFAULT_NODES_PATH};
use crate::error::{Error, Result};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Storage backend holding node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL` via a pooled Diesel connection.
    Postgres,
    /// Process-local map; contents are lost on exit.
    Memory,
}

/// Node registry service - register and query fingerprinted nodes
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// HTTP bind address
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// Prefix under which node routes are mounted
    #[arg(long, env = "NODES_PATH", default_value = DEFAULT_NODES_PATH)]
    pub nodes_path: String,

    /// Storage backend
    #[arg(long, env = "NODE_STORAGE", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Create the nodes table on start-up when it is missing
    #[arg(long, env = "APPLY_MIGRATIONS")]
    pub apply_migrations: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    /// Returns the database URL required by the `postgres` backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no URL was supplied.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "--database-url (or DATABASE_URL) is required for postgres storage".to_owned(),
                )
            })
    }

    /// Returns the HTTP server settings.
    #[must_use]
    pub fn server_config(&self) -> ApiServerConfig {
        ApiServerConfig {
            bind_addr: self.bind_addr,
            nodes_path: self.nodes_path.clone(),
        }
    }
}
