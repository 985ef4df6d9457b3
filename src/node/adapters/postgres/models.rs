//! Diesel row models for node persistence.

use super::schema::nodes;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for node records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NodeRow {
    /// Internal node identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Unique fingerprint.
    pub fingerprint: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub registered_at: DateTime<Utc>,
    /// Latest sighting timestamp.
    pub last_seen: DateTime<Utc>,
    /// Metadata JSON payload; may be `NULL` in rows written by other tools.
    pub node_metadata: Option<Value>,
}

/// Insert model for node records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = nodes)]
pub struct NewNodeRow {
    /// Internal node identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Unique fingerprint.
    pub fingerprint: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub registered_at: DateTime<Utc>,
    /// Latest sighting timestamp.
    pub last_seen: DateTime<Utc>,
    /// Metadata JSON payload.
    pub node_metadata: Option<Value>,
}
