//! `PostgreSQL` repository implementation for node registration.

use super::{
    models::{NewNodeRow, NodeRow},
    schema::nodes,
};
use crate::node::{
    domain::{
        Fingerprint, Node, NodeId, NodeMetadata, NodeName, NodeStatus, PersistedNodeData,
        Reregistration,
    },
    ports::{NodeRegistryError, NodeRegistryRepository, NodeRegistryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by node registry adapters.
pub type NodePgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for the `nodes` table. Every statement is idempotent.
pub const CREATE_NODES_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_nodes/up.sql");

const FINGERPRINT_INDEX: &str = "idx_nodes_fingerprint";

/// `PostgreSQL`-backed node registry repository.
///
/// Each operation checks a connection out of the pool on a blocking worker
/// thread and hands it back when the closure returns, on success or error.
#[derive(Debug, Clone)]
pub struct PostgresNodeRegistry {
    pool: NodePgPool,
}

impl PostgresNodeRegistry {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NodePgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> NodeRegistryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(NodeRegistryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the `nodes` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`NodeRegistryError::Persistence`] when the DDL fails.
    pub async fn apply_schema(&self) -> NodeRegistryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_NODES_SQL)
                .map_err(NodeRegistryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> NodeRegistryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NodeRegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NodeRegistryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NodeRegistryError::persistence)?
    }
}

impl From<DieselError> for NodeRegistryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl NodeRegistryRepository for PostgresNodeRegistry {
    async fn insert(&self, node: &Node) -> NodeRegistryResult<Node> {
        let node_id = node.id();
        let fingerprint = node.fingerprint().clone();
        let new_row = to_new_row(node);

        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(nodes::table)
                .values(&new_row)
                .returning(NodeRow::as_returning())
                .get_result::<NodeRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_fingerprint_unique_violation(info.as_ref()) =>
                    {
                        NodeRegistryError::DuplicateFingerprint(fingerprint.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NodeRegistryError::DuplicateNode(node_id)
                    }
                    _ => NodeRegistryError::persistence(err),
                })?;
            row_to_node(stored)
        })
        .await
    }

    async fn reregister(
        &self,
        fingerprint: &Fingerprint,
        reregistration: &Reregistration,
    ) -> NodeRegistryResult<Option<Node>> {
        let fingerprint_str = fingerprint.as_str().to_owned();
        let patch = reregistration.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, NodeRegistryError, _>(|tx| {
                let row = nodes::table
                    .filter(nodes::fingerprint.eq(&fingerprint_str))
                    .select(NodeRow::as_select())
                    .for_update()
                    .load::<NodeRow>(tx)?
                    .into_iter()
                    .next();
                let Some(row) = row else {
                    return Ok(None);
                };

                let mut node = row_to_node(row)?;
                node.reregister(&patch);

                let stored =
                    diesel::update(nodes::table.filter(nodes::id.eq(node.id().into_inner())))
                        .set((
                            nodes::status.eq(node.status().as_str()),
                            nodes::last_seen.eq(node.last_seen()),
                            nodes::node_metadata.eq(Some(node.metadata().to_value())),
                        ))
                        .returning(NodeRow::as_returning())
                        .get_result::<NodeRow>(tx)?;
                row_to_node(stored).map(Some)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: NodeId) -> NodeRegistryResult<Option<Node>> {
        self.run_blocking(move |connection| {
            let row = nodes::table
                .filter(nodes::id.eq(id.into_inner()))
                .select(NodeRow::as_select())
                .first::<NodeRow>(connection)
                .optional()
                .map_err(NodeRegistryError::persistence)?;
            row.map(row_to_node).transpose()
        })
        .await
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> NodeRegistryResult<Option<Node>> {
        let fingerprint_str = fingerprint.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = nodes::table
                .filter(nodes::fingerprint.eq(&fingerprint_str))
                .select(NodeRow::as_select())
                .first::<NodeRow>(connection)
                .optional()
                .map_err(NodeRegistryError::persistence)?;
            row.map(row_to_node).transpose()
        })
        .await
    }

    async fn list_all(&self) -> NodeRegistryResult<Vec<Node>> {
        self.run_blocking(move |connection| {
            let rows = nodes::table
                .order_by((nodes::registered_at.asc(), nodes::id.asc()))
                .select(NodeRow::as_select())
                .load::<NodeRow>(connection)
                .map_err(NodeRegistryError::persistence)?;
            rows.into_iter().map(row_to_node).collect()
        })
        .await
    }

    async fn delete(&self, id: NodeId) -> NodeRegistryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(nodes::table.filter(nodes::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(NodeRegistryError::persistence)?;

            if deleted == 0 {
                return Err(NodeRegistryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(node: &Node) -> NewNodeRow {
    NewNodeRow {
        id: node.id().into_inner(),
        name: node.name().as_str().to_owned(),
        fingerprint: node.fingerprint().as_str().to_owned(),
        status: node.status().as_str().to_owned(),
        registered_at: node.registered_at(),
        last_seen: node.last_seen(),
        node_metadata: Some(node.metadata().to_value()),
    }
}

fn row_to_node(row: NodeRow) -> NodeRegistryResult<Node> {
    let NodeRow {
        id,
        name,
        fingerprint,
        status,
        registered_at,
        last_seen,
        node_metadata,
    } = row;

    let parsed_status =
        NodeStatus::try_from(status.as_str()).map_err(NodeRegistryError::invalid_persisted_data)?;
    let parsed_metadata = node_metadata
        .map(NodeMetadata::from_value)
        .transpose()
        .map_err(NodeRegistryError::invalid_persisted_data)?
        .unwrap_or_default();

    let data = PersistedNodeData {
        id: NodeId::from_uuid(id),
        name: NodeName::from_persisted(name),
        fingerprint: Fingerprint::from_persisted(fingerprint),
        status: parsed_status,
        registered_at,
        last_seen,
        metadata: parsed_metadata,
    };
    Ok(Node::from_persisted(data))
}

fn is_fingerprint_unique_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == FINGERPRINT_INDEX)
}
