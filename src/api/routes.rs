//! Router and request handlers.

use super::{
    dto::{DeletedResponse, HealthResponse, NodeResponse, RegisterNodeBody},
    error::ApiError,
};
use crate::node::{
    domain::NodeId, ports::NodeRegistryRepository, services::NodeRegistryService,
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use mockable::Clock;
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct ApiState<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    service: NodeRegistryService<R, C>,
}

impl<R, C> Clone for ApiState<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<R, C> ApiState<R, C>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Wraps a registry service for use by handlers.
    #[must_use]
    pub const fn new(service: NodeRegistryService<R, C>) -> Self {
        Self { service }
    }
}

/// Builds the application router.
///
/// Node routes are nested under `nodes_path`; an empty path or `/` mounts
/// them at the root.
pub fn router<R, C>(state: ApiState<R, C>, nodes_path: &str) -> Router
where
    R: NodeRegistryRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let nodes = Router::new()
        .route("/", get(list_nodes::<R, C>).post(register_node::<R, C>))
        .route("/:id", get(get_node::<R, C>).delete(delete_node::<R, C>))
        .with_state(state);

    let prefix = nodes_path.trim_end_matches('/');
    let app = if prefix.is_empty() {
        Router::new().merge(nodes)
    } else {
        Router::new().nest(prefix, nodes)
    };

    app.route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

async fn register_node<R, C>(
    State(state): State<ApiState<R, C>>,
    payload: Result<Json<RegisterNodeBody>, JsonRejection>,
) -> Result<Json<NodeResponse>, ApiError>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    let Json(body) = payload?;
    let node = state.service.register(body.into()).await?;
    Ok(Json(NodeResponse::from(&node)))
}

async fn list_nodes<R, C>(
    State(state): State<ApiState<R, C>>,
) -> Result<Json<Vec<NodeResponse>>, ApiError>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    let nodes = state.service.list().await?;
    Ok(Json(nodes.iter().map(NodeResponse::from).collect()))
}

async fn get_node<R, C>(
    State(state): State<ApiState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<NodeResponse>, ApiError>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    let id = NodeId::parse(&raw_id).ok_or(ApiError::NotFound)?;
    let node = state.service.get(id).await?;
    Ok(Json(NodeResponse::from(&node)))
}

async fn delete_node<R, C>(
    State(state): State<ApiState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError>
where
    R: NodeRegistryRepository,
    C: Clock + Send + Sync,
{
    let id = NodeId::parse(&raw_id).ok_or(ApiError::NotFound)?;
    state.service.delete(id).await?;
    Ok(Json(DeletedResponse::deleted()))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}
