//! HTTP surface for the node registry.
//!
//! Exposes register, list, get and delete over JSON. Node routes are nested
//! under a configurable prefix; a liveness probe is served at `/health`.

mod dto;
mod error;
mod routes;
mod server;

pub use dto::{DeletedResponse, HealthResponse, NodeResponse, RegisterNodeBody};
pub use error::{ApiError, ErrorBody, NODE_NOT_FOUND};
pub use routes::{ApiState, router};
pub use server::{ApiServer, ApiServerConfig, DEFAULT_NODES_PATH};
