//! Application services for node registration and lookup.

mod registry;

pub use registry::{
    NodeRegistryService, NodeRegistryServiceError, NodeRegistryServiceResult, RegisterNodeRequest,
};
