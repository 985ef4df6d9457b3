//! Node registry server binary.
//!
//! Parses configuration, installs logging, wires the selected storage
//! backend into the registry service and serves HTTP until interrupted.

use clap::Parser;
use mockable::DefaultClock;
use node_registry::{
    Result,
    api::ApiServer,
    config::{Config, StorageBackend},
    node::{
        adapters::{memory::InMemoryNodeRegistry, postgres::PostgresNodeRegistry},
        ports::NodeRegistryRepository,
        services::NodeRegistryService,
    },
    telemetry::init_logging,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level, config.log_json)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        storage = ?config.storage,
        bind_addr = %config.bind_addr,
        "starting node registry"
    );

    let result = match config.storage {
        StorageBackend::Postgres => {
            let repository = PostgresNodeRegistry::connect(
                config.require_database_url()?,
                config.pool_size,
            )?;
            if config.apply_migrations {
                repository.apply_schema().await?;
                info!("nodes schema applied");
            }
            run(&config, repository).await
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; nodes are lost on exit");
            run(&config, InMemoryNodeRegistry::new()).await
        }
    };

    if let Err(err) = &result {
        error!(error = %err, "node registry stopped with an error");
    }
    result
}

async fn run<R>(config: &Config, repository: R) -> Result<()>
where
    R: NodeRegistryRepository + 'static,
{
    let service = NodeRegistryService::new(Arc::new(repository), Arc::new(DefaultClock));
    let server = Arc::new(ApiServer::new(config.server_config()));

    let signal_server = Arc::clone(&server);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received");
                signal_server.shutdown();
            }
            Err(err) => error!(error = %err, "failed to listen for interrupt"),
        }
    });

    server.run(service).await?;
    info!("node registry shutdown complete");
    Ok(())
}
