//! # Branch Service
//!
//! Bank branch and holiday calendar microservice.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Persistence backend (PostgreSQL or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use branch_service::config::Settings;
use branch_service::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    branch_service::telemetry::init_tracing();

    info!("Starting Branch Service...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        storage = %settings.storage.backend,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
