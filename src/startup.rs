//! Application Startup
//!
//! Explicit construction of the persistence layer, the branch service,
//! and the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;

use crate::application::services::{BranchService, BranchServiceImpl};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{InMemoryBranchRepository, PgBranchRepository};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer, track_requests};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub branch_service: Arc<dyn BranchService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(branch_service: Arc<dyn BranchService>, settings: Settings) -> Self {
        Self {
            branch_service,
            settings: Arc::new(settings),
        }
    }

    /// State backed by a fresh in-memory repository
    pub fn in_memory(settings: Settings) -> Self {
        let repo = Arc::new(InMemoryBranchRepository::new(
            settings.snowflake.machine_id as u64,
        ));
        Self::new(Arc::new(BranchServiceImpl::new(repo)), settings)
    }
}

/// Build the branch service over the configured persistence backend
pub async fn build_branch_service(settings: &Settings) -> Result<Arc<dyn BranchService>> {
    let id_generator = Arc::new(SnowflakeGenerator::new(settings.snowflake.machine_id as u64));

    let service: Arc<dyn BranchService> = match settings.storage.backend {
        StorageBackend::Postgres => {
            let pool = database::connect(&settings.database).await?;
            let repo = Arc::new(PgBranchRepository::new(pool, id_generator));
            Arc::new(BranchServiceImpl::new(repo))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let repo = Arc::new(InMemoryBranchRepository::with_generator(id_generator));
            Arc::new(BranchServiceImpl::new(repo))
        }
    };

    Ok(service)
}

/// Router with all middleware applied
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(middleware::from_fn(track_requests))
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let branch_service = build_branch_service(&settings).await?;
        let addr = settings
            .server
            .socket_addr()
            .with_context(|| format!("invalid server address {}", settings.server_addr()))?;

        let router = build_router(AppState::new(branch_service, settings));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
