/// API Server implementation

use super::handlers::*;
use anyhow::Result;
use axum::{routing::get, Router};
use onionalias_core::AliasRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Alias provisioning
        .route("/api/aliases", get(list_aliases).delete(clear_aliases))
        .route(
            "/api/aliases/:alias",
            get(get_alias).put(set_alias).delete(remove_alias),
        )
        // Resolution preview
        .route("/api/resolve/:host", get(resolve_host))
        // Allow provisioning from browser extensions
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API Server for provisioning and inspecting onion aliases
pub struct ApiServer {
    listen_addr: SocketAddr,
    registry: Arc<AliasRegistry>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(listen_addr: SocketAddr, registry: Arc<AliasRegistry>) -> Self {
        Self {
            listen_addr,
            registry,
        }
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        let app = build_router(AppState::new(self.registry));

        info!("API server starting on {}", self.listen_addr);

        let listener = tokio::net::TcpListener::bind(self.listen_addr).await?;

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

        Ok(())
    }
}
