// REST API module
// Exposes the routing workflow over HTTP via axum

//! # REST API
//!
//! HTTP surface for the routing engine: registration, role inboxes, the
//! comment trail, forward/dispatch/file actions and attachment retrieval.
//! Transport only - all validation and every status write happens in the
//! engine, so nothing reachable from this module can bypass the routing
//! table.

pub mod handlers;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::engine::routing::RoutingEngine;
use handlers::{
    add_comment, create_document, dispatch_document, file_document, forward_document,
    get_document, health_check, list_comments, not_found, role_inbox, view_attachment, ApiState,
};

/// API server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub port: u16,
    pub host: String,
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            host: "0.0.0.0".to_string(),
            cors_enabled: true,
        }
    }
}

/// The REST server
pub struct ApiServer {
    config: ApiConfig,
    state: ApiState,
}

impl ApiServer {
    pub fn new(config: ApiConfig, engine: Arc<RoutingEngine>) -> Self {
        Self {
            config,
            state: ApiState { engine },
        }
    }

    /// Build the axum router with all workflow routes
    pub fn create_router(&self) -> Router {
        let router = Router::new()
            // Document lifecycle
            .route("/v1/documents", post(create_document))
            .route("/v1/documents/:id", get(get_document))
            .route("/v1/documents/:id/attachment", get(view_attachment))
            // Review trail
            .route(
                "/v1/documents/:id/comments",
                post(add_comment).get(list_comments),
            )
            // Workflow actions
            .route("/v1/documents/:id/forward", post(forward_document))
            .route("/v1/documents/:id/dispatch", post(dispatch_document))
            .route("/v1/documents/:id/file", post(file_document))
            // Role inboxes
            .route("/v1/roles/:role/documents", get(role_inbox))
            // Health check
            .route("/health", get(health_check))
            // Fallback for unknown routes
            .fallback(not_found)
            .with_state(self.state.clone());

        if self.config.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Run the server
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let app = self.create_router();

        info!("📋 Document routing API starting");
        info!("📡 Server address: http://{}", addr);
        info!("🔗 Endpoints:");
        info!("   POST http://{}/v1/documents", addr);
        info!("   GET  http://{}/v1/roles/:role/documents", addr);
        info!("   POST http://{}/v1/documents/:id/forward", addr);
        info!("   POST http://{}/v1/documents/:id/dispatch", addr);
        info!("   GET  http://{}/health", addr);

        axum::Server::bind(&addr.parse()?)
            .serve(app.into_make_service())
            .await?;

        Ok(())
    }
}

/// Builder for the REST server
pub struct ApiServerBuilder {
    config: ApiConfig,
    engine: Option<Arc<RoutingEngine>>,
}

impl ApiServerBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            engine: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn with_host<H: Into<String>>(mut self, host: H) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Use a pre-built engine (custom storage or notifier)
    pub fn with_engine(mut self, engine: Arc<RoutingEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> ApiServer {
        let engine = self
            .engine
            .unwrap_or_else(|| Arc::new(RoutingEngine::in_memory()));
        ApiServer::new(self.config, engine)
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
