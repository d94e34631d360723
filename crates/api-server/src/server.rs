//! API server — wires the router, middleware, and listener.

use crate::rest::{self, AppState};
use adpulse_analysis::CampaignAnalyzer;
use adpulse_core::config::AppConfig;
use adpulse_insights::SnapshotProvider;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the analysis service.
pub struct ApiServer {
    config: AppConfig,
    provider: Arc<SnapshotProvider>,
    analyzer: Arc<CampaignAnalyzer>,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        provider: Arc<SnapshotProvider>,
        analyzer: Arc<CampaignAnalyzer>,
    ) -> Self {
        Self {
            config,
            provider,
            analyzer,
        }
    }

    /// Build the application router.
    pub fn router(&self) -> Router {
        let state = AppState {
            provider: self.provider.clone(),
            analyzer: self.analyzer.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        Router::new()
            // Analysis endpoints
            .route("/v1/analysis", post(rest::handle_analysis))
            .route(
                "/v1/accounts/:account_id/campaigns",
                get(rest::list_campaigns),
            )
            .route("/v1/snapshot", post(rest::ingest_snapshot))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server and serve until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
