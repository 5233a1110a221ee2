//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use pricing_types::RiskPolicy;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::PricingService;

/// HTTP Server for the Pricing API.
pub struct HttpServer<P: RiskPolicy> {
    state: Arc<AppState<P>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<P: RiskPolicy> HttpServer<P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PricingService<P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: PricingService<P>, requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::per_minute(requests_per_minute)),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/price", post(handlers::price::<P>))
            .route("/limits", get(handlers::list_limits::<P>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let eviction = self
            .rate_limiter
            .clone()
            .spawn_eviction(Duration::from_secs(60));

        // Peer addresses key the rate limiter.
        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        eviction.abort();
        served?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
