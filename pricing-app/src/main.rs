//! # Pricing Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the limit table and risk evaluator
//! - Create the pricing service
//! - Start the HTTP server

mod config;
mod telemetry;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricing_hex::{PricingService, inbound::HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry traces and metrics when a collector is configured
    let otel = config
        .otel_endpoint
        .as_deref()
        .map(telemetry::Telemetry::init)
        .transpose()?;
    let otel_layer = otel
        .as_ref()
        .map(|t| tracing_opentelemetry::layer().with_tracer(t.tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pricing_app=debug,pricing_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .init();

    tracing::info!("Starting pricing server on port {}", config.port);
    for (currency, limit) in config.limits.iter() {
        tracing::info!(%currency, %limit, "Loaded transaction limit");
    }

    // Create the pricing service over the configured limits
    let service = PricingService::with_limits(config.limits);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.requests_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some(otel) = otel {
        otel.shutdown();
    }
    Ok(())
}
