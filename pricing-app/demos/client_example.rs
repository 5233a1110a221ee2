//! Client example demonstrating pricing flows against a running server.
//!
//! Run with: cargo run -p pricing-app --example client_example

use pricing_client::{ClientError, PriceOutcome, PricingClient};
use pricing_hex::{PricingService, inbound::HttpServer};
use pricing_types::{Currency, LimitTable};
use rust_decimal_macros::dec;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port and hand the listener to the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    let service = PricingService::with_limits(LimitTable::default());
    let router = HttpServer::new(service).router();
    tokio::spawn(async move {
        let app = router.into_make_service_with_connect_info::<SocketAddr>();
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    let client = PricingClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: pricing flow
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    println!("\n📋 Limits:");
    for entry in client.limits().await? {
        println!("   - {}: {}", entry.currency, entry.limit);
    }

    match client.price("u1", dec!(100.00), Currency::USD).await? {
        PriceOutcome::Approved(quote) => {
            println!("✅ 100.00 USD approved, price {:?}", quote.price)
        }
        PriceOutcome::Rejected { message } => println!("❌ unexpected rejection: {message}"),
    }

    match client.price("u1", dec!(20000.00), Currency::USD).await? {
        PriceOutcome::Approved(_) => println!("❌ 20000.00 USD should have been rejected"),
        PriceOutcome::Rejected { message } => println!("✅ 20000.00 USD rejected: {message}"),
    }

    match client.price("u1", dec!(0.00), Currency::USD).await {
        Err(ClientError::Validation(fields)) => {
            println!("✅ 0.00 USD is malformed: {}", fields[0].message)
        }
        other => println!("❌ unexpected result for 0.00 USD: {other:?}"),
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
