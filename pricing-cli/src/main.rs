//! Pricing CLI
//!
//! Command-line interface for the Pricing API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use pricing_client::{ClientError, PriceOutcome, PricingClient};
use pricing_types::Currency;

#[derive(Parser)]
#[command(name = "pricing")]
#[command(author, version, about = "Pricing API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Pricing API
    #[arg(long, env = "PRICING_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a risk-checked price quote
    Quote {
        /// User identifier
        #[arg(long)]
        user: String,
        /// Transaction amount, e.g. 100.00
        #[arg(long)]
        amount: Decimal,
        /// Currency (USD, EUR, JPY)
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Show the per-currency limit table
    Limits,
    /// Check API health
    Health,
}

fn parse_currency(s: &str) -> Result<Currency> {
    s.to_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: USD, EUR, JPY", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PricingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Limits => {
            let limits = client.limits().await?;
            println!("{}", serde_json::to_string_pretty(&limits)?);
        }

        Commands::Quote {
            user,
            amount,
            currency,
        } => {
            let currency = parse_currency(&currency)?;
            match client.price(&user, amount, currency).await {
                Ok(PriceOutcome::Approved(quote)) => {
                    println!("{}", serde_json::to_string_pretty(&quote)?);
                }
                Ok(PriceOutcome::Rejected { message }) => {
                    println!("✗ {}", message);
                    std::process::exit(2);
                }
                Err(ClientError::Validation(fields)) => {
                    for field in fields {
                        eprintln!("✗ {}: {}", field.field, field.message);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
