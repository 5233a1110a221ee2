//! Configuration loading from environment.

use std::env;

use pricing_types::LimitTable;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub requests_per_minute: u32,
    pub limits: LimitTable,
    /// OTLP collector endpoint; tracing export is off when unset.
    pub otel_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let requests_per_minute = lookup("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|| "100".to_string())
            .parse()?;

        let limits = match lookup("PRICE_LIMITS") {
            Some(raw) => raw
                .parse::<LimitTable>()
                .map_err(|e| anyhow::anyhow!("PRICE_LIMITS is invalid: {}", e))?,
            None => LimitTable::default(),
        };
        if limits.is_empty() {
            anyhow::bail!("PRICE_LIMITS must configure at least one currency");
        }

        let otel_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty());

        Ok(Self {
            port,
            requests_per_minute,
            limits,
            otel_endpoint,
        })
    }
}
