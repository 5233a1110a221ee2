//! # Pricing Client SDK
//!
//! A typed Rust client for the Pricing API.

use pricing_types::{
    Currency, FieldError, LimitEntry, PriceQuote, PriceRequest, RejectionResponse,
    ValidationErrorResponse,
};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request rejected as malformed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a price call that reached the risk check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceOutcome {
    /// Approved, with the fee-adjusted price.
    Approved(PriceQuote),
    /// Denied by the risk check.
    Rejected { message: String },
}

/// Pricing API client.
pub struct PricingClient {
    base_url: String,
    http: Client,
}

impl PricingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists the server's limit table.
    pub async fn limits(&self) -> Result<Vec<LimitEntry>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/limits", self.base_url))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status, body))
        }
    }

    /// Prices a transaction.
    pub async fn price(
        &self,
        user_id: &str,
        amount: Decimal,
        currency: Currency,
    ) -> Result<PriceOutcome, ClientError> {
        self.price_raw(&PriceRequest::new(user_id, amount, currency.code()))
            .await
    }

    /// Prices a transaction from an unchecked request.
    pub async fn price_raw(&self, req: &PriceRequest) -> Result<PriceOutcome, ClientError> {
        let resp = self
            .http
            .post(format!("{}/price", self.base_url))
            .json(req)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode_price(status, &body)
    }
}

fn decode_price(status: StatusCode, body: &str) -> Result<PriceOutcome, ClientError> {
    match status {
        s if s.is_success() => Ok(PriceOutcome::Approved(serde_json::from_str(body)?)),
        StatusCode::BAD_REQUEST => match serde_json::from_str::<RejectionResponse>(body) {
            Ok(rejection) => Ok(PriceOutcome::Rejected {
                message: rejection.detail.message,
            }),
            Err(_) => Err(api_error(status, body.to_string())),
        },
        StatusCode::UNPROCESSABLE_ENTITY => {
            let resp: ValidationErrorResponse = serde_json::from_str(body)?;
            Err(ClientError::Validation(resp.detail))
        }
        _ => Err(api_error(status, body.to_string())),
    }
}

fn api_error(status: StatusCode, body: String) -> ClientError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
