//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::money::{AMOUNT_SCALE, significant_scale};
use crate::domain::Currency;
use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Price DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to price a transaction.
///
/// Fields are kept loose on the wire so every constraint failure can be
/// reported per field instead of as a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PriceRequest {
    /// Opaque identifier of the requesting user
    #[schema(example = "user123")]
    #[validate(custom = "validate_user_id")]
    pub user_id: String,
    /// Transaction amount; positive, at most 2 fractional digits.
    /// Accepted as a JSON string or number; numbers are read digit for digit.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    #[schema(value_type = String, example = "100.00")]
    #[validate(custom = "validate_amount")]
    pub amount: Decimal,
    /// One of USD, EUR, JPY
    #[schema(example = "USD")]
    #[validate(custom = "validate_currency")]
    pub currency: String,
}

impl PriceRequest {
    pub fn new(user_id: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            currency: currency.into(),
        }
    }

    /// Checks every structural constraint and returns the typed order.
    pub fn into_order(self) -> Result<PriceOrder, AppError> {
        self.validate()?;
        let currency: Currency = self.currency.parse()?;
        Ok(PriceOrder {
            user_id: self.user_id,
            amount: self.amount,
            currency,
        })
    }
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(invalid("length", "user_id must not be empty"));
    }
    Ok(())
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(invalid("range", "amount must be greater than zero"));
    }
    if significant_scale(*amount) > AMOUNT_SCALE {
        return Err(invalid(
            "decimal_places",
            "amount must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_currency(code: &str) -> Result<(), ValidationError> {
    code.parse::<Currency>()
        .map(|_| ())
        .map_err(|_| invalid("pattern", "currency must match ^(USD|EUR|JPY)$"))
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// A structurally valid price request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceOrder {
    pub user_id: String,
    pub amount: Decimal,
    pub currency: Currency,
}

/// Result of pricing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceQuote {
    /// Whether the transaction passed the risk check
    pub allowed: bool,
    /// Final price including the fee; absent when denied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "100.10")]
    pub price: Option<Decimal>,
    /// Approval message or rejection reason
    #[schema(example = "approved")]
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Body returned when the risk check denies a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RejectionResponse {
    pub detail: RejectionDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RejectionDetail {
    #[schema(example = "transaction rejected: USD amount 20000.00 exceeds limit 10000.00")]
    pub message: String,
}

/// Body returned when a request fails structural validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<crate::error::FieldError>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Limit DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the limit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LimitEntry {
    pub currency: Currency,
    /// Largest permitted single transaction amount
    #[schema(value_type = String, example = "10000")]
    pub limit: Decimal,
}
