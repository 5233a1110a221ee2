//! Error types for the pricing service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Domain-level errors (malformed configuration or values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid limit for {currency}: {reason}")]
    InvalidLimit { currency: String, reason: String },
}

/// A single per-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending request field
    #[schema(example = "amount")]
    pub field: String,
    /// Machine-readable failure code
    #[schema(example = "range")]
    pub code: String,
    /// Human-readable description
    #[schema(example = "amount must be greater than zero")]
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// A risk denial is not an error: it is carried by `PriceQuote`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field, e.code.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        AppError::Validation(fields)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownCurrency(code) => AppError::Validation(vec![FieldError::new(
                "currency",
                "pattern",
                format!("unknown currency: {}", code),
            )]),
            DomainError::InvalidLimit { .. } => AppError::Internal(err.to_string()),
        }
    }
}
