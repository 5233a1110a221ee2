//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use pricing_types::domain::Currency;
use pricing_types::dto::{
    LimitEntry, PriceQuote, PriceRequest, RejectionDetail, RejectionResponse,
    ValidationErrorResponse,
};
use pricing_types::error::FieldError;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Price a transaction after a risk check
#[utoipa::path(
    post,
    path = "/price",
    tag = "pricing",
    request_body = PriceRequest,
    responses(
        (status = 200, description = "Transaction approved and priced", body = PriceQuote),
        (status = 400, description = "Transaction denied by the risk check", body = RejectionResponse),
        (status = 422, description = "Request failed structural validation", body = ValidationErrorResponse),
        (status = 429, description = "Rate limit exceeded")
    )
)]
async fn price() {}

/// List per-currency transaction limits
#[utoipa::path(
    get,
    path = "/limits",
    tag = "pricing",
    responses(
        (status = 200, description = "Configured limit table", body = Vec<LimitEntry>)
    )
)]
async fn list_limits() {}

/// OpenAPI documentation for the Pricing API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pricing Service API",
        version = "0.1.0",
        description = "Real-time transaction pricing with per-currency risk limits.\n\nApproved transactions are priced with a fixed 0.1% markup. Denials return HTTP 400 with the reason; malformed requests return HTTP 422 with per-field errors.",
        license(name = "MIT"),
    ),
    paths(health, price, list_limits),
    components(
        schemas(
            PriceRequest,
            PriceQuote,
            RejectionResponse,
            RejectionDetail,
            ValidationErrorResponse,
            FieldError,
            LimitEntry,
            Currency,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pricing", description = "Risk-checked pricing operations"),
    )
)]
pub struct ApiDoc;
