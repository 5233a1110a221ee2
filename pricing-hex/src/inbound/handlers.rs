//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use pricing_types::{
    AppError, FieldError, PriceRequest, RejectionDetail, RejectionResponse, RiskPolicy,
    ValidationErrorResponse,
};

use crate::PricingService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<P: RiskPolicy> {
    pub service: PricingService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

/// Every body that cannot become a `PriceRequest` is a structural failure
/// (422), kept apart from the 400 used for risk denials.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match &rejection {
            // Well-formed JSON with the wrong shape or types.
            JsonRejection::JsonDataError(_) => "type",
            JsonRejection::JsonSyntaxError(_) => "syntax",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body",
        };
        ApiError(AppError::Validation(vec![FieldError::new(
            "body",
            code,
            rejection.body_text(),
        )]))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::Validation(detail) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationErrorResponse { detail }),
                )
                    .into_response();
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Price a transaction.
///
/// 200 with the quote when approved, 400 with the reason when the risk
/// check denies it, 422 when the request is malformed.
#[tracing::instrument(skip_all)]
pub async fn price<P: RiskPolicy>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    tracing::debug!(user_id = %req.user_id, currency = %req.currency, "Pricing request");

    let quote = state.service.price(req)?;
    if quote.allowed {
        return Ok(Json(quote).into_response());
    }

    Ok((
        StatusCode::BAD_REQUEST,
        Json(RejectionResponse {
            detail: RejectionDetail {
                message: quote.message,
            },
        }),
    )
        .into_response())
}

/// List the configured per-currency limits.
#[tracing::instrument(skip(state))]
pub async fn list_limits<P: RiskPolicy>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    Json(state.service.limits())
}

/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
