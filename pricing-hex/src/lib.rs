//! # Pricing Hex
//!
//! Application service layer and HTTP adapter for the pricing service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation, risk check, fee)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `P: RiskPolicy`, allowing alternate
//! risk policies and limit tables to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::PricingService;
