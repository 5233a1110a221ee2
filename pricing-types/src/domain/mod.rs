//! Domain models for the pricing service.

pub mod currency;
pub mod limits;
pub mod money;
pub mod risk;

pub use currency::Currency;
pub use limits::LimitTable;
pub use money::{AMOUNT_SCALE, FEE_MULTIPLIER, apply_fee, format_amount};
pub use risk::{LimitEvaluator, RiskDecision};
