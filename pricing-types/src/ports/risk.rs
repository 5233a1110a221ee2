//! Risk policy port.
//!
//! The pricing service asks a policy for a verdict and never inspects
//! limits itself. `LimitEvaluator` is the production implementation;
//! tests may inject their own.

use rust_decimal::Decimal;

use crate::domain::{Currency, RiskDecision};

/// Port trait for risk checks.
///
/// Implementations must be pure: the same input always yields the same
/// decision, and evaluation never blocks.
pub trait RiskPolicy: Send + Sync + 'static {
    /// Classifies an amount in a currency as allowed or denied.
    fn evaluate(&self, amount: Decimal, currency: Currency) -> RiskDecision;

    /// Per-currency ceilings this policy enforces, for display.
    fn ceilings(&self) -> Vec<(Currency, Decimal)> {
        Vec::new()
    }
}
