//! Pricing Application Service
//!
//! Validates requests, asks the risk policy for a verdict and applies the fee.
//! Contains NO infrastructure logic - pure request/response transformation.

use pricing_types::domain::apply_fee;
use pricing_types::{
    AppError, LimitEntry, LimitEvaluator, LimitTable, PriceQuote, PriceRequest, RiskDecision,
    RiskPolicy,
};

/// Prefix of the message returned for a denied transaction.
pub const REJECTION_PREFIX: &str = "transaction rejected";

/// Message returned for an approved transaction.
pub const APPROVAL_MESSAGE: &str = "approved";

/// Application service for pricing operations.
///
/// Generic over `P: RiskPolicy` - the policy is injected at compile time.
/// This enables:
/// - Swapping limit tables without code changes
/// - Testing with stub policies
/// - Sharing one instance across all requests without locking
pub struct PricingService<P: RiskPolicy> {
    policy: P,
}

impl PricingService<LimitEvaluator> {
    /// Creates a service that enforces the given limit table.
    pub fn with_limits(limits: LimitTable) -> Self {
        Self::new(LimitEvaluator::new(limits))
    }
}

impl<P: RiskPolicy> PricingService<P> {
    /// Creates a new pricing service with the given risk policy.
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    /// Returns a reference to the underlying policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Prices a transaction.
    ///
    /// Structural problems are returned as `AppError::Validation` before the
    /// policy runs. A denial is a normal outcome and comes back as a quote
    /// with `allowed == false`.
    pub fn price(&self, req: PriceRequest) -> Result<PriceQuote, AppError> {
        let order = req.into_order()?;

        match self.policy.evaluate(order.amount, order.currency) {
            RiskDecision::Denied(reason) => {
                tracing::info!(
                    user_id = %order.user_id,
                    currency = %order.currency,
                    amount = %order.amount,
                    %reason,
                    "Price request denied"
                );
                Ok(PriceQuote {
                    allowed: false,
                    price: None,
                    message: format!("{}: {}", REJECTION_PREFIX, reason),
                })
            }
            RiskDecision::Allowed => {
                let price = apply_fee(order.amount);
                tracing::debug!(
                    user_id = %order.user_id,
                    currency = %order.currency,
                    amount = %order.amount,
                    %price,
                    "Price request approved"
                );
                Ok(PriceQuote {
                    allowed: true,
                    price: Some(price),
                    message: APPROVAL_MESSAGE.into(),
                })
            }
        }
    }

    /// Lists the ceilings enforced by the policy.
    pub fn limits(&self) -> Vec<LimitEntry> {
        self.policy
            .ceilings()
            .into_iter()
            .map(|(currency, limit)| LimitEntry { currency, limit })
            .collect()
    }
}
