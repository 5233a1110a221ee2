//! Risk evaluation against a [`LimitTable`].

use rust_decimal::Decimal;

use super::currency::Currency;
use super::limits::LimitTable;
use super::money::format_amount;
use crate::ports::RiskPolicy;

/// Outcome of a risk check. There is no partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskDecision {
    Allowed,
    Denied(String),
}

impl RiskDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RiskDecision::Allowed)
    }

    /// The denial reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RiskDecision::Allowed => None,
            RiskDecision::Denied(reason) => Some(reason.as_str()),
        }
    }
}

/// Single-transaction limit checker.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct LimitEvaluator {
    limits: LimitTable,
}

impl LimitEvaluator {
    /// Creates an evaluator over the given table.
    pub fn new(limits: LimitTable) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &LimitTable {
        &self.limits
    }

    /// Evaluates a raw currency code.
    ///
    /// Codes outside the closed currency set are reported as unsupported,
    /// exactly like a known currency the table does not carry.
    pub fn evaluate_code(&self, amount: Decimal, code: &str) -> RiskDecision {
        if amount <= Decimal::ZERO {
            return non_positive();
        }
        match code.parse::<Currency>() {
            Ok(currency) => self.evaluate(amount, currency),
            Err(_) => unsupported(code),
        }
    }
}

impl RiskPolicy for LimitEvaluator {
    /// First failing rule wins:
    /// non-positive amount, unsupported currency, amount over the ceiling.
    fn evaluate(&self, amount: Decimal, currency: Currency) -> RiskDecision {
        if amount <= Decimal::ZERO {
            return non_positive();
        }
        let Some(limit) = self.limits.limit_for(currency) else {
            return unsupported(currency.code());
        };
        if amount > limit {
            return RiskDecision::Denied(format!(
                "{} amount {} exceeds limit {}",
                currency,
                format_amount(amount),
                format_amount(limit)
            ));
        }
        RiskDecision::Allowed
    }

    fn ceilings(&self) -> Vec<(Currency, Decimal)> {
        self.limits.iter().collect()
    }
}

fn non_positive() -> RiskDecision {
    RiskDecision::Denied("amount must be greater than zero".into())
}

fn unsupported(code: &str) -> RiskDecision {
    RiskDecision::Denied(format!("unsupported currency: {}", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn evaluator() -> LimitEvaluator {
        LimitEvaluator::default()
    }

    #[test]
    fn test_within_limit_allowed_for_every_currency() {
        let ev = evaluator();
        for currency in Currency::ALL {
            let limit = ev.limits().limit_for(currency).unwrap();
            for amount in [dec!(0.01), dec!(1), limit / dec!(2), limit] {
                assert_eq!(ev.evaluate(amount, currency), RiskDecision::Allowed);
            }
        }
    }

    #[test]
    fn test_over_limit_reason_names_currency_amount_and_limit() {
        let ev = evaluator();
        let decision = ev.evaluate(dec!(20000.00), Currency::USD);
        assert_eq!(
            decision,
            RiskDecision::Denied("USD amount 20000.00 exceeds limit 10000.00".into())
        );

        let decision = ev.evaluate(dec!(8000.01), Currency::EUR);
        let reason = decision.reason().unwrap();
        assert!(reason.contains("EUR"));
        assert!(reason.contains("8000.01"));
        assert!(reason.contains("8000"));
    }

    #[test]
    fn test_jpy_boundary_is_inclusive() {
        let ev = evaluator();
        assert!(ev.evaluate(dec!(1200000.00), Currency::JPY).is_allowed());
        assert!(!ev.evaluate(dec!(1200000.01), Currency::JPY).is_allowed());
    }

    #[test]
    fn test_non_positive_amount_denied_before_currency_checks() {
        let ev = LimitEvaluator::new(LimitTable::new([(Currency::USD, dec!(10))]).unwrap());
        for amount in [Decimal::ZERO, dec!(-0.01), dec!(-5000)] {
            for currency in Currency::ALL {
                assert_eq!(
                    ev.evaluate(amount, currency).reason(),
                    Some("amount must be greater than zero")
                );
            }
            assert_eq!(
                ev.evaluate_code(amount, "XYZ").reason(),
                Some("amount must be greater than zero")
            );
        }
    }

    #[test]
    fn test_currency_missing_from_table_is_unsupported() {
        let ev = LimitEvaluator::new(LimitTable::new([(Currency::USD, dec!(10))]).unwrap());
        assert_eq!(
            ev.evaluate(dec!(1), Currency::JPY).reason(),
            Some("unsupported currency: JPY")
        );
    }

    #[test]
    fn test_unknown_code_is_unsupported_not_zero_limit() {
        let ev = evaluator();
        let decision = ev.evaluate_code(dec!(100.00), "XYZ");
        assert_eq!(decision.reason(), Some("unsupported currency: XYZ"));
        assert!(!decision.reason().unwrap().contains("exceeds limit"));
    }

    #[test]
    fn test_evaluate_code_delegates_for_known_codes() {
        let ev = evaluator();
        assert!(ev.evaluate_code(dec!(100), "USD").is_allowed());
        assert!(!ev.evaluate_code(dec!(10000.01), "USD").is_allowed());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let ev = evaluator();
        let first = ev.evaluate(dec!(9999.99), Currency::USD);
        for _ in 0..10 {
            assert_eq!(ev.evaluate(dec!(9999.99), Currency::USD), first);
        }
    }
}
