//! Per-currency exposure ceilings.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::currency::Currency;
use crate::error::DomainError;

/// Immutable mapping from currency to the largest permitted amount.
///
/// Built once at startup and shared read-only afterwards. A currency
/// missing from the table is unsupported; it does not have a zero limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitTable {
    limits: BTreeMap<Currency, Decimal>,
}

impl LimitTable {
    /// Builds a table from explicit entries.
    ///
    /// # Validation
    /// - Every ceiling must be strictly positive
    /// - A currency may appear only once
    pub fn new(
        entries: impl IntoIterator<Item = (Currency, Decimal)>,
    ) -> Result<Self, DomainError> {
        let mut limits = BTreeMap::new();
        for (currency, limit) in entries {
            if limit <= Decimal::ZERO {
                return Err(DomainError::InvalidLimit {
                    currency: currency.to_string(),
                    reason: format!("ceiling must be positive, got {}", limit),
                });
            }
            if limits.insert(currency, limit).is_some() {
                return Err(DomainError::InvalidLimit {
                    currency: currency.to_string(),
                    reason: "duplicate entry".into(),
                });
            }
        }
        Ok(Self { limits })
    }

    /// Returns the ceiling for `currency`, or `None` if it is unsupported.
    pub fn limit_for(&self, currency: Currency) -> Option<Decimal> {
        self.limits.get(&currency).copied()
    }

    /// Returns true if the table carries a ceiling for `currency`.
    pub fn supports(&self, currency: Currency) -> bool {
        self.limits.contains_key(&currency)
    }

    /// Iterates entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.limits.iter().map(|(c, l)| (*c, *l))
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl Default for LimitTable {
    fn default() -> Self {
        Self {
            limits: BTreeMap::from([
                (Currency::USD, dec!(10000)),
                (Currency::EUR, dec!(8000)),
                (Currency::JPY, dec!(1200000)),
            ]),
        }
    }
}

/// Parses `USD=10000,EUR=8000` style configuration.
impl FromStr for LimitTable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (code, value) = part.split_once('=').ok_or_else(|| DomainError::InvalidLimit {
                currency: part.to_string(),
                reason: "expected CODE=AMOUNT".into(),
            })?;
            let currency: Currency = code.trim().parse()?;
            let limit = Decimal::from_str(value.trim()).map_err(|e| DomainError::InvalidLimit {
                currency: currency.to_string(),
                reason: e.to_string(),
            })?;
            entries.push((currency, limit));
        }
        Self::new(entries)
    }
}
