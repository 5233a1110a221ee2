//! The closed set of currencies the pricing service quotes in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Currencies accepted by the pricing service.
///
/// Anything outside this set is malformed input, never a currency with
/// a zero limit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// Every supported currency, in declaration order.
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::EUR, Currency::JPY];

    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Exact, case-sensitive match against `USD|EUR|JPY`.
impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| DomainError::UnknownCurrency(s.to_string()))
    }
}
