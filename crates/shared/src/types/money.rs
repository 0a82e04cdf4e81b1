//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g. `12.50`).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "EUR").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Russian Ruble
    Rub,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Rub => write!(f, "RUB"),
            Self::Gbp => write!(f, "GBP"),
            Self::Jpy => write!(f, "JPY"),
        }
    }
}
