//! Errors raised by balance operations.

use famwallet_shared::types::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::{DomainError, ErrorKind};

/// Errors that can occur while changing a balance or its currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundsError {
    /// Amounts passed to balance operations must not be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Withdrawal exceeds the balance.
    #[error("Amount {requested} cannot be greater than balance {available}")]
    InsufficientFunds {
        /// Requested withdrawal.
        requested: Decimal,
        /// Balance at the time of the request.
        available: Decimal,
    },

    /// Currency can only change on an empty balance.
    #[error("Cannot change currency to {to}: balance must be 0, found {balance}")]
    NonZeroBalance {
        /// Current balance.
        balance: Decimal,
        /// Requested currency.
        to: Currency,
    },
}

impl DomainError for FundsError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeAmount(_) => ErrorKind::Validation,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::NonZeroBalance { .. } => ErrorKind::InvariantViolation,
        }
    }
}

impl FundsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::NonZeroBalance { .. } => "NON_ZERO_BALANCE",
        }
    }
}

crate::error::into_app_error!(FundsError);

#[cfg(test)]
mod tests {
    use super::*;
    use famwallet_shared::AppError;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(FundsError::NegativeAmount(dec!(-1)), ErrorKind::Validation, "NEGATIVE_AMOUNT")]
    #[case(
        FundsError::InsufficientFunds {
            requested: dec!(10),
            available: dec!(5),
        },
        ErrorKind::InsufficientFunds,
        "INSUFFICIENT_FUNDS"
    )]
    #[case(
        FundsError::NonZeroBalance {
            balance: dec!(1),
            to: Currency::Eur,
        },
        ErrorKind::InvariantViolation,
        "NON_ZERO_BALANCE"
    )]
    fn test_kind_and_code(#[case] err: FundsError, #[case] kind: ErrorKind, #[case] code: &str) {
        assert_eq!(err.kind(), kind);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        let err = FundsError::InsufficientFunds {
            requested: dec!(100.00),
            available: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Amount 100.00 cannot be greater than balance 50.00"
        );
    }

    #[test]
    fn test_into_app_error_keeps_message() {
        let app: AppError = FundsError::NegativeAmount(dec!(-5)).into();
        assert_eq!(app, AppError::Validation("Amount cannot be negative: -5".into()));
    }
}
