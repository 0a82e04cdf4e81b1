//! Transfer error types.

use famwallet_shared::types::{Currency, FamilyId, WalletId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountError;
use crate::error::{DomainError, ErrorKind};
use crate::family::FamilyError;
use crate::wallet::{SubWalletError, WalletError};

/// Errors that can occur while moving money between entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Transfers move a strictly positive amount.
    #[error("Transfer amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Source and target are the same wallet.
    #[error("Cannot transfer funds from wallet {0} to itself")]
    SameWallet(WalletId),

    /// Endpoints hold different currencies.
    #[error("Cannot transfer funds between wallets with different currencies ({from} and {to})")]
    CurrencyMismatch {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },

    /// Endpoints belong to different families.
    #[error(
        "Cannot transfer funds between wallets of different families. FromWallet's Family Id = {from_family}, ToWallet's Family Id = {to_family}"
    )]
    FamilyMismatch {
        /// Family of the source.
        from_family: FamilyId,
        /// Family of the target.
        to_family: FamilyId,
    },

    /// Wallets are not a direct parent/child pair.
    #[error("Wallets {from} and {to} are not a parent and a direct sub-wallet")]
    UnrelatedWallets {
        /// Source wallet.
        from: WalletId,
        /// Target wallet.
        to: WalletId,
    },

    /// Account-side failure.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Family lookup failure.
    #[error(transparent)]
    Family(#[from] FamilyError),

    /// Wallet-side failure.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Sub-wallet-side failure.
    #[error(transparent)]
    SubWallet(#[from] SubWalletError),
}

impl DomainError for TransferError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NonPositiveAmount(_)
            | Self::SameWallet(_)
            | Self::CurrencyMismatch { .. }
            | Self::FamilyMismatch { .. }
            | Self::UnrelatedWallets { .. } => ErrorKind::Validation,
            Self::Account(e) => e.kind(),
            Self::Family(e) => e.kind(),
            Self::Wallet(e) => e.kind(),
            Self::SubWallet(e) => e.kind(),
        }
    }
}

impl TransferError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::SameWallet(_) => "SAME_WALLET",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::FamilyMismatch { .. } => "FAMILY_MISMATCH",
            Self::UnrelatedWallets { .. } => "UNRELATED_WALLETS",
            Self::Account(e) => e.error_code(),
            Self::Family(e) => e.error_code(),
            Self::Wallet(e) => e.error_code(),
            Self::SubWallet(e) => e.error_code(),
        }
    }
}

crate::error::into_app_error!(TransferError);

#[cfg(test)]
mod tests {
    use super::*;
    use famwallet_shared::AppError;
    use famwallet_shared::types::{AccountId, ProfileId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_mismatch_errors_are_validation() {
        let err = TransferError::CurrencyMismatch {
            from: Currency::Usd,
            to: Currency::Eur,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(AppError::from(err).status_code(), 400);
    }

    #[test]
    fn test_wrapped_errors_keep_kind_and_code() {
        let err = TransferError::from(AccountError::ProfileMismatch {
            account_id: AccountId::new(1),
            requested_by: ProfileId::new(2),
        });
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.error_code(), "PROFILE_MISMATCH");

        let err = TransferError::from(WalletError::Funds(
            crate::funds::FundsError::InsufficientFunds {
                requested: dec!(5),
                available: dec!(1),
            },
        ));
        assert_eq!(AppError::from(err).status_code(), 422);
    }
}
