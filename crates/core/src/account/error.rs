//! Account error types.

use famwallet_shared::types::{AccountId, Currency, ProfileId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::{DomainError, ErrorKind};
use crate::funds::FundsError;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Balance operation failed.
    #[error(transparent)]
    Funds(#[from] FundsError),

    /// Owner profile must be a positive ID.
    #[error("Property profile_id must be greater than 0, got {0}")]
    InvalidProfile(ProfileId),

    /// Description must not be blank.
    #[error("Property description cannot be empty")]
    EmptyDescription,

    /// The requesting profile does not own the account.
    #[error("Profile id mismatch: profile {requested_by} cannot debit account {account_id}")]
    ProfileMismatch {
        /// The account being debited.
        account_id: AccountId,
        /// The profile that asked for the debit.
        requested_by: ProfileId,
    },

    /// Account still holds money.
    #[error("Cannot be deleted. The account (Id = {account_id}) has a balance of {balance}")]
    HasBalance {
        /// The account ID.
        account_id: AccountId,
        /// Remaining balance.
        balance: Decimal,
    },

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// The profile already has an account in this currency.
    #[error("User's (ProfileId = {profile_id}) account in {currency} already exists")]
    AlreadyExists {
        /// Owner profile.
        profile_id: ProfileId,
        /// Currency of the existing account.
        currency: Currency,
    },
}

impl DomainError for AccountError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Funds(e) => e.kind(),
            Self::InvalidProfile(_) | Self::EmptyDescription => ErrorKind::Validation,
            Self::ProfileMismatch { .. } => ErrorKind::Authorization,
            Self::HasBalance { .. } => ErrorKind::InvariantViolation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
        }
    }
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Funds(e) => e.error_code(),
            Self::InvalidProfile(_) => "INVALID_PROFILE",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::ProfileMismatch { .. } => "PROFILE_MISMATCH",
            Self::HasBalance { .. } => "ACCOUNT_HAS_BALANCE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AlreadyExists { .. } => "ACCOUNT_ALREADY_EXISTS",
        }
    }
}

crate::error::into_app_error!(AccountError);
