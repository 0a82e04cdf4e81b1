//! Wallet and sub-wallet error types.

use famwallet_shared::types::{Currency, FamilyId, MemberId, WalletId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::{DomainError, ErrorKind};
use crate::funds::FundsError;

/// Errors that can occur during wallet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Balance operation failed.
    #[error(transparent)]
    Funds(#[from] FundsError),

    /// Description must not be blank.
    #[error("Property description cannot be empty")]
    EmptyDescription,

    /// A wallet must belong to a family.
    #[error("Property family cannot be null")]
    MissingFamily,

    /// Sub-wallet opening balance is negative.
    #[error("Initial balance must not be negative, got {0}")]
    NegativeInitialBalance(Decimal),

    /// Sub-wallet opening balance exceeds the parent balance.
    #[error("Initial balance {requested} must not exceed wallet balance {available}")]
    InitialBalanceExceedsBalance {
        /// Requested opening balance.
        requested: Decimal,
        /// Parent balance.
        available: Decimal,
    },

    /// Sub-wallets need an allocated ID before they are attached to a parent.
    #[error("Sub-wallet ID must be allocated before creation")]
    UnallocatedId,

    /// Wallet still has sub-wallets.
    #[error("Cannot be deleted. The wallet (Id = {wallet_id}) has {count} sub-wallets")]
    HasSubWallets {
        /// The wallet ID.
        wallet_id: WalletId,
        /// Number of sub-wallets.
        count: usize,
    },

    /// Wallet still holds money.
    #[error("Cannot be deleted. The wallet (Id = {wallet_id}) has a balance of {balance}")]
    HasBalance {
        /// The wallet ID.
        wallet_id: WalletId,
        /// Remaining balance.
        balance: Decimal,
    },

    /// Wallet not found.
    #[error("Wallet not found: {0}")]
    NotFound(WalletId),

    /// The family already has a wallet in this currency.
    #[error("Family's (Id = {family_id}) main wallet in {currency} is already created")]
    AlreadyExists {
        /// Owning family.
        family_id: FamilyId,
        /// Currency of the existing wallet.
        currency: Currency,
    },
}

impl DomainError for WalletError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Funds(e) => e.kind(),
            Self::EmptyDescription
            | Self::MissingFamily
            | Self::NegativeInitialBalance(_)
            | Self::InitialBalanceExceedsBalance { .. }
            | Self::UnallocatedId => ErrorKind::Validation,
            Self::HasSubWallets { .. } | Self::HasBalance { .. } => ErrorKind::InvariantViolation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
        }
    }
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Funds(e) => e.error_code(),
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::MissingFamily => "MISSING_FAMILY",
            Self::NegativeInitialBalance(_) => "NEGATIVE_INITIAL_BALANCE",
            Self::InitialBalanceExceedsBalance { .. } => "INITIAL_BALANCE_EXCEEDS_BALANCE",
            Self::UnallocatedId => "UNALLOCATED_ID",
            Self::HasSubWallets { .. } => "WALLET_HAS_SUB_WALLETS",
            Self::HasBalance { .. } => "WALLET_HAS_BALANCE",
            Self::NotFound(_) => "WALLET_NOT_FOUND",
            Self::AlreadyExists { .. } => "WALLET_ALREADY_EXISTS",
        }
    }
}

/// Errors that can occur during sub-wallet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubWalletError {
    /// Wallet-level operation failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Private sub-wallets must be debited through an authorized member.
    #[error("Sub wallet {0} is private")]
    Private(String),

    /// Shared sub-wallets must be debited without a member.
    #[error("Sub wallet {0} is not private")]
    NotPrivate(String),

    /// A member is required.
    #[error("Property member cannot be null")]
    MissingMember,

    /// The member belongs to a different family.
    #[error("Member {member_id} does not belong to family {family_id}")]
    ForeignMember {
        /// The member ID.
        member_id: MemberId,
        /// The sub-wallet's family.
        family_id: FamilyId,
    },

    /// The member is not in the sub-wallet's member set.
    #[error("Member {name} cannot use the wallet")]
    MemberNotAuthorized {
        /// The member ID.
        member_id: MemberId,
        /// The member name.
        name: String,
    },

    /// The head-member override was used by someone who is not the head.
    #[error("Member {0} is not the head of the wallet's family")]
    NotHeadMember(MemberId),

    /// The request names a different family than the parent wallet.
    #[error("Family {requested} does not own parent wallet {parent_id}")]
    ParentFamilyMismatch {
        /// The parent wallet.
        parent_id: WalletId,
        /// Family named in the request.
        requested: FamilyId,
    },

    /// The request names a different currency than the parent wallet.
    #[error("Currency mismatch between parent wallet ({parent}) and sub-wallet ({requested})")]
    ParentCurrencyMismatch {
        /// Parent currency.
        parent: Currency,
        /// Currency named in the request.
        requested: Currency,
    },

    /// Sub-wallet not found.
    #[error("Sub-wallet not found: {0}")]
    NotFound(WalletId),
}

impl From<FundsError> for SubWalletError {
    fn from(err: FundsError) -> Self {
        Self::Wallet(WalletError::Funds(err))
    }
}

impl DomainError for SubWalletError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Wallet(e) => e.kind(),
            Self::Private(_)
            | Self::NotPrivate(_)
            | Self::MemberNotAuthorized { .. }
            | Self::NotHeadMember(_) => ErrorKind::Authorization,
            Self::MissingMember
            | Self::ForeignMember { .. }
            | Self::ParentFamilyMismatch { .. }
            | Self::ParentCurrencyMismatch { .. } => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl SubWalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Wallet(e) => e.error_code(),
            Self::Private(_) => "SUB_WALLET_PRIVATE",
            Self::NotPrivate(_) => "SUB_WALLET_NOT_PRIVATE",
            Self::MissingMember => "MISSING_MEMBER",
            Self::ForeignMember { .. } => "FOREIGN_MEMBER",
            Self::MemberNotAuthorized { .. } => "MEMBER_NOT_AUTHORIZED",
            Self::NotHeadMember(_) => "NOT_HEAD_MEMBER",
            Self::ParentFamilyMismatch { .. } => "PARENT_FAMILY_MISMATCH",
            Self::ParentCurrencyMismatch { .. } => "PARENT_CURRENCY_MISMATCH",
            Self::NotFound(_) => "SUB_WALLET_NOT_FOUND",
        }
    }
}

crate::error::into_app_error!(WalletError, SubWalletError);
