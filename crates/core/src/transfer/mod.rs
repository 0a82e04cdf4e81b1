//! Money movement between accounts, wallets and sub-wallets.
//!
//! Every transfer validates first and mutates second. The functions here work
//! on owned copies loaded by the service; on error those copies are dropped
//! and nothing is committed.

pub mod error;
pub mod service;

pub use error::TransferError;
pub use service::{AccountTransfer, TransferReceipt, TransferService, WalletTransfer};

use famwallet_shared::types::ProfileId;
use rust_decimal::Decimal;

use crate::account::{Account, AccountError};
use crate::entity::Entity;
use crate::family::{Family, FamilyMember};
use crate::wallet::WalletNode;

fn ensure_positive(amount: Decimal) -> Result<(), TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Moves `amount` from an account into a wallet or sub-wallet.
///
/// # Errors
///
/// `Validation` for a non-positive amount or a currency mismatch,
/// `Authorization` unless `requested_by` owns the account,
/// `InsufficientFunds` if the account balance is too low.
pub fn transfer_account_to_wallet(
    account: &mut Account,
    target: &mut WalletNode,
    amount: Decimal,
    requested_by: ProfileId,
) -> Result<(), TransferError> {
    ensure_positive(amount)?;
    if account.currency() != target.currency() {
        return Err(TransferError::CurrencyMismatch {
            from: account.currency(),
            to: target.currency(),
        });
    }
    if !account.is_owned_by(requested_by) {
        return Err(AccountError::ProfileMismatch {
            account_id: account.id(),
            requested_by,
        }
        .into());
    }

    account.withdraw(amount, requested_by)?;
    target.add_money(amount)?;
    Ok(())
}

/// Moves `amount` between a wallet node and one of its direct sub-wallets,
/// in either direction.
///
/// A private source sub-wallet is debited on behalf of `member`: the family
/// head always may, other members only if they are in its member set. Other
/// sources ignore `member`.
///
/// # Errors
///
/// `Validation` for a non-positive amount, identical endpoints, a family or
/// currency mismatch, or endpoints that are not parent and child.
/// `Authorization` or `InsufficientFunds` from the debit.
pub fn transfer_between_wallets(
    from: &mut WalletNode,
    to: &mut WalletNode,
    amount: Decimal,
    member: Option<&FamilyMember>,
    family: &Family,
) -> Result<(), TransferError> {
    if from.id() == to.id() {
        return Err(TransferError::SameWallet(from.id()));
    }
    ensure_positive(amount)?;
    if from.family_id() != to.family_id() {
        return Err(TransferError::FamilyMismatch {
            from_family: from.family_id(),
            to_family: to.family_id(),
        });
    }
    if from.currency() != to.currency() {
        return Err(TransferError::CurrencyMismatch {
            from: from.currency(),
            to: to.currency(),
        });
    }
    let related = from.parent_id() == Some(to.id()) || to.parent_id() == Some(from.id());
    if !related {
        return Err(TransferError::UnrelatedWallets {
            from: from.id(),
            to: to.id(),
        });
    }

    match from {
        WalletNode::Wallet(wallet) => wallet.withdraw(amount)?,
        WalletNode::SubWallet(sub_wallet) if !sub_wallet.is_private() => {
            sub_wallet.withdraw(amount)?;
        }
        WalletNode::SubWallet(sub_wallet) => match member {
            Some(head) if family.is_head(head) => {
                sub_wallet.withdraw_as_head(amount, head, family)?;
            }
            other => sub_wallet.withdraw_as(amount, other)?,
        },
    }
    to.add_money(amount)?;
    Ok(())
}
