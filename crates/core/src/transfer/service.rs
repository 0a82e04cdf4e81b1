//! Transfer application service.

use std::sync::Arc;

use famwallet_shared::AppResult;
use famwallet_shared::types::{AccountId, Currency, MemberId, ProfileId, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{transfer_account_to_wallet, transfer_between_wallets};
use crate::account::AccountError;
use crate::entity::Entity;
use crate::family::{Family, FamilyError, FamilyMember};
use crate::repository::{ChangeSet, Store};
use crate::support::{ensure_not_cancelled, rejected};
use crate::wallet::{WalletError, WalletNode};

/// Input for [`TransferService::account_to_wallet`].
#[derive(Debug, Clone, Deserialize)]
pub struct AccountTransfer {
    /// Profile asking for the transfer.
    pub profile_id: ProfileId,
    /// Account to debit.
    pub from_account_id: AccountId,
    /// Wallet or sub-wallet to credit.
    pub to_wallet_id: WalletId,
    /// Amount to move.
    pub amount: Decimal,
}

/// Input for [`TransferService::between_wallets`].
#[derive(Debug, Clone, Deserialize)]
pub struct WalletTransfer {
    /// Wallet or sub-wallet to debit.
    pub from_wallet_id: WalletId,
    /// Wallet or sub-wallet to credit.
    pub to_wallet_id: WalletId,
    /// Amount to move.
    pub amount: Decimal,
    /// Member authorizing a debit from a private sub-wallet.
    #[serde(default)]
    pub family_member_id: Option<MemberId>,
}

/// Balances after a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Amount moved.
    pub amount: Decimal,
    /// Currency of both endpoints.
    pub currency: Currency,
    /// Source balance after the transfer.
    pub from_balance: Decimal,
    /// Target balance after the transfer.
    pub to_balance: Decimal,
}

/// Loads both endpoints, runs the transfer and commits them together.
#[derive(Clone)]
pub struct TransferService {
    store: Arc<dyn Store>,
}

impl TransferService {
    /// Creates the service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Moves money from a personal account into a family wallet or sub-wallet.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown endpoints, `Validation` for a currency mismatch,
    /// `Forbidden` unless the profile owns the account, `InsufficientFunds`
    /// if the account is short. Nothing is stored on error.
    pub async fn account_to_wallet(
        &self,
        input: AccountTransfer,
        cancel: &CancellationToken,
    ) -> AppResult<TransferReceipt> {
        let mut account = self
            .store
            .find_account(input.from_account_id)
            .await?
            .ok_or_else(|| {
                rejected(
                    "account_to_wallet",
                    AccountError::NotFound(input.from_account_id),
                )
            })?;
        let mut target = self.load_node("account_to_wallet", input.to_wallet_id).await?;

        ensure_not_cancelled(cancel, "account_to_wallet")?;
        info!(
            account_id = %input.from_account_id,
            wallet_id = %input.to_wallet_id,
            amount = %input.amount,
            "Transferring funds from account to wallet"
        );
        transfer_account_to_wallet(&mut account, &mut target, input.amount, input.profile_id)
            .map_err(|e| rejected("account_to_wallet", e))?;

        let receipt = TransferReceipt {
            amount: input.amount,
            currency: account.currency(),
            from_balance: account.balance(),
            to_balance: target.balance(),
        };
        self.store
            .commit(ChangeSet::new().put_account(account).put_node(target))
            .await?;

        info!(
            account_id = %input.from_account_id,
            wallet_id = %input.to_wallet_id,
            amount = %input.amount,
            "Funds transferred"
        );
        Ok(receipt)
    }

    /// Moves money between a wallet and a direct sub-wallet, either way.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown endpoints or member, `Validation` for mismatched
    /// or unrelated endpoints, `Forbidden` when a private sub-wallet is
    /// debited without an authorized member, `InsufficientFunds` if the
    /// source is short. Nothing is stored on error.
    pub async fn between_wallets(
        &self,
        input: WalletTransfer,
        cancel: &CancellationToken,
    ) -> AppResult<TransferReceipt> {
        let mut from = self.load_node("between_wallets", input.from_wallet_id).await?;
        let mut to = self.load_node("between_wallets", input.to_wallet_id).await?;
        let family = self
            .store
            .find_family(from.family_id())
            .await?
            .ok_or_else(|| rejected("between_wallets", FamilyError::NotFound(from.family_id())))?;
        let member = match input.family_member_id {
            Some(member_id) => Some(self.resolve_member(&family, member_id).await?),
            None => None,
        };

        ensure_not_cancelled(cancel, "between_wallets")?;
        info!(
            from_wallet_id = %input.from_wallet_id,
            to_wallet_id = %input.to_wallet_id,
            amount = %input.amount,
            "Transferring funds between wallets"
        );
        transfer_between_wallets(&mut from, &mut to, input.amount, member.as_ref(), &family)
            .map_err(|e| rejected("between_wallets", e))?;

        let receipt = TransferReceipt {
            amount: input.amount,
            currency: from.currency(),
            from_balance: from.balance(),
            to_balance: to.balance(),
        };
        self.store
            .commit(ChangeSet::new().put_node(from).put_node(to))
            .await?;

        info!(
            from_wallet_id = %input.from_wallet_id,
            to_wallet_id = %input.to_wallet_id,
            amount = %input.amount,
            "Funds transferred"
        );
        Ok(receipt)
    }

    /// The head resolves through the family; everyone else through the store.
    async fn resolve_member(&self, family: &Family, member_id: MemberId) -> AppResult<FamilyMember> {
        if family.head_member().id() == member_id {
            return Ok(family.head_member().clone());
        }
        self.store
            .find_member(member_id)
            .await?
            .ok_or_else(|| rejected("between_wallets", FamilyError::MemberNotFound(member_id)))
    }

    async fn load_node(&self, operation: &str, id: WalletId) -> AppResult<WalletNode> {
        self.store
            .find_node(id)
            .await?
            .ok_or_else(|| rejected(operation, WalletError::NotFound(id)))
    }
}
