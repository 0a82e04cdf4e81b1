//! Account application service.

use std::sync::Arc;

use famwallet_shared::AppResult;
use famwallet_shared::types::{AccountId, Currency, Money, PageRequest, PageResponse, ProfileId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::error::AccountError;
use super::model::Account;
use crate::entity::Entity;
use crate::repository::{ChangeSet, Store};
use crate::support::{ensure_not_cancelled, rejected};

/// Input for [`AccountService::create_account`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    /// Owner profile.
    pub profile_id: ProfileId,
    /// Description.
    pub description: String,
    /// Opening balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Account currency.
    pub currency: Currency,
}

/// Input for [`AccountService::add_funds`].
#[derive(Debug, Clone, Deserialize)]
pub struct AddFunds {
    /// Account to top up.
    pub account_id: AccountId,
    /// Profile asking for the top-up.
    pub profile_id: ProfileId,
    /// Amount to deposit.
    pub amount: Decimal,
}

/// Creates, reads, updates and deletes personal accounts.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    /// Creates the service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Opens an account.
    ///
    /// # Errors
    ///
    /// `Conflict` if the profile already has an account in that currency,
    /// `Validation` for invalid input.
    pub async fn create_account(
        &self,
        input: NewAccount,
        cancel: &CancellationToken,
    ) -> AppResult<Account> {
        if self
            .store
            .find_account_by_profile(input.profile_id, input.currency)
            .await?
            .is_some()
        {
            return Err(rejected(
                "create_account",
                AccountError::AlreadyExists {
                    profile_id: input.profile_id,
                    currency: input.currency,
                },
            ));
        }

        ensure_not_cancelled(cancel, "create_account")?;
        let id = AccountId::new(self.store.next_id().await?);
        let account = Account::new(
            id,
            Money::new(input.balance, input.currency),
            input.description,
            input.profile_id,
        )
        .map_err(|e| rejected("create_account", e))?;

        self.store
            .commit(ChangeSet::new().put_account(account.clone()))
            .await?;

        info!(
            account_id = %id,
            profile_id = %account.profile_id(),
            currency = %account.currency(),
            "Account created"
        );
        Ok(account)
    }

    /// Loads an account.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such account exists.
    pub async fn get_account(&self, id: AccountId) -> AppResult<Account> {
        self.load(id).await
    }

    /// Lists accounts ordered by ID.
    pub async fn list_accounts(&self, page: PageRequest) -> AppResult<PageResponse<Account>> {
        let (accounts, total) = self.store.list_accounts(page).await?;
        Ok(PageResponse::new(accounts, page.page, page.per_page, total))
    }

    /// Replaces an account's description.
    pub async fn update_description(
        &self,
        id: AccountId,
        description: String,
        cancel: &CancellationToken,
    ) -> AppResult<Account> {
        let mut account = self.load(id).await?;

        ensure_not_cancelled(cancel, "update_account")?;
        info!(account_id = %id, description = %description, "Changing account description");
        account.set_description(description);
        self.store
            .commit(ChangeSet::new().put_account(account.clone()))
            .await?;

        info!(account_id = %id, "Account updated");
        Ok(account)
    }

    /// Deletes an empty account.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` while the account holds money.
    pub async fn delete_account(&self, id: AccountId, cancel: &CancellationToken) -> AppResult<()> {
        let account = self.load(id).await?;
        account
            .ensure_deletable()
            .map_err(|e| rejected("delete_account", e))?;

        ensure_not_cancelled(cancel, "delete_account")?;
        self.store
            .commit(ChangeSet::new().delete_account(account.id()))
            .await?;

        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    /// Deposits money into an account on behalf of its owner.
    ///
    /// # Errors
    ///
    /// `Forbidden` unless `profile_id` owns the account, `Validation` for a
    /// negative amount.
    pub async fn add_funds(&self, input: AddFunds, cancel: &CancellationToken) -> AppResult<Account> {
        let mut account = self.load(input.account_id).await?;

        if !account.is_owned_by(input.profile_id) {
            return Err(rejected(
                "add_funds",
                AccountError::ProfileMismatch {
                    account_id: input.account_id,
                    requested_by: input.profile_id,
                },
            ));
        }

        ensure_not_cancelled(cancel, "add_funds")?;
        account
            .add_money(input.amount)
            .map_err(|e| rejected("add_funds", e))?;
        self.store
            .commit(ChangeSet::new().put_account(account.clone()))
            .await?;

        info!(
            account_id = %input.account_id,
            amount = %input.amount,
            balance = %account.balance(),
            "Funds added to account"
        );
        Ok(account)
    }

    async fn load(&self, id: AccountId) -> AppResult<Account> {
        self.store
            .find_account(id)
            .await?
            .ok_or_else(|| rejected("load_account", AccountError::NotFound(id)))
    }
}
