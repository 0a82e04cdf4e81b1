//! Family wallet application service.

use std::sync::Arc;

use famwallet_shared::AppResult;
use famwallet_shared::types::{
    Currency, FamilyId, Identity, MemberId, Money, PageRequest, PageResponse, WalletId,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::error::WalletError;
use super::model::Wallet;
use crate::entity::Entity;
use crate::family::{Family, FamilyError, FamilyMember};
use crate::repository::{ChangeSet, Store};
use crate::support::{ensure_not_cancelled, rejected};

/// A member referenced by ID, or created when the ID is transient.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    /// Existing member ID, `0` to create one.
    #[serde(default)]
    pub id: MemberId,
    /// Display name for a new member.
    pub name: String,
}

/// A family referenced by ID, or created when it does not exist yet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFamily {
    /// Existing family ID, `0` to create one.
    #[serde(default)]
    pub id: FamilyId,
    /// Family name.
    pub name: String,
    /// Head member of a new family.
    pub head_member: NewMember,
}

/// Input for [`WalletService::create_wallet`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewWallet {
    /// Description.
    pub description: String,
    /// Opening balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Wallet currency.
    pub currency: Currency,
    /// Owning family.
    pub family: NewFamily,
}

/// Input for [`WalletService::update_wallet`].
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWallet {
    /// New description.
    pub description: String,
    /// New family name, if it changes.
    #[serde(default)]
    pub family_name: Option<String>,
}

/// A wallet together with its family.
#[derive(Debug, Clone)]
pub struct WalletDetails {
    /// The wallet.
    pub wallet: Wallet,
    /// The owning family.
    pub family: Family,
}

/// Creates, reads, updates and deletes top-level family wallets.
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn Store>,
}

impl WalletService {
    /// Creates the service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a wallet, creating its family first if it does not exist.
    ///
    /// # Errors
    ///
    /// `Conflict` if the family already has a wallet in that currency,
    /// `Validation` for invalid input.
    pub async fn create_wallet(
        &self,
        input: NewWallet,
        cancel: &CancellationToken,
    ) -> AppResult<WalletDetails> {
        let family_id = input.family.id;
        if !family_id.is_transient()
            && self
                .store
                .find_wallet_by_family(family_id, input.currency)
                .await?
                .is_some()
        {
            return Err(rejected(
                "create_wallet",
                WalletError::AlreadyExists {
                    family_id,
                    currency: input.currency,
                },
            ));
        }

        let existing = if family_id.is_transient() {
            None
        } else {
            self.store.find_family(family_id).await?
        };

        ensure_not_cancelled(cancel, "create_wallet")?;
        let mut changes = ChangeSet::new();
        let family = if let Some(family) = existing {
            family
        } else {
            let (family, head) = self.build_family(input.family).await?;
            info!(
                family_id = %family.id(),
                head_member_id = %head.id(),
                "Creating family for new wallet"
            );
            changes = changes.put_member(head).put_family(family.clone());
            family
        };

        let id = WalletId::new(self.store.next_id().await?);
        let wallet = Wallet::new(
            id,
            Money::new(input.balance, input.currency),
            input.description,
            family.id(),
        )
        .map_err(|e| rejected("create_wallet", e))?;

        self.store.commit(changes.put_wallet(wallet.clone())).await?;

        info!(
            wallet_id = %id,
            family_id = %family.id(),
            currency = %wallet.currency(),
            "Wallet created"
        );
        Ok(WalletDetails { wallet, family })
    }

    async fn build_family(&self, input: NewFamily) -> AppResult<(Family, FamilyMember)> {
        let family_id = if input.id.is_transient() {
            FamilyId::new(self.store.next_id().await?)
        } else {
            input.id
        };

        let head_id = input.head_member.id;
        let head = if head_id.is_transient() {
            let member_id = MemberId::new(self.store.next_id().await?);
            FamilyMember::new(member_id, family_id, input.head_member.name)
        } else {
            self.store
                .find_member(head_id)
                .await?
                .ok_or_else(|| rejected("create_wallet", FamilyError::MemberNotFound(head_id)))?
        };

        let family = Family::new(family_id, input.name, Some(head))
            .map_err(|e| rejected("create_family", e))?;
        let head = family.head_member().clone();
        Ok((family, head))
    }

    /// Loads a wallet with its family.
    ///
    /// # Errors
    ///
    /// `NotFound` if the wallet or its family does not exist.
    pub async fn get_wallet(&self, id: WalletId) -> AppResult<WalletDetails> {
        let wallet = self.load(id).await?;
        let family = self.load_family(wallet.family_id()).await?;
        Ok(WalletDetails { wallet, family })
    }

    /// Lists top-level wallets ordered by ID.
    pub async fn list_wallets(&self, page: PageRequest) -> AppResult<PageResponse<Wallet>> {
        let (wallets, total) = self.store.list_wallets(page).await?;
        info!(
            page = page.page,
            per_page = page.per_page,
            count = wallets.len(),
            "Fetched wallets"
        );
        Ok(PageResponse::new(wallets, page.page, page.per_page, total))
    }

    /// Changes a wallet's description and, optionally, its family's name.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank description.
    pub async fn update_wallet(
        &self,
        id: WalletId,
        input: UpdateWallet,
        cancel: &CancellationToken,
    ) -> AppResult<WalletDetails> {
        let mut wallet = self.load(id).await?;
        let mut family = self.load_family(wallet.family_id()).await?;

        ensure_not_cancelled(cancel, "update_wallet")?;
        info!(wallet_id = %id, description = %input.description, "Changing wallet description");
        wallet
            .rename(input.description)
            .map_err(|e| rejected("update_wallet", e))?;

        let mut changes = ChangeSet::new();
        if let Some(name) = input.family_name {
            info!(wallet_id = %id, family_id = %family.id(), name = %name, "Changing family name");
            family.rename(name);
            changes = changes.put_family(family.clone());
        }
        self.store.commit(changes.put_wallet(wallet.clone())).await?;

        info!(wallet_id = %id, "Wallet updated");
        Ok(WalletDetails { wallet, family })
    }

    /// Deletes an empty wallet without sub-wallets.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` while sub-wallets exist or the balance is positive.
    /// Sub-wallets are counted both from the wallet's own list and from the
    /// store, so a child the list lost still blocks deletion.
    pub async fn delete_wallet(&self, id: WalletId, cancel: &CancellationToken) -> AppResult<()> {
        let wallet = self.load(id).await?;
        wallet
            .ensure_deletable()
            .map_err(|e| rejected("delete_wallet", e))?;
        ensure_no_stored_children(&*self.store, "delete_wallet", id).await?;

        ensure_not_cancelled(cancel, "delete_wallet")?;
        self.store.commit(ChangeSet::new().delete_wallet(id)).await?;

        info!(wallet_id = %id, "Wallet deleted");
        Ok(())
    }

    async fn load(&self, id: WalletId) -> AppResult<Wallet> {
        self.store
            .find_wallet(id)
            .await?
            .ok_or_else(|| rejected("load_wallet", WalletError::NotFound(id)))
    }

    async fn load_family(&self, id: FamilyId) -> AppResult<Family> {
        self.store
            .find_family(id)
            .await?
            .ok_or_else(|| rejected("load_family", FamilyError::NotFound(id)))
    }
}

/// Fails with `HasSubWallets` if any stored sub-wallet names `id` as its parent.
pub(crate) async fn ensure_no_stored_children(
    store: &dyn Store,
    operation: &str,
    id: WalletId,
) -> AppResult<()> {
    let children = store.find_children(id).await?;
    if children.is_empty() {
        return Ok(());
    }
    Err(rejected(
        operation,
        WalletError::HasSubWallets {
            wallet_id: id,
            count: children.len(),
        },
    ))
}
