//! Sub-wallet application service.

use std::collections::BTreeSet;
use std::sync::Arc;

use famwallet_shared::AppResult;
use famwallet_shared::types::{
    Currency, FamilyId, Identity, MemberId, PageRequest, PageResponse, WalletId,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::error::{SubWalletError, WalletError};
use super::service::{NewMember, ensure_no_stored_children};
use super::sub_wallet::SubWallet;
use crate::entity::Entity;
use crate::family::{FamilyError, FamilyMember};
use crate::repository::{ChangeSet, Store};
use crate::support::{ensure_not_cancelled, rejected};

/// Input for [`SubWalletService::create_sub_wallet`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubWallet {
    /// Wallet or sub-wallet to nest under.
    pub parent_wallet_id: WalletId,
    /// Family of the parent, checked against it.
    pub family_id: FamilyId,
    /// Description.
    pub description: String,
    /// Opening balance, bounded by the parent balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Currency of the parent, checked against it.
    pub currency: Currency,
    /// Authorized members. Empty means shared.
    #[serde(default)]
    pub members: Vec<NewMember>,
}

/// Input for [`SubWalletService::update_sub_wallet`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubWallet {
    /// New description; ignored when blank.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement member set; ignored when empty.
    #[serde(default)]
    pub members: Vec<NewMember>,
}

/// A sub-wallet with its members resolved.
#[derive(Debug, Clone)]
pub struct SubWalletDetails {
    /// The sub-wallet.
    pub sub_wallet: SubWallet,
    /// Authorized members, ordered by ID.
    pub members: Vec<FamilyMember>,
}

/// Creates, reads, updates and deletes sub-wallets.
#[derive(Clone)]
pub struct SubWalletService {
    store: Arc<dyn Store>,
}

impl SubWalletService {
    /// Creates the service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a sub-wallet under a wallet or another sub-wallet.
    ///
    /// The parent keeps its balance; the new sub-wallet records the parent
    /// as a child in the same commit.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown parent, `Validation` when the family or
    /// currency differ from the parent or the opening balance exceeds it.
    pub async fn create_sub_wallet(
        &self,
        input: NewSubWallet,
        cancel: &CancellationToken,
    ) -> AppResult<SubWalletDetails> {
        let parent_id = input.parent_wallet_id;
        info!(parent_wallet_id = %parent_id, "Creating sub-wallet");

        let mut parent = self
            .store
            .find_node(parent_id)
            .await?
            .ok_or_else(|| rejected("create_sub_wallet", WalletError::NotFound(parent_id)))?;

        if parent.family_id() != input.family_id {
            return Err(rejected(
                "create_sub_wallet",
                SubWalletError::ParentFamilyMismatch {
                    parent_id,
                    requested: input.family_id,
                },
            ));
        }
        if parent.currency() != input.currency {
            return Err(rejected(
                "create_sub_wallet",
                SubWalletError::ParentCurrencyMismatch {
                    parent: parent.currency(),
                    requested: input.currency,
                },
            ));
        }

        let (members, new_members) = self
            .resolve_members(input.members, parent.family_id())
            .await?;

        ensure_not_cancelled(cancel, "create_sub_wallet")?;
        let id = WalletId::new(self.store.next_id().await?);
        let mut sub_wallet = parent
            .create_sub_wallet(id, input.balance, input.description)
            .map_err(|e| rejected("create_sub_wallet", e))?;
        for member in &members {
            sub_wallet
                .add_member(member)
                .map_err(|e| rejected("create_sub_wallet", e))?;
        }

        let mut changes = ChangeSet::new();
        for member in new_members {
            changes = changes.put_member(member);
        }
        self.store
            .commit(
                changes
                    .put_node(parent)
                    .put_sub_wallet(sub_wallet.clone()),
            )
            .await?;

        info!(
            sub_wallet_id = %id,
            parent_wallet_id = %parent_id,
            balance = %sub_wallet.balance(),
            members = members.len(),
            "Sub-wallet created"
        );
        Ok(SubWalletDetails {
            sub_wallet,
            members,
        })
    }

    /// Loads a sub-wallet with its members.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such sub-wallet exists.
    pub async fn get_sub_wallet(&self, id: WalletId) -> AppResult<SubWalletDetails> {
        let sub_wallet = self.load(id).await?;
        let members = self.load_members(sub_wallet.members()).await?;
        Ok(SubWalletDetails {
            sub_wallet,
            members,
        })
    }

    /// Lists sub-wallets ordered by ID.
    pub async fn list_sub_wallets(&self, page: PageRequest) -> AppResult<PageResponse<SubWallet>> {
        let (sub_wallets, total) = self.store.list_sub_wallets(page).await?;
        Ok(PageResponse::new(sub_wallets, page.page, page.per_page, total))
    }

    /// Updates the description and reconciles the member set.
    ///
    /// A blank description is ignored. A non-empty member list replaces the
    /// set: members missing from the list are removed, new ones are added.
    pub async fn update_sub_wallet(
        &self,
        id: WalletId,
        input: UpdateSubWallet,
        cancel: &CancellationToken,
    ) -> AppResult<SubWalletDetails> {
        let mut sub_wallet = self.load(id).await?;
        let (members, new_members) = self
            .resolve_members(input.members, sub_wallet.family_id())
            .await?;

        ensure_not_cancelled(cancel, "update_sub_wallet")?;
        if let Some(description) = input.description.filter(|d| !d.trim().is_empty()) {
            sub_wallet
                .rename(description)
                .map_err(|e| rejected("update_sub_wallet", e))?;
            info!(sub_wallet_id = %id, "Updated sub-wallet description");
        }

        if !members.is_empty() {
            let wanted: BTreeSet<MemberId> = members.iter().map(Entity::id).collect();
            let removed: Vec<MemberId> = sub_wallet
                .members()
                .iter()
                .filter(|member_id| !wanted.contains(member_id))
                .copied()
                .collect();
            for member_id in removed {
                sub_wallet
                    .remove_member(member_id)
                    .map_err(|e| rejected("update_sub_wallet", e))?;
                info!(sub_wallet_id = %id, member_id = %member_id, "Removed member from sub-wallet");
            }
            for member in &members {
                if !sub_wallet.is_member(member) {
                    sub_wallet
                        .add_member(member)
                        .map_err(|e| rejected("update_sub_wallet", e))?;
                    info!(sub_wallet_id = %id, member_id = %member.id(), "Added member to sub-wallet");
                }
            }
        }

        let mut changes = ChangeSet::new();
        for member in new_members {
            changes = changes.put_member(member);
        }
        self.store
            .commit(changes.put_sub_wallet(sub_wallet.clone()))
            .await?;

        let members = self.load_members(sub_wallet.members()).await?;
        info!(sub_wallet_id = %id, "Sub-wallet updated");
        Ok(SubWalletDetails {
            sub_wallet,
            members,
        })
    }

    /// Deletes an empty sub-wallet without children and detaches it from its parent.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` while the balance is non-zero or children exist.
    pub async fn delete_sub_wallet(&self, id: WalletId, cancel: &CancellationToken) -> AppResult<()> {
        let sub_wallet = self.load(id).await?;
        sub_wallet
            .ensure_deletable()
            .map_err(|e| rejected("delete_sub_wallet", e))?;
        ensure_no_stored_children(&*self.store, "delete_sub_wallet", id).await?;
        let parent = self.store.find_node(sub_wallet.parent_id()).await?;

        ensure_not_cancelled(cancel, "delete_sub_wallet")?;
        let mut changes = ChangeSet::new();
        if let Some(mut parent) = parent {
            parent.detach_sub_wallet(id);
            changes = changes.put_node(parent);
        } else {
            warn!(
                sub_wallet_id = %id,
                parent_wallet_id = %sub_wallet.parent_id(),
                "Parent wallet missing while deleting sub-wallet"
            );
        }
        self.store.commit(changes.delete_wallet(id)).await?;

        info!(sub_wallet_id = %id, "Sub-wallet deleted");
        Ok(())
    }

    /// Resolves members by ID, creating those without one in `family_id`.
    ///
    /// Returns every resolved member and, separately, the ones to insert.
    async fn resolve_members(
        &self,
        requested: Vec<NewMember>,
        family_id: FamilyId,
    ) -> AppResult<(Vec<FamilyMember>, Vec<FamilyMember>)> {
        let mut members = Vec::with_capacity(requested.len());
        let mut created = Vec::new();
        for member in requested {
            if member.id.is_transient() {
                let id = MemberId::new(self.store.next_id().await?);
                let new_member = FamilyMember::new(id, family_id, member.name);
                created.push(new_member.clone());
                members.push(new_member);
            } else {
                let existing = self
                    .store
                    .find_member(member.id)
                    .await?
                    .ok_or_else(|| rejected("resolve_member", FamilyError::MemberNotFound(member.id)))?;
                members.push(existing);
            }
        }
        Ok((members, created))
    }

    async fn load_members(&self, ids: &BTreeSet<MemberId>) -> AppResult<Vec<FamilyMember>> {
        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            match self.store.find_member(*id).await? {
                Some(member) => members.push(member),
                None => warn!(member_id = %id, "Sub-wallet references a missing member"),
            }
        }
        Ok(members)
    }

    async fn load(&self, id: WalletId) -> AppResult<SubWallet> {
        self.store
            .find_sub_wallet(id)
            .await?
            .ok_or_else(|| rejected("load_sub_wallet", SubWalletError::NotFound(id)))
    }
}
