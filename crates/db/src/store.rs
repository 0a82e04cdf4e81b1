//! In-memory implementation of the repository ports.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use famwallet_core::account::Account;
use famwallet_core::family::{Family, FamilyMember};
use famwallet_core::repository::{
    AccountRepository, ChangeSet, FamilyRepository, RepositoryError, UnitOfWork,
    WalletRepository,
};
use famwallet_core::wallet::{SubWallet, Wallet, WalletNode};
use famwallet_shared::types::{
    AccountId, Currency, FamilyId, MemberId, PageRequest, ProfileId, WalletId,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::state::State;

/// Store holding every entity in memory.
///
/// Reads take a shared guard. A commit stages all changes on a copy of the
/// state and swaps it in under one write guard, so readers never observe a
/// partly applied change set.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<State>,
    last_id: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            last_id: AtomicI64::new(0),
        }
    }
}

fn page_of<T>(items: impl ExactSizeIterator<Item = T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let data = items.skip(page.offset()).take(page.limit()).collect();
    (data, total)
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_account_by_profile(
        &self,
        profile_id: ProfileId,
        currency: Currency,
    ) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.profile_id() == profile_id && a.currency() == currency)
            .cloned())
    }

    async fn list_accounts(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Account>, u64), RepositoryError> {
        let state = self.state.read().await;
        Ok(page_of(state.accounts.values().cloned(), page))
    }
}

#[async_trait]
impl FamilyRepository for InMemoryStore {
    async fn find_family(&self, id: FamilyId) -> Result<Option<Family>, RepositoryError> {
        Ok(self.state.read().await.families.get(&id).cloned())
    }

    async fn find_member(&self, id: MemberId) -> Result<Option<FamilyMember>, RepositoryError> {
        Ok(self.state.read().await.members.get(&id).cloned())
    }
}

#[async_trait]
impl WalletRepository for InMemoryStore {
    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, RepositoryError> {
        Ok(self.state.read().await.wallets.get(&id).cloned())
    }

    async fn find_sub_wallet(&self, id: WalletId) -> Result<Option<SubWallet>, RepositoryError> {
        Ok(self.state.read().await.sub_wallets.get(&id).cloned())
    }

    async fn find_node(&self, id: WalletId) -> Result<Option<WalletNode>, RepositoryError> {
        Ok(self.state.read().await.node(id))
    }

    async fn find_wallet_by_family(
        &self,
        family_id: FamilyId,
        currency: Currency,
    ) -> Result<Option<Wallet>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .wallets
            .values()
            .find(|w| w.family_id() == family_id && w.currency() == currency)
            .cloned())
    }

    async fn list_wallets(&self, page: PageRequest) -> Result<(Vec<Wallet>, u64), RepositoryError> {
        let state = self.state.read().await;
        Ok(page_of(state.wallets.values().cloned(), page))
    }

    async fn list_sub_wallets(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<SubWallet>, u64), RepositoryError> {
        let state = self.state.read().await;
        Ok(page_of(state.sub_wallets.values().cloned(), page))
    }

    async fn find_children(&self, parent_id: WalletId) -> Result<Vec<SubWallet>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .sub_wallets
            .values()
            .filter(|s| s.parent_id() == parent_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn next_id(&self) -> Result<i64, RepositoryError> {
        let previous = self.last_id.fetch_add(1, Ordering::SeqCst);
        previous.checked_add(1).ok_or(RepositoryError::IdsExhausted)
    }

    async fn commit(&self, changes: ChangeSet) -> Result<(), RepositoryError> {
        let count = changes.len();
        let mut state = self.state.write().await;
        let mut staged = state.clone();
        let mut highest = 0;

        for change in changes.into_changes() {
            match staged.apply(change) {
                Ok(Some(id)) => highest = highest.max(id),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, changes = count, "Commit rejected, nothing written");
                    return Err(e);
                }
            }
        }

        *state = staged;
        // IDs supplied by callers must never be handed out again.
        self.last_id.fetch_max(highest, Ordering::SeqCst);
        debug!(changes = count, "Commit applied");
        Ok(())
    }
}
