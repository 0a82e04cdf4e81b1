//! Persistence ports.
//!
//! Services read entities through the repository traits, mutate local copies
//! and hand every write to [`UnitOfWork::commit`] as one [`ChangeSet`]. A
//! commit is all-or-nothing: on error the store is left untouched.

use async_trait::async_trait;
use famwallet_shared::AppError;
use famwallet_shared::types::{
    AccountId, Currency, FamilyId, MemberId, PageRequest, ProfileId, WalletId,
};
use thiserror::Error;

use crate::account::Account;
use crate::family::{Family, FamilyMember};
use crate::wallet::{SubWallet, Wallet, WalletNode};

/// Errors raised by a storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A change set was rejected as a whole.
    #[error("Commit rejected: {0}")]
    CommitRejected(String),

    /// The ID sequence is exhausted.
    #[error("ID sequence exhausted")]
    IdsExhausted,
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A single write inside a [`ChangeSet`].
#[derive(Debug, Clone)]
pub enum Change {
    /// Insert or replace an account.
    PutAccount(Account),
    /// Remove an account.
    DeleteAccount(AccountId),
    /// Insert or replace a family.
    PutFamily(Family),
    /// Insert or replace a family member.
    PutMember(FamilyMember),
    /// Insert or replace a top-level wallet.
    PutWallet(Wallet),
    /// Insert or replace a sub-wallet.
    PutSubWallet(SubWallet),
    /// Remove a wallet or sub-wallet.
    DeleteWallet(WalletId),
}

/// Ordered writes committed atomically.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Adds an account write.
    #[must_use]
    pub fn put_account(mut self, account: Account) -> Self {
        self.changes.push(Change::PutAccount(account));
        self
    }

    /// Adds an account removal.
    #[must_use]
    pub fn delete_account(mut self, id: AccountId) -> Self {
        self.changes.push(Change::DeleteAccount(id));
        self
    }

    /// Adds a family write.
    #[must_use]
    pub fn put_family(mut self, family: Family) -> Self {
        self.changes.push(Change::PutFamily(family));
        self
    }

    /// Adds a member write.
    #[must_use]
    pub fn put_member(mut self, member: FamilyMember) -> Self {
        self.changes.push(Change::PutMember(member));
        self
    }

    /// Adds a wallet write.
    #[must_use]
    pub fn put_wallet(mut self, wallet: Wallet) -> Self {
        self.changes.push(Change::PutWallet(wallet));
        self
    }

    /// Adds a sub-wallet write.
    #[must_use]
    pub fn put_sub_wallet(mut self, sub_wallet: SubWallet) -> Self {
        self.changes.push(Change::PutSubWallet(sub_wallet));
        self
    }

    /// Adds a write for whichever wallet shape `node` holds.
    #[must_use]
    pub fn put_node(self, node: WalletNode) -> Self {
        match node {
            WalletNode::Wallet(w) => self.put_wallet(w),
            WalletNode::SubWallet(s) => self.put_sub_wallet(s),
        }
    }

    /// Adds a wallet or sub-wallet removal.
    #[must_use]
    pub fn delete_wallet(mut self, id: WalletId) -> Self {
        self.changes.push(Change::DeleteWallet(id));
        self
    }

    /// Returns true if nothing would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Writes in insertion order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Consumes the set, yielding the writes in insertion order.
    #[must_use]
    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

/// Account lookups.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by ID.
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;

    /// Finds the account a profile holds in `currency`.
    async fn find_account_by_profile(
        &self,
        profile_id: ProfileId,
        currency: Currency,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Lists accounts ordered by ID, with the total count.
    async fn list_accounts(&self, page: PageRequest)
    -> Result<(Vec<Account>, u64), RepositoryError>;
}

/// Family and member lookups.
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Finds a family by ID.
    async fn find_family(&self, id: FamilyId) -> Result<Option<Family>, RepositoryError>;

    /// Finds a member by ID.
    async fn find_member(&self, id: MemberId) -> Result<Option<FamilyMember>, RepositoryError>;
}

/// Wallet and sub-wallet lookups.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Finds a top-level wallet.
    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, RepositoryError>;

    /// Finds a sub-wallet.
    async fn find_sub_wallet(&self, id: WalletId) -> Result<Option<SubWallet>, RepositoryError>;

    /// Resolves an ID to either wallet shape.
    async fn find_node(&self, id: WalletId) -> Result<Option<WalletNode>, RepositoryError>;

    /// Finds the family's top-level wallet in `currency`.
    async fn find_wallet_by_family(
        &self,
        family_id: FamilyId,
        currency: Currency,
    ) -> Result<Option<Wallet>, RepositoryError>;

    /// Lists top-level wallets ordered by ID, with the total count.
    async fn list_wallets(&self, page: PageRequest) -> Result<(Vec<Wallet>, u64), RepositoryError>;

    /// Lists sub-wallets ordered by ID, with the total count.
    async fn list_sub_wallets(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<SubWallet>, u64), RepositoryError>;

    /// Direct children of a wallet or sub-wallet, ordered by ID.
    async fn find_children(&self, parent_id: WalletId) -> Result<Vec<SubWallet>, RepositoryError>;
}

/// ID allocation and atomic commit.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Allocates a fresh, non-transient ID from the shared sequence.
    async fn next_id(&self) -> Result<i64, RepositoryError>;

    /// Applies every change or none of them.
    async fn commit(&self, changes: ChangeSet) -> Result<(), RepositoryError>;
}

/// Everything a service needs from storage.
pub trait Store: AccountRepository + FamilyRepository + WalletRepository + UnitOfWork {}

impl<T> Store for T where T: AccountRepository + FamilyRepository + WalletRepository + UnitOfWork {}
