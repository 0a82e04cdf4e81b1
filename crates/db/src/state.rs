//! Store contents and change application.

use std::collections::BTreeMap;

use famwallet_core::Entity;
use famwallet_core::account::Account;
use famwallet_core::family::{Family, FamilyMember};
use famwallet_core::repository::{Change, RepositoryError};
use famwallet_core::wallet::{SubWallet, Wallet, WalletNode};
use famwallet_shared::types::{AccountId, FamilyId, MemberId, WalletId};

/// Everything the store holds, keyed and ordered by ID.
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub(crate) accounts: BTreeMap<AccountId, Account>,
    pub(crate) families: BTreeMap<FamilyId, Family>,
    pub(crate) members: BTreeMap<MemberId, FamilyMember>,
    pub(crate) wallets: BTreeMap<WalletId, Wallet>,
    pub(crate) sub_wallets: BTreeMap<WalletId, SubWallet>,
}

impl State {
    /// Resolves an ID across both wallet shapes.
    pub(crate) fn node(&self, id: WalletId) -> Option<WalletNode> {
        self.wallets
            .get(&id)
            .cloned()
            .map(WalletNode::Wallet)
            .or_else(|| self.sub_wallets.get(&id).cloned().map(WalletNode::SubWallet))
    }

    fn has_node(&self, id: WalletId) -> bool {
        self.wallets.contains_key(&id) || self.sub_wallets.contains_key(&id)
    }

    /// Applies one change, rejecting writes that would break referential rules.
    ///
    /// Returns the raw ID written, if any, so the caller can advance its sequence.
    pub(crate) fn apply(&mut self, change: Change) -> Result<Option<i64>, RepositoryError> {
        match change {
            Change::PutAccount(account) => {
                let id = account.id();
                self.accounts.insert(id, account);
                Ok(Some(id.into_inner()))
            }
            Change::DeleteAccount(id) => {
                self.accounts
                    .remove(&id)
                    .ok_or_else(|| reject(format!("account {id} does not exist")))?;
                Ok(None)
            }
            Change::PutFamily(family) => {
                let id = family.id();
                self.families.insert(id, family);
                Ok(Some(id.into_inner()))
            }
            Change::PutMember(member) => {
                let id = member.id();
                self.members.insert(id, member);
                Ok(Some(id.into_inner()))
            }
            Change::PutWallet(wallet) => {
                let id = wallet.id();
                if self.sub_wallets.contains_key(&id) {
                    return Err(reject(format!("wallet {id} is already a sub-wallet")));
                }
                if !self.families.contains_key(&wallet.family_id()) {
                    return Err(reject(format!(
                        "wallet {id} references missing family {}",
                        wallet.family_id()
                    )));
                }
                self.wallets.insert(id, wallet);
                Ok(Some(id.into_inner()))
            }
            Change::PutSubWallet(sub_wallet) => {
                let id = sub_wallet.id();
                if self.wallets.contains_key(&id) {
                    return Err(reject(format!("sub-wallet {id} is already a wallet")));
                }
                if !self.has_node(sub_wallet.parent_id()) {
                    return Err(reject(format!(
                        "sub-wallet {id} references missing parent {}",
                        sub_wallet.parent_id()
                    )));
                }
                self.sub_wallets.insert(id, sub_wallet);
                Ok(Some(id.into_inner()))
            }
            Change::DeleteWallet(id) => {
                let removed = self.wallets.remove(&id).is_some()
                    || self.sub_wallets.remove(&id).is_some();
                if !removed {
                    return Err(reject(format!("wallet {id} does not exist")));
                }
                Ok(None)
            }
        }
    }
}

fn reject(reason: String) -> RepositoryError {
    RepositoryError::CommitRejected(reason)
}
