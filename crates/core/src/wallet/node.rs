//! A wallet ID resolved to either wallet shape.

use famwallet_shared::types::{Currency, FamilyId, WalletId};
use rust_decimal::Decimal;

use super::error::SubWalletError;
use super::model::Wallet;
use super::sub_wallet::SubWallet;
use crate::entity::Entity;

/// Wallets and sub-wallets share one ID space; a node is whichever one an ID names.
#[derive(Debug, Clone)]
pub enum WalletNode {
    /// Top-level family wallet.
    Wallet(Wallet),
    /// Nested sub-wallet.
    SubWallet(SubWallet),
}

impl WalletNode {
    /// ID of the node.
    #[must_use]
    pub fn id(&self) -> WalletId {
        match self {
            Self::Wallet(w) => w.id(),
            Self::SubWallet(s) => s.id(),
        }
    }

    /// Owning family.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        match self {
            Self::Wallet(w) => w.family_id(),
            Self::SubWallet(s) => s.family_id(),
        }
    }

    /// Currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        match self {
            Self::Wallet(w) => w.currency(),
            Self::SubWallet(s) => s.currency(),
        }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        match self {
            Self::Wallet(w) => w.balance(),
            Self::SubWallet(s) => s.balance(),
        }
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Wallet(w) => w.description(),
            Self::SubWallet(s) => s.description(),
        }
    }

    /// Parent wallet, `None` for a top-level wallet.
    #[must_use]
    pub const fn parent_id(&self) -> Option<WalletId> {
        match self {
            Self::Wallet(_) => None,
            Self::SubWallet(s) => Some(s.parent_id()),
        }
    }

    /// Direct children.
    #[must_use]
    pub fn sub_wallets(&self) -> &[WalletId] {
        match self {
            Self::Wallet(w) => w.sub_wallets(),
            Self::SubWallet(s) => s.sub_wallets(),
        }
    }

    /// Deposits money into either shape.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), SubWalletError> {
        match self {
            Self::Wallet(w) => Ok(w.add_money(amount)?),
            Self::SubWallet(s) => s.add_money(amount),
        }
    }

    /// Creates a sub-wallet under this node.
    pub fn create_sub_wallet(
        &mut self,
        id: WalletId,
        initial_balance: Decimal,
        description: impl Into<String>,
    ) -> Result<SubWallet, SubWalletError> {
        match self {
            Self::Wallet(w) => Ok(w.create_sub_wallet(id, initial_balance, description)?),
            Self::SubWallet(s) => s.create_sub_wallet(id, initial_balance, description),
        }
    }

    /// Forgets a deleted child.
    pub fn detach_sub_wallet(&mut self, id: WalletId) -> bool {
        match self {
            Self::Wallet(w) => w.detach_sub_wallet(id),
            Self::SubWallet(s) => s.detach_sub_wallet(id),
        }
    }
}

impl From<Wallet> for WalletNode {
    fn from(wallet: Wallet) -> Self {
        Self::Wallet(wallet)
    }
}

impl From<SubWallet> for WalletNode {
    fn from(sub_wallet: SubWallet) -> Self {
        Self::SubWallet(sub_wallet)
    }
}
