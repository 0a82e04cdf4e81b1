//! Family wallet entity.

use famwallet_shared::types::{Currency, FamilyId, Identity, Money, WalletId};
use rust_decimal::Decimal;

use super::error::WalletError;
use super::sub_wallet::SubWallet;
use crate::entity::{Entity, identity_eq};
use crate::funds::Funds;

/// A family's shared money pot.
///
/// Owns its sub-wallets by ID; the sub-wallets themselves live in the store.
#[derive(Debug, Clone)]
pub struct Wallet {
    id: WalletId,
    funds: Funds,
    description: String,
    family_id: FamilyId,
    sub_wallets: Vec<WalletId>,
}

impl Wallet {
    /// Creates a wallet.
    ///
    /// # Errors
    ///
    /// Fails on a blank description, a transient family or a negative opening balance.
    pub fn new(
        id: WalletId,
        opening: Money,
        description: impl Into<String>,
        family_id: FamilyId,
    ) -> Result<Self, WalletError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(WalletError::EmptyDescription);
        }
        if family_id.is_transient() {
            return Err(WalletError::MissingFamily);
        }
        Ok(Self {
            id,
            funds: Funds::new(opening)?,
            description,
            family_id,
            sub_wallets: Vec::new(),
        })
    }

    /// Wallet description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Owning family.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        self.family_id
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.funds.balance()
    }

    /// Wallet currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.funds.currency()
    }

    /// IDs of the direct sub-wallets, in creation order.
    #[must_use]
    pub fn sub_wallets(&self) -> &[WalletId] {
        &self.sub_wallets
    }

    /// Returns true if the wallet has at least one sub-wallet.
    #[must_use]
    pub fn has_sub_wallets(&self) -> bool {
        !self.sub_wallets.is_empty()
    }

    /// Deposits money.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), WalletError> {
        Ok(self.funds.add_money(amount)?)
    }

    /// Withdraws money.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), WalletError> {
        Ok(self.funds.withdraw(amount)?)
    }

    /// Changes the currency of an empty wallet.
    pub fn change_currency(&mut self, currency: Currency) -> Result<(), WalletError> {
        Ok(self.funds.change_currency(currency)?)
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// `EmptyDescription` for a blank description.
    pub fn rename(&mut self, description: impl Into<String>) -> Result<(), WalletError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(WalletError::EmptyDescription);
        }
        self.description = description;
        Ok(())
    }

    /// Creates a sub-wallet under this wallet.
    ///
    /// The sub-wallet gets `initial_balance`, this wallet's currency and family,
    /// and its ID is appended to [`Wallet::sub_wallets`]. This wallet's balance
    /// is not debited: the opening balance is an allocation bounded by it.
    ///
    /// # Errors
    ///
    /// Fails on a blank description, a negative opening balance, an opening
    /// balance above this wallet's balance, or a transient `id`.
    pub fn create_sub_wallet(
        &mut self,
        id: WalletId,
        initial_balance: Decimal,
        description: impl Into<String>,
    ) -> Result<SubWallet, WalletError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(WalletError::EmptyDescription);
        }
        if initial_balance < Decimal::ZERO {
            return Err(WalletError::NegativeInitialBalance(initial_balance));
        }
        if !self.funds.covers(initial_balance) {
            return Err(WalletError::InitialBalanceExceedsBalance {
                requested: initial_balance,
                available: self.balance(),
            });
        }
        if id.is_transient() {
            return Err(WalletError::UnallocatedId);
        }

        let base = Self::new(
            id,
            Money::new(initial_balance, self.currency()),
            description,
            self.family_id,
        )?;
        self.sub_wallets.push(id);
        Ok(SubWallet::from_base(base, self.id))
    }

    /// Forgets a deleted sub-wallet. Returns false if it was not a child.
    pub fn detach_sub_wallet(&mut self, id: WalletId) -> bool {
        let before = self.sub_wallets.len();
        self.sub_wallets.retain(|child| *child != id);
        self.sub_wallets.len() != before
    }

    /// Wallets with sub-wallets or money cannot be deleted.
    pub fn ensure_deletable(&self) -> Result<(), WalletError> {
        if self.has_sub_wallets() {
            return Err(WalletError::HasSubWallets {
                wallet_id: self.id,
                count: self.sub_wallets.len(),
            });
        }
        if self.balance() > Decimal::ZERO {
            return Err(WalletError::HasBalance {
                wallet_id: self.id,
                balance: self.balance(),
            });
        }
        Ok(())
    }
}

impl Entity for Wallet {
    type Id = WalletId;

    fn id(&self) -> WalletId {
        self.id
    }
}

identity_eq!(Wallet);
