//! Sub-wallet entity.
//!
//! A sub-wallet is a wallet with a parent and an optional member set. With an
//! empty set it behaves like its parent wallet. With members it is *private*:
//! every debit must name an authorized member.

use std::collections::BTreeSet;

use famwallet_shared::types::{Currency, FamilyId, Identity, MemberId, Money, WalletId};
use rust_decimal::Decimal;

use super::error::{SubWalletError, WalletError};
use super::model::Wallet;
use crate::entity::{Entity, identity_eq};
use crate::family::{Family, FamilyMember};

/// Child wallet of a wallet or of another sub-wallet.
#[derive(Debug, Clone)]
pub struct SubWallet {
    base: Wallet,
    parent_id: WalletId,
    members: BTreeSet<MemberId>,
}

impl SubWallet {
    /// Creates a sub-wallet directly, e.g. when rebuilding from storage.
    ///
    /// Prefer [`Wallet::create_sub_wallet`], which also links the parent.
    pub fn new(
        id: WalletId,
        parent_id: WalletId,
        opening: Money,
        description: impl Into<String>,
        family_id: FamilyId,
    ) -> Result<Self, SubWalletError> {
        let base = Wallet::new(id, opening, description, family_id)?;
        Ok(Self::from_base(base, parent_id))
    }

    pub(crate) fn from_base(base: Wallet, parent_id: WalletId) -> Self {
        Self {
            base,
            parent_id,
            members: BTreeSet::new(),
        }
    }

    /// Wallet this sub-wallet belongs to.
    #[must_use]
    pub const fn parent_id(&self) -> WalletId {
        self.parent_id
    }

    /// Wallet view of this sub-wallet (read-only).
    #[must_use]
    pub const fn as_wallet(&self) -> &Wallet {
        &self.base
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.base.description()
    }

    /// Owning family.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        self.base.family_id()
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.base.balance()
    }

    /// Currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.base.currency()
    }

    /// Direct child sub-wallets.
    #[must_use]
    pub fn sub_wallets(&self) -> &[WalletId] {
        self.base.sub_wallets()
    }

    /// Authorized members, ordered by ID.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<MemberId> {
        &self.members
    }

    /// A sub-wallet with members is private.
    #[must_use]
    pub fn is_private(&self) -> bool {
        !self.members.is_empty()
    }

    /// Returns true if `member` may debit this sub-wallet.
    #[must_use]
    pub fn is_member(&self, member: &FamilyMember) -> bool {
        !member.id().is_transient() && self.members.contains(&member.id())
    }

    /// Adds an authorized member. Adding a present member is a no-op.
    ///
    /// # Errors
    ///
    /// `MissingMember` for a member without an identity, `ForeignMember` for a
    /// member of another family.
    pub fn add_member(&mut self, member: &FamilyMember) -> Result<(), SubWalletError> {
        self.check_member(member)?;
        self.members.insert(member.id());
        Ok(())
    }

    /// Removes an authorized member. Removing an absent member is a no-op.
    ///
    /// # Errors
    ///
    /// `MissingMember` for a transient ID.
    pub fn remove_member(&mut self, member_id: MemberId) -> Result<(), SubWalletError> {
        if member_id.is_transient() {
            return Err(SubWalletError::MissingMember);
        }
        self.members.remove(&member_id);
        Ok(())
    }

    fn check_member(&self, member: &FamilyMember) -> Result<(), SubWalletError> {
        if member.id().is_transient() {
            return Err(SubWalletError::MissingMember);
        }
        if member.family_id() != self.family_id() {
            return Err(SubWalletError::ForeignMember {
                member_id: member.id(),
                family_id: self.family_id(),
            });
        }
        Ok(())
    }

    /// Deposits money. Deposits never need authorization.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), SubWalletError> {
        Ok(self.base.add_money(amount)?)
    }

    /// Withdraws without naming a member.
    ///
    /// # Errors
    ///
    /// `Private` if the sub-wallet has members, otherwise any balance error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), SubWalletError> {
        if self.is_private() {
            return Err(SubWalletError::Private(self.description().to_string()));
        }
        Ok(self.base.withdraw(amount)?)
    }

    /// Withdraws on behalf of an authorized member.
    ///
    /// # Errors
    ///
    /// `NotPrivate` if the sub-wallet has no members, `MissingMember` if no
    /// member is given, `MemberNotAuthorized` if the member is not in the set,
    /// otherwise any balance error.
    pub fn withdraw_as(
        &mut self,
        amount: Decimal,
        member: Option<&FamilyMember>,
    ) -> Result<(), SubWalletError> {
        if !self.is_private() {
            return Err(SubWalletError::NotPrivate(self.description().to_string()));
        }
        let member = member.ok_or(SubWalletError::MissingMember)?;
        if !self.is_member(member) {
            return Err(SubWalletError::MemberNotAuthorized {
                member_id: member.id(),
                name: member.name().to_string(),
            });
        }
        Ok(self.base.withdraw(amount)?)
    }

    /// Withdraws from a private sub-wallet on behalf of the family head.
    ///
    /// # Errors
    ///
    /// `NotPrivate` if the sub-wallet has no members, `NotHeadMember` unless
    /// `head` is the head of `family` and `family` owns this sub-wallet.
    pub fn withdraw_as_head(
        &mut self,
        amount: Decimal,
        head: &FamilyMember,
        family: &Family,
    ) -> Result<(), SubWalletError> {
        if !self.is_private() {
            return Err(SubWalletError::NotPrivate(self.description().to_string()));
        }
        if family.id() != self.family_id() || !family.is_head(head) {
            return Err(SubWalletError::NotHeadMember(head.id()));
        }
        Ok(self.base.withdraw(amount)?)
    }

    /// Changes the currency of an empty sub-wallet.
    pub fn change_currency(&mut self, currency: Currency) -> Result<(), SubWalletError> {
        Ok(self.base.change_currency(currency)?)
    }

    /// Replaces the description.
    pub fn rename(&mut self, description: impl Into<String>) -> Result<(), SubWalletError> {
        Ok(self.base.rename(description)?)
    }

    /// Creates a nested sub-wallet under this one.
    pub fn create_sub_wallet(
        &mut self,
        id: WalletId,
        initial_balance: Decimal,
        description: impl Into<String>,
    ) -> Result<Self, SubWalletError> {
        Ok(self.base.create_sub_wallet(id, initial_balance, description)?)
    }

    /// Forgets a deleted child. Returns false if it was not a child.
    pub fn detach_sub_wallet(&mut self, id: WalletId) -> bool {
        self.base.detach_sub_wallet(id)
    }

    /// Sub-wallets with money or children cannot be deleted.
    pub fn ensure_deletable(&self) -> Result<(), SubWalletError> {
        if !self.base.balance().is_zero() {
            return Err(WalletError::HasBalance {
                wallet_id: self.id(),
                balance: self.balance(),
            }
            .into());
        }
        if self.base.has_sub_wallets() {
            return Err(WalletError::HasSubWallets {
                wallet_id: self.id(),
                count: self.sub_wallets().len(),
            }
            .into());
        }
        Ok(())
    }
}

impl Entity for SubWallet {
    type Id = WalletId;

    fn id(&self) -> WalletId {
        self.base.id()
    }
}

identity_eq!(SubWallet);
