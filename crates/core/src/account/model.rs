//! Personal account entity.

use famwallet_shared::types::{AccountId, Currency, Money, ProfileId};
use rust_decimal::Decimal;

use super::error::AccountError;
use crate::entity::{Entity, identity_eq};
use crate::funds::Funds;

/// A person's own financial account, outside the family hierarchy.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    funds: Funds,
    description: String,
    profile_id: ProfileId,
}

impl Account {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Fails if the profile ID is not positive, the description is blank or
    /// the opening balance is negative.
    pub fn new(
        id: AccountId,
        opening: Money,
        description: impl Into<String>,
        profile_id: ProfileId,
    ) -> Result<Self, AccountError> {
        if profile_id.into_inner() <= 0 {
            return Err(AccountError::InvalidProfile(profile_id));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(AccountError::EmptyDescription);
        }
        Ok(Self {
            id,
            funds: Funds::new(opening)?,
            description,
            profile_id,
        })
    }

    /// Owner profile.
    #[must_use]
    pub const fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    /// Account description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.funds.balance()
    }

    /// Account currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.funds.currency()
    }

    /// Returns true if `profile_id` owns this account.
    #[must_use]
    pub fn is_owned_by(&self, profile_id: ProfileId) -> bool {
        self.profile_id == profile_id
    }

    /// Deposits money.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), AccountError> {
        Ok(self.funds.add_money(amount)?)
    }

    /// Withdraws money on behalf of `requested_by`.
    ///
    /// # Errors
    ///
    /// `ProfileMismatch` unless `requested_by` owns the account, otherwise any
    /// balance error. Nothing changes on error.
    pub fn withdraw(&mut self, amount: Decimal, requested_by: ProfileId) -> Result<(), AccountError> {
        if !self.is_owned_by(requested_by) {
            return Err(AccountError::ProfileMismatch {
                account_id: self.id,
                requested_by,
            });
        }
        Ok(self.funds.withdraw(amount)?)
    }

    /// Changes the currency of an empty account.
    pub fn change_currency(&mut self, currency: Currency) -> Result<(), AccountError> {
        Ok(self.funds.change_currency(currency)?)
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Accounts holding money cannot be deleted.
    pub fn ensure_deletable(&self) -> Result<(), AccountError> {
        if self.balance() > Decimal::ZERO {
            return Err(AccountError::HasBalance {
                account_id: self.id,
                balance: self.balance(),
            });
        }
        Ok(())
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> AccountId {
        self.id
    }
}

identity_eq!(Account);
