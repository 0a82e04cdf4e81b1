//! Money-bearing state shared by accounts, wallets and sub-wallets.
//!
//! `Funds` owns the two invariants every financial entity relies on:
//! - the balance is never negative
//! - the currency only changes while the balance is exactly zero
//!
//! Entities embed a `Funds` value and wrap its errors in their own error type.

pub mod error;

#[cfg(test)]
mod props;

pub use error::FundsError;

use famwallet_shared::types::{Currency, Money};
use rust_decimal::Decimal;

/// Balance and currency of a money-bearing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Funds {
    balance: Decimal,
    currency: Currency,
}

impl Funds {
    /// Creates funds with an opening balance.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NegativeAmount` for a negative opening balance.
    pub fn new(opening: Money) -> Result<Self, FundsError> {
        if opening.is_negative() {
            return Err(FundsError::NegativeAmount(opening.amount));
        }
        Ok(Self {
            balance: opening.amount,
            currency: opening.currency,
        })
    }

    /// Creates empty funds in the given currency.
    #[must_use]
    pub const fn empty(currency: Currency) -> Self {
        Self {
            balance: Decimal::ZERO,
            currency,
        }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Currency of the balance.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the balance is exactly zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero()
    }

    /// Returns true if `amount` can be withdrawn.
    #[must_use]
    pub fn covers(&self, amount: Decimal) -> bool {
        amount <= self.balance
    }

    /// Adds money to the balance.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NegativeAmount` if `amount < 0`; the balance is unchanged.
    pub fn add_money(&mut self, amount: Decimal) -> Result<(), FundsError> {
        if amount < Decimal::ZERO {
            return Err(FundsError::NegativeAmount(amount));
        }
        self.balance += amount;
        Ok(())
    }

    /// Withdraws money from the balance.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NegativeAmount` if `amount < 0` and
    /// `FundsError::InsufficientFunds` if `amount` exceeds the balance.
    /// The balance is unchanged on error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), FundsError> {
        if amount < Decimal::ZERO {
            return Err(FundsError::NegativeAmount(amount));
        }
        if !self.covers(amount) {
            return Err(FundsError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Changes the currency.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NonZeroBalance` unless the balance is zero.
    pub fn change_currency(&mut self, currency: Currency) -> Result<(), FundsError> {
        if !self.is_empty() {
            return Err(FundsError::NonZeroBalance {
                balance: self.balance,
                to: currency,
            });
        }
        self.currency = currency;
        Ok(())
    }
}
