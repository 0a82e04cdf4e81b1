//! Personal accounts owned by a profile.

pub mod error;
pub mod model;
pub mod service;

pub use error::AccountError;
pub use model::Account;
pub use service::{AccountService, AddFunds, NewAccount};
