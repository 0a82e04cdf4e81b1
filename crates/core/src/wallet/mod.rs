//! Family wallets and nested sub-wallets.

pub mod error;
pub mod model;
pub mod node;
pub mod service;
pub mod sub_wallet;
pub mod sub_wallet_service;

#[cfg(test)]
mod props;

pub use error::{SubWalletError, WalletError};
pub use model::Wallet;
pub use node::WalletNode;
pub use service::{NewFamily, NewMember, NewWallet, UpdateWallet, WalletDetails, WalletService};
pub use sub_wallet::SubWallet;
pub use sub_wallet_service::{NewSubWallet, SubWalletDetails, SubWalletService, UpdateSubWallet};
