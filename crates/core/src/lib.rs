//! Core business logic for Famwallet.
//!
//! This crate contains the domain model with ZERO web or database dependencies.
//! Entities never perform I/O; application services load them through the
//! repository ports, run the domain operations and commit the result in one
//! unit of work.
//!
//! # Modules
//!
//! - `funds` - Balance and currency invariants shared by every money-bearing entity
//! - `account` - Personal accounts owned by a profile
//! - `family` - Families and their members
//! - `wallet` - Family wallets and nested sub-wallets
//! - `transfer` - Cross-entity money movement
//! - `repository` - Persistence ports and the atomic change set

pub mod account;
pub mod entity;
pub mod error;
pub mod family;
pub mod funds;
pub mod repository;
pub mod transfer;
pub mod wallet;

mod support;

pub use entity::Entity;
pub use error::ErrorKind;
pub use repository::{ChangeSet, RepositoryError, Store};
