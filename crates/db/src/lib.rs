//! Storage layer for Famwallet.
//!
//! This crate provides:
//! - `InMemoryStore`, implementing every repository port of `famwallet-core`
//! - All-or-nothing commits of a `ChangeSet` under a single write guard

mod state;
mod store;

pub use store::InMemoryStore;
