//! Families and their members.
//!
//! A family is created together with its head member. Ordinary members are
//! not owned by the family; they exist through their sub-wallet memberships.

pub mod error;
pub mod model;

pub use error::FamilyError;
pub use model::{Family, FamilyMember, MemberRole};
