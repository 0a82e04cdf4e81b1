//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `WalletId` where a `FamilyId` is expected.
//! IDs are positive integers assigned by the store; `0` is the transient ID of an
//! entity that has not been persisted yet.

use serde::{Deserialize, Serialize};

/// Common behaviour of every typed ID.
pub trait Identity: Copy + Eq + std::fmt::Debug {
    /// Returns true for the transient (unassigned) ID.
    fn is_transient(&self) -> bool;
}

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The ID of an entity that has not been persisted.
            pub const TRANSIENT: Self = Self(0);

            /// Creates an ID from a raw value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner value.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl Identity for $name {
            fn is_transient(&self) -> bool {
                self.0 == 0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(AccountId, "Unique identifier for a personal account.");
typed_id!(ProfileId, "Identifier of the person profile that owns an account.");
typed_id!(FamilyId, "Unique identifier for a family.");
typed_id!(MemberId, "Unique identifier for a family member.");
typed_id!(
    WalletId,
    "Unique identifier for a wallet or sub-wallet (one shared ID space)."
);
