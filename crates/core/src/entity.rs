//! Identity-based entity equality.

use famwallet_shared::types::Identity;

/// A domain object with a typed identity.
///
/// Two entities are the same when their IDs match and the ID has been
/// assigned. A transient entity equals nothing, not even itself.
pub trait Entity {
    /// Typed ID of the entity.
    type Id: Identity;

    /// Returns the ID.
    fn id(&self) -> Self::Id;

    /// Identity comparison used by `PartialEq`.
    fn same_identity(&self, other: &Self) -> bool {
        let id = self.id();
        !id.is_transient() && id == other.id()
    }
}

/// Implements `PartialEq` for entities via [`Entity::same_identity`].
macro_rules! identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::entity::Entity::same_identity(self, other)
                }
            }
        )+
    };
}

pub(crate) use identity_eq;
