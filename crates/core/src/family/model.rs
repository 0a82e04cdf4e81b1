//! Family and family member entities.

use famwallet_shared::types::{FamilyId, Identity, MemberId};
use serde::{Deserialize, Serialize};

use super::error::FamilyError;
use crate::entity::{Entity, identity_eq};

/// Role of a member inside their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Ordinary member.
    Member,
    /// Administrative head of the family.
    Head,
}

/// A person belonging to a family.
#[derive(Debug, Clone)]
pub struct FamilyMember {
    id: MemberId,
    family_id: FamilyId,
    name: String,
    role: MemberRole,
}

impl FamilyMember {
    /// Creates an ordinary member.
    #[must_use]
    pub fn new(id: MemberId, family_id: FamilyId, name: impl Into<String>) -> Self {
        Self {
            id,
            family_id,
            name: name.into(),
            role: MemberRole::Member,
        }
    }

    /// Family the member belongs to.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        self.family_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role in the family.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns true for the head member.
    #[must_use]
    pub fn is_head(&self) -> bool {
        self.role == MemberRole::Head
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Entity for FamilyMember {
    type Id = MemberId;

    fn id(&self) -> MemberId {
        self.id
    }
}

/// A named group sharing a wallet.
#[derive(Debug, Clone)]
pub struct Family {
    id: FamilyId,
    name: String,
    head_member: FamilyMember,
}

impl Family {
    /// Creates a family bound to its head member.
    ///
    /// The member is promoted to [`MemberRole::Head`].
    ///
    /// # Errors
    ///
    /// `MissingHeadMember` if no member is given, `ForeignMember` if the member
    /// is already attached to another family.
    pub fn new(
        id: FamilyId,
        name: impl Into<String>,
        head_member: Option<FamilyMember>,
    ) -> Result<Self, FamilyError> {
        let mut head = head_member.ok_or(FamilyError::MissingHeadMember)?;
        if !head.family_id.is_transient() && head.family_id != id {
            return Err(FamilyError::ForeignMember {
                member_id: head.id,
                family_id: id,
            });
        }
        head.family_id = id;
        head.role = MemberRole::Head;

        Ok(Self {
            id,
            name: name.into(),
            head_member: head,
        })
    }

    /// Family name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The head member.
    #[must_use]
    pub const fn head_member(&self) -> &FamilyMember {
        &self.head_member
    }

    /// Returns true if `member` is this family's head.
    #[must_use]
    pub fn is_head(&self, member: &FamilyMember) -> bool {
        member.family_id == self.id && self.head_member.same_identity(member)
    }

    /// Re-binds the head member.
    ///
    /// Binding the current head again is a no-op.
    ///
    /// # Errors
    ///
    /// `MissingHeadMember` if no member is given, `HeadMemberAlreadyAssigned`
    /// for any other member.
    pub fn set_head_member(&mut self, member: Option<FamilyMember>) -> Result<(), FamilyError> {
        let member = member.ok_or(FamilyError::MissingHeadMember)?;
        if self.head_member.same_identity(&member) {
            return Ok(());
        }
        Err(FamilyError::HeadMemberAlreadyAssigned {
            family_id: self.id,
            head_id: self.head_member.id,
        })
    }

    /// Replaces the name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Entity for Family {
    type Id = FamilyId;

    fn id(&self) -> FamilyId {
        self.id
    }
}

identity_eq!(Family, FamilyMember);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, ErrorKind};

    fn family() -> Family {
        let head = FamilyMember::new(MemberId::new(10), FamilyId::TRANSIENT, "Anna");
        Family::new(FamilyId::new(1), "Smith", Some(head)).unwrap()
    }

    #[test]
    fn test_new_requires_head_member() {
        let err = Family::new(FamilyId::new(1), "Smith", None).unwrap_err();
        assert_eq!(err, FamilyError::MissingHeadMember);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_new_promotes_head() {
        let family = family();
        let head = family.head_member();
        assert!(head.is_head());
        assert_eq!(head.family_id(), FamilyId::new(1));
        assert!(family.is_head(head));
    }

    #[test]
    fn test_new_rejects_member_of_other_family() {
        let head = FamilyMember::new(MemberId::new(10), FamilyId::new(2), "Anna");
        let err = Family::new(FamilyId::new(1), "Smith", Some(head)).unwrap_err();
        assert!(matches!(err, FamilyError::ForeignMember { .. }));
    }

    #[test]
    fn test_set_same_head_is_noop() {
        let mut family = family();
        let head = family.head_member().clone();
        family.set_head_member(Some(head)).unwrap();
        assert_eq!(family.head_member().id(), MemberId::new(10));
    }

    #[test]
    fn test_reassigning_head_rejected() {
        let mut family = family();
        let other = FamilyMember::new(MemberId::new(11), FamilyId::new(1), "Ben");
        let err = family.set_head_member(Some(other)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(family.head_member().id(), MemberId::new(10));
    }

    #[test]
    fn test_set_head_member_absent() {
        let mut family = family();
        assert_eq!(
            family.set_head_member(None),
            Err(FamilyError::MissingHeadMember)
        );
    }

    #[test]
    fn test_ordinary_member_is_not_head() {
        let family = family();
        let member = FamilyMember::new(MemberId::new(11), FamilyId::new(1), "Ben");
        assert!(!member.is_head());
        assert!(!family.is_head(&member));
    }

    #[test]
    fn test_rename() {
        let mut family = family();
        family.rename("Smith-Jones");
        assert_eq!(family.name(), "Smith-Jones");
    }
}
