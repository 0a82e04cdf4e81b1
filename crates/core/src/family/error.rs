//! Family error types.

use famwallet_shared::types::{FamilyId, MemberId};
use thiserror::Error;

use crate::error::{DomainError, ErrorKind};

/// Errors that can occur during family operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FamilyError {
    /// A family cannot exist without a head member.
    #[error("Property head_member cannot be null")]
    MissingHeadMember,

    /// The head member is bound at construction and cannot be replaced.
    #[error("Family {family_id} already has head member {head_id}")]
    HeadMemberAlreadyAssigned {
        /// The family ID.
        family_id: FamilyId,
        /// The bound head member.
        head_id: MemberId,
    },

    /// The member belongs to a different family.
    #[error("Member {member_id} does not belong to family {family_id}")]
    ForeignMember {
        /// The member ID.
        member_id: MemberId,
        /// The family the member was offered to.
        family_id: FamilyId,
    },

    /// Family not found.
    #[error("Family not found: {0}")]
    NotFound(FamilyId),

    /// Family member not found.
    #[error("Family member not found: {0}")]
    MemberNotFound(MemberId),
}

impl DomainError for FamilyError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingHeadMember | Self::ForeignMember { .. } => ErrorKind::Validation,
            Self::HeadMemberAlreadyAssigned { .. } => ErrorKind::InvariantViolation,
            Self::NotFound(_) | Self::MemberNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl FamilyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeadMember => "MISSING_HEAD_MEMBER",
            Self::HeadMemberAlreadyAssigned { .. } => "HEAD_MEMBER_ALREADY_ASSIGNED",
            Self::ForeignMember { .. } => "FOREIGN_MEMBER",
            Self::NotFound(_) => "FAMILY_NOT_FOUND",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
        }
    }
}

crate::error::into_app_error!(FamilyError);
