//! Domain error classification.
//!
//! Each module defines its own `thiserror` enum. All of them classify into an
//! [`ErrorKind`], which decides how the service layer reports them through
//! [`AppError`].

use famwallet_shared::AppError;

/// Category of a domain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Withdrawal amount exceeds the available balance.
    InsufficientFunds,
    /// The requesting party may not debit the entity.
    Authorization,
    /// A structural rule would be broken.
    InvariantViolation,
    /// A referenced entity does not exist.
    NotFound,
    /// The entity already exists.
    Conflict,
}

/// Implemented by every domain error enum.
pub trait DomainError: std::error::Error {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Converts into the external error channel, keeping the message.
    fn to_app_error(&self) -> AppError {
        let message = self.to_string();
        match self.kind() {
            ErrorKind::Validation => AppError::Validation(message),
            ErrorKind::InsufficientFunds => AppError::InsufficientFunds(message),
            ErrorKind::Authorization => AppError::Forbidden(message),
            ErrorKind::InvariantViolation => AppError::InvariantViolation(message),
            ErrorKind::NotFound => AppError::NotFound(message),
            ErrorKind::Conflict => AppError::Conflict(message),
        }
    }
}

/// Implements `From<$ty> for AppError` through [`DomainError::to_app_error`].
macro_rules! into_app_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for famwallet_shared::AppError {
                fn from(err: $ty) -> Self {
                    $crate::error::DomainError::to_app_error(&err)
                }
            }
        )+
    };
}

pub(crate) use into_app_error;
