//! Application-wide error types.
//!
//! Every domain error is translated into an `AppError` by the service layer
//! before it leaves the core crate. The originating message is kept verbatim.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requesting party may not perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Withdrawal exceeds the available balance.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// A structural rule would be broken (e.g. deleting a funded wallet).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was cancelled before any state was changed.
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Storage layer error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::InvariantViolation(_) | Self::Conflict(_) => 409,
            Self::InsufficientFunds(_) => 422,
            // nginx-style "client closed request"
            Self::Cancelled(_) => 499,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Cancelled(_) => "REQUEST_CANCELLED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::InsufficientFunds(m)
            | Self::InvariantViolation(m)
            | Self::Conflict(m)
            | Self::Cancelled(m)
            | Self::Storage(m)
            | Self::Internal(m) => m,
        }
    }

    /// Returns true for errors caused by the server rather than the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::Forbidden(String::new()), 403, "FORBIDDEN")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::InsufficientFunds(String::new()), 422, "INSUFFICIENT_FUNDS")]
    #[case(AppError::InvariantViolation(String::new()), 409, "INVARIANT_VIOLATION")]
    #[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
    #[case(AppError::Cancelled(String::new()), 499, "REQUEST_CANCELLED")]
    #[case(AppError::Storage(String::new()), 500, "STORAGE_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Forbidden("msg".into()).to_string(),
            "Access denied: msg"
        );
        assert_eq!(
            AppError::InsufficientFunds("msg".into()).to_string(),
            "Insufficient funds: msg"
        );
        assert_eq!(
            AppError::InvariantViolation("msg".into()).to_string(),
            "Invariant violation: msg"
        );
        assert_eq!(
            AppError::Storage("msg".into()).to_string(),
            "Storage error: msg"
        );
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::Conflict("account already exists".into());
        assert_eq!(err.message(), "account already exists");
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::Internal(String::new()).is_server_error());
        assert!(AppError::Storage(String::new()).is_server_error());
        assert!(!AppError::Validation(String::new()).is_server_error());
    }
}
