//! Helpers shared by the application services.

use famwallet_shared::{AppError, AppResult};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::DomainError;

/// Fails with `AppError::Cancelled` when the request was cancelled.
///
/// Only called before the first mutation of an operation.
pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken, operation: &str) -> AppResult<()> {
    if cancel.is_cancelled() {
        warn!(operation, "Operation cancelled before any mutation");
        return Err(AppError::Cancelled(format!("{operation} was cancelled")));
    }
    Ok(())
}

/// Logs a rejected domain operation and converts the error for the caller.
pub(crate) fn rejected<E>(operation: &str, err: E) -> AppError
where
    E: DomainError + Into<AppError>,
{
    warn!(operation, kind = ?err.kind(), error = %err, "Operation rejected");
    err.into()
}
