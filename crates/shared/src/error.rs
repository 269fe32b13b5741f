//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Business-rule failures are never retried by the server itself; they are
/// returned to the caller as typed results. Only `StoreUnavailable` is a
/// candidate for caller-side retry.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Status change not permitted from the current state.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Action attempted outside the allowed time window.
    #[error("Outside allowed window: {0}")]
    OutsideWindow(String),

    /// Conflict (duplicate entry for a unique key).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record store unavailable (transient infrastructure failure).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidTransition(_) | Self::OutsideWindow(_) => 422,
            Self::Conflict(_) => 409,
            Self::StoreUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::OutsideWindow(_) => "OUTSIDE_WINDOW",
            Self::Conflict(_) => "CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::InvalidTransition(String::new()).status_code(), 422);
        assert_eq!(AppError::OutsideWindow(String::new()).status_code(), 422);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::StoreUnavailable(String::new()).status_code(), 503);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Unauthorized(String::new()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::InvalidTransition(String::new()).error_code(),
            "INVALID_TRANSITION"
        );
        assert_eq!(
            AppError::OutsideWindow(String::new()).error_code(),
            "OUTSIDE_WINDOW"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::StoreUnavailable(String::new()).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Conflict("duplicate".into()).to_string(),
            "Conflict: duplicate"
        );
        assert_eq!(
            AppError::OutsideWindow("08:59".into()).to_string(),
            "Outside allowed window: 08:59"
        );
        assert_eq!(
            AppError::StoreUnavailable("timeout".into()).to_string(),
            "Store unavailable: timeout"
        );
    }
}
