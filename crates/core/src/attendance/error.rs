//! Error types for attendance operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while marking attendance.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Marking attempted outside the allowed daily window.
    #[error("attendance can only be marked between 09:00 and 17:00 org time (got hour {hour})")]
    OutsideWindow {
        /// The org-local hour of the attempt.
        hour: u32,
    },

    /// Attendance already exists for this employee and business day.
    #[error("attendance already marked for {date}")]
    AlreadyMarked {
        /// The business day that is already marked.
        date: NaiveDate,
    },

    /// Record store unavailable (transient, safe to retry).
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AttendanceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::OutsideWindow { .. } => 422,
            Self::AlreadyMarked { .. } => 409,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::OutsideWindow { .. } => "OUTSIDE_WINDOW",
            Self::AlreadyMarked { .. } => "ALREADY_MARKED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_window_error() {
        let err = AttendanceError::OutsideWindow { hour: 8 };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "OUTSIDE_WINDOW");
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_already_marked_error() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let err = AttendanceError::AlreadyMarked { date };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_MARKED");
        assert!(err.to_string().contains("2024-06-10"));
    }
}
