//! Error types for approval workflow operations.

use thiserror::Error;
use uuid::Uuid;

use crate::approval::types::RequestStatus;

/// Errors that can occur while deciding a leave or reimbursement record.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Attempted an invalid status transition.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: RequestStatus,
        /// The attempted target status.
        to: RequestStatus,
    },

    /// The target status string is not a member of the status enum.
    #[error("unknown status '{0}'")]
    UnknownStatus(String),

    /// A supplied rejection reason must not be blank.
    #[error("rejection reason must not be blank")]
    BlankRejectionReason,

    /// Leave start date is after the end date.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Requested start date.
        start: chrono::NaiveDate,
        /// Requested end date.
        end: chrono::NaiveDate,
    },

    /// Reimbursement amount is negative.
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(rust_decimal::Decimal),

    /// Record not found.
    #[error("record {0} not found")]
    RecordNotFound(Uuid),

    /// Record store unavailable (transient, safe to retry).
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApprovalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 422,
            Self::UnknownStatus(_)
            | Self::BlankRejectionReason
            | Self::InvalidDateRange { .. }
            | Self::NegativeAmount(_) => 400,
            Self::RecordNotFound(_) => 404,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::BlankRejectionReason => "BLANK_REJECTION_REASON",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::RecordNotFound(_) => "RECORD_NOT_FOUND",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = ApprovalError::InvalidTransition {
            from: RequestStatus::Approved,
            to: RequestStatus::Rejected,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("approved"));
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_unknown_status_error() {
        let err = ApprovalError::UnknownStatus("cancelled".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "UNKNOWN_STATUS");
    }

    #[test]
    fn test_record_not_found_error() {
        let err = ApprovalError::RecordNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_store_unavailable_error() {
        let err = ApprovalError::StoreUnavailable("timeout".to_string());
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_blank_reason_error() {
        let err = ApprovalError::BlankRejectionReason;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "BLANK_REJECTION_REASON");
    }
}
