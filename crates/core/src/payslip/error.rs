//! Error types for payslip operations.

use thiserror::Error;
use uuid::Uuid;

use crate::payslip::month::Month;

/// Errors that can occur while uploading or reading payslips.
#[derive(Debug, Error)]
pub enum PayslipError {
    /// The month string is not one of the twelve names.
    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    /// The referenced employee does not exist.
    #[error("employee {0} not found")]
    EmployeeNotFound(Uuid),

    /// A payslip already exists for this (employee, month, year).
    #[error("payslip already exists for {month} {year}")]
    DuplicatePeriod {
        /// The period's month.
        month: Month,
        /// The period's year.
        year: i32,
    },

    /// The requested payslip does not exist.
    #[error("payslip {0} not found")]
    PayslipNotFound(Uuid),

    /// Record store unavailable (transient, safe to retry).
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PayslipError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UnknownMonth(_) => 400,
            Self::EmployeeNotFound(_) | Self::PayslipNotFound(_) => 404,
            Self::DuplicatePeriod { .. } => 409,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMonth(_) => "UNKNOWN_MONTH",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            Self::PayslipNotFound(_) => "PAYSLIP_NOT_FOUND",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_month_error() {
        let err = PayslipError::UnknownMonth("13".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "UNKNOWN_MONTH");
    }

    #[test]
    fn test_duplicate_period_error() {
        let err = PayslipError::DuplicatePeriod {
            month: Month::March,
            year: 2024,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_PERIOD");
        assert_eq!(err.to_string(), "payslip already exists for March 2024");
    }

    #[test]
    fn test_employee_not_found_error() {
        let err = PayslipError::EmployeeNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "EMPLOYEE_NOT_FOUND");
    }
}
