//! Stateless state machine for leave/reimbursement status transitions.

use chrono::Utc;
use uuid::Uuid;

use crate::approval::error::ApprovalError;
use crate::approval::types::{ApprovalAction, RequestStatus};

/// Stateless service validating and executing status transitions.
///
/// All methods are associated functions of (current status, input) that
/// either produce an [`ApprovalAction`] carrying the audit trail or fail
/// with a typed error. Persistence is the repository's concern.
pub struct ApprovalService;

impl ApprovalService {
    /// Approve a pending record.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::InvalidTransition` unless the record is
    /// currently `Pending`.
    pub fn approve(
        current_status: RequestStatus,
        decided_by: Uuid,
    ) -> Result<ApprovalAction, ApprovalError> {
        match current_status {
            RequestStatus::Pending => Ok(ApprovalAction::Approve {
                new_status: RequestStatus::Approved,
                decided_by,
                decided_at: Utc::now(),
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: RequestStatus::Approved,
            }),
        }
    }

    /// Reject a pending record.
    ///
    /// The reason is optional; when supplied it must not be blank.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::BlankRejectionReason` for a supplied blank
    /// reason, or `ApprovalError::InvalidTransition` unless the record is
    /// currently `Pending`.
    pub fn reject(
        current_status: RequestStatus,
        decided_by: Uuid,
        rejection_reason: Option<String>,
    ) -> Result<ApprovalAction, ApprovalError> {
        if let Some(reason) = &rejection_reason
            && reason.trim().is_empty()
        {
            return Err(ApprovalError::BlankRejectionReason);
        }

        match current_status {
            RequestStatus::Pending => Ok(ApprovalAction::Reject {
                new_status: RequestStatus::Rejected,
                decided_by,
                decided_at: Utc::now(),
                rejection_reason,
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: RequestStatus::Rejected,
            }),
        }
    }

    /// Dispatch a decision by target status.
    ///
    /// Input validation precedes any record lookup: the target must be a
    /// member of the status enum, and `pending` is never a legal target.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::UnknownStatus` for an unparseable target,
    /// and the errors of [`Self::approve`]/[`Self::reject`] otherwise.
    pub fn decide(
        current_status: RequestStatus,
        target: &str,
        decided_by: Uuid,
        rejection_reason: Option<String>,
    ) -> Result<ApprovalAction, ApprovalError> {
        let Some(target_status) = RequestStatus::parse(target) else {
            return Err(ApprovalError::UnknownStatus(target.to_string()));
        };

        match target_status {
            RequestStatus::Approved => Self::approve(current_status, decided_by),
            RequestStatus::Rejected => Self::reject(current_status, decided_by, rejection_reason),
            RequestStatus::Pending => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: RequestStatus::Pending,
            }),
        }
    }

    /// Validate the date range of a new leave request.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::InvalidDateRange` when the start date falls
    /// after the end date. Equal dates are a one-day leave and are valid.
    pub fn validate_leave_dates(
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<(), ApprovalError> {
        if start > end {
            return Err(ApprovalError::InvalidDateRange { start, end });
        }
        Ok(())
    }

    /// Validate the amount of a new reimbursement.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::NegativeAmount` for a negative amount. Zero
    /// is accepted.
    pub fn validate_amount(amount: rust_decimal::Decimal) -> Result<(), ApprovalError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ApprovalError::NegativeAmount(amount));
        }
        Ok(())
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    #[must_use]
    pub const fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
        matches!(
            (from, to),
            (
                RequestStatus::Pending,
                RequestStatus::Approved | RequestStatus::Rejected
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_from_pending() {
        let actor = Uuid::new_v4();
        let action = ApprovalService::approve(RequestStatus::Pending, actor).unwrap();
        assert_eq!(action.new_status(), RequestStatus::Approved);
        assert_eq!(action.decided_by(), actor);
    }

    #[test]
    fn test_approve_from_terminal_fails() {
        let actor = Uuid::new_v4();
        for from in [RequestStatus::Approved, RequestStatus::Rejected] {
            let result = ApprovalService::approve(from, actor);
            assert!(matches!(
                result,
                Err(ApprovalError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_reapprove_already_approved_fails() {
        // Double-processing guard: re-issuing the same terminal status
        // must fail, not silently succeed.
        let actor = Uuid::new_v4();
        let result = ApprovalService::approve(RequestStatus::Approved, actor);
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition {
                from: RequestStatus::Approved,
                to: RequestStatus::Approved,
            })
        ));
    }

    #[test]
    fn test_reject_from_pending_without_reason() {
        let actor = Uuid::new_v4();
        let action = ApprovalService::reject(RequestStatus::Pending, actor, None).unwrap();
        assert_eq!(action.new_status(), RequestStatus::Rejected);
        match action {
            ApprovalAction::Reject {
                rejection_reason, ..
            } => assert!(rejection_reason.is_none()),
            ApprovalAction::Approve { .. } => panic!("expected reject action"),
        }
    }

    #[test]
    fn test_reject_with_reason() {
        let actor = Uuid::new_v4();
        let action = ApprovalService::reject(
            RequestStatus::Pending,
            actor,
            Some("missing receipt".to_string()),
        )
        .unwrap();
        match action {
            ApprovalAction::Reject {
                rejection_reason, ..
            } => assert_eq!(rejection_reason.as_deref(), Some("missing receipt")),
            ApprovalAction::Approve { .. } => panic!("expected reject action"),
        }
    }

    #[test]
    fn test_reject_blank_reason_fails() {
        let actor = Uuid::new_v4();
        let result =
            ApprovalService::reject(RequestStatus::Pending, actor, Some("   ".to_string()));
        assert!(matches!(result, Err(ApprovalError::BlankRejectionReason)));
    }

    #[test]
    fn test_reject_from_terminal_fails() {
        let actor = Uuid::new_v4();
        let result = ApprovalService::reject(RequestStatus::Rejected, actor, None);
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_decide_unknown_status_rejected_before_anything() {
        let actor = Uuid::new_v4();
        let result = ApprovalService::decide(RequestStatus::Pending, "cancelled", actor, None);
        assert!(matches!(result, Err(ApprovalError::UnknownStatus(s)) if s == "cancelled"));
    }

    #[test]
    fn test_decide_pending_target_fails() {
        let actor = Uuid::new_v4();
        let result = ApprovalService::decide(RequestStatus::Approved, "pending", actor, None);
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition {
                to: RequestStatus::Pending,
                ..
            })
        ));
    }

    #[test]
    fn test_decide_dispatch() {
        let actor = Uuid::new_v4();
        let approved =
            ApprovalService::decide(RequestStatus::Pending, "approved", actor, None).unwrap();
        assert_eq!(approved.new_status(), RequestStatus::Approved);

        let rejected =
            ApprovalService::decide(RequestStatus::Pending, "rejected", actor, None).unwrap();
        assert_eq!(rejected.new_status(), RequestStatus::Rejected);
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(ApprovalService::is_valid_transition(
            RequestStatus::Pending,
            RequestStatus::Approved
        ));
        assert!(ApprovalService::is_valid_transition(
            RequestStatus::Pending,
            RequestStatus::Rejected
        ));

        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Approved,
            RequestStatus::Rejected
        ));
        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Rejected,
            RequestStatus::Approved
        ));
        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Approved,
            RequestStatus::Pending
        ));
        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Pending,
            RequestStatus::Pending
        ));
    }

    #[test]
    fn test_leave_dates_ordering() {
        use chrono::NaiveDate;

        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert!(ApprovalService::validate_leave_dates(start, end).is_ok());

        // Single-day leave.
        assert!(ApprovalService::validate_leave_dates(start, start).is_ok());

        let err = ApprovalService::validate_leave_dates(end, start).unwrap_err();
        assert!(matches!(err, ApprovalError::InvalidDateRange { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_reimbursement_amount_sign() {
        use rust_decimal_macros::dec;

        assert!(ApprovalService::validate_amount(dec!(150.75)).is_ok());
        assert!(ApprovalService::validate_amount(dec!(0)).is_ok());

        let err = ApprovalService::validate_amount(dec!(-1)).unwrap_err();
        assert!(matches!(err, ApprovalError::NegativeAmount(_)));
        assert_eq!(err.error_code(), "NEGATIVE_AMOUNT");
    }
}
