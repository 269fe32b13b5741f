//! Approval domain types shared by leave and reimbursement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Status of an approvable record.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// Both `Approved` and `Rejected` are terminal; re-issuing any target
/// status against a terminal record fails rather than silently
/// succeeding, so two concurrent approvers cannot both win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a manager/admin decision.
    Pending,
    /// Approved (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated state transition with audit data.
///
/// Each variant captures the resulting status, the deciding actor, and
/// when the decision happened. The acting identity is recorded into
/// `approved_by` unconditionally on success, for rejections too.
#[derive(Debug, Clone)]
pub enum ApprovalAction {
    /// Approve a pending record.
    Approve {
        /// The new status (`Approved`).
        new_status: RequestStatus,
        /// The manager/admin who decided.
        decided_by: Uuid,
        /// When the decision happened.
        decided_at: DateTime<Utc>,
    },
    /// Reject a pending record.
    Reject {
        /// The new status (`Rejected`).
        new_status: RequestStatus,
        /// The manager/admin who decided.
        decided_by: Uuid,
        /// When the decision happened.
        decided_at: DateTime<Utc>,
        /// Optional reason; when supplied it is persisted verbatim.
        rejection_reason: Option<String>,
    },
}

impl ApprovalAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> RequestStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the deciding actor.
    #[must_use]
    pub const fn decided_by(&self) -> Uuid {
        match self {
            Self::Approve { decided_by, .. } | Self::Reject { decided_by, .. } => *decided_by,
        }
    }

    /// Returns the rejection reason, if this is a rejection carrying one.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Approve { .. } => None,
            Self::Reject {
                rejection_reason, ..
            } => rejection_reason.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(RequestStatus::Pending.as_str(), "pending");
        assert_eq!(RequestStatus::Approved.as_str(), "approved");
        assert_eq!(RequestStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(RequestStatus::parse("pending"), Some(RequestStatus::Pending));
        assert_eq!(
            RequestStatus::parse("APPROVED"),
            Some(RequestStatus::Approved)
        );
        assert_eq!(
            RequestStatus::parse("Rejected"),
            Some(RequestStatus::Rejected)
        );
        assert_eq!(RequestStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", RequestStatus::Pending), "pending");
        assert_eq!(format!("{}", RequestStatus::Rejected), "rejected");
    }
}
