//! Role-based authorization policy.
//!
//! A single pure lookup table mapping (actor role, action) to allow/deny.
//! Every mutation in the system goes through [`authorize`] before any
//! record is touched; denial carries the denied role and the attempted
//! action so the HTTP layer can render a 403 response.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// User role in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee: files requests, marks attendance.
    Employee,
    /// Manager: approves/rejects requests, uploads payslips.
    Manager,
    /// Admin: everything a manager can do plus user management.
    Admin,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true for the approver roles (manager and admin).
    #[must_use]
    pub const fn is_approver(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of actions the policy decides over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// File a new leave request.
    CreateLeave,
    /// List the actor's own leave requests.
    ListOwnLeave,
    /// List every employee's leave requests.
    ListAllLeave,
    /// Approve or reject a leave request.
    SetLeaveStatus,
    /// File a new reimbursement claim.
    CreateReimbursement,
    /// List the actor's own reimbursement claims.
    ListOwnReimbursements,
    /// List every employee's reimbursement claims.
    ListAllReimbursements,
    /// Approve or reject a reimbursement claim.
    SetReimbursementStatus,
    /// Mark attendance for the current business day.
    MarkAttendance,
    /// List the actor's own attendance records.
    ListOwnAttendance,
    /// Upload a payslip document for an employee.
    UploadPayslip,
    /// List the actor's own payslips.
    ListOwnPayslips,
    /// List every employee's payslips.
    ListAllPayslips,
    /// Change a user's role or delete a user.
    ManageUsers,
    /// List employee accounts.
    ListEmployees,
}

impl Action {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateLeave => "create_leave",
            Self::ListOwnLeave => "list_own_leave",
            Self::ListAllLeave => "list_all_leave",
            Self::SetLeaveStatus => "set_leave_status",
            Self::CreateReimbursement => "create_reimbursement",
            Self::ListOwnReimbursements => "list_own_reimbursements",
            Self::ListAllReimbursements => "list_all_reimbursements",
            Self::SetReimbursementStatus => "set_reimbursement_status",
            Self::MarkAttendance => "mark_attendance",
            Self::ListOwnAttendance => "list_own_attendance",
            Self::UploadPayslip => "upload_payslip",
            Self::ListOwnPayslips => "list_own_payslips",
            Self::ListAllPayslips => "list_all_payslips",
            Self::ManageUsers => "manage_users",
            Self::ListEmployees => "list_employees",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by the authorization policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// No authenticated actor was supplied.
    #[error("authentication required for {action}")]
    Unauthenticated {
        /// The attempted action.
        action: Action,
    },

    /// The actor's role does not permit the action.
    #[error("role {role} is not authorized for {action}")]
    Forbidden {
        /// The denied role.
        role: Role,
        /// The attempted action.
        action: Action,
    },
}

impl PolicyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated { .. } => 401,
            Self::Forbidden { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

/// Returns the roles permitted to perform an action.
const fn allowed_roles(action: Action) -> &'static [Role] {
    match action {
        Action::CreateLeave | Action::ListOwnLeave => &[Role::Employee],

        Action::ListAllLeave
        | Action::SetLeaveStatus
        | Action::ListAllReimbursements
        | Action::SetReimbursementStatus
        | Action::UploadPayslip
        | Action::ListAllPayslips
        | Action::ListEmployees => &[Role::Manager, Role::Admin],

        Action::CreateReimbursement
        | Action::ListOwnReimbursements
        | Action::MarkAttendance
        | Action::ListOwnAttendance
        | Action::ListOwnPayslips => &[Role::Employee, Role::Manager, Role::Admin],

        Action::ManageUsers => &[Role::Admin],
    }
}

/// Decides whether an actor may perform an action.
///
/// Pure and total over the declared action set. An absent actor is itself
/// a denial; this function never panics for unknown input.
///
/// # Errors
///
/// Returns `PolicyError::Unauthenticated` when `actor` is `None`, or
/// `PolicyError::Forbidden` when the role is not in the action's allow
/// list.
pub fn authorize(actor: Option<Role>, action: Action) -> Result<(), PolicyError> {
    let Some(role) = actor else {
        return Err(PolicyError::Unauthenticated { action });
    };

    if allowed_roles(action).contains(&role) {
        Ok(())
    } else {
        Err(PolicyError::Forbidden { role, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("employee"), Some(Role::Employee));
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Employee.as_str(), "employee");
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_employee_creates_leave() {
        assert!(authorize(Some(Role::Employee), Action::CreateLeave).is_ok());
        assert!(authorize(Some(Role::Manager), Action::CreateLeave).is_err());
        assert!(authorize(Some(Role::Admin), Action::CreateLeave).is_err());
    }

    #[test]
    fn test_employee_denied_list_all_leave() {
        let err = authorize(Some(Role::Employee), Action::ListAllLeave).unwrap_err();
        assert_eq!(
            err,
            PolicyError::Forbidden {
                role: Role::Employee,
                action: Action::ListAllLeave,
            }
        );
        assert!(authorize(Some(Role::Admin), Action::ListAllLeave).is_ok());
        assert!(authorize(Some(Role::Manager), Action::ListAllLeave).is_ok());
    }

    #[test]
    fn test_status_mutation_is_approver_only() {
        for action in [Action::SetLeaveStatus, Action::SetReimbursementStatus] {
            assert!(authorize(Some(Role::Employee), action).is_err());
            assert!(authorize(Some(Role::Manager), action).is_ok());
            assert!(authorize(Some(Role::Admin), action).is_ok());
        }
    }

    #[test]
    fn test_reimbursement_open_to_all_roles() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert!(authorize(Some(role), Action::CreateReimbursement).is_ok());
        }
    }

    #[test]
    fn test_attendance_open_to_all_roles() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert!(authorize(Some(role), Action::MarkAttendance).is_ok());
            assert!(authorize(Some(role), Action::ListOwnAttendance).is_ok());
        }
    }

    #[test]
    fn test_payslip_upload_requires_approver() {
        assert!(authorize(Some(Role::Employee), Action::UploadPayslip).is_err());
        assert!(authorize(Some(Role::Manager), Action::UploadPayslip).is_ok());
        assert!(authorize(Some(Role::Admin), Action::UploadPayslip).is_ok());
    }

    #[test]
    fn test_manage_users_is_admin_only() {
        let err = authorize(Some(Role::Manager), Action::ManageUsers).unwrap_err();
        assert!(matches!(err, PolicyError::Forbidden { .. }));
        assert_eq!(err.status_code(), 403);
        assert!(authorize(Some(Role::Admin), Action::ManageUsers).is_ok());
    }

    #[test]
    fn test_missing_actor_is_denied() {
        let err = authorize(None, Action::MarkAttendance).unwrap_err();
        assert_eq!(
            err,
            PolicyError::Unauthenticated {
                action: Action::MarkAttendance
            }
        );
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_deny_carries_role_and_action() {
        let err = authorize(Some(Role::Employee), Action::UploadPayslip).unwrap_err();
        assert_eq!(
            err.to_string(),
            "role employee is not authorized for upload_payslip"
        );
    }
}
