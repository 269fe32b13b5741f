//! `SeaORM` active enums backed by Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user account (`user_role` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular employee.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Manager, may decide requests and distribute payslips.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Administrator, manager powers plus user management.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<atrium_core::policy::Role> for UserRole {
    fn from(role: atrium_core::policy::Role) -> Self {
        match role {
            atrium_core::policy::Role::Employee => Self::Employee,
            atrium_core::policy::Role::Manager => Self::Manager,
            atrium_core::policy::Role::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for atrium_core::policy::Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Manager => Self::Manager,
            UserRole::Admin => Self::Admin,
        }
    }
}

/// Lifecycle status of an approvable record (`request_status` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_status")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved, terminal.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected, terminal.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<atrium_core::approval::RequestStatus> for RequestStatus {
    fn from(status: atrium_core::approval::RequestStatus) -> Self {
        match status {
            atrium_core::approval::RequestStatus::Pending => Self::Pending,
            atrium_core::approval::RequestStatus::Approved => Self::Approved,
            atrium_core::approval::RequestStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<RequestStatus> for atrium_core::approval::RequestStatus {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => Self::Pending,
            RequestStatus::Approved => Self::Approved,
            RequestStatus::Rejected => Self::Rejected,
        }
    }
}

/// Attendance status (`attendance_status` Postgres enum).
///
/// Only presence is recorded today; absence is the lack of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Marked present within the daily window.
    #[sea_orm(string_value = "present")]
    Present,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_core() {
        for role in [UserRole::Employee, UserRole::Manager, UserRole::Admin] {
            let core: atrium_core::policy::Role = role.into();
            assert_eq!(UserRole::from(core), role);
        }
    }

    #[test]
    fn test_status_round_trips_through_core() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            let core: atrium_core::approval::RequestStatus = status.into();
            assert_eq!(RequestStatus::from(core), status);
        }
    }
}
