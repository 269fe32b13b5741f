//! `SeaORM` entity definitions.

pub mod attendance_records;
pub mod leave_requests;
pub mod payslips;
pub mod reimbursements;
pub mod sea_orm_active_enums;
pub mod users;
