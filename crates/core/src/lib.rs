//! Core business logic for Atrium.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and invariant
//! checks live here.
//!
//! # Modules
//!
//! - `policy` - Role-based authorization table
//! - `approval` - Leave/reimbursement status state machine
//! - `attendance` - Attendance marking window and business-day keys
//! - `payslip` - Payslip period rules
//! - `auth` - Password hashing
//! - `storage` - Payslip document storage (OpenDAL)

pub mod approval;
pub mod attendance;
pub mod auth;
pub mod payslip;
pub mod policy;
pub mod storage;
