//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Workflow repositories fetch the current record, delegate
//! transition/window/period validation to `atrium-core`, then persist.

pub mod attendance;
pub mod leave;
pub mod payslip;
pub mod reimbursement;
pub mod user;

pub use attendance::AttendanceRepository;
pub use leave::LeaveRepository;
pub use payslip::{CreatePayslipInput, PayslipRepository};
pub use reimbursement::{CreateReimbursementInput, ReimbursementRepository};
pub use user::{UserError, UserRepository};
