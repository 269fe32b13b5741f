//! Approval state machine for leave requests and reimbursement claims.
//!
//! Both record types share the same lifecycle: a single non-terminal
//! source state (`pending`) with exactly two terminal successors
//! (`approved`, `rejected`). No transition leaves a terminal state.

mod error;
mod service;
mod types;

pub use error::ApprovalError;
pub use service::ApprovalService;
pub use types::{ApprovalAction, RequestStatus};
