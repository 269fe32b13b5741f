//! Attendance window engine.
//!
//! Computes the organizational business day and decides whether the
//! daily marking window is open. Uniqueness per (employee, day) is the
//! store's job; this module only produces the day key and window verdict.

mod error;
mod window;

pub use error::AttendanceError;
pub use window::{ORG_TZ, WINDOW_CLOSE_HOUR, WINDOW_OPEN_HOUR, business_day, check_window};
