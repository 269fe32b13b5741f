//! Payslip period rules.
//!
//! A payslip covers one (employee, month, year) period; months are a
//! closed set of twelve names so that `"January"` and `"1"` can never
//! collide as distinct keys. At most one document exists per period,
//! enforced by the store's unique index.

mod error;
mod month;

pub use error::PayslipError;
pub use month::Month;
