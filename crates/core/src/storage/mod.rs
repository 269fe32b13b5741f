//! Payslip document storage.
//!
//! OpenDAL-backed blob store: local filesystem in development,
//! S3-compatible buckets in production. The core only stores and returns
//! opaque keys; document contents are never interpreted.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
