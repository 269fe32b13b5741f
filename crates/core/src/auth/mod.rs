//! Authentication helpers.
//!
//! Password hashing with Argon2id. Role definitions live in
//! [`crate::policy`]; token handling lives in `atrium-shared`.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
