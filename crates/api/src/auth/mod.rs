//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 bearer-token issuance and validation.

pub mod jwt;
pub mod password;
