//! Authentication primitives.
//!
//! - [`password`]: Argon2id password hashing, verification, and strength
//!   validation.
//! - [`jwt`]: JWT access-token generation, validation, and refresh-token
//!   helpers.
//! - [`extractor`]: the [`extractor::AuthUser`] axum extractor.

pub mod extractor;
pub mod jwt;
pub mod password;
