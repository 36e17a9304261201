//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access tokens carrying the user's permission flags, plus
//!   refresh-token helpers.

pub mod jwt;
pub mod password;
