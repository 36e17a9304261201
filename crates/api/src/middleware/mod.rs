//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the user behind a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the same, but absent instead of rejected.
//! - [`rbac`] -- one extractor per permission flag.
//! - [`error_detail`] -- internal 500 detail outside production.

pub mod auth;
pub mod error_detail;
pub mod rbac;
