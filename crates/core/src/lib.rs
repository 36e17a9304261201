//! Domain logic for the Ontdek Polen content backend.
//!
//! Nothing in this crate touches the database. Repositories in `ontdek_db`
//! and handlers in `ontdek_api` build on these types and helpers.

pub mod asset_store;
pub mod content;
pub mod error;
pub mod permissions;
pub mod platform;
pub mod ranking;
pub mod search;
pub mod slug;
pub mod types;
pub mod upload;
