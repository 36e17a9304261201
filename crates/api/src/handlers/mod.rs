//! Request handlers.
//!
//! Handlers take their permission extractor first, then `State`, path and
//! query extractors, with the body last. Each delegates to the matching
//! repository in `ontdek_db` and maps errors via [`crate::error::AppError`].

pub mod activity;
pub mod auth;
pub mod content;
pub mod destination;
pub mod diagnostics;
pub mod guide;
pub mod highlight;
pub mod motivation;
pub mod page;
pub mod search;
pub mod search_config;
pub mod site_settings;
pub mod template;
pub mod upload;
pub mod users;
