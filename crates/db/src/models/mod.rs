//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod destination;
pub mod guide;
pub mod highlight;
pub mod motivation;
pub mod page;
pub mod search;
pub mod search_config;
pub mod session;
pub mod site_settings;
pub mod template;
pub mod user;

/// Fields every ranked create/update DTO carries, read when deriving the
/// slug and placing the row in the ranking.
pub trait ContentInput {
    /// Title or name, when present in the payload.
    fn title(&self) -> Option<&str>;
    /// Explicit slug, when the editor supplied one.
    fn slug(&self) -> Option<&str>;
    /// Requested ranking slot.
    fn ranking(&self) -> Option<i32>;
}
