//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod destination_repo;
pub mod diagnostics_repo;
pub mod guide_repo;
pub mod highlight_repo;
pub mod motivation_repo;
pub mod page_repo;
pub mod ranked_repo;
pub mod search_config_repo;
pub mod search_repo;
pub mod session_repo;
pub mod site_settings_repo;
pub mod template_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use destination_repo::DestinationRepo;
pub use diagnostics_repo::DiagnosticsRepo;
pub use guide_repo::GuideRepo;
pub use highlight_repo::HighlightRepo;
pub use motivation_repo::MotivationRepo;
pub use page_repo::PageRepo;
pub use ranked_repo::{RankedEntity, RankedRepo, RankingChange, RankingError, RowState};
pub use search_config_repo::SearchConfigRepo;
pub use search_repo::SearchRepo;
pub use session_repo::SessionRepo;
pub use site_settings_repo::SiteSettingsRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
