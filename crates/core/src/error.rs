use crate::types::DbId;

/// Domain-level errors shared by the repository and HTTP layers.
///
/// Messages are user-facing and therefore written in Dutch.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} met id {id} niet gevonden")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{entity} '{slug}' niet gevonden")]
    SlugNotFound { entity: &'static str, slug: String },

    #[error("Validatie mislukt: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Niet ingelogd: {0}")]
    Unauthorized(String),

    #[error("Geen toegang: {0}")]
    Forbidden(String),

    /// The operation cannot run on the current deployment target.
    #[error("Niet ondersteund: {0}")]
    Unsupported(String),

    #[error("Interne fout: {0}")]
    Internal(String),
}
