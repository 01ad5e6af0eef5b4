use crate::types::DbId;

/// Domain-level error taxonomy shared across crates.
///
/// Geo-provider failures have their own type in `nearby-geo`
/// (`NotFound` vs `Unavailable` must stay distinguishable there);
/// everything else funnels through these variants.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
