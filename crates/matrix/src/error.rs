use nearby_core::types::DbId;
use nearby_geo::GeoError;

/// Errors surfaced by the distance-maintenance subsystem.
///
/// `Geo` only escapes from the address-resolution path: matrix passes
/// swallow per-pair provider failures by design.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },
}

pub type Result<T> = std::result::Result<T, Error>;
