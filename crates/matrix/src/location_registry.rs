//! Location lifecycle orchestration; mirrors [`crate::home_registry`]
//! on the destination side of the matrix.

use sqlx::PgPool;
use nearby_core::types::DbId;
use nearby_db::models::location::{CreateLocation, Location, LocationDetail};
use nearby_db::repositories::{AddressRepo, LocationRepo};
use nearby_geo::retry::RetryConfig;
use nearby_geo::GeoProvider;

use crate::address_store::AddressStore;
use crate::distance_matrix;
use crate::error::{Error, Result};

pub struct LocationRegistry;

impl LocationRegistry {
    /// Create a location and materialize its distance row for every
    /// existing home.
    pub async fn create(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        input: &CreateLocation,
        creator_id: DbId,
    ) -> Result<LocationDetail> {
        let address = AddressStore::create(pool, geo, retry, &input.address).await?;
        let location = LocationRepo::create(pool, input, address.id, creator_id).await?;

        let summary =
            distance_matrix::materialize_for_new_location(pool, geo, retry, location.id).await?;
        tracing::info!(
            location_id = location.id,
            resolved = summary.resolved,
            skipped = summary.skipped,
            "Materialized distances for new location",
        );

        Ok(LocationDetail::from_parts(location, address))
    }

    /// Update a location: scalar fields, then its address (coordinates
    /// always re-resolved), then a full distance recompute.
    ///
    /// Returns `None` if the location does not exist.
    pub async fn update(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        id: DbId,
        input: &CreateLocation,
    ) -> Result<Option<LocationDetail>> {
        let Some(location) = LocationRepo::update_fields(pool, id, input).await? else {
            return Ok(None);
        };

        let address =
            AddressStore::update(pool, geo, retry, location.address_id, &input.address).await?;

        let summary = distance_matrix::recompute_for_location(pool, geo, retry, id).await?;
        tracing::info!(
            location_id = id,
            resolved = summary.resolved,
            skipped = summary.skipped,
            "Recomputed distances after location update",
        );

        Ok(Some(LocationDetail::from_parts(location, address)))
    }

    /// Delete a location with its owned address; distance rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool> {
        let deleted = LocationRepo::delete(pool, id).await?;
        Ok(deleted)
    }

    /// Fetch a location with its address embedded.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<LocationDetail>> {
        let Some(location) = LocationRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let detail = Self::detail(pool, location).await?;
        Ok(Some(detail))
    }

    /// List all locations with addresses embedded.
    pub async fn list(pool: &PgPool) -> Result<Vec<LocationDetail>> {
        let locations = LocationRepo::list(pool).await?;
        let mut details = Vec::with_capacity(locations.len());
        for location in locations {
            details.push(Self::detail(pool, location).await?);
        }
        Ok(details)
    }

    async fn detail(pool: &PgPool, location: Location) -> Result<LocationDetail> {
        let address = AddressRepo::find_by_id(pool, location.address_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "Address",
                id: location.address_id,
            })?;
        Ok(LocationDetail::from_parts(location, address))
    }
}
