//! Home lifecycle orchestration.
//!
//! Create/update run three remote-call-bearing stages (address,
//! entity, distances) with no compensating rollback: if a later stage
//! fails, earlier writes stay. Distance data is best-effort
//! enrichment, not a requirement of entity persistence.

use sqlx::PgPool;
use nearby_core::types::DbId;
use nearby_db::models::distance::Distance;
use nearby_db::models::home::{CreateHome, Home, HomeDetail};
use nearby_db::repositories::{AddressRepo, HomeRepo};
use nearby_geo::retry::RetryConfig;
use nearby_geo::GeoProvider;

use crate::address_store::AddressStore;
use crate::distance_matrix;
use crate::error::{Error, Result};

pub struct HomeRegistry;

impl HomeRegistry {
    /// Create a home: persist its address (resolving coordinates),
    /// persist the entity, then materialize its distance row for every
    /// existing location.
    pub async fn create(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        input: &CreateHome,
        creator_id: DbId,
    ) -> Result<HomeDetail> {
        let address = AddressStore::create(pool, geo, retry, &input.address).await?;
        let home = HomeRepo::create(pool, &input.name, address.id, creator_id).await?;

        let summary =
            distance_matrix::materialize_for_new_home(pool, geo, retry, home.id).await?;
        tracing::info!(
            home_id = home.id,
            resolved = summary.resolved,
            skipped = summary.skipped,
            "Materialized distances for new home",
        );

        Ok(HomeDetail::from_parts(home, address))
    }

    /// Update a home: scalar fields, then its address (coordinates
    /// always re-resolved), then a full distance recompute.
    ///
    /// Returns `None` if the home does not exist.
    pub async fn update(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        id: DbId,
        input: &CreateHome,
    ) -> Result<Option<HomeDetail>> {
        let Some(home) = HomeRepo::rename(pool, id, &input.name).await? else {
            return Ok(None);
        };

        let address =
            AddressStore::update(pool, geo, retry, home.address_id, &input.address).await?;

        let summary = distance_matrix::recompute_for_home(pool, geo, retry, id).await?;
        tracing::info!(
            home_id = id,
            resolved = summary.resolved,
            skipped = summary.skipped,
            "Recomputed distances after home update",
        );

        Ok(Some(HomeDetail::from_parts(home, address)))
    }

    /// Delete a home with its owned address; distance rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool> {
        let deleted = HomeRepo::delete(pool, id).await?;
        Ok(deleted)
    }

    /// Fetch a home with its address embedded.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<HomeDetail>> {
        let Some(home) = HomeRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let address = AddressRepo::find_by_id(pool, home.address_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "Address",
                id: home.address_id,
            })?;
        Ok(Some(HomeDetail::from_parts(home, address)))
    }

    /// List all homes with addresses embedded.
    pub async fn list(pool: &PgPool) -> Result<Vec<HomeDetail>> {
        let homes = HomeRepo::list(pool).await?;
        let mut details = Vec::with_capacity(homes.len());
        for home in homes {
            details.push(Self::detail(pool, home).await?);
        }
        Ok(details)
    }

    /// All distances for a home; `None` iff the home does not exist.
    pub async fn distances(pool: &PgPool, id: DbId) -> Result<Option<Vec<Distance>>> {
        distance_matrix::distances_for_home(pool, id).await
    }

    async fn detail(pool: &PgPool, home: Home) -> Result<HomeDetail> {
        let address = AddressRepo::find_by_id(pool, home.address_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "Address",
                id: home.address_id,
            })?;
        Ok(HomeDetail::from_parts(home, address))
    }
}
