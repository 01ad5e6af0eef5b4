//! Address persistence with provider-backed coordinate resolution.

use sqlx::PgPool;
use nearby_core::types::DbId;
use nearby_db::models::address::{Address, CreateAddress};
use nearby_db::repositories::AddressRepo;
use nearby_geo::retry::{with_retry, RetryConfig};
use nearby_geo::{Coordinates, GeoProvider};

use crate::error::{Error, Result};

/// Persists addresses, resolving coordinates through the geo provider.
///
/// Unlike the matrix passes, a resolution failure here is a hard error:
/// an address without coordinates cannot be persisted, so the failure
/// propagates and fails the encompassing entity create/update.
pub struct AddressStore;

impl AddressStore {
    /// Create an address. Coordinates are resolved from the textual
    /// fields unless the caller supplied both of them.
    pub async fn create(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        input: &CreateAddress,
    ) -> Result<Address> {
        let coords = match (input.longitude, input.latitude) {
            (Some(longitude), Some(latitude)) => Coordinates {
                longitude,
                latitude,
            },
            _ => Self::resolve(geo, retry, input).await?,
        };
        let address = AddressRepo::create(pool, input, coords.longitude, coords.latitude).await?;
        Ok(address)
    }

    /// Replace an address. Coordinates are always re-resolved from the
    /// incoming textual fields, even if they did not change, so they
    /// stay authoritative after any edit.
    pub async fn update(
        pool: &PgPool,
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        id: DbId,
        input: &CreateAddress,
    ) -> Result<Address> {
        let coords = Self::resolve(geo, retry, input).await?;
        AddressRepo::replace(pool, id, input, coords.longitude, coords.latitude)
            .await?
            .ok_or(Error::NotFound {
                entity: "Address",
                id,
            })
    }

    async fn resolve(
        geo: &dyn GeoProvider,
        retry: &RetryConfig,
        input: &CreateAddress,
    ) -> Result<Coordinates> {
        let query = input.geocode_query();
        let coords = with_retry(retry, || geo.resolve_coordinates(&query)).await?;
        Ok(coords)
    }
}
