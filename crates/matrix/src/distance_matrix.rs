//! Materialization and recomputation of the distance matrix.
//!
//! Every pass is best-effort per pair: a provider `NotFound` (or an
//! outage that survives the retry budget) skips that pair and the pass
//! continues. Distance data is enrichment, not a transactional part of
//! entity creation, so no per-pair failure ever aborts a pass or
//! escapes to the caller.

use futures::stream::{self, StreamExt};
use sqlx::PgPool;
use nearby_core::types::DbId;
use nearby_db::models::distance::{Distance, Endpoint};
use nearby_db::repositories::{DistanceRepo, HomeRepo, LocationRepo};
use nearby_geo::retry::{with_retry, RetryConfig};
use nearby_geo::{Coordinates, GeoError, GeoProvider};

use crate::error::{Error, Result};

/// Upper bound on simultaneous in-flight provider calls per pass.
/// Pairs are independent, so they are safe to overlap; the bound keeps
/// a big materialization from hammering the provider.
pub const MAX_CONCURRENT_LOOKUPS: usize = 4;

/// Outcome of one materialize/recompute pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Pairs for which a row was written.
    pub resolved: usize,
    /// Pairs skipped because the provider had no answer.
    pub skipped: usize,
}

/// Materialize distances from a newly created home to every existing
/// location.
pub async fn materialize_for_new_home(
    pool: &PgPool,
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    home_id: DbId,
) -> Result<PassSummary> {
    let home = HomeRepo::endpoint(pool, home_id).await?.ok_or(Error::NotFound {
        entity: "Home",
        id: home_id,
    })?;
    let locations = LocationRepo::list_endpoints(pool).await?;
    let pairs: Vec<(Endpoint, Endpoint)> = locations.into_iter().map(|l| (home, l)).collect();
    run_pass(pool, geo, retry, pairs).await
}

/// Materialize distances from every existing home to a newly created
/// location.
pub async fn materialize_for_new_location(
    pool: &PgPool,
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    location_id: DbId,
) -> Result<PassSummary> {
    let location = LocationRepo::endpoint(pool, location_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Location",
            id: location_id,
        })?;
    let homes = HomeRepo::list_endpoints(pool).await?;
    let pairs: Vec<(Endpoint, Endpoint)> = homes.into_iter().map(|h| (h, location)).collect();
    run_pass(pool, geo, retry, pairs).await
}

/// Recompute every distance originating from a home: full replace
/// against its current coordinates, not an incremental diff.
///
/// Deletion happens before re-materialization, so a pair that once
/// resolved and now fails reverts to no-row rather than keeping a
/// stale value.
pub async fn recompute_for_home(
    pool: &PgPool,
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    home_id: DbId,
) -> Result<PassSummary> {
    let removed = DistanceRepo::delete_by_home(pool, home_id).await?;
    tracing::debug!(home_id, removed, "Cleared distances before recompute");
    materialize_for_new_home(pool, geo, retry, home_id).await
}

/// Recompute every distance targeting a location.
pub async fn recompute_for_location(
    pool: &PgPool,
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    location_id: DbId,
) -> Result<PassSummary> {
    let removed = DistanceRepo::delete_by_location(pool, location_id).await?;
    tracing::debug!(location_id, removed, "Cleared distances before recompute");
    materialize_for_new_location(pool, geo, retry, location_id).await
}

/// All distances for a home.
///
/// Returns `None` iff the home itself does not exist; an existing home
/// with zero resolved pairs yields `Some` of an empty vec.
pub async fn distances_for_home(pool: &PgPool, home_id: DbId) -> Result<Option<Vec<Distance>>> {
    if !HomeRepo::exists(pool, home_id).await? {
        return Ok(None);
    }
    let distances = DistanceRepo::list_by_home(pool, home_id).await?;
    Ok(Some(distances))
}

/// Run the provider lookups for a set of (home, location) pairs with
/// bounded concurrency, then upsert the successful ones.
async fn run_pass(
    pool: &PgPool,
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    pairs: Vec<(Endpoint, Endpoint)>,
) -> Result<PassSummary> {
    let lookups = stream::iter(pairs.into_iter().map(|(home, location)| async move {
        let minutes = lookup_pair(geo, retry, home, location).await;
        (home.id, location.id, minutes)
    }))
    .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
    .collect::<Vec<_>>()
    .await;

    let mut summary = PassSummary::default();
    for (home_id, location_id, minutes) in lookups {
        match minutes {
            Some(minutes) => {
                DistanceRepo::upsert(pool, home_id, location_id, minutes).await?;
                summary.resolved += 1;
            }
            None => summary.skipped += 1,
        }
    }

    tracing::info!(
        resolved = summary.resolved,
        skipped = summary.skipped,
        "Distance pass complete",
    );
    Ok(summary)
}

/// One provider lookup, retried on outages, collapsed to an optional
/// whole-minute value. `None` means the pair is skipped.
async fn lookup_pair(
    geo: &dyn GeoProvider,
    retry: &RetryConfig,
    home: Endpoint,
    location: Endpoint,
) -> Option<i32> {
    let start = Coordinates {
        longitude: home.longitude,
        latitude: home.latitude,
    };
    let end = Coordinates {
        longitude: location.longitude,
        latitude: location.latitude,
    };

    match with_retry(retry, || geo.route_duration_minutes(start, end)).await {
        Ok(minutes) => Some(minutes.round() as i32),
        Err(GeoError::NotFound(reason)) => {
            tracing::debug!(
                home_id = home.id,
                location_id = location.id,
                reason,
                "No route for pair, skipping",
            );
            None
        }
        Err(GeoError::Unavailable(reason)) => {
            tracing::warn!(
                home_id = home.id,
                location_id = location.id,
                reason,
                "Provider unavailable after retries, skipping pair",
            );
            None
        }
    }
}
