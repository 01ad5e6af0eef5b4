//! Shared fixtures for matrix integration tests: a deterministic
//! scripted geo provider and entity input builders.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use sqlx::PgPool;
use nearby_core::roles::Role;
use nearby_core::types::DbId;
use nearby_db::models::address::CreateAddress;
use nearby_db::models::home::CreateHome;
use nearby_db::models::location::CreateLocation;
use nearby_db::repositories::UserRepo;
use nearby_geo::retry::RetryConfig;
use nearby_geo::{Coordinates, GeoError, GeoProvider};

/// Coordinates quantized to ~1e-4 degrees so they can key a map.
type CoordKey = (i64, i64);

fn key(c: Coordinates) -> CoordKey {
    (
        (c.longitude * 10_000.0).round() as i64,
        (c.latitude * 10_000.0).round() as i64,
    )
}

/// Scripted answer for one (start, end) route lookup.
pub enum RouteAnswer {
    Minutes(f64),
    NotFound,
    Unavailable,
}

/// Deterministic in-memory [`GeoProvider`] double.
///
/// Geocode queries and routes not explicitly scripted answer
/// `NotFound`, matching a provider that has no data for them.
#[derive(Default)]
pub struct StubGeo {
    coords: HashMap<String, Coordinates>,
    routes: HashMap<(CoordKey, CoordKey), RouteAnswer>,
    pub geocode_calls: AtomicUsize,
    pub route_calls: AtomicUsize,
}

impl StubGeo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coords(mut self, query: &str, longitude: f64, latitude: f64) -> Self {
        self.coords.insert(
            query.to_string(),
            Coordinates {
                longitude,
                latitude,
            },
        );
        self
    }

    pub fn with_route(mut self, start: (f64, f64), end: (f64, f64), minutes: f64) -> Self {
        self.script_route(start, end, RouteAnswer::Minutes(minutes));
        self
    }

    pub fn with_unavailable_route(mut self, start: (f64, f64), end: (f64, f64)) -> Self {
        self.script_route(start, end, RouteAnswer::Unavailable);
        self
    }

    fn script_route(&mut self, start: (f64, f64), end: (f64, f64), answer: RouteAnswer) {
        let start = Coordinates {
            longitude: start.0,
            latitude: start.1,
        };
        let end = Coordinates {
            longitude: end.0,
            latitude: end.1,
        };
        self.routes.insert((key(start), key(end)), answer);
    }
}

#[async_trait::async_trait]
impl GeoProvider for StubGeo {
    async fn resolve_coordinates(&self, query: &str) -> Result<Coordinates, GeoError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.coords
            .get(query)
            .copied()
            .ok_or_else(|| GeoError::NotFound(format!("No coordinates for '{query}'")))
    }

    async fn route_duration_minutes(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<f64, GeoError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        match self.routes.get(&(key(start), key(end))) {
            Some(RouteAnswer::Minutes(minutes)) => Ok(*minutes),
            Some(RouteAnswer::NotFound) | None => {
                Err(GeoError::NotFound("No route between points".into()))
            }
            Some(RouteAnswer::Unavailable) => Err(GeoError::Unavailable("Scripted outage".into())),
        }
    }
}

/// Retry config with zero delays so outage paths do not slow tests.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 2,
        initial_delay: std::time::Duration::ZERO,
        max_delay: std::time::Duration::ZERO,
        multiplier: 1.0,
    }
}

/// Insert a user to own test entities.
pub async fn seed_user(pool: &PgPool) -> DbId {
    let user = UserRepo::create(pool, "tester@example.com", "not-a-real-hash", Role::User)
        .await
        .expect("seed user");
    user.id
}

/// Address input with coordinates already supplied (no geocoding).
pub fn address_at(longitude: f64, latitude: f64) -> CreateAddress {
    CreateAddress {
        street: "123 Test St".into(),
        city: "Testville".into(),
        postal_code: "12345".into(),
        country: "Testland".into(),
        latitude: Some(latitude),
        longitude: Some(longitude),
    }
}

/// Address input without coordinates, forcing resolution.
pub fn address_unresolved() -> CreateAddress {
    CreateAddress {
        street: "123 Test St".into(),
        city: "Testville".into(),
        postal_code: "12345".into(),
        country: "Testland".into(),
        latitude: None,
        longitude: None,
    }
}

pub fn home_input(name: &str, longitude: f64, latitude: f64) -> CreateHome {
    CreateHome {
        name: name.into(),
        address: address_at(longitude, latitude),
    }
}

pub fn location_input(name: &str, longitude: f64, latitude: f64) -> CreateLocation {
    CreateLocation {
        name: name.into(),
        summary: None,
        description: "A place worth walking to".into(),
        price_estimate_min: 10,
        price_estimate_max: 20,
        address: address_at(longitude, latitude),
    }
}
