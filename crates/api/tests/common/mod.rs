use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::util::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use nearby_api::auth::jwt::{generate_access_token, JwtConfig};
use nearby_api::auth::password::hash_password;
use nearby_api::config::{GeoConfig, ServerConfig};
use nearby_api::routes;
use nearby_api::state::AppState;
use nearby_core::roles::Role;
use nearby_db::repositories::UserRepo;
use nearby_geo::ors::DEFAULT_BASE_URL;
use nearby_geo::retry::RetryConfig;
use nearby_geo::{Coordinates, GeoError, GeoProvider};

/// Deterministic geo double for API tests.
///
/// Resolves queries from a fixed map (unmapped queries answer
/// `NotFound`) and reports every route as a constant duration.
pub struct StubGeo {
    coords: HashMap<String, Coordinates>,
    route_minutes: f64,
}

impl StubGeo {
    pub fn new() -> Self {
        Self {
            coords: HashMap::new(),
            route_minutes: 15.0,
        }
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
}

#[async_trait::async_trait]
impl GeoProvider for StubGeo {
    async fn resolve_coordinates(&self, query: &str) -> Result<Coordinates, GeoError> {
        self.coords
            .get(query)
            .copied()
            .ok_or_else(|| GeoError::NotFound(format!("No match for '{query}'")))
    }

    async fn route_duration_minutes(
        &self,
        _start: Coordinates,
        _end: Coordinates,
    ) -> Result<f64, GeoError> {
        Ok(self.route_minutes)
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The JWT secret is fixed so tests can mint their own tokens, and the
/// retry policy has zero delays so failures do not slow the suite.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        geo: GeoConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "unused-in-tests".to_string(),
            timeout_secs: 5,
            retry: RetryConfig {
                max_attempts: 2,
                initial_delay: Duration::ZERO,
                max_delay: Duration::ZERO,
                multiplier: 1.0,
            },
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and geo double.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, geo: StubGeo) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        geo: Arc::new(geo),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Seed a user directly in the database and return its id plus a valid
/// bearer token for it.
pub async fn seed_user(pool: &PgPool, email: &str, password: &str, role: Role) -> (i64, String) {
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(pool, email, &hashed, role)
        .await
        .expect("user creation should succeed");
    let token = generate_access_token(user.id, user.role.as_str(), &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// JSON payload for a home whose address already carries coordinates.
pub fn home_payload(name: &str, longitude: f64, latitude: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "address": {
            "street": "1 Main St",
            "city": "Springfield",
            "postal_code": "12345",
            "country": "USA",
            "latitude": latitude,
            "longitude": longitude,
        }
    })
}

/// JSON payload for a location whose address already carries coordinates.
pub fn location_payload(name: &str, longitude: f64, latitude: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "summary": "A place worth walking to",
        "description": "Somewhere to go",
        "price_estimate_min": 10,
        "price_estimate_max": 25,
        "address": {
            "street": "9 Side St",
            "city": "Springfield",
            "postal_code": "12345",
            "country": "USA",
            "latitude": latitude,
            "longitude": longitude,
        }
    })
}
