use std::time::Duration;

use nearby_geo::ors::DEFAULT_BASE_URL;
use nearby_geo::retry::RetryConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development; override via environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Generous
    /// because entity mutations hold the request open for a full
    /// distance pass against the external provider.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Geo provider configuration.
    pub geo: GeoConfig,
}

/// OpenRouteService connection settings.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Base URL (default: the public openrouteservice.org API).
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Per-call timeout in seconds (default: `10`).
    pub timeout_secs: u64,
    /// Backoff bounds for transient provider failures.
    pub retry: RetryConfig,
}

impl GeoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `3000`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                        |
    /// | `ORS_BASE_URL`         | public openrouteservice.org  |
    /// | `ORS_API_KEY`          | **required**                 |
    /// | `ORS_TIMEOUT_SECS`     | `10`                         |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric variable
    /// does not parse; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let geo = GeoConfig {
            base_url: std::env::var("ORS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: std::env::var("ORS_API_KEY")
                .expect("ORS_API_KEY must be set in the environment"),
            timeout_secs: std::env::var("ORS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("ORS_TIMEOUT_SECS must be a valid u64"),
            retry: RetryConfig::default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            geo,
        }
    }
}
