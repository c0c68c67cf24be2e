use std::collections::HashSet;

use groove_catalog::CatalogConfig;
use groove_core::origin::build_allowed_origins;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Whether this deployment is production (`APP_ENV=production`).
    ///
    /// Controls the rate limiter's degradation policy (fail closed in
    /// production, open otherwise) and whether localhost origins are
    /// trusted.
    pub production: bool,
    /// Origins accepted by the mutation origin gate.
    pub trusted_origins: HashSet<String>,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether proxy-supplied client-IP headers are trusted.
    pub trust_proxy: bool,
    /// Redis connection URL for the counter/cache store, if deployed.
    pub redis_url: Option<String>,
    /// JWT session-token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Third-party catalog provider configuration.
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `APP_ENV`               | `development`              |
    /// | `PUBLIC_ORIGIN`         | `http://localhost:3000`    |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `TRUST_PROXY`           | unset (headers untrusted)  |
    /// | `REDIS_URL`             | unset (no counter store)   |
    /// | `CATALOG_BASE_URL`      | `https://api.catalog.example` |
    /// | `CATALOG_TOKEN_URL`     | `https://auth.catalog.example/token` |
    /// | `CATALOG_CLIENT_ID`     | empty                      |
    /// | `CATALOG_CLIENT_SECRET` | empty                      |
    /// | `CATALOG_TIMEOUT_SECS`  | `8`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let public_origin =
            std::env::var("PUBLIC_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".into());
        let trusted_origins = build_allowed_origins(&public_origin, production);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let trust_proxy = std::env::var("TRUST_PROXY")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        let redis_url = std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        let jwt = JwtConfig::from_env();

        let catalog = CatalogConfig {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://api.catalog.example".into()),
            token_url: std::env::var("CATALOG_TOKEN_URL")
                .unwrap_or_else(|_| "https://auth.catalog.example/token".into()),
            client_id: std::env::var("CATALOG_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("CATALOG_CLIENT_SECRET").unwrap_or_default(),
            timeout_secs: std::env::var("CATALOG_TIMEOUT_SECS")
                .unwrap_or_else(|_| "8".into())
                .parse()
                .expect("CATALOG_TIMEOUT_SECS must be a valid u64"),
        };

        Self {
            host,
            port,
            production,
            trusted_origins,
            cors_origins,
            request_timeout_secs,
            trust_proxy,
            redis_url,
            jwt,
            catalog,
        }
    }
}
