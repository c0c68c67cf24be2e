//! Catalog API client with app-token caching.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::types::{ChartResponse, SearchResults, SearchResponse, TokenResponse};
use crate::CatalogTrack;

/// Refresh the cached token this long before its reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Token lifetime assumed when the provider omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// Configuration for the catalog provider.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL, e.g. `https://api.catalog.example`.
    pub base_url: String,
    /// OAuth token endpoint for the client-credentials grant.
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Client for the third-party track catalog.
///
/// Holds a reqwest client with the configured timeout and an app token
/// cached in-process until shortly before expiry. Cheap to share behind an
/// `Arc` across request handlers.
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
    token: RwLock<Option<CachedToken>>,
}

impl CatalogClient {
    /// Build a client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which is
    /// a startup-time misconfiguration.
    pub fn new(config: CatalogConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build catalog HTTP client");
        Self {
            http,
            config,
            token: RwLock::new(None),
        }
    }

    /// Search the catalog for tracks.
    ///
    /// `page` is 1-based; the provider takes an offset. Retries exactly once
    /// with a fresh token when the cached one is rejected.
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: i64,
        page: i64,
    ) -> Result<SearchResults, CatalogError> {
        let offset = (page.max(1) - 1) * limit;
        let url = format!("{}/v1/search", self.config.base_url);

        let response = self
            .authorized_get(&url, &[
                ("type", "track".to_string()),
                ("q", query.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .await?;

        let parsed: SearchResponse = response.json().await?;
        let page = parsed.tracks.map(|t| (t.items, t.total)).unwrap_or_default();
        Ok(SearchResults {
            items: page.0,
            total: page.1,
        })
    }

    /// The catalog's current top tracks.
    pub async fn top_tracks(&self, limit: i64) -> Result<Vec<CatalogTrack>, CatalogError> {
        let url = format!("{}/v1/charts/top", self.config.base_url);
        let response = self
            .authorized_get(&url, &[("limit", limit.to_string())])
            .await?;
        let parsed: ChartResponse = response.json().await?;
        Ok(parsed.items)
    }

    /// GET with a bearer token, refreshing the token once on a 401.
    async fn authorized_get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, CatalogError> {
        let token = self.app_token(false).await?;
        let response = self
            .http
            .get(url)
            .query(params)
            .bearer_auth(&token)
            .send()
            .await?;

        let response = if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            let token = self.app_token(true).await?;
            self.http
                .get(url)
                .query(params)
                .bearer_auth(&token)
                .send()
                .await?
        } else {
            response
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }
        Ok(response)
    }

    /// Return the cached app token, exchanging client credentials when it is
    /// missing, near expiry, or `force` is set.
    async fn app_token(&self, force: bool) -> Result<String, CatalogError> {
        if !force {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > Instant::now() {
                    return Ok(token.value.clone());
                }
            }
        }

        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Token(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let parsed: TokenResponse = response.json().await?;
        let value = parsed
            .access_token
            .ok_or_else(|| CatalogError::Token("token missing in response".to_string()))?;

        let lifetime = parsed
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let expires_at = Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN);

        let mut cached = self.token.write().await;
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at,
        });
        tracing::debug!("Catalog app token refreshed");

        Ok(value)
    }
}
