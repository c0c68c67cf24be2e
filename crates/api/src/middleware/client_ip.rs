//! Client-IP extraction for IP-keyed rate limiting.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::state::AppState;

/// The client IP as reported by the reverse proxy, or `None` when proxy
/// headers are not trusted or absent.
///
/// Proxy headers are spoofable, so they are only honored when
/// `TRUST_PROXY` is set -- otherwise every caller would be able to mint
/// fresh rate-limit buckets at will.
#[derive(Debug, Clone)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.trust_proxy {
            return Ok(ClientIp(None));
        }

        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());

        let ip = forwarded
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
            })
            .map(|v| v.to_string());

        Ok(ClientIp(ip))
    }
}
