//! Trusted-origin extractor for mutating handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use groove_core::error::CoreError;
use groove_core::origin::is_trusted_origin;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request's declared origin is in the configured allow-set.
///
/// Declare this as the *first* extractor on every mutating handler: it is
/// the cheapest gate, so cross-site attempts are rejected before identity
/// resolution or rate-limit work happens.
#[derive(Debug, Clone, Copy)]
pub struct TrustedOrigin;

impl FromRequestParts<AppState> for TrustedOrigin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let origin = parts.headers.get("origin").and_then(|v| v.to_str().ok());

        if is_trusted_origin(origin, &state.config.trusted_origins) {
            Ok(TrustedOrigin)
        } else {
            Err(AppError::Core(CoreError::Forbidden("Bad origin".into())))
        }
    }
}
