//! Request-body extraction with project error mapping.
//!
//! Axum's stock `Json` rejection produces 422 for deserialization failures
//! and its own body format. The public API contract is 400 for malformed
//! JSON and 413 when the raw payload blows the byte cap, both in the
//! standard `{error, code}` envelope, so handlers take [`AppJson`] instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::AppError;

/// `axum::Json` with rejections mapped into [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}
