/// Failures talking to the catalog provider.
///
/// All variants are recoverable upstream failures from the caller's point of
/// view: handlers either fall back to locally cached data or surface a 502.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failure, including timeouts.
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint rejected the client credentials or returned no token.
    #[error("Catalog token exchange failed: {0}")]
    Token(String),

    /// Non-success status from a catalog endpoint.
    #[error("Catalog returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
