//! Trusted-origin gate for mutating requests.
//!
//! Cross-site mutation attempts are rejected by a plain membership test of
//! the request's `Origin` header against a statically configured allow-set.
//! This runs before identity resolution or rate limiting -- cheapest
//! rejection first.

use std::collections::HashSet;

/// Build the allow-set from the deployment's public origin.
///
/// Outside production the local development origins are included so the dev
/// frontend can exercise mutating routes.
pub fn build_allowed_origins(public_origin: &str, production: bool) -> HashSet<String> {
    let mut allowed = HashSet::new();
    allowed.insert(public_origin.trim_end_matches('/').to_string());
    if !production {
        allowed.insert("http://localhost:3000".to_string());
        allowed.insert("http://127.0.0.1:3000".to_string());
    }
    allowed
}

/// Membership test of a request's declared origin against the allow-set.
///
/// A missing `Origin` header is untrusted: every browser sends it on
/// cross-site POSTs, so its absence on a mutation is itself suspect.
pub fn is_trusted_origin(origin: Option<&str>, allowed: &HashSet<String>) -> bool {
    match origin {
        Some(o) => allowed.contains(o),
        None => false,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
