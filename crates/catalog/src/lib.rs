//! HTTP client for the third-party track catalog.
//!
//! The catalog is an external data source: a token endpoint (OAuth client
//! credentials) plus search and chart endpoints. Every call carries an
//! explicit timeout so an unresponsive provider degrades into a
//! [`CatalogError`] instead of a hang.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;
pub use types::{CatalogTrack, SearchResults};
