//! Session-token handling.
//!
//! The OAuth provider that actually authenticates users is an external
//! collaborator; by the time a request reaches this service the identity is
//! an HS256-signed bearer token whose `sub` claim carries the opaque
//! principal id.

pub mod jwt;
