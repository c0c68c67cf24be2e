/// Review and comment primary keys are PostgreSQL BIGSERIAL.
///
/// Track ids are external catalog identifiers and stay `String`; user
/// identities are opaque strings minted by the auth provider.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
