//! Cursor pagination helpers.
//!
//! Pages are ordered by `(created_at DESC, id DESC)` -- the id tie-break
//! guarantees a total order even when timestamps collide. The cursor is the
//! id of the last row returned on the previous page; the next page starts
//! strictly after it, so rows inserted with newer timestamps never shift an
//! already-issued cursor. Repositories fetch `limit + 1` rows and call
//! [`split_page`] to derive the returned page and the next cursor.

use crate::error::CoreError;
use crate::types::DbId;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_LIMIT: i64 = 50;

/// Clamp a user-provided page limit to `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Parse an opaque cursor token into the entity id it names.
///
/// Tokens are decimal ids on the wire. Anything non-numeric is invalid input
/// -- never silently treated as a position.
pub fn parse_cursor(cursor: &str) -> Result<DbId, CoreError> {
    cursor
        .parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("Invalid cursor '{cursor}'")))
}

/// Split `limit + 1` fetched rows into the returned page and the next cursor.
///
/// When the fetched set exceeds `limit`, the extra row is discarded and the
/// last *returned* row's id becomes the cursor anchoring the next page.
pub fn split_page<T>(
    mut rows: Vec<T>,
    limit: i64,
    id_of: impl Fn(&T) -> DbId,
) -> (Vec<T>, Option<DbId>) {
    if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        let next = rows.last().map(&id_of);
        (rows, next)
    } else {
        (rows, None)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
