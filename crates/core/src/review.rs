//! Review and comment constants and validation functions.
//!
//! Defines the rating scale, body length caps, and the validation helpers
//! shared by the API handlers.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted rating.
pub const RATING_MIN: i32 = 1;

/// Highest accepted rating.
pub const RATING_MAX: i32 = 5;

/// Maximum length for a review body.
pub const MAX_REVIEW_BODY_LENGTH: usize = 800;

/// Maximum length for a review title.
pub const MAX_REVIEW_TITLE_LENGTH: usize = 200;

/// Maximum length for a comment body.
pub const MAX_COMMENT_BODY_LENGTH: usize = 600;

/// Maximum raw request payload in bytes, enforced before JSON parsing.
pub const MAX_PAYLOAD_BYTES: usize = 10_000;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating falls on the 1..=5 scale.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid rating {rating}. Must be between {RATING_MIN} and {RATING_MAX}"
        )))
    }
}

/// Validate a review body: non-empty and at most [`MAX_REVIEW_BODY_LENGTH`] chars.
pub fn validate_review_body(body: &str) -> Result<(), CoreError> {
    validate_body(body, MAX_REVIEW_BODY_LENGTH, "Review")
}

/// Validate a review title, when present.
pub fn validate_review_title(title: &str) -> Result<(), CoreError> {
    if title.chars().count() > MAX_REVIEW_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review title exceeds maximum length of {MAX_REVIEW_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a comment body: non-empty after trimming and at most
/// [`MAX_COMMENT_BODY_LENGTH`] chars.
pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    validate_body(body, MAX_COMMENT_BODY_LENGTH, "Comment")
}

fn validate_body(body: &str, max: usize, entity: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity} body must not be empty"
        )));
    }
    if body.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{entity} body exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

/// Validate that a track id looks like a catalog identifier.
///
/// Catalog ids are opaque but never empty and never longer than any id the
/// provider actually mints; the cap bounds what we store as a primary key.
pub fn validate_track_id(track_id: &str) -> Result<(), CoreError> {
    if track_id.is_empty() {
        return Err(CoreError::Validation("Missing trackId".to_string()));
    }
    if track_id.len() > 64 {
        return Err(CoreError::Validation(
            "trackId exceeds maximum length of 64 characters".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
