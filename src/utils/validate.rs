//! Input validation for slugs and destination URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::AppError;

/// Maximum accepted slug length.
const SLUG_MAX_LENGTH: usize = 50;

/// Compiled pattern for valid slugs.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Validates a user-chosen slug.
///
/// # Rules
///
/// - Length: 1-50 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
///
/// # Errors
///
/// Returns [`AppError::InvalidSlug`] if any rule is violated.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > SLUG_MAX_LENGTH {
        return Err(AppError::invalid_slug(format!(
            "Slug must be 1-{SLUG_MAX_LENGTH} characters"
        )));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::invalid_slug(
            "Slug may only contain letters, digits, hyphens, and underscores",
        ));
    }

    Ok(())
}

/// Validates that `input` parses as an absolute URL.
///
/// Relative references are rejected by the parser itself; no scheme
/// allow-list is applied beyond that.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if parsing fails.
pub fn validate_destination_url(input: &str) -> Result<(), AppError> {
    Url::parse(input)
        .map(|_| ())
        .map_err(|e| AppError::invalid_url(format!("Invalid destination URL: {e}")))
}
