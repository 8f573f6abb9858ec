//! Tool identifier validation.
//!
//! Identifiers are interpolated into URLs and file names (`{id}.md`), and
//! package names are joined onto the packages root. Both go through
//! [`validate_id`] before they touch the filesystem.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Maximum identifier length in bytes.
pub const MAX_ID_LEN: usize = 64;

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("identifier pattern is valid")
});

/// Whether `id` is a usable tool identifier or package file name.
///
/// Valid values are non-empty ASCII made of letters, digits, `-`, `_` and
/// `.`, start with a letter or digit, contain no `..` and are at most
/// [`MAX_ID_LEN`] bytes long. No valid value contains a path separator.
///
/// ```
/// use bedrock_core::is_valid_id;
///
/// assert!(is_valid_id("discord-rpc"));
/// assert!(is_valid_id("Temporizer.bas"));
/// assert!(!is_valid_id("../secrets"));
/// assert!(!is_valid_id("a/b"));
/// ```
pub fn is_valid_id(id: &str) -> bool {
    id.len() <= MAX_ID_LEN && !id.contains("..") && ID_PATTERN.is_match(id)
}

/// Validate an identifier, returning it unchanged on success.
///
/// # Errors
///
/// Returns [`Error::InvalidId`] when [`is_valid_id`] rejects the input.
pub fn validate_id(id: &str) -> Result<&str> {
    if is_valid_id(id) {
        Ok(id)
    } else {
        Err(Error::invalid_id(id))
    }
}
