//! Path helpers for configured content roots.

use std::path::PathBuf;

/// Expand a leading `~` and `$VAR` references in a configured path.
///
/// Unknown variables leave the input untouched rather than failing, since a
/// literal `$` in a path is unusual but legal.
///
/// # Example
///
/// ```
/// use bedrock_core::util::paths::expand_path;
///
/// let expanded = expand_path("~/bedrock/docs");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}
