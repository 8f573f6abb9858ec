//! Async file utilities scoped to a content root.
//!
//! Every path handed to the filesystem is built by [`resolve_in`], which only
//! accepts a validated single-component name. Callers never join untrusted
//! input onto a root themselves.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::util::ids::validate_id;
use crate::{Error, Result};

/// Options for listing files under a root.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "md"
    pub extension: Option<&'static str>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Create options for finding markdown files.
    pub fn markdown() -> Self {
        Self {
            extension: Some("md"),
            max_depth: None,
        }
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Join a validated file name onto `root`.
///
/// # Errors
///
/// Returns [`Error::InvalidId`] if `name` is not a valid single-component
/// name (see [`crate::is_valid_id`]).
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use bedrock_core::util::files::resolve_in;
///
/// let path = resolve_in(Path::new("/srv/docs"), "math.md").unwrap();
/// assert_eq!(path, Path::new("/srv/docs/math.md"));
/// assert!(resolve_in(Path::new("/srv/docs"), "../math.md").is_err());
/// ```
pub fn resolve_in(root: &Path, name: &str) -> Result<PathBuf> {
    let name = validate_id(name)?;
    Ok(root.join(name))
}

/// Read a file's contents as a string.
///
/// A missing file becomes [`Error::NotFound`]; every other failure keeps the
/// path for logging.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| classify_io(e, path))
}

/// Read a file's contents as raw bytes.
pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(|e| classify_io(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

fn classify_io(err: std::io::Error, path: &Path) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::not_found(path.display().to_string())
    } else {
        Error::io_with_path(err, path)
    }
}

/// Find all files matching criteria in a directory.
///
/// A missing base directory yields an empty list.
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    if !exists(base_path).await {
        return Ok(files);
    }

    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result
            .map_err(|e| Error::io_with_path(std::io::Error::other(e.to_string()), base_path))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if let Some(max_depth) = options.max_depth {
            let depth = path
                .strip_prefix(base_path)
                .map(|p| p.components().count())
                .unwrap_or(0);
            if depth > max_depth {
                continue;
            }
        }

        if let Some(ext) = options.extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            path: path.clone(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("Found {} file(s) under {}", files.len(), base_path.display());
    Ok(files)
}
