//! Package downloads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bedrock_core::util::files;
use bedrock_core::{Error, Result};

use crate::catalog::{Catalog, ToolRecord};

/// A package file read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// File name as listed in the catalog, used for `Content-Disposition`.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Package {
    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the package file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resolves catalog entries to package files under the packages root.
#[derive(Debug, Clone)]
pub struct PackageDownloader {
    root: PathBuf,
    catalog: Arc<Catalog>,
}

impl PackageDownloader {
    /// Create a downloader over `root`, resolving ids through `catalog`.
    pub fn new(root: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    /// The packages root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a tool's package, or `None` if it has none.
    pub fn package_path(&self, tool: &ToolRecord) -> Result<Option<PathBuf>> {
        tool.file
            .as_deref()
            .map(|file| files::resolve_in(&self.root, file))
            .transpose()
    }

    /// Read the package for tool `id`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when the catalog has no tool `id`
    /// - [`Error::NoPackage`] when the tool exists but has no package
    /// - an I/O error when the package file cannot be read; a package the
    ///   catalog promises but the disk lacks is a deployment fault, so a
    ///   missing file is reported as I/O rather than `NotFound`
    pub async fn download(&self, id: &str) -> Result<Package> {
        let tool = self
            .catalog
            .find(id)
            .ok_or_else(|| Error::not_found(format!("tool '{id}'")))?;

        let (file_name, path) = match (&tool.file, self.package_path(tool)?) {
            (Some(file), Some(path)) => (file.clone(), path),
            _ => return Err(Error::no_package(&tool.id)),
        };

        let bytes = files::read_bytes(&path).await.map_err(|err| match err {
            Error::NotFound(_) => Error::io_with_path(
                std::io::Error::new(std::io::ErrorKind::NotFound, "package file missing"),
                &path,
            ),
            other => other,
        })?;

        log::info!("Serving package {} ({} bytes)", file_name, bytes.len());
        Ok(Package { file_name, bytes })
    }
}
