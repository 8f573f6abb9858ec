//! Documentation loading.
//!
//! Documents live flat under one root as `{id}.md`. Loading is keyed by the
//! raw identifier and does not consult the catalog, so a document can exist
//! for an id the catalog does not list (and vice versa).

use std::path::{Path, PathBuf};

use bedrock_core::util::files::{self, FindOptions};
use bedrock_core::{Result, validate_id};

use crate::markdown::render_html;

/// Reads `{id}.md` files from the documentation root.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
}

impl DocumentLoader {
    /// Create a loader over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The documentation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for `id`.
    ///
    /// # Errors
    ///
    /// [`bedrock_core::Error::InvalidId`] if `id` could escape the root.
    ///
    /// A valid id holds no separator, so appending `.md` keeps the path a
    /// single component under the root for every id the catalog accepts.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let id = validate_id(id)?;
        Ok(self.root.join(format!("{id}.md")))
    }

    /// Read the raw markdown for `id`.
    ///
    /// # Errors
    ///
    /// - [`bedrock_core::Error::InvalidId`] for an unusable identifier
    /// - [`bedrock_core::Error::NotFound`] when `{id}.md` does not exist
    /// - an I/O error for anything else (permissions, invalid UTF-8)
    pub async fn load_markdown(&self, id: &str) -> Result<String> {
        let path = self.path_for(id)?;
        log::debug!("Loading documentation for '{}' from {}", id, path.display());
        files::read_file(&path).await
    }

    /// Read and render the documentation for `id` as sanitized HTML.
    pub async fn load_documentation(&self, id: &str) -> Result<String> {
        let markdown = self.load_markdown(id).await?;
        Ok(render_html(&markdown))
    }

    /// Whether a document exists for `id`. Invalid ids never exist.
    pub async fn has_document(&self, id: &str) -> bool {
        match self.path_for(id) {
            Ok(path) => files::exists(&path).await,
            Err(_) => false,
        }
    }

    /// Identifiers of every `.md` file directly under the root, sorted.
    pub async fn documented_ids(&self) -> Result<Vec<String>> {
        let found = files::find_all_files(&self.root, FindOptions::markdown().with_max_depth(1))
            .await?;
        Ok(found.into_iter().map(|info| info.stem).collect())
    }
}
