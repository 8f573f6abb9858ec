//! Core traits for Bedrock configuration.
//!
//! [`ConfigProvider`] abstracts where the site's content lives. The CLI
//! implements it for its TOML/env configuration; tests implement it over a
//! temporary directory.

use std::path::PathBuf;

use crate::Result;

/// The content roots the site reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Markdown documentation, one `{id}.md` per tool.
    Docs,
    /// Downloadable package files referenced by the catalog.
    Packages,
    /// Static assets (tool icons) served as-is.
    Public,
}

impl ContentKind {
    /// Directory name used under the base path when no explicit path is set.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Packages => "packages",
            Self::Public => "public",
        }
    }
}

/// Trait for site configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use bedrock_core::{ConfigProvider, ContentKind, Result};
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "bedrock"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
/// }
///
/// let config = SiteConfig { root: PathBuf::from("/srv/site") };
/// assert_eq!(
///     config.content_path(ContentKind::Docs).unwrap(),
///     PathBuf::from("/srv/site/docs"),
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all site content.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Root directory for one kind of content.
    ///
    /// Defaults to `base_path()/<kind dir name>`.
    fn content_path(&self, kind: ContentKind) -> Result<PathBuf> {
        Ok(self.base_path()?.join(kind.dir_name()))
    }
}
