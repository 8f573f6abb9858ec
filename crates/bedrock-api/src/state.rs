//! Shared request state.
//!
//! Built once at startup and shared read-only by every handler through an
//! `Arc`. Nothing in here is mutated after construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bedrock_content::{Catalog, DocumentLoader, PackageDownloader};
use bedrock_core::{ConfigProvider, ContentKind, Result};

/// Behavioural switches for the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    /// Answer a missing `ferramenta` parameter with 401, as earlier versions
    /// of the site did, instead of 400.
    pub legacy_status_codes: bool,
}

/// Everything a handler needs.
#[derive(Debug)]
pub struct ApiState {
    project_name: String,
    catalog: Arc<Catalog>,
    docs: DocumentLoader,
    packages: PackageDownloader,
    public_root: PathBuf,
    options: ApiOptions,
}

/// State handle passed to axum.
pub type SharedState = Arc<ApiState>;

impl ApiState {
    /// Build state from explicit content roots.
    pub fn new(
        catalog: Catalog,
        docs_root: impl Into<PathBuf>,
        packages_root: impl Into<PathBuf>,
        public_root: impl Into<PathBuf>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            project_name: "bedrock".to_string(),
            docs: DocumentLoader::new(docs_root),
            packages: PackageDownloader::new(packages_root, Arc::clone(&catalog)),
            catalog,
            public_root: public_root.into(),
            options: ApiOptions::default(),
        }
    }

    /// Build state from a configuration provider.
    pub fn from_config<C: ConfigProvider>(config: &C, catalog: Catalog) -> Result<Self> {
        let state = Self::new(
            catalog,
            config.content_path(ContentKind::Docs)?,
            config.content_path(ContentKind::Packages)?,
            config.content_path(ContentKind::Public)?,
        );
        Ok(state.with_project_name(config.project_name()))
    }

    /// Override the API options.
    pub fn with_options(mut self, options: ApiOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the project name reported by `/health`.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Wrap in an `Arc` for the router.
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The tool catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Documentation loader.
    pub fn docs(&self) -> &DocumentLoader {
        &self.docs
    }

    /// Package downloader.
    pub fn packages(&self) -> &PackageDownloader {
        &self.packages
    }

    /// Static asset root.
    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    /// API options.
    pub fn options(&self) -> ApiOptions {
        self.options
    }
}
