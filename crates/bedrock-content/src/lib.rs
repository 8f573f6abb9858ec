//! Catalog, documentation, and package access for the Bedrock site.
//!
//! # Modules
//!
//! - [`catalog`]: [`ToolRecord`] and the read-only [`Catalog`]
//! - [`markdown`]: markdown to sanitized HTML
//! - [`docs`]: [`DocumentLoader`] over the documentation root
//! - [`packages`]: [`PackageDownloader`] over the packages root
//! - [`audit`]: catalog vs. disk consistency report

#![doc = include_str!("../README.md")]

pub mod audit;
pub mod catalog;
pub mod docs;
pub mod markdown;
pub mod packages;

pub use audit::{AuditReport, audit};
pub use catalog::{Catalog, TagInfo, ToolRecord};
pub use docs::DocumentLoader;
pub use markdown::{MISSING_DOCUMENTATION, render_html};
pub use packages::{Package, PackageDownloader};
