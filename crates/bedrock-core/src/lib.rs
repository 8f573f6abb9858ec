//! Bedrock Core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Bedrock crates.
//! It has no internal Bedrock dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration seam ([`ConfigProvider`], [`ContentKind`])
//! - [`util`]: Identifier, file, and path utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::{ConfigProvider, ContentKind};

// Convenience re-exports from util
pub use util::ids::{is_valid_id, validate_id};
