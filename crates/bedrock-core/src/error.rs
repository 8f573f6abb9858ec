//! Error types for Bedrock operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Bedrock crates. Uses `thiserror` for derive macros.
//!
//! The HTTP layer maps these variants onto status codes; nothing here knows
//! about HTTP.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Bedrock operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a known path.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool or document not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier that cannot name a tool (bad characters, separators, `..`).
    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    /// The tool exists but ships no downloadable package.
    #[error("No package available for tool '{0}'")]
    NoPackage(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap an I/O error.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error, recording the path involved.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid identifier error.
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a missing package error.
    pub fn no_package(id: impl Into<String>) -> Self {
        Self::NoPackage(id.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error means "nothing there" rather than "something broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using Bedrock's Error type.
pub type Result<T> = std::result::Result<T, Error>;
