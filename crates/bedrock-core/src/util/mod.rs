//! Utility modules for identifiers, file operations, and path handling.
//!
//! # Modules
//!
//! - [`ids`]: Tool identifier and package file name validation
//! - [`files`]: Async file reading and discovery scoped to a content root
//! - [`paths`]: Path expansion helpers

pub mod files;
pub mod ids;
pub mod paths;
