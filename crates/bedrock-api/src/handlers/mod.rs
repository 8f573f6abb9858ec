//! Request handlers.
//!
//! - [`api`]: JSON endpoints and package downloads
//! - [`pages`]: server-rendered HTML pages

pub mod api;
pub mod pages;
