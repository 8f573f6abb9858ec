//! HTTP server for the Bedrock catalog site.
//!
//! # Modules
//!
//! - [`state`]: [`ApiState`], the read-only state shared by handlers
//! - [`error`]: [`ApiError`] and its JSON envelope
//! - [`handlers`]: API and page handlers
//! - [`templates`]: HTML templates
//! - [`router`]: route table and `serve`

#![doc = include_str!("../README.md")]

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

pub use error::{ApiError, ErrorBody};
pub use router::{router, serve, serve_with_shutdown};
pub use state::{ApiOptions, ApiState, SharedState};
