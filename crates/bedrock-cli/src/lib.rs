//! Command-line front end for the Bedrock catalog site.
//!
//! - [`BedrockConfig`]: file + environment configuration via `confyg`
//! - [`CliArgs`]: clap argument definitions
//! - [`BedrockApp`]: logging setup and command dispatch

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::BedrockApp;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::BedrockConfig;
