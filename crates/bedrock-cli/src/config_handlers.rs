//! Handler functions for `bedrock config {path,show,init,export}`.

use std::io::Write;
use std::path::{Path, PathBuf};

use bedrock_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::BedrockConfig;

/// Handle a config subcommand.
///
/// Receives the raw `--config` path because `path` and `init` must work
/// before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match action {
        ConfigAction::Path => cmd_config_path(&mut out, config_path),
        ConfigAction::Show => {
            let config = BedrockConfig::load(config_path)?;
            cmd_config_show(&mut out, &config)
        }
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(p) => PathBuf::from(p),
                None => BedrockConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            cmd_config_init(&mut out, &path, force)
        }
        ConfigAction::Export { docker_env } => {
            let config = BedrockConfig::load(config_path)?;
            cmd_config_export(&mut out, &config, docker_env)
        }
    }
}

fn write_line(out: &mut impl Write, line: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{line}").map_err(Error::io)
}

fn cmd_config_path(out: &mut impl Write, config_path: Option<&str>) -> Result<()> {
    let path = BedrockConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    write_line(out, path.display())?;
    if !path.exists() {
        eprintln!("(file does not exist; run `bedrock config init` to create it)");
    }
    Ok(())
}

fn cmd_config_show(out: &mut impl Write, config: &BedrockConfig) -> Result<()> {
    let toml_str = config.to_toml_string()?;
    write!(out, "{toml_str}").map_err(Error::io)
}

fn cmd_config_init(out: &mut impl Write, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = BedrockConfig::default().to_toml_string()?;
    std::fs::write(path, &toml_str).map_err(|e| Error::io_with_path(e, path))?;

    write_line(out, format_args!("Config file created at {}", path.display()))
}

fn cmd_config_export(out: &mut impl Write, config: &BedrockConfig, docker_env: bool) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            write_line(out, format_args!("--env {key}={value}"))?;
        } else {
            write_line(out, format_args!("{key}={value}"))?;
        }
    }
    Ok(())
}
