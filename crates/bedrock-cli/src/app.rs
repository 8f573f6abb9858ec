//! The Bedrock command-line application.
//!
//! [`BedrockApp`] owns the loaded configuration and dispatches each
//! subcommand. Output goes to a caller-provided writer so commands can be
//! exercised without a terminal.

use std::io::Write;

use bedrock_api::ApiState;
use bedrock_content::{AuditReport, Catalog, audit};
use bedrock_core::{Error, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::BedrockConfig;
use crate::config_handlers;

/// CLI application bound to a loaded configuration.
pub struct BedrockApp {
    name: String,
    config: BedrockConfig,
    version: String,
}

impl BedrockApp {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = BedrockConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create an application for an already-built configuration.
    pub fn new(config: BedrockConfig) -> Self {
        Self {
            name: "bedrock".to_string(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// The effective configuration.
    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// `RUST_LOG` wins when set; otherwise `-q` selects `warn` and `-v`
    /// selects `debug`.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info,tower_http=info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Serve { host, port }) => self.serve(host, port).await,
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(command) => {
                let mut buf = Vec::new();
                let result = self.execute(command, &mut buf).await;
                std::io::stdout().write_all(&buf).map_err(Error::io)?;
                result
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Run a non-server command, writing its output to `out`.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Version => write_line(out, format_args!("{} {}", self.name, self.version)),
            Command::List { tag } => self.list(tag.as_deref(), out),
            Command::Check => self.check(out).await,
            Command::Render { id } => self.render(&id, out).await,
            Command::Serve { .. } | Command::Config(_) => Err(Error::config(
                "serve and config are dispatched by BedrockApp::run",
            )),
        }
    }

    fn state(&self) -> Result<ApiState> {
        let catalog = self.config.catalog()?;
        Ok(ApiState::from_config(&self.config, catalog)?.with_options(self.config.api_options()))
    }

    async fn serve(&self, host: Option<String>, port: Option<u16>) -> Result<()> {
        let mut config = self.config.clone();
        if let Some(host) = host {
            config.server.host = host;
        }
        if let Some(port) = port {
            config.server.port = port;
        }
        let addr = config.socket_addr()?;

        let state = self.state()?;
        tracing::info!(
            docs = %state.docs().root().display(),
            packages = %state.packages().root().display(),
            public = %state.public_root().display(),
            "Content roots"
        );
        bedrock_api::serve(addr, state.shared()).await
    }

    fn list(&self, tag: Option<&str>, out: &mut impl Write) -> Result<()> {
        let catalog = self.config.catalog()?;
        let tools: Vec<_> = match tag {
            Some(tag) => catalog.with_tag(tag).collect(),
            None => catalog.tools().iter().collect(),
        };
        for tool in tools {
            write_line(
                out,
                format_args!(
                    "{}\t{}\t{}\t{}",
                    tool.id,
                    tool.name,
                    tool.tags.join(", "),
                    tool.file.as_deref().unwrap_or("-")
                ),
            )?;
        }
        Ok(())
    }

    async fn check(&self, out: &mut impl Write) -> Result<()> {
        let state = self.state()?;
        let report = audit(state.catalog(), state.docs(), state.packages()).await?;
        write_report(&report, state.catalog(), out)?;

        if report.is_clean() {
            Ok(())
        } else {
            Err(Error::invalid_data(format!(
                "{} problem(s) found",
                report.problem_count()
            )))
        }
    }

    async fn render(&self, id: &str, out: &mut impl Write) -> Result<()> {
        let state = self.state()?;
        let html = state.docs().load_documentation(id).await?;
        write_line(out, html.trim_end())
    }
}

fn write_line(out: &mut impl Write, line: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{line}").map_err(Error::io)
}

fn write_report(report: &AuditReport, catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for id in &report.missing_docs {
        write_line(out, format_args!("missing documentation: {id}"))?;
    }
    for missing in &report.missing_packages {
        write_line(
            out,
            format_args!("missing package: {} ({})", missing.id, missing.file),
        )?;
    }
    for id in &report.orphan_docs {
        write_line(out, format_args!("orphan document: {id}.md"))?;
    }
    for id in &report.without_package {
        write_line(out, format_args!("no package: {id}"))?;
    }
    write_line(
        out,
        format_args!(
            "{} tool(s) checked, {} problem(s)",
            catalog.len(),
            report.problem_count()
        ),
    )
}

// ============================================================================
// Tests
// ============================================================================
