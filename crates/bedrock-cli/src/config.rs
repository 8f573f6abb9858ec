//! Configuration for the Bedrock binary.
//!
//! Provides the [`BedrockConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `BEDROCK_CONFIG` environment variable
//! 3. XDG default: `~/.config/bedrock/config.toml`
//! 4. Built-in defaults
//!
//! `BEDROCK_*` environment variables (`BEDROCK_SERVER_HOST`,
//! `BEDROCK_CONTENT_DOCS_PATH`, ...) are layered over the file.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use bedrock_api::ApiOptions;
use bedrock_content::Catalog;
use bedrock_core::util::paths::expand_path;
use bedrock_core::{ConfigProvider, ContentKind, Error, Result};
use confyg::{Confygery, env};
use serde::{Deserialize, Deserializer, Serialize};

/// Environment variable prefix and config file directory name.
pub const ENV_PREFIX: &str = "BEDROCK";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Bedrock site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockConfig {
    /// Project name, reported by `/health`.
    pub project_name: String,

    /// Base path for all site content. Defaults to the working directory.
    pub base_path: Option<String>,

    /// Content roots and catalog source.
    pub content: ContentConfig,

    /// Listener settings.
    pub server: ServerConfig,

    /// API behaviour.
    pub api: ApiConfig,
}

/// Content roots. Unset roots default to `<base_path>/<kind>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Markdown documentation directory.
    pub docs_path: Option<String>,

    /// Package files directory.
    pub packages_path: Option<String>,

    /// Static assets directory.
    pub public_path: Option<String>,

    /// TOML catalog file. The built-in catalog is used when unset.
    pub catalog_path: Option<String>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(deserialize_with = "number_or_string")]
    pub port: u16,

    /// Host address to bind to.
    pub host: String,
}

/// API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Answer a missing `ferramenta` parameter with 401 instead of 400.
    #[serde(deserialize_with = "bool_or_string")]
    pub legacy_status_codes: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            project_name: "bedrock".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            server: ServerConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

// ============================================================================
// Env values arrive as strings
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar<T> {
    Typed(T),
    Text(String),
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u16, D::Error> {
    match Scalar::<u16>::deserialize(deserializer)? {
        Scalar::Typed(n) => Ok(n),
        Scalar::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    match Scalar::<bool>::deserialize(deserializer)? {
        Scalar::Typed(b) => Ok(b),
        Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {other:?}"
            ))),
        },
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl BedrockConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("server");
        env_opts.add_section("api");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("BEDROCK_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bedrock").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `BEDROCK_`-prefixed environment variable pairs.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            Error::config(format!("server.host {:?} is not an IP address: {e}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Load the configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.content.catalog_path {
            Some(path) => Catalog::load(&expand_path(path)),
            None => Ok(Catalog::builtin()),
        }
    }

    /// API switches derived from the `[api]` section.
    pub fn api_options(&self) -> ApiOptions {
        ApiOptions {
            legacy_status_codes: self.api.legacy_status_codes,
        }
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for BedrockConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_path(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, kind: ContentKind) -> Result<PathBuf> {
        let explicit = match kind {
            ContentKind::Docs => &self.content.docs_path,
            ContentKind::Packages => &self.content.packages_path,
            ContentKind::Public => &self.content.public_path,
        };
        match explicit {
            Some(p) => Ok(expand_path(p)),
            None => Ok(self.base_path()?.join(kind.dir_name())),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// RAII guard for env var manipulation in tests.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: tests touching the environment use distinct keys.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see EnvGuard::new.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    fn test_bedrock_config_default() {
        let config = BedrockConfig::default();
        assert_eq!(config.project_name, "bedrock");
        assert!(config.base_path.is_none());
        assert!(config.content.catalog_path.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.api.legacy_status_codes);
    }

    #[test]
    fn test_bedrock_config_from_toml() {
        let config: BedrockConfig = toml::from_str(
            r#"
                project_name = "site"
                base_path = "/srv/site"

                [content]
                docs_path = "/srv/docs"

                [server]
                port = 8080
                host = "0.0.0.0"

                [api]
                legacy_status_codes = true
            "#,
        )
        .unwrap();
        assert_eq!(config.project_name, "site");
        assert_eq!(config.content.docs_path.as_deref(), Some("/srv/docs"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.api.legacy_status_codes);
    }

    #[test]
    fn test_string_scalars_accepted() {
        let config: BedrockConfig = toml::from_str(
            r#"
                [server]
                port = "9090"

                [api]
                legacy_status_codes = "true"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.api.legacy_status_codes);
    }

    #[test]
    fn test_bad_string_port_rejected() {
        let result: std::result::Result<BedrockConfig, _> = toml::from_str(
            r#"
                [server]
                port = "http"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bedrock_config_to_toml() {
        let config = BedrockConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"bedrock\""));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("port = 3000"));

        let parsed: BedrockConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
    }

    #[test]
    fn test_bedrock_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded-site"
                [server]
                port = 9090
            "#,
        )
        .unwrap();

        let config = BedrockConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded-site");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_bedrock_config_load_defaults() {
        let config = BedrockConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "bedrock");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_bedrock_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "file-site"
                [server]
                host = "127.0.0.1"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("BEDROCK_SERVER_HOST", "0.0.0.0");
        let config = BedrockConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = BedrockConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = BedrockConfig::default_config_path() {
            assert!(path.ends_with("bedrock/config.toml"));
        }
    }

    #[test]
    fn test_content_paths_default_under_base() {
        let config = BedrockConfig {
            base_path: Some("/srv/site".into()),
            ..Default::default()
        };
        assert_eq!(
            config.content_path(ContentKind::Docs).unwrap(),
            PathBuf::from("/srv/site/docs")
        );
        assert_eq!(
            config.content_path(ContentKind::Packages).unwrap(),
            PathBuf::from("/srv/site/packages")
        );
    }

    #[test]
    fn test_content_paths_explicit() {
        let config = BedrockConfig {
            base_path: Some("/srv/site".into()),
            content: ContentConfig {
                public_path: Some("/var/www/static".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.content_path(ContentKind::Public).unwrap(),
            PathBuf::from("/var/www/static")
        );
    }

    #[test]
    fn test_base_path_defaults_to_cwd() {
        let config = BedrockConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_socket_addr() {
        let config = BedrockConfig::default();
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );

        let bad = BedrockConfig {
            server: ServerConfig {
                host: "localhost".into(),
                port: 1,
            },
            ..Default::default()
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_catalog_builtin_when_unset() {
        let catalog = BedrockConfig::default().catalog().unwrap();
        assert!(catalog.find("temporizer").is_some());
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
                [[tools]]
                id = "only"
                name = "Only"
                description = "Única."
                image = "/ferramentas/only.png"
            "#,
        )
        .unwrap();

        let config = BedrockConfig {
            content: ContentConfig {
                catalog_path: Some(path.to_string_lossy().into_owned()),
                ..Default::default()
            },
            ..Default::default()
        };
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("temporizer").is_none());
    }

    #[test]
    fn test_api_options() {
        let config = BedrockConfig {
            api: ApiConfig {
                legacy_status_codes: true,
            },
            ..Default::default()
        };
        assert!(config.api_options().legacy_status_codes);
    }

    #[test]
    fn test_to_env_vars() {
        let vars = BedrockConfig::default().to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("BEDROCK_PROJECT_NAME").unwrap(), "bedrock");
        assert_eq!(map.get("BEDROCK_SERVER_PORT").unwrap(), "3000");
        assert_eq!(map.get("BEDROCK_API_LEGACY_STATUS_CODES").unwrap(), "false");
    }
}
