//! The tool catalog.
//!
//! A [`Catalog`] is built once at startup, either from the built-in list or
//! from a TOML file, and never changes afterwards. Construction validates the
//! invariants every other component relies on: identifiers are unique and
//! both identifiers and package names are plain file-name-safe tokens.

use std::collections::HashSet;
use std::path::Path;

use bedrock_core::{Error, Result, is_valid_id};
use serde::{Deserialize, Serialize};

/// One tool in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Unique identifier, used in URLs and as `{id}.md`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category labels, display only.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Package file name under the packages root, if the tool ships one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Icon path, relative to the site root.
    pub image: String,
}

impl ToolRecord {
    /// Whether this tool has a downloadable package.
    pub fn has_package(&self) -> bool {
        self.file.is_some()
    }

    /// Whether this tool carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A tag and how many tools carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// Tag label.
    pub name: String,
    /// Number of tools with this tag.
    pub count: usize,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolRecord>,
}

/// Ordered, read-only list of tools.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolRecord>,
}

impl Catalog {
    /// Build a catalog, validating identifiers and package names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] on a duplicate id, an invalid id, or an
    /// invalid package file name.
    pub fn new(tools: Vec<ToolRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !is_valid_id(&tool.id) {
                return Err(Error::invalid_data(format!(
                    "tool id {:?} is not a valid identifier",
                    tool.id
                )));
            }
            if !seen.insert(tool.id.as_str()) {
                return Err(Error::invalid_data(format!(
                    "duplicate tool id '{}'",
                    tool.id
                )));
            }
            if let Some(file) = &tool.file {
                if !is_valid_id(file) {
                    return Err(Error::invalid_data(format!(
                        "package file {:?} of tool '{}' is not a plain file name",
                        file, tool.id
                    )));
                }
            }
        }
        Ok(Self { tools })
    }

    /// The catalog shipped with the site.
    pub fn builtin() -> Self {
        Self {
            tools: builtin_tools(),
        }
    }

    /// Parse a TOML catalog of `[[tools]]` tables.
    ///
    /// # Example
    ///
    /// ```
    /// use bedrock_content::Catalog;
    ///
    /// let catalog = Catalog::from_toml_str(r#"
    ///     [[tools]]
    ///     id = "math"
    ///     name = "Math"
    ///     description = "Funções matemáticas."
    ///     tags = ["Utilitário"]
    ///     file = "Math.bas"
    ///     image = "/ferramentas/math.png"
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.find("math").unwrap().name, "Math");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let parsed: CatalogFile =
            toml::from_str(source).map_err(|e| Error::serialization(e.to_string()))?;
        Self::new(parsed.tools)
    }

    /// Load a TOML catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let catalog = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded catalog with {} tools from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Find a tool by exact identifier.
    pub fn find(&self, id: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|tool| tool.id == id)
    }

    /// All tools, in definition order.
    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    /// Tools carrying `tag`, in definition order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ToolRecord> + 'a {
        self.tools.iter().filter(move |tool| tool.has_tag(tag))
    }

    /// Distinct tags in first-appearance order, with counts.
    pub fn tags(&self) -> Vec<TagInfo> {
        let mut tags: Vec<TagInfo> = Vec::new();
        for tag in self.tools.iter().flat_map(|tool| tool.tags.iter()) {
            match tags.iter_mut().find(|info| &info.name == tag) {
                Some(info) => info.count += 1,
                None => tags.push(TagInfo {
                    name: tag.clone(),
                    count: 1,
                }),
            }
        }
        tags
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog has no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tool(
    id: &str,
    name: &str,
    description: &str,
    tags: &[&str],
    file: Option<&str>,
) -> ToolRecord {
    ToolRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        file: file.map(str::to_string),
        image: format!("/ferramentas/{id}.png"),
    }
}

fn builtin_tools() -> Vec<ToolRecord> {
    vec![
        tool(
            "discord-rpc",
            "Discord RPC",
            "Integre o Discord Rich Presence ao VBA, permitindo exibir status personalizados em tempo real.",
            &["Sistemas"],
            Some("DiscordRPC.cls"),
        ),
        tool(
            "temporizer",
            "Temporizer",
            "Facilita o controle de tempo e execução de tarefas com temporizadores avançados em VBA.",
            &["Utilitário", "Jogos", "Sistemas"],
            Some("Temporizer.bas"),
        ),
        tool(
            "betterdll",
            "BetterDLL",
            "Uma biblioteca que permite você manipular e utilizar as DLLs do VBA de uma forma mais livre.",
            &["Utilitário"],
            Some("DLL.cls"),
        ),
        tool(
            "math",
            "Math",
            "Uma biblioteca de matemática com o objetivo de proporcionar funções que o VBA deveria ter, também com alguns outros para facilitar cálculos mais complexos no processo.",
            &["Utilitário"],
            Some("Math.bas"),
        ),
        tool(
            "relay",
            "Relay",
            "Troca de mensagens entre instâncias do VBA. Ainda sem pacote publicado.",
            &["Sistemas"],
            None,
        ),
    ]
}
