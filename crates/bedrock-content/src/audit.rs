//! Consistency checks between the catalog and the content roots.

use serde::Serialize;

use bedrock_core::Result;
use bedrock_core::util::files;

use crate::catalog::Catalog;
use crate::docs::DocumentLoader;
use crate::packages::PackageDownloader;

/// A package the catalog references but the packages root lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingPackage {
    /// Tool id.
    pub id: String,
    /// Expected file name.
    pub file: String,
}

/// Result of [`audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Tools without `{id}.md`.
    pub missing_docs: Vec<String>,
    /// Tools whose package file is absent.
    pub missing_packages: Vec<MissingPackage>,
    /// Tools that ship no package at all. Informational.
    pub without_package: Vec<String>,
    /// Documents with no matching tool.
    pub orphan_docs: Vec<String>,
}

impl AuditReport {
    /// Number of problems; tools without a package are not counted.
    pub fn problem_count(&self) -> usize {
        self.missing_docs.len() + self.missing_packages.len() + self.orphan_docs.len()
    }

    /// Whether the content roots match the catalog.
    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Compare the catalog against the documentation and packages roots.
pub async fn audit(
    catalog: &Catalog,
    docs: &DocumentLoader,
    packages: &PackageDownloader,
) -> Result<AuditReport> {
    let mut report = AuditReport::default();

    for tool in catalog.tools() {
        if !docs.has_document(&tool.id).await {
            report.missing_docs.push(tool.id.clone());
        }

        match (&tool.file, packages.package_path(tool)?) {
            (Some(file), Some(path)) => {
                if !files::exists(&path).await {
                    report.missing_packages.push(MissingPackage {
                        id: tool.id.clone(),
                        file: file.clone(),
                    });
                }
            }
            _ => report.without_package.push(tool.id.clone()),
        }
    }

    report.orphan_docs = docs
        .documented_ids()
        .await?
        .into_iter()
        .filter(|id| catalog.find(id).is_none())
        .collect();

    Ok(report)
}
