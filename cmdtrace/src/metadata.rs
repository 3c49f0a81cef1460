// cmdtrace/src/metadata.rs
//! Project metadata of the host project the CLI runs in.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "Cargo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub project_path: PathBuf,
    pub package_name: String,
    pub project_name: String,
    pub project_version: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

impl ProjectMetadata {
    pub fn new(
        project_path: impl Into<PathBuf>,
        package_name: impl Into<String>,
        project_name: impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            project_path: project_path.into(),
            package_name: package_name.into(),
            project_name: project_name.into(),
            project_version: project_version.into(),
        }
    }

    /// Reads the `[package]` section of `<dir>/Cargo.toml`.
    ///
    /// Returns `Ok(None)` when `dir` is not a project (no manifest, or a
    /// manifest without `[package]`, such as a bare workspace root).
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        if !manifest_path.is_file() {
            debug!("No manifest at {}, running outside a project.", manifest_path.display());
            return Ok(None);
        }

        let text = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;
        let manifest: Manifest = toml::from_str(&text)
            .with_context(|| format!("Failed to parse manifest {}", manifest_path.display()))?;

        Ok(manifest.package.map(|package| {
            Self::new(
                dir,
                package.name.replace('-', "_"),
                package.name,
                package.version.unwrap_or_default(),
            )
        }))
    }
}
