//! TOML storage for versions
//!
//! Versions live in `.roadmap/versions.toml` as an array of `[[version]]`
//! tables, kept in the order they were added.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Version;

#[derive(Debug, Default, Serialize, Deserialize)]
struct VersionsFile {
    #[serde(default, rename = "version")]
    versions: Vec<Version>,
}

/// Store for project versions
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    /// Creates a new version store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".roadmap").join("versions.toml"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all versions
    pub fn read_all(&self) -> Result<Vec<Version>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read versions: {}", self.path.display()))?;

        let file: VersionsFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse versions: {}", self.path.display()))?;

        Ok(file.versions)
    }

    /// Finds a version by name
    pub fn get(&self, name: &str) -> Result<Option<Version>> {
        Ok(self.read_all()?.into_iter().find(|v| v.name == name))
    }

    /// Writes all versions (full rewrite)
    pub fn write_all(&self, versions: &[Version]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = VersionsFile {
            versions: versions.to_vec(),
        };
        let content = toml::to_string_pretty(&file).context("Failed to serialize versions")?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })
    }

    /// Adds a version, failing if the name is taken
    pub fn add(&self, version: Version) -> Result<()> {
        let mut versions = self.read_all()?;
        if versions.iter().any(|v| v.name == version.name) {
            anyhow::bail!("Version already exists: {}", version.name);
        }

        versions.push(version);
        self.write_all(&versions)
    }

    /// Replaces the version with the same name
    pub fn update(&self, version: &Version) -> Result<()> {
        let mut versions = self.read_all()?;
        let slot = versions
            .iter_mut()
            .find(|v| v.name == version.name)
            .ok_or_else(|| anyhow::anyhow!("Version not found: {}", version.name))?;

        *slot = version.clone();
        self.write_all(&versions)
    }
}
