//! Project management
//!
//! Handles project initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, IssueStore, VersionStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a roadmap project. Run 'roadmap init' first.")]
    NotInProject,
}

/// A roadmap project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".roadmap").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let roadmap_dir = root.join(".roadmap");

        fs::create_dir_all(&roadmap_dir).with_context(|| {
            format!(
                "Failed to create .roadmap directory: {}",
                roadmap_dir.display()
            )
        })?;

        let config_path = roadmap_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Roadmap configuration

# Project name shown in the roadmap title (defaults to the directory name)
# name = "My Project"

[roadmap]
# Status at which an issue counts as resolved
resolved_status_threshold = "resolved"

# Show scheduled release dates in version headers
show_dates = true

# Spaces of indentation per nesting level
indent_width = 2

# Leave resolved issues off the roadmap
hide_resolved = false
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let versions_path = roadmap_dir.join("versions.toml");
        if !versions_path.exists() {
            fs::write(&versions_path, "# Project versions, one [[version]] table each\n")
                .with_context(|| {
                    format!("Failed to write versions: {}", versions_path.display())
                })?;
        }

        let gitignore_path = roadmap_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore interrupted writes
*.tmp
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .roadmap directory path
    pub fn roadmap_dir(&self) -> PathBuf {
        self.root.join(".roadmap")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the issue store
    pub fn issue_store(&self) -> IssueStore {
        IssueStore::for_project(&self.root)
    }

    /// Returns the version store
    pub fn version_store(&self) -> VersionStore {
        VersionStore::for_project(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.roadmap_dir().is_dir());
        assert!(project.roadmap_dir().join("config.toml").is_file());
        assert!(project.roadmap_dir().join("versions.toml").is_file());
        assert!(project.roadmap_dir().join(".gitignore").is_file());
    }

    #[test]
    fn default_config_parses() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert_eq!(project.config().project.roadmap.indent_width, 2);
        assert!(project.version_store().read_all().unwrap().is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap();

        assert!(dir.path().join(".roadmap").is_dir());
    }

    #[test]
    fn open_existing_project() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn stores_are_accessible() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.issue_store().path().ends_with("issues.jsonl"));
        assert!(project.version_store().path().ends_with("versions.toml"));
    }
}
