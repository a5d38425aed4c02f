//! Configuration handling for the roadmap CLI
//!
//! Configuration is stored in `.roadmap/config.toml` (project) and
//! `~/.config/roadmap/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::IssueStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Roadmap display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    /// Status at which an issue counts as resolved
    pub resolved_status_threshold: IssueStatus,

    /// Show scheduled release dates in version headers
    pub show_dates: bool,

    /// Spaces of indentation per nesting level
    pub indent_width: usize,

    /// Leave resolved issues off the roadmap
    pub hide_resolved: bool,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            resolved_status_threshold: IssueStatus::Resolved,
            show_dates: true,
            indent_width: 2,
            hide_resolved: false,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name shown in the roadmap title
    pub name: Option<String>,

    /// Roadmap settings
    pub roadmap: RoadmapConfig,
}

impl ProjectConfig {
    /// Checks values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roadmap.indent_width > 16 {
            return Err(ConfigError::Invalid(format!(
                "roadmap.indent_width must be at most 16, got {}",
                self.roadmap.indent_width
            )));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "roadmap", "roadmap-cli")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".roadmap").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config.validate().context("Invalid project config")?;
        Ok(config)
    }

    /// Finds the project root by looking for `.roadmap/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".roadmap").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a roadmap project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Returns the project root, or an error if not in a project
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a roadmap project. Run 'roadmap init' first."))
    }

    /// Returns the project name, falling back to the root directory name
    pub fn project_name(&self) -> String {
        self.project
            .name
            .clone()
            .or_else(|| {
                self.project_root
                    .as_deref()
                    .and_then(|root| root.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "Project".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert_eq!(
            config.project.roadmap.resolved_status_threshold,
            IssueStatus::Resolved
        );
        assert_eq!(config.project.roadmap.indent_width, 2);
        assert!(config.project.roadmap.show_dates);
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
name = "Widgets"

[roadmap]
resolved_status_threshold = "closed"
indent_width = 4
hide_resolved = true
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name.as_deref(), Some("Widgets"));
        assert_eq!(config.roadmap.resolved_status_threshold, IssueStatus::Closed);
        assert_eq!(config.roadmap.indent_width, 4);
        assert!(config.roadmap.hide_resolved);
        assert!(config.roadmap.show_dates);
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str(r#"default_format = "json""#).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn rejects_huge_indent() {
        let config: ProjectConfig = toml::from_str("[roadmap]\nindent_width = 80\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        let result: Result<ProjectConfig, _> =
            toml::from_str("[roadmap]\nresolved_status_threshold = \"done\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_project_root() {
        let dir = TempDir::new().unwrap();
        let roadmap_dir = dir.path().join(".roadmap");
        fs::create_dir_all(&roadmap_dir).unwrap();
        fs::write(roadmap_dir.join("config.toml"), "name = \"Gadgets\"\n").unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert!(config.is_in_project());
        assert_eq!(config.project_name(), "Gadgets");
    }

    #[test]
    fn project_name_falls_back_to_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("my-app");
        fs::create_dir_all(root.join(".roadmap")).unwrap();

        let config = Config::for_project(&root).unwrap();
        assert_eq!(config.project_name(), "my-app");
    }

    #[test]
    fn config_not_in_project() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert!(!config.is_in_project());
        assert!(config.require_project_root().is_err());
        assert_eq!(config.project_name(), "Project");
    }
}
