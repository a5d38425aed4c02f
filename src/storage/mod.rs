//! # Storage Layer
//!
//! Persistence layer for the roadmap CLI with git-friendly file formats.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Issues | JSONL (one JSON per line) | `.roadmap/issues.jsonl` |
//! | Versions | TOML `[[version]]` tables | `.roadmap/versions.toml` |
//! | Config | TOML | `.roadmap/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`IssueStore`] uses file locking (`fs2`) for concurrent access
//! - All rewrites are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a roadmap project
//! - [`IssueStore`] - Read/write issues as JSONL
//! - [`VersionStore`] - Read/write versions as TOML
//! - [`Config`] - Project and global configuration

mod jsonl;
mod versions;
mod config;
mod project;

pub use jsonl::IssueStore;
pub use versions::VersionStore;
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, RoadmapConfig};
pub use project::{Project, ProjectError};
