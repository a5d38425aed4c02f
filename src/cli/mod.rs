//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Issue | Issue management | `issue add`, `issue link`, `issue status` |
//! | Version | Release planning | `version add`, `version release` |
//! | Roadmap | Per-version roadmap | `show`, `show --version 1.0`, `check` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! roadmap --verbose show
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod issue;
mod version;
mod roadmap;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
