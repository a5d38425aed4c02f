//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{issue, roadmap, version};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(author, version, about = "Per-version roadmaps of nested issues")]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new roadmap project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage issues
    #[command(subcommand)]
    Issue(issue::IssueCommands),

    /// Manage versions
    #[command(subcommand)]
    Version(version::VersionCommands),

    /// Show the roadmap of unreleased versions
    Show {
        /// Only show this version
        #[arg(long)]
        version: Option<String>,

        /// Leave resolved issues off the roadmap
        #[arg(long)]
        hide_resolved: bool,
    },

    /// Report cycles in blocking relationships
    Check,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()
            .map(|config| config.global.default_format.into())
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Roadmap CLI starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .roadmap directory at: {}", project.roadmap_dir().display()),
            );
            output.success(&format!(
                "Initialized roadmap project at {}",
                project.root().display()
            ));
        }

        Commands::Issue(cmd) => issue::run(cmd, &output)?,
        Commands::Version(cmd) => version::run(cmd, &output)?,

        Commands::Show {
            version,
            hide_resolved,
        } => {
            output.verbose_ctx(
                "show",
                &format!("version filter: {:?}, hide_resolved: {}", version, hide_resolved),
            );
            roadmap::show(&output, version.as_deref(), hide_resolved)?
        }

        Commands::Check => roadmap::check(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
