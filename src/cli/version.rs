//! Version CLI commands

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{roadmap_order, Version};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum VersionCommands {
    /// Add a version
    Add {
        /// Version name
        name: String,

        /// Scheduled release date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Description shown on the roadmap
        #[arg(long)]
        description: Option<String>,
    },

    /// List versions
    List {
        /// Include released versions
        #[arg(long)]
        all: bool,
    },

    /// Mark a version as released
    Release {
        /// Version name
        name: String,
    },
}

pub fn run(cmd: VersionCommands, output: &Output) -> Result<()> {
    match cmd {
        VersionCommands::Add {
            name,
            date,
            description,
        } => add_version(output, name, date, description),
        VersionCommands::List { all } => list_versions(output, all),
        VersionCommands::Release { name } => release_version(output, &name),
    }
}

fn add_version(
    output: &Output,
    name: String,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    let project = Project::open_current()?;

    let mut version = Version::new(name);
    version.date = date;
    version.description = description;

    project.version_store().add(version.clone())?;

    if output.is_json() {
        output.data(&version);
    } else {
        output.success(&format!("Created version {}", version.name));
    }
    Ok(())
}

fn list_versions(output: &Output, all: bool) -> Result<()> {
    let project = Project::open_current()?;
    let versions = project.version_store().read_all()?;

    let shown: Vec<&Version> = if all {
        versions.iter().collect()
    } else {
        roadmap_order(&versions)
    };

    if output.is_json() {
        output.data(&shown);
    } else if shown.is_empty() {
        println!("No versions found.");
    } else {
        println!("{:<16} {:<12} RELEASED", "NAME", "DATE");
        println!("{}", "-".repeat(40));
        for version in shown {
            let date = version
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let released = if version.released { "yes" } else { "no" };
            println!("{:<16} {:<12} {}", version.name, date, released);
        }
    }
    Ok(())
}

fn release_version(output: &Output, name: &str) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.version_store();

    let mut version = store
        .get(name)?
        .ok_or_else(|| anyhow::anyhow!("Version not found: {}", name))?;

    if version.released {
        output.success(&format!("Version {} was already released", name));
        return Ok(());
    }

    version.release();
    store.update(&version)?;
    output.success(&format!("Released version {}", name));
    Ok(())
}
