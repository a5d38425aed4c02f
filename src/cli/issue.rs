//! Issue CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Issue, IssueId, IssueStatus, RelationshipGraph};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Add an issue
    ///
    /// Examples:
    ///   roadmap issue add "Crash on save"
    ///   roadmap issue add "Export to CSV" --version 1.2 --handler alice
    Add {
        /// Issue summary
        summary: String,

        /// Target version
        #[arg(long)]
        version: Option<String>,

        /// Person handling the issue
        #[arg(long)]
        handler: Option<String>,

        /// Category label
        #[arg(long)]
        category: Option<String>,

        /// Initial status
        #[arg(long, default_value = "new")]
        status: IssueStatus,
    },

    /// List issues
    List {
        /// Only issues targeted at this version
        #[arg(long)]
        version: Option<String>,
    },

    /// Show issue details
    Show {
        /// Issue ID
        id: IssueId,
    },

    /// Change an issue's status
    Status {
        /// Issue ID
        id: IssueId,

        /// New status
        status: IssueStatus,
    },

    /// Set or clear an issue's target version
    Target {
        /// Issue ID
        id: IssueId,

        /// Version name (omit to clear)
        version: Option<String>,
    },

    /// Record that one issue blocks another
    Link {
        /// Issue that is blocked (the child)
        issue: IssueId,

        /// Issue that blocks it (the parent)
        blocked_by: IssueId,
    },

    /// Remove a blocking relationship
    Unlink {
        /// Issue that is blocked
        issue: IssueId,

        /// Blocking issue to remove
        blocked_by: IssueId,
    },
}

pub fn run(cmd: IssueCommands, output: &Output) -> Result<()> {
    match cmd {
        IssueCommands::Add {
            summary,
            version,
            handler,
            category,
            status,
        } => add_issue(output, summary, version, handler, category, status),
        IssueCommands::List { version } => list_issues(output, version.as_deref()),
        IssueCommands::Show { id } => show_issue(output, id),
        IssueCommands::Status { id, status } => set_status(output, id, status),
        IssueCommands::Target { id, version } => set_target(output, id, version),
        IssueCommands::Link { issue, blocked_by } => link(output, issue, blocked_by),
        IssueCommands::Unlink { issue, blocked_by } => unlink(output, issue, blocked_by),
    }
}

fn add_issue(
    output: &Output,
    summary: String,
    version: Option<String>,
    handler: Option<String>,
    category: Option<String>,
    status: IssueStatus,
) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.issue_store();

    if let Some(name) = &version {
        if project.version_store().get(name)?.is_none() {
            output.warn(&format!("Version '{}' does not exist yet", name));
        }
    }

    let id = store.next_id()?;
    output.verbose_ctx("issue", &format!("Assigning ID {}", id));

    let mut issue = Issue::new(id, summary);
    issue.status = status;
    issue.target_version = version;
    issue.handler = handler;
    issue.category = category;
    store.append(&issue)?;

    if output.is_json() {
        output.data(&issue);
    } else {
        output.success(&format!("Created issue {}: {}", issue.id, issue.summary));
    }

    Ok(())
}

fn list_issues(output: &Output, version: Option<&str>) -> Result<()> {
    let project = Project::open_current()?;
    let issues: Vec<Issue> = project
        .issue_store()
        .read_list()?
        .into_iter()
        .filter(|i| version.map_or(true, |v| i.is_targeted_at(v)))
        .collect();

    output.verbose_ctx("issue", &format!("Listing {} issues", issues.len()));

    if output.is_json() {
        output.data(&issues);
    } else if issues.is_empty() {
        println!("No issues found.");
    } else {
        println!("{:<8} {:<14} {:<12} SUMMARY", "ID", "STATUS", "VERSION");
        println!("{}", "-".repeat(70));
        for issue in &issues {
            println!(
                "{:<8} {:<14} {:<12} {}",
                issue.id.to_string(),
                issue.status.as_str(),
                issue.target_version.as_deref().unwrap_or("-"),
                issue.summary
            );
        }
    }

    Ok(())
}

fn show_issue(output: &Output, id: IssueId) -> Result<()> {
    let project = Project::open_current()?;
    let issue = load(&project, id)?;

    if output.is_json() {
        output.data(&issue);
        return Ok(());
    }

    println!("Issue {}: {}", issue.id, issue.summary);
    println!("Status:   {}", issue.status);
    println!(
        "Version:  {}",
        issue.target_version.as_deref().unwrap_or("(none)")
    );
    if let Some(handler) = &issue.handler {
        println!("Handler:  {}", handler);
    }
    if let Some(category) = &issue.category {
        println!("Category: {}", category);
    }
    if !issue.parents.is_empty() {
        let parents: Vec<_> = issue.parents.iter().map(|p| p.to_string()).collect();
        println!("Blocked by: {}", parents.join(", "));
    }
    println!("Created:  {}", issue.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated:  {}", issue.last_updated.format("%Y-%m-%d %H:%M"));

    Ok(())
}

fn set_status(output: &Output, id: IssueId, status: IssueStatus) -> Result<()> {
    let project = Project::open_current()?;
    let mut issue = load(&project, id)?;

    issue.set_status(status);
    project.issue_store().update(&issue)?;

    output.success(&format!("Issue {} is now {}", issue.id, issue.status));
    Ok(())
}

fn set_target(output: &Output, id: IssueId, version: Option<String>) -> Result<()> {
    let project = Project::open_current()?;
    let mut issue = load(&project, id)?;

    issue.set_target_version(version);
    project.issue_store().update(&issue)?;

    match &issue.target_version {
        Some(v) => output.success(&format!("Issue {} targets version {}", issue.id, v)),
        None => output.success(&format!("Issue {} has no target version", issue.id)),
    }
    Ok(())
}

fn link(output: &Output, child: IssueId, parent: IssueId) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.issue_store();
    let mut issues = store.read_all()?;

    if !issues.contains_key(&parent) {
        anyhow::bail!("Issue not found: {}", parent);
    }

    let graph = RelationshipGraph::from_issues(issues.values());
    let closes_cycle = graph.would_create_cycle(parent, child);

    let issue = issues
        .get_mut(&child)
        .ok_or_else(|| anyhow::anyhow!("Issue not found: {}", child))?;

    if !issue.add_parent(parent)? {
        output.success(&format!("{} already blocks {}", parent, child));
        return Ok(());
    }

    let updated = issue.clone();
    store.update(&updated)?;

    if closes_cycle {
        output.warn(&format!(
            "Linking {} to {} creates a cycle; the roadmap will break it arbitrarily",
            child, parent
        ));
    }
    output.success(&format!("{} is now blocked by {}", child, parent));
    Ok(())
}

fn unlink(output: &Output, child: IssueId, parent: IssueId) -> Result<()> {
    let project = Project::open_current()?;
    let mut issue = load(&project, child)?;

    if issue.remove_parent(parent) {
        project.issue_store().update(&issue)?;
        output.success(&format!("{} is no longer blocked by {}", child, parent));
    } else {
        output.success(&format!("{} was not blocked by {}", child, parent));
    }
    Ok(())
}

fn load(project: &Project, id: IssueId) -> Result<Issue> {
    project
        .issue_store()
        .get(id)?
        .with_context(|| format!("Issue not found: {}", id))
}
