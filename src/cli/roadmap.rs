//! Roadmap commands (show, check)

use std::collections::HashMap;

use anyhow::Result;

use super::output::Output;
use crate::domain::{
    build_roadmap, render_with, Issue, IssueId, IssueStatus, RelationshipGraph, RoadmapOptions,
    RoadmapRow, VersionRoadmap,
};
use crate::storage::{Project, RoadmapConfig};

/// Show the roadmap of every unreleased version
pub fn show(output: &Output, version: Option<&str>, hide_resolved: bool) -> Result<()> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        "show",
        &format!("Opened project at: {}", project.root().display()),
    );

    let settings = &project.config().project.roadmap;
    let threshold = settings.resolved_status_threshold;
    let hide_resolved = hide_resolved || settings.hide_resolved;

    let issues = project.issue_store().read_list()?;
    let versions = project.version_store().read_all()?;
    output.verbose_ctx(
        "show",
        &format!("Loaded {} issues, {} versions", issues.len(), versions.len()),
    );

    let options = RoadmapOptions {
        resolved_threshold: threshold,
        version: version.map(str::to_string),
    };
    let roadmaps = build_roadmap(&issues, &versions, &options, |issue| {
        !(hide_resolved && issue.is_resolved_at(threshold))
    })?;

    for roadmap in &roadmaps {
        output.verbose_ctx(
            "show",
            &format!(
                "Version {}: {} rows, {} of {} resolved",
                roadmap.version.name,
                roadmap.placements.len(),
                roadmap.progress.resolved,
                roadmap.progress.planned
            ),
        );
        if !roadmap.cycle_breaks.is_empty() {
            let ids: Vec<_> = roadmap.cycle_breaks.iter().map(|id| id.to_string()).collect();
            output.verbose_ctx(
                "show",
                &format!("Broke blocking cycles at {}", ids.join(", ")),
            );
        }
    }

    let by_id: HashMap<IssueId, &Issue> = issues.iter().map(|i| (i.id, i)).collect();
    let shown: Vec<&VersionRoadmap> = roadmaps.iter().filter(|r| r.progress.has_issues()).collect();
    let project_name = project.config().project_name();

    if output.is_json() {
        let versions: Vec<_> = shown
            .iter()
            .map(|roadmap| {
                let mut rows = Vec::new();
                render_with(&roadmap.placements, |placement| {
                    if let Some(&issue) = by_id.get(&placement.id) {
                        rows.push(RoadmapRow::new(placement, issue));
                    }
                });

                serde_json::json!({
                    "name": roadmap.version.name,
                    "date": roadmap.version.date,
                    "description": roadmap.version.description,
                    "progress": {
                        "resolved": roadmap.progress.resolved,
                        "planned": roadmap.progress.planned,
                        "percent": roadmap.progress.percent(),
                    },
                    "issues": rows,
                    "cycle_breaks": roadmap.cycle_breaks,
                })
            })
            .collect();

        output.data(&serde_json::json!({
            "project": project_name,
            "versions": versions,
        }));
        return Ok(());
    }

    if shown.is_empty() {
        println!("No roadmap information available.");
        return Ok(());
    }

    println!("{} - Roadmap", project_name);
    println!("{}", "=".repeat(40));

    for roadmap in shown {
        println!();
        for line in version_header(&project_name, roadmap, settings) {
            println!("{}", line);
        }

        render_with(&roadmap.placements, |placement| {
            if let Some(&issue) = by_id.get(&placement.id) {
                println!(
                    "{}",
                    format_row(issue, placement.level, settings.indent_width, threshold)
                );
            }
        });

        println!("{}", roadmap.progress.summary());
    }

    Ok(())
}

/// Report cycles in blocking relationships
pub fn check(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let issues = project.issue_store().read_list()?;

    let graph = RelationshipGraph::from_issues(&issues);
    let cycles = graph.cycles();
    output.verbose_ctx(
        "check",
        &format!("Checked {} issues, found {} cycles", graph.len(), cycles.len()),
    );

    if output.is_json() {
        output.data(&serde_json::json!({ "cycles": cycles }));
    } else if cycles.is_empty() {
        println!("No blocking cycles found.");
    } else {
        println!("Blocking cycles ({}):", cycles.len());
        for cycle in &cycles {
            let ids: Vec<_> = cycle.iter().map(|id| id.to_string()).collect();
            println!("  {}", ids.join(" -> "));
        }
    }

    Ok(())
}

/// Header lines for one version block
fn version_header(
    project_name: &str,
    roadmap: &VersionRoadmap,
    settings: &RoadmapConfig,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} - {} [{}%]",
        project_name,
        roadmap.version.name,
        roadmap.progress.percent()
    )];

    if settings.show_dates {
        if let Some(date) = roadmap.version.date {
            lines.push(format!("Scheduled release: {}", date.format("%Y-%m-%d")));
        }
    }

    if let Some(description) = roadmap.version.description.as_deref() {
        if !description.trim().is_empty() {
            lines.push(description.to_string());
        }
    }

    lines.push("-".repeat(40));
    lines
}

/// One roadmap row: `{indent}- #id: [category] summary (handler) - status`
///
/// The status suffix only appears once the issue counts as resolved.
fn format_row(issue: &Issue, level: u32, indent_width: usize, threshold: IssueStatus) -> String {
    let mut row = format!("{}- {}: ", " ".repeat(level as usize * indent_width), issue.id);

    if let Some(category) = &issue.category {
        row.push_str(&format!("[{}] ", category));
    }
    row.push_str(&issue.summary);
    if let Some(handler) = &issue.handler {
        row.push_str(&format!(" ({})", handler));
    }
    if issue.is_resolved_at(threshold) {
        row.push_str(&format!(" - {}", issue.status));
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoadmapProgress, Version};
    use chrono::NaiveDate;

    fn issue(n: u32) -> Issue {
        Issue::new(IssueId::new(n).unwrap(), format!("Issue {}", n))
    }

    #[test]
    fn row_is_indented_by_level() {
        let row = format_row(&issue(3), 2, 2, IssueStatus::Resolved);
        assert_eq!(row, "    - #3: Issue 3");
    }

    #[test]
    fn row_shows_category_handler_and_resolution() {
        let mut issue = issue(7);
        issue.category = Some("ui".to_string());
        issue.handler = Some("alice".to_string());
        issue.status = IssueStatus::Closed;

        let row = format_row(&issue, 0, 2, IssueStatus::Resolved);
        assert_eq!(row, "- #7: [ui] Issue 7 (alice) - closed");
    }

    #[test]
    fn unresolved_row_has_no_status() {
        let mut issue = issue(1);
        issue.status = IssueStatus::Assigned;

        let row = format_row(&issue, 1, 4, IssueStatus::Resolved);
        assert_eq!(row, "    - #1: Issue 1");
    }

    #[test]
    fn header_with_date_and_description() {
        let roadmap = VersionRoadmap {
            version: Version::new("1.0")
                .with_date(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())
                .with_description("First stable"),
            progress: RoadmapProgress::new(1, 4),
            placements: vec![],
            cycle_breaks: vec![],
        };

        let lines = version_header("Widgets", &roadmap, &RoadmapConfig::default());
        assert_eq!(lines[0], "Widgets - 1.0 [25%]");
        assert_eq!(lines[1], "Scheduled release: 2026-11-01");
        assert_eq!(lines[2], "First stable");
    }

    #[test]
    fn header_hides_dates_when_disabled() {
        let roadmap = VersionRoadmap {
            version: Version::new("1.0").with_date(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()),
            progress: RoadmapProgress::new(0, 1),
            placements: vec![],
            cycle_breaks: vec![],
        };
        let settings = RoadmapConfig {
            show_dates: false,
            ..RoadmapConfig::default()
        };

        let lines = version_header("Widgets", &roadmap, &settings);
        assert_eq!(lines.len(), 2);
        assert!(!lines.iter().any(|l| l.contains("Scheduled")));
    }
}
