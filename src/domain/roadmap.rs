//! Roadmap assembly
//!
//! Collects the issues planned for each unreleased version, turns their
//! blocking links into sequencer edges and orders them for display.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::id::IssueId;
use super::issue::{Issue, IssueStatus};
use super::progress::RoadmapProgress;
use super::sequence::{sequence_with_report, Edge, Placement};
use super::version::{roadmap_order, Version};

#[derive(Debug, Error, PartialEq)]
pub enum RoadmapError {
    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Version {0} is already released and has no roadmap")]
    VersionReleased(String),
}

/// Edges for one version plus its progress counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionEdges {
    pub edges: Vec<Edge<IssueId>>,
    pub progress: RoadmapProgress,
}

/// Options controlling roadmap assembly
#[derive(Debug, Clone)]
pub struct RoadmapOptions {
    /// Status at which an issue counts as resolved
    pub resolved_threshold: IssueStatus,

    /// Restrict the roadmap to one version
    pub version: Option<String>,
}

impl Default for RoadmapOptions {
    fn default() -> Self {
        Self {
            resolved_threshold: IssueStatus::Resolved,
            version: None,
        }
    }
}

/// The ordered roadmap of one version
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRoadmap {
    pub version: Version,
    pub progress: RoadmapProgress,
    pub placements: Vec<Placement<IssueId>>,

    /// Issues the sequencer placed despite an unresolved parent
    pub cycle_breaks: Vec<IssueId>,
}

/// Builds the edge list for `version`
///
/// Issues are visited by status, most recently updated first, and expanded
/// into one row per blocking link. `include` can veto an issue before it
/// contributes anything. A link yields a child edge only if the blocking
/// issue is planned for the same version (compared case-insensitively);
/// otherwise the issue is listed once as a root.
pub fn collect_edges<'a>(
    issues: impl IntoIterator<Item = &'a Issue>,
    version: &str,
    resolved_threshold: IssueStatus,
    mut include: impl FnMut(&Issue) -> bool,
) -> VersionEdges {
    let issues: Vec<&Issue> = issues.into_iter().collect();
    let by_id: HashMap<IssueId, &Issue> = issues.iter().map(|i| (i.id, *i)).collect();

    let mut planned: Vec<&Issue> = issues
        .iter()
        .copied()
        .filter(|i| i.is_targeted_at(version))
        .collect();
    planned.sort_by(|a, b| {
        a.status
            .code()
            .cmp(&b.status.code())
            .then_with(|| b.last_updated.cmp(&a.last_updated))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut result = VersionEdges::default();
    let mut counted: Vec<IssueId> = Vec::new();

    for issue in planned {
        let rows: Vec<Option<IssueId>> = if issue.parents.is_empty() {
            vec![None]
        } else {
            issue.parents.iter().copied().map(Some).collect()
        };

        for parent in rows {
            if !include(issue) {
                continue;
            }

            if !counted.contains(&issue.id) {
                result.progress.record(issue.is_resolved_at(resolved_threshold));
                counted.push(issue.id);
            }

            let same_version_parent = parent.filter(|p| {
                by_id
                    .get(p)
                    .and_then(|parent| parent.target_version.as_deref())
                    .is_some_and(|v| v.eq_ignore_ascii_case(version))
            });

            match same_version_parent {
                Some(p) => result.edges.push(Edge::child(issue.id, p)),
                None => {
                    if !result.edges.iter().any(|e| e.id == issue.id) {
                        result.edges.push(Edge::root(issue.id));
                    }
                }
            }
        }
    }

    result
}

/// Builds the roadmap of every unreleased version
///
/// Versions come in roadmap order; with `options.version` set only that
/// version is built.
pub fn build_roadmap<'a>(
    issues: &'a [Issue],
    versions: &[Version],
    options: &RoadmapOptions,
    mut include: impl FnMut(&Issue) -> bool,
) -> Result<Vec<VersionRoadmap>, RoadmapError> {
    if let Some(name) = &options.version {
        let version = versions
            .iter()
            .find(|v| &v.name == name)
            .ok_or_else(|| RoadmapError::VersionNotFound(name.clone()))?;
        if version.released {
            return Err(RoadmapError::VersionReleased(name.clone()));
        }
    }

    let roadmaps = roadmap_order(versions)
        .into_iter()
        .filter(|v| options.version.as_ref().map_or(true, |name| &v.name == name))
        .map(|version| {
            let collected =
                collect_edges(issues, &version.name, options.resolved_threshold, &mut include);
            let report = sequence_with_report(collected.edges);

            VersionRoadmap {
                version: version.clone(),
                progress: collected.progress,
                placements: report.placements,
                cycle_breaks: report.forced,
            }
        })
        .collect();

    Ok(roadmaps)
}

/// Serializable view of a version roadmap row
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapRow<'a> {
    pub id: IssueId,
    pub level: u32,
    pub summary: &'a str,
    pub status: IssueStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
}

impl<'a> RoadmapRow<'a> {
    pub fn new(placement: &Placement<IssueId>, issue: &'a Issue) -> Self {
        Self {
            id: placement.id,
            level: placement.level,
            summary: &issue.summary,
            status: issue.status,
            handler: issue.handler.as_deref(),
            category: issue.category.as_deref(),
        }
    }
}
