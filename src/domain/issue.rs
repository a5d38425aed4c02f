//! Issue domain model
//!
//! Issues are planned against a target version and may be blocked by other
//! issues. A blocking issue is the issue's parent on the roadmap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::IssueId;

#[derive(Debug, Error, PartialEq)]
pub enum IssueError {
    #[error("Issue {0} cannot block itself")]
    SelfRelationship(IssueId),

    #[error("Unknown status '{0}' (expected one of: new, feedback, acknowledged, confirmed, assigned, resolved, closed)")]
    UnknownStatus(String),
}

/// Workflow status of an issue
///
/// Statuses are ordered by their workflow code; everything at or past the
/// configured threshold counts as resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    New,
    Feedback,
    Acknowledged,
    Confirmed,
    Assigned,
    Resolved,
    Closed,
}

impl IssueStatus {
    /// Returns all statuses in workflow order
    pub fn all() -> [IssueStatus; 7] {
        [
            IssueStatus::New,
            IssueStatus::Feedback,
            IssueStatus::Acknowledged,
            IssueStatus::Confirmed,
            IssueStatus::Assigned,
            IssueStatus::Resolved,
            IssueStatus::Closed,
        ]
    }

    /// Returns the numeric workflow code
    pub fn code(&self) -> u8 {
        match self {
            IssueStatus::New => 10,
            IssueStatus::Feedback => 20,
            IssueStatus::Acknowledged => 30,
            IssueStatus::Confirmed => 40,
            IssueStatus::Assigned => 50,
            IssueStatus::Resolved => 80,
            IssueStatus::Closed => 90,
        }
    }

    /// Returns the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::New => "new",
            IssueStatus::Feedback => "feedback",
            IssueStatus::Acknowledged => "acknowledged",
            IssueStatus::Confirmed => "confirmed",
            IssueStatus::Assigned => "assigned",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Closed => "closed",
        }
    }

    /// Returns true if this status is at or past `threshold`
    pub fn is_resolved_at(&self, threshold: IssueStatus) -> bool {
        self.code() >= threshold.code()
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        IssueStatus::all()
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| IssueError::UnknownStatus(s.trim().to_string()))
    }
}

/// A tracked issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,

    pub summary: String,

    #[serde(default)]
    pub status: IssueStatus,

    /// Version this issue is planned for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Issues blocking this one, in the order they were linked
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<IssueId>,

    pub created_at: DateTime<Utc>,

    pub last_updated: DateTime<Utc>,
}

impl Issue {
    /// Creates a new issue with status `new`
    pub fn new(id: IssueId, summary: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            summary: summary.into(),
            status: IssueStatus::New,
            target_version: None,
            handler: None,
            category: None,
            parents: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Changes the status
    pub fn set_status(&mut self, status: IssueStatus) {
        self.status = status;
        self.touch();
    }

    /// Plans the issue for a version, or clears it with `None`
    pub fn set_target_version(&mut self, version: Option<String>) {
        self.target_version = version;
        self.touch();
    }

    /// Records that `parent` blocks this issue
    ///
    /// Returns false if the link already exists.
    pub fn add_parent(&mut self, parent: IssueId) -> Result<bool, IssueError> {
        if parent == self.id {
            return Err(IssueError::SelfRelationship(self.id));
        }

        if self.parents.contains(&parent) {
            return Ok(false);
        }

        self.parents.push(parent);
        self.touch();
        Ok(true)
    }

    /// Removes a blocking link, returning true if it existed
    pub fn remove_parent(&mut self, parent: IssueId) -> bool {
        let len_before = self.parents.len();
        self.parents.retain(|p| *p != parent);

        let removed = self.parents.len() != len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Returns true if the issue is planned for `version`
    pub fn is_targeted_at(&self, version: &str) -> bool {
        self.target_version.as_deref() == Some(version)
    }

    /// Returns true if the status is at or past `threshold`
    pub fn is_resolved_at(&self, threshold: IssueStatus) -> bool {
        self.status.is_resolved_at(threshold)
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}
