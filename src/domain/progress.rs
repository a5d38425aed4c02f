//! Version progress

use serde::Serialize;

/// Resolved vs planned issue counts for one version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoadmapProgress {
    pub resolved: usize,
    pub planned: usize,
}

impl RoadmapProgress {
    pub fn new(resolved: usize, planned: usize) -> Self {
        Self { resolved, planned }
    }

    /// Returns true if the version has any planned issues
    pub fn has_issues(&self) -> bool {
        self.planned > 0
    }

    /// Counts one planned issue
    pub fn record(&mut self, resolved: bool) {
        self.planned += 1;
        if resolved {
            self.resolved += 1;
        }
    }

    /// Percentage resolved, rounded down; 0 with no issues
    pub fn percent(&self) -> usize {
        if self.has_issues() {
            self.resolved * 100 / self.planned
        } else {
            0
        }
    }

    /// One-line summary, e.g. "3 of 4 issue(s) resolved. Progress (75%)."
    pub fn summary(&self) -> String {
        format!(
            "{} of {} issue(s) resolved. Progress ({}%).",
            self.resolved,
            self.planned,
            self.percent()
        )
    }
}
