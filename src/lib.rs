//! Roadmap CLI - per-version roadmaps of nested issues
//!
//! Issues are planned against versions and may block one another. The
//! roadmap lists each unreleased version's issues with blocked issues
//! indented under the issues blocking them, tolerating duplicate links and
//! blocking cycles.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Edge, Issue, IssueId, IssueStatus, Placement, Version};
