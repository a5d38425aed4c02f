//! Issue identifiers
//!
//! ID Format:
//! - Issue IDs are positive integers assigned in creation order
//! - Displayed with a leading hash (e.g., `#42`)
//! - Parsed with or without the hash (`42` and `#42` are equivalent)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid issue ID format: expected a positive number like '42' or '#42', got '{0}'")]
    InvalidIssueId(String),
}

/// Issue ID, a positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct IssueId(u32);

impl IssueId {
    /// Creates an ID from its number
    ///
    /// Returns `None` for zero, which is never a valid issue.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the first ID handed out in a fresh project
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the ID following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl TryFrom<u32> for IssueId {
    type Error = IdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| IdError::InvalidIssueId(value.to_string()))
    }
}

impl From<IssueId> for u32 {
    fn from(id: IssueId) -> Self {
        id.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdError::InvalidIssueId(s.to_string()));
        }

        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| IdError::InvalidIssueId(s.to_string()))
    }
}
