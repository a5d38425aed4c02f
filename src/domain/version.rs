//! Project versions
//!
//! A version is a named release that issues are planned against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A release of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,

    #[serde(default)]
    pub released: bool,

    /// Scheduled release date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Version {
    /// Creates an unreleased, undated version
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            released: false,
            date: None,
            description: None,
        }
    }

    /// Sets the scheduled release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the version as released
    pub fn release(&mut self) {
        self.released = true;
    }
}

/// Returns the unreleased versions in roadmap order
///
/// Undated versions come first, then ascending by date; ties break on name.
pub fn roadmap_order(versions: &[Version]) -> Vec<&Version> {
    let mut unreleased: Vec<_> = versions.iter().filter(|v| !v.released).collect();
    unreleased.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    unreleased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_version_is_unreleased() {
        let v = Version::new("1.0");
        assert!(!v.released);
        assert!(v.date.is_none());
    }

    #[test]
    fn roadmap_order_skips_released() {
        let mut old = Version::new("0.9");
        old.release();
        let versions = vec![old, Version::new("1.0")];

        let names: Vec<_> = roadmap_order(&versions).iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["1.0"]);
    }

    #[test]
    fn roadmap_order_by_date_then_name() {
        let versions = vec![
            Version::new("2.0").with_date(date("2027-01-01")),
            Version::new("1.1").with_date(date("2026-12-01")),
            Version::new("backlog"),
            Version::new("1.0").with_date(date("2026-12-01")),
        ];

        let names: Vec<_> = roadmap_order(&versions).iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["backlog", "1.0", "1.1", "2.0"]);
    }

    #[test]
    fn parses_from_toml() {
        let toml = r#"
name = "1.0"
date = "2026-11-01"
description = "First stable"
"#;
        let v: Version = toml::from_str(toml).unwrap();
        assert_eq!(v.date, Some(date("2026-11-01")));
        assert!(!v.released);
    }
}
