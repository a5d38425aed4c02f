//! JSONL storage for issues
//!
//! Issues are stored in `.roadmap/issues.jsonl` with one JSON object per line.
//! Uses file locking for concurrent access safety.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Issue, IssueId};

/// Store for issue data in JSONL format
pub struct IssueStore {
    path: PathBuf,
}

impl IssueStore {
    /// Creates a new issue store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".roadmap").join("issues.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all issues, keyed and ordered by ID
    ///
    /// When an ID appears on several lines the last one wins.
    pub fn read_all(&self) -> Result<BTreeMap<IssueId, Issue>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open issue store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on issue store")?;

        let reader = BufReader::new(&file);
        let mut issues = BTreeMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let issue: Issue = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse issue at line {}", line_num + 1))?;

            issues.insert(issue.id, issue);
        }

        // Lock is released when file is dropped
        Ok(issues)
    }

    /// Reads all issues as a list ordered by ID
    pub fn read_list(&self) -> Result<Vec<Issue>> {
        Ok(self.read_all()?.into_values().collect())
    }

    /// Reads a single issue
    pub fn get(&self, id: IssueId) -> Result<Option<Issue>> {
        Ok(self.read_all()?.remove(&id))
    }

    /// Returns the ID the next new issue should get
    pub fn next_id(&self) -> Result<IssueId> {
        let issues = self.read_all()?;
        Ok(issues
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or_else(IssueId::first))
    }

    /// Writes all issues to the store (full rewrite)
    pub fn write_all(&self, issues: &BTreeMap<IssueId, Issue>) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on issue store")?;

            let mut writer = BufWriter::new(&file);

            for issue in issues.values() {
                let line = serde_json::to_string(issue).context("Failed to serialize issue")?;
                writeln!(writer, "{}", line).context("Failed to write issue")?;
            }

            writer.flush().context("Failed to flush issue store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a single issue (used for quick adds without full rewrite)
    pub fn append(&self, issue: &Issue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open issue store: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on issue store")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(issue).context("Failed to serialize issue")?;
        writeln!(writer, "{}", line).context("Failed to write issue")?;

        writer.flush().context("Failed to flush issue store")?;

        Ok(())
    }

    /// Updates a single issue (reads all, updates, writes all)
    pub fn update(&self, issue: &Issue) -> Result<()> {
        let mut issues = self.read_all()?;
        issues.insert(issue.id, issue.clone());
        self.write_all(&issues)
    }
}
