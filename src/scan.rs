//! Collection scanning and aggregation.
//!
//! Walks the immediate subdirectories of the problems root, decodes the
//! frontmatter of each problem document and folds the records into an
//! [`AggregateView`]:
//!
//! ```text
//! problems/
//! ├── 00001-two-sum/README.md              # counted
//! ├── 00020-valid-parentheses/README.md    # counted
//! ├── 00042-trapping-rain-water/           # no README.md → skipped, logged
//! ├── 00070-climbing-stairs/README.md      # malformed frontmatter → skipped, logged
//! └── scratch/                             # not NNNNN-* → ignored silently
//! ```
//!
//! ## Aggregation rules
//!
//! - Entries keep directory-name order (the scan order).
//! - Only `easy`, `medium` and `hard` are counted per difficulty. Other values
//!   still appear in [`AggregateView::entries`] and in the total.
//! - Tag frequencies ignore placeholder labels (`<tag 1>`, `tag1`, ...).
//! - Frequency rankings are by descending count, ties in first-seen order.
//! - `recent` holds the ten most recently solved entries, ties in scan order.
//!   Entries without `date_solved` never appear in it.
//!
//! A broken entry never aborts the scan: it is recorded in
//! [`AggregateView::skipped`] and logged. Only a failure to list the root
//! directory itself is an error.

use crate::frontmatter::{self, FrontmatterError};
use crate::naming;
use crate::types::{Difficulty, ProblemRecord};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Number of entries kept in [`AggregateView::recent`].
pub const RECENT_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Problem directories directly under `root`, sorted by name.
///
/// Only names of the form `NNNNN-...` count. A missing root yields an empty
/// list, and an entry that cannot be read is logged and left out.
pub fn problem_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy();
        if entry.path().is_dir() && naming::is_problem_dir_name(&name) {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// A successfully decoded problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemEntry {
    /// Directory name relative to the problems root.
    pub folder: String,
    pub record: ProblemRecord,
}

/// Why a problem directory was left out of the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanIssue {
    MissingDocument,
    MissingFrontmatter,
    Unreadable(String),
    Malformed(String),
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanIssue::MissingDocument => f.write_str("missing document"),
            ScanIssue::MissingFrontmatter => f.write_str("missing frontmatter block"),
            ScanIssue::Unreadable(e) => write!(f, "unreadable document: {e}"),
            ScanIssue::Malformed(e) => write!(f, "malformed frontmatter: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub folder: String,
    pub issue: ScanIssue,
}

/// Per-difficulty counts over the recognized levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyCounts {
    fn record(&mut self, difficulty: &Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::Other(_) => {}
        }
    }

    pub fn get(&self, difficulty: &Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Other(_) => 0,
        }
    }
}

/// Label frequencies that remember first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    pub fn add(&mut self, label: &str) {
        match self.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((label.to_string(), 1)),
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Labels by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.counts.iter().map(|(l, n)| (l.as_str(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Labels in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(l, n)| (l.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Everything the reports are rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateView {
    pub entries: Vec<ProblemEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub counts: DifficultyCounts,
    pub languages: Tally,
    pub tags: Tally,
    pub recent: Vec<ProblemEntry>,
}

impl AggregateView {
    /// Fold decoded entries (in scan order) into a view.
    pub fn from_entries(entries: Vec<ProblemEntry>, skipped: Vec<SkippedEntry>) -> Self {
        let mut counts = DifficultyCounts::default();
        let mut languages = Tally::default();
        let mut tags = Tally::default();
        for entry in &entries {
            counts.record(&entry.record.difficulty);
            for lang in entry.record.languages.iter() {
                languages.add(lang);
            }
            for tag in entry.record.tags.real() {
                tags.add(tag);
            }
        }

        let mut recent: Vec<ProblemEntry> = entries
            .iter()
            .filter(|e| e.record.date_solved.is_some())
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.record.date_solved.cmp(&a.record.date_solved));
        recent.truncate(RECENT_LIMIT);

        Self {
            entries,
            skipped,
            counts,
            languages,
            tags,
            recent,
        }
    }

    /// Number of decoded entries, whatever their difficulty.
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// Scan the problems root into an aggregate view.
pub fn scan(problems_root: &Path, document_name: &str) -> Result<AggregateView, ScanError> {
    if !problems_root.is_dir() {
        log::warn!("problems directory {} does not exist", problems_root.display());
        return Ok(AggregateView::default());
    }

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for dir in problem_dirs(problems_root)? {
        let folder = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_entry(&dir.join(document_name)) {
            Ok(record) => entries.push(ProblemEntry { folder, record }),
            Err(issue) => {
                log::warn!("skipping {folder}: {issue}");
                skipped.push(SkippedEntry { folder, issue });
            }
        }
    }
    log::debug!("scanned {} problems, {} skipped", entries.len(), skipped.len());
    Ok(AggregateView::from_entries(entries, skipped))
}

fn read_entry(path: &Path) -> Result<ProblemRecord, ScanIssue> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanIssue::MissingDocument,
        _ => ScanIssue::Unreadable(e.to_string()),
    })?;
    match frontmatter::decode(&content) {
        Ok((record, _)) => Ok(record),
        Err(FrontmatterError::Missing) => Err(ScanIssue::MissingFrontmatter),
        Err(e) => Err(ScanIssue::Malformed(e.to_string())),
    }
}
