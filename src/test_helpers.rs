//! Shared test utilities for the problem-archive test suite.
//!
//! Provides record builders, on-disk fixture writers and a tree snapshot for
//! "nothing changed" assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let dir = write_problem(tmp.path(), &record(20, "Valid Parentheses", Difficulty::Easy), "\n# 20. Valid Parentheses\n");
//!
//! let before = tree_snapshot(tmp.path());
//! // ... run something that must not touch the tree ...
//! assert_eq!(tree_snapshot(tmp.path()), before);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use walkdir::WalkDir;

use crate::frontmatter;
use crate::scaffold::NewProblem;
use crate::scan::ProblemEntry;
use crate::templates::Source;
use crate::types::{Difficulty, LabelSet, ProblemRecord};

/// Link source matching the stock config.
pub const SOURCE: Source<'static> = Source {
    name: "LeetCode",
    url_base: "https://leetcode.com/problems/",
};

/// Date stamped into every fixture record.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
}

// =========================================================================
// Record builders
// =========================================================================

/// A minimal record: slug from the title, solved in python on the fixture
/// date, no tags or notes.
pub fn record(id: u32, title: &str, difficulty: Difficulty) -> ProblemRecord {
    ProblemRecord {
        id,
        title: title.to_string(),
        slug: crate::naming::slugify(title),
        difficulty,
        tags: LabelSet::new(),
        topics: LabelSet::new(),
        date_created: Some(fixture_date()),
        date_solved: Some(fixture_date()),
        languages: ["python"].into_iter().collect(),
        notes: None,
    }
}

/// A scanned entry titled `Problem {id}` in its canonical folder.
pub fn entry(id: u32, difficulty: Difficulty) -> ProblemEntry {
    let record = record(id, &format!("Problem {id}"), difficulty);
    ProblemEntry {
        folder: record.dir_name(),
        record,
    }
}

/// Scaffold input without topics, dated on the fixture date.
pub fn new_problem(id: u32, title: &str, difficulty: &str, languages: &[&str]) -> NewProblem {
    NewProblem {
        id,
        title: title.to_string(),
        difficulty: difficulty.to_string(),
        languages: languages.iter().map(|l| l.to_string()).collect(),
        topics: None,
        date: fixture_date(),
    }
}

// =========================================================================
// Fixture writers
// =========================================================================

/// Write `record` as the frontmatter of `README.md` in its canonical folder
/// under `root`, followed by `body`. Returns the folder.
pub fn write_problem(root: &Path, record: &ProblemRecord, body: &str) -> PathBuf {
    let dir = root.join(record.dir_name());
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("README.md"),
        frontmatter::encode_document(record, body),
    )
    .unwrap();
    dir
}

/// Write `content` verbatim as `README.md` in `root/folder`.
pub fn write_raw_problem(root: &Path, folder: &str, content: &str) -> PathBuf {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("README.md"), content).unwrap();
    dir
}

// =========================================================================
// Snapshots
// =========================================================================

/// Every file under `root` with its bytes, keyed by relative path.
pub fn tree_snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}
