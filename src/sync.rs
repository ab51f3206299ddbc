//! Metadata synchronizer: projects a document's frontmatter into its body.
//!
//! For one problem directory:
//!
//! 1. Decode the frontmatter of the canonical document.
//! 2. Render the info card from it and put it in the body: replace the
//!    existing card wherever it is, or insert one right after the title.
//! 3. If the record has real notes and the body has no learning-notes
//!    section yet, append one. A notes section that already exists is never
//!    touched.
//!
//! Running it again on its own output changes nothing. The file is only
//! rewritten when its content actually changes.
//!
//! A directory without a document, or a document without frontmatter, is
//! skipped rather than treated as an error; a frontmatter block that is
//! present but malformed is an error.

use crate::config::ArchiveConfig;
use crate::document::{DocumentBody, NOTES_HEADING, NOTES_HEADINGS};
use crate::frontmatter::{self, FrontmatterError};
use crate::scan;
use crate::templates;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{}: {source}", .path)]
    Frontmatter {
        path: String,
        #[source]
        source: FrontmatterError,
    },
    #[error("not a problem directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Why a directory was not synchronized.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingDocument,
    MissingFrontmatter,
    /// Body has neither an info card nor a title to anchor one.
    NoAnchor,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDocument => f.write_str("missing document"),
            SkipReason::MissingFrontmatter => f.write_str("missing frontmatter block"),
            SkipReason::NoAnchor => f.write_str("no title line to place the info card after"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Synced {
        /// Whether the file content changed.
        changed: bool,
        notes_appended: bool,
    },
    Skipped(SkipReason),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }
}

/// Synchronize one problem directory. `Ok(true)` when synced, `Ok(false)`
/// when skipped for missing inputs.
pub fn sync_metadata(dir: &Path, config: &ArchiveConfig) -> Result<bool, SyncError> {
    Ok(sync_directory(dir, config)?.is_synced())
}

/// Resolve a directory named on the command line.
///
/// `dir` may be a path to the directory itself or a folder name under the
/// problems root; anything that is neither is rejected.
pub fn resolve_problem_dir(dir: &Path, problems_root: &Path) -> Result<PathBuf, SyncError> {
    if dir.is_dir() {
        return Ok(dir.to_path_buf());
    }
    let under_root = problems_root.join(dir);
    if under_root.is_dir() {
        Ok(under_root)
    } else {
        Err(SyncError::NotADirectory(dir.to_path_buf()))
    }
}

/// Synchronize one problem directory, reporting what happened.
pub fn sync_directory(dir: &Path, config: &ArchiveConfig) -> Result<SyncOutcome, SyncError> {
    let path = dir.join(&config.document_name);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(SyncOutcome::Skipped(SkipReason::MissingDocument));
        }
        Err(e) => return Err(e.into()),
    };

    let split = match frontmatter::split(&content) {
        Ok(split) => split,
        Err(FrontmatterError::Missing) => {
            return Ok(SyncOutcome::Skipped(SkipReason::MissingFrontmatter));
        }
        Err(source) => {
            return Err(SyncError::Frontmatter {
                path: path.display().to_string(),
                source,
            });
        }
    };
    let record = frontmatter::parse_record(split.yaml).map_err(|source| SyncError::Frontmatter {
        path: path.display().to_string(),
        source,
    })?;

    let mut body = DocumentBody::parse(split.body);
    if !body.set_info_card(&templates::info_card(&record, config.source())) {
        return Ok(SyncOutcome::Skipped(SkipReason::NoAnchor));
    }

    let mut notes_appended = false;
    if let Some(notes) = record.mergeable_notes()
        && !body.has_heading(NOTES_HEADINGS)
    {
        body.append_section(NOTES_HEADING, notes);
        notes_appended = true;
    }

    // The frontmatter text itself is kept verbatim; only the body changes.
    let header_len = content.len() - split.body.len();
    let updated = format!("{}{}", &content[..header_len], body.render());
    let changed = updated != content;
    if changed {
        fs::write(&path, &updated)?;
        log::info!("synced {}", path.display());
    } else {
        log::debug!("{} already up to date", path.display());
    }
    Ok(SyncOutcome::Synced {
        changed,
        notes_appended,
    })
}

/// Result of synchronizing a whole collection.
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Directory name and outcome, in name order.
    pub outcomes: Vec<(String, SyncOutcome)>,
    /// Directories whose sync failed, with the error text.
    pub failures: Vec<(String, String)>,
}

impl SyncSummary {
    pub fn synced_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_synced()).count()
    }
}

/// Synchronize every problem directory under `problems_root`.
///
/// A failing directory is recorded and logged; the batch continues.
pub fn sync_all(problems_root: &Path, config: &ArchiveConfig) -> Result<SyncSummary, SyncError> {
    let mut summary = SyncSummary::default();
    for dir in scan::problem_dirs(problems_root)? {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match sync_directory(&dir, config) {
            Ok(outcome) => {
                if let SyncOutcome::Skipped(reason) = &outcome {
                    log::warn!("skipped {name}: {reason}");
                }
                summary.outcomes.push((name, outcome));
            }
            Err(e) => {
                log::warn!("failed to sync {name}: {e}");
                summary.failures.push((name, e.to_string()));
            }
        }
    }
    Ok(summary)
}
