//! One-time migration from the per-language subfolder layout.
//!
//! ```text
//! before                              after
//! 00020-valid-parentheses/            00020-valid-parentheses/
//! ├── README.md                       ├── README.md
//! └── python/                         ├── solution-python.py
//!     ├── solution.py                 └── alt1_counter-python.py
//!     └── alt1_counter.py
//! ```
//!
//! Inside a language subfolder (`python/`, `cpp/`, `javascript/`, `java/`),
//! every file with that language's extension moves up one level:
//! `solution.<ext>` becomes the stub name `solution-<lang>.<ext>`, any other
//! `<stem>.<ext>` becomes `<stem>-<lang>.<ext>`. Files with other extensions
//! stay where they are. An existing target is never overwritten; the source
//! is left in place and reported as a conflict. The subfolder is removed
//! once it is empty.
//!
//! Running the migration again on a migrated collection does nothing.

use crate::scan;
use crate::types::Language;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One file moved out of a language subfolder.
#[derive(Debug, Clone, PartialEq)]
pub struct MovedFile {
    /// Path relative to the problem directory, e.g. `python/solution.py`.
    pub from: String,
    /// New file name in the problem directory.
    pub to: String,
}

/// Result of migrating one problem directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirMigration {
    pub folder: String,
    pub moved: Vec<MovedFile>,
    /// Sources left in place because the target already existed.
    pub conflicts: Vec<String>,
    /// Language subfolders that still hold files afterwards.
    pub kept_dirs: Vec<String>,
}

impl DirMigration {
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty() && self.kept_dirs.is_empty()
    }
}

/// Target name of a file found in `language`'s subfolder, or `None` when
/// the file does not belong to that language.
fn flat_name(language: Language, file: &Path) -> Option<String> {
    let ext = file.extension()?.to_str()?;
    if Language::from_extension(ext) != Some(language) {
        return None;
    }
    let stem = file.file_stem()?.to_str()?;
    if stem == "solution" {
        Some(language.stub_file_name())
    } else {
        Some(language.file_name_for(stem))
    }
}

fn sorted_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Migrate one problem directory. `Ok(None)` when it has no language
/// subfolders.
pub fn migrate_problem(dir: &Path) -> Result<Option<DirMigration>, MigrateError> {
    let folder = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut migration = DirMigration {
        folder,
        ..DirMigration::default()
    };
    let mut found = false;

    for language in Language::ALL {
        let sub = dir.join(language.id());
        if !sub.is_dir() {
            continue;
        }
        found = true;

        for file in sorted_files(&sub)? {
            let Some(target_name) = flat_name(language, &file) else {
                continue;
            };
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let from = format!("{}/{}", language.id(), file_name);
            let target = dir.join(&target_name);
            if target.exists() {
                log::warn!(
                    "{}: not moving {from}, {target_name} already exists",
                    migration.folder
                );
                migration.conflicts.push(from);
                continue;
            }
            fs::rename(&file, &target)?;
            log::debug!("{}: {from} -> {target_name}", migration.folder);
            migration.moved.push(MovedFile {
                from,
                to: target_name,
            });
        }

        if fs::read_dir(&sub)?.next().is_none() {
            fs::remove_dir(&sub)?;
        } else {
            migration.kept_dirs.push(language.id().to_string());
        }
    }

    Ok(found.then_some(migration))
}

/// Outcome of migrating a whole collection.
#[derive(Debug, Default)]
pub struct MigrationSummary {
    /// Directories that had language subfolders.
    pub migrated: Vec<DirMigration>,
    /// Directories already in the flat layout.
    pub untouched: usize,
    /// Directories whose migration failed, with the error text.
    pub failures: Vec<(String, String)>,
}

/// Migrate every problem directory under `problems_root`. A failing
/// directory is recorded and the batch continues.
pub fn migrate_all(problems_root: &Path) -> Result<MigrationSummary, MigrateError> {
    let mut summary = MigrationSummary::default();
    for dir in scan::problem_dirs(problems_root)? {
        match migrate_problem(&dir) {
            Ok(Some(migration)) => summary.migrated.push(migration),
            Ok(None) => summary.untouched += 1,
            Err(e) => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::warn!("failed to migrate {name}: {e}");
                summary.failures.push((name, e.to_string()));
            }
        }
    }
    Ok(summary)
}
