//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Create
//!
//! ```text
//! Created 00020-valid-parentheses
//!     Document: README.md
//!     Stub: solution-python.py
//! ```
//!
//! ## Sync
//!
//! ```text
//! 00001-two-sum: synced
//! 00020-valid-parentheses: synced, notes appended
//! 00042-trapping-rain-water: unchanged
//! 00070-climbing-stairs: skipped (missing document)
//! 00088-merge-sorted-array: failed (... missing required field `id`)
//!
//! Synced 3, skipped 1, failed 1
//! ```
//!
//! ## Stats
//!
//! ```text
//! Problems
//!     🟢 Easy: 2
//!     🟡 Medium: 1
//!     🔴 Hard: 3
//!     Total: 6
//!
//! Languages
//!     python: 6
//!
//! Top tags
//!     Array: 3
//!     Stack: 2
//!
//! Skipped
//!     00070-climbing-stairs: missing document
//!
//! Reports
//!     docs/index-by-difficulty.md
//!     docs/index-by-tags.md
//!     README.md (patched)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::migrate::MigrationSummary;
use crate::report::WrittenReports;
use crate::scaffold::ProblemDirectory;
use crate::scan::AggregateView;
use crate::sync::{SyncOutcome, SyncSummary};
use crate::types::Difficulty;
use std::path::Path;

/// Number of tags listed in the stats summary.
pub const TOP_TAGS: usize = 5;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `base` when possible, for display.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Create
// ============================================================================

pub fn format_created(created: &ProblemDirectory) -> Vec<String> {
    let folder = created
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut lines = vec![format!("Created {folder}")];
    lines.push(format!(
        "{}Document: {}",
        indent(1),
        relative(&created.document, &created.path)
    ));
    for stub in &created.stubs {
        lines.push(format!("{}Stub: {}", indent(1), relative(stub, &created.path)));
    }
    lines
}

pub fn print_created(created: &ProblemDirectory) {
    print_lines(format_created(created));
}

// ============================================================================
// Sync
// ============================================================================

/// One line for one directory's sync outcome.
pub fn format_sync_outcome(folder: &str, outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced {
            changed: false,
            notes_appended: _,
        } => format!("{folder}: unchanged"),
        SyncOutcome::Synced {
            changed: true,
            notes_appended: true,
        } => format!("{folder}: synced, notes appended"),
        SyncOutcome::Synced { changed: true, .. } => format!("{folder}: synced"),
        SyncOutcome::Skipped(reason) => format!("{folder}: skipped ({reason})"),
    }
}

pub fn format_sync_summary(summary: &SyncSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .outcomes
        .iter()
        .map(|(folder, outcome)| format_sync_outcome(folder, outcome))
        .collect();
    for (folder, error) in &summary.failures {
        lines.push(format!("{folder}: failed ({error})"));
    }
    let synced = summary.synced_count();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Synced {}, skipped {}, failed {}",
        synced,
        summary.outcomes.len() - synced,
        summary.failures.len()
    ));
    lines
}

pub fn print_sync_summary(summary: &SyncSummary) {
    print_lines(format_sync_summary(summary));
}

// ============================================================================
// Stats
// ============================================================================

/// Counts, usage tables and skipped entries of a scan.
pub fn format_scan_summary(view: &AggregateView) -> Vec<String> {
    let mut lines = vec!["Problems".to_string()];
    for difficulty in Difficulty::RECOGNIZED {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            difficulty.display_with_emoji(),
            view.counts.get(&difficulty)
        ));
    }
    lines.push(format!("{}Total: {}", indent(1), view.total()));

    if !view.languages.is_empty() {
        lines.push(String::new());
        lines.push("Languages".to_string());
        for (lang, n) in view.languages.ranked() {
            lines.push(format!("{}{lang}: {n}", indent(1)));
        }
    }

    if !view.tags.is_empty() {
        lines.push(String::new());
        lines.push("Top tags".to_string());
        for (tag, n) in view.tags.ranked().into_iter().take(TOP_TAGS) {
            lines.push(format!("{}{tag}: {n}", indent(1)));
        }
    }

    if !view.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &view.skipped {
            lines.push(format!("{}{}: {}", indent(1), skipped.folder, skipped.issue));
        }
    }
    lines
}

/// Files touched by the report writer, relative to the collection root.
pub fn format_written_reports(written: &WrittenReports, root: &Path) -> Vec<String> {
    let mut lines = vec!["Reports".to_string()];
    lines.push(format!("{}{}", indent(1), relative(&written.difficulty_index, root)));
    if let Some(tag_index) = &written.tag_index {
        lines.push(format!("{}{}", indent(1), relative(tag_index, root)));
    }
    if written.removed_tag_index {
        lines.push(format!("{}tag index removed (no tags)", indent(1)));
    }
    let state = if written.root_created {
        "created"
    } else if written.root_changed {
        "patched"
    } else {
        "unchanged"
    };
    lines.push(format!(
        "{}{} ({state})",
        indent(1),
        relative(&written.root_document, root)
    ));
    lines
}

pub fn print_stats(view: &AggregateView, written: &WrittenReports, root: &Path) {
    let mut lines = format_scan_summary(view);
    lines.push(String::new());
    lines.extend(format_written_reports(written, root));
    print_lines(lines);
}

// ============================================================================
// Migrate
// ============================================================================

pub fn format_migration(summary: &MigrationSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for migration in &summary.migrated {
        lines.push(migration.folder.clone());
        for moved in &migration.moved {
            lines.push(format!("{}{} → {}", indent(1), moved.from, moved.to));
        }
        for conflict in &migration.conflicts {
            lines.push(format!("{}{conflict}: target exists, left in place", indent(1)));
        }
        for dir in &migration.kept_dirs {
            lines.push(format!("{}{dir}/ kept (not empty)", indent(1)));
        }
    }
    for (folder, error) in &summary.failures {
        lines.push(format!("{folder}: failed ({error})"));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Migrated {}, already flat {}, failed {}",
        summary.migrated.len(),
        summary.untouched,
        summary.failures.len()
    ));
    lines
}

pub fn print_migration(summary: &MigrationSummary) {
    print_lines(format_migration(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::{DirMigration, MovedFile};
    use crate::scan::{ScanIssue, SkippedEntry};
    use crate::sync::SkipReason;
    use crate::test_helpers::{entry, record};
    use std::path::PathBuf;

    #[test]
    fn created_lists_document_and_stubs() {
        let created = ProblemDirectory {
            path: PathBuf::from("/archive/problems/00020-valid-parentheses"),
            record: record(20, "Valid Parentheses", Difficulty::Easy),
            document: PathBuf::from("/archive/problems/00020-valid-parentheses/README.md"),
            stubs: vec![PathBuf::from(
                "/archive/problems/00020-valid-parentheses/solution-python.py",
            )],
        };
        assert_eq!(
            format_created(&created),
            vec![
                "Created 00020-valid-parentheses",
                "    Document: README.md",
                "    Stub: solution-python.py",
            ]
        );
    }

    #[test]
    fn sync_outcome_lines() {
        let synced = SyncOutcome::Synced {
            changed: true,
            notes_appended: false,
        };
        assert_eq!(format_sync_outcome("00001-two-sum", &synced), "00001-two-sum: synced");
        let unchanged = SyncOutcome::Synced {
            changed: false,
            notes_appended: false,
        };
        assert_eq!(format_sync_outcome("a", &unchanged), "a: unchanged");
        let skipped = SyncOutcome::Skipped(SkipReason::MissingDocument);
        assert_eq!(format_sync_outcome("a", &skipped), "a: skipped (missing document)");
    }

    #[test]
    fn sync_summary_counts() {
        let summary = SyncSummary {
            outcomes: vec![
                (
                    "00001-two-sum".into(),
                    SyncOutcome::Synced {
                        changed: true,
                        notes_appended: true,
                    },
                ),
                ("00002-x".into(), SyncOutcome::Skipped(SkipReason::MissingFrontmatter)),
            ],
            failures: vec![("00003-y".into(), "boom".into())],
        };
        let lines = format_sync_summary(&summary);
        assert_eq!(lines[0], "00001-two-sum: synced, notes appended");
        assert_eq!(lines[2], "00003-y: failed (boom)");
        assert_eq!(lines.last().unwrap(), "Synced 1, skipped 1, failed 1");
    }

    #[test]
    fn scan_summary_sections() {
        let mut a = entry(1, Difficulty::Easy);
        a.record.tags = ["Array", "Hash Table"].into_iter().collect();
        let mut b = entry(2, Difficulty::Hard);
        b.record.tags = ["Array"].into_iter().collect();
        let view = AggregateView::from_entries(
            vec![a, b],
            vec![SkippedEntry {
                folder: "00003-broken".into(),
                issue: ScanIssue::MissingDocument,
            }],
        );

        let lines = format_scan_summary(&view);

        assert_eq!(
            lines,
            vec![
                "Problems",
                "    🟢 Easy: 1",
                "    🟡 Medium: 0",
                "    🔴 Hard: 1",
                "    Total: 2",
                "",
                "Languages",
                "    python: 2",
                "",
                "Top tags",
                "    Array: 2",
                "    Hash Table: 1",
                "",
                "Skipped",
                "    00003-broken: missing document",
            ]
        );
    }

    #[test]
    fn top_tags_are_capped() {
        let mut e = entry(1, Difficulty::Easy);
        e.record.tags = ["a", "b", "c", "d", "e", "f", "g"].into_iter().collect();
        let view = AggregateView::from_entries(vec![e], vec![]);
        let lines = format_scan_summary(&view);
        let start = lines.iter().position(|l| l == "Top tags").unwrap();
        assert_eq!(lines[start + 1..].len(), TOP_TAGS);
    }

    #[test]
    fn written_reports_relative_paths() {
        let root = Path::new("/archive");
        let written = WrittenReports {
            difficulty_index: root.join("docs/index-by-difficulty.md"),
            tag_index: None,
            removed_tag_index: true,
            root_document: root.join("README.md"),
            root_created: false,
            root_changed: false,
        };
        assert_eq!(
            format_written_reports(&written, root),
            vec![
                "Reports",
                "    docs/index-by-difficulty.md",
                "    tag index removed (no tags)",
                "    README.md (unchanged)",
            ]
        );
    }

    #[test]
    fn migration_lines() {
        let summary = MigrationSummary {
            migrated: vec![DirMigration {
                folder: "00020-valid-parentheses".into(),
                moved: vec![MovedFile {
                    from: "python/solution.py".into(),
                    to: "solution-python.py".into(),
                }],
                conflicts: vec![],
                kept_dirs: vec![],
            }],
            untouched: 3,
            failures: vec![],
        };
        assert_eq!(
            format_migration(&summary),
            vec![
                "00020-valid-parentheses",
                "    python/solution.py → solution-python.py",
                "",
                "Migrated 1, already flat 3, failed 0",
            ]
        );
    }
}
