//! Report generation from an [`AggregateView`].
//!
//! Three outputs, all pure functions of the view:
//!
//! | Output | Written to |
//! |---|---|
//! | difficulty index | `{docs_dir}/index-by-difficulty.md` |
//! | tag index | `{docs_dir}/index-by-tags.md`, removed when there are no real tags |
//! | root patch | the stats and recent blocks of the root document |
//!
//! The root document is patched only between its marker pairs
//! (`<!-- archive:stats:v1 -->` ... `<!-- /archive:stats:v1 -->` and the
//! same for `recent`), so hand-written prose around them survives. Reports
//! hold no state of their own: deleting and regenerating them from the same
//! collection gives the same bytes.

use crate::config::ArchiveConfig;
use crate::document::{block_end_marker, block_start_marker, replace_marked_block};
use crate::scan::{AggregateView, ProblemEntry};
use crate::types::Difficulty;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const DIFFICULTY_INDEX_FILE: &str = "index-by-difficulty.md";
pub const TAG_INDEX_FILE: &str = "index-by-tags.md";

pub const STATS_BLOCK: &str = "stats";
pub const RECENT_BLOCK: &str = "recent";

/// Entries shown in the root document's recent block.
pub const ROOT_RECENT_LIMIT: usize = 3;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Rendered reports, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub difficulty_index: String,
    /// `None` when no real tags exist.
    pub tag_index: Option<String>,
    pub root_patch: RootPatch,
}

/// Replacement contents for the root document's marker blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct RootPatch {
    pub stats: String,
    pub recent: String,
}

impl RootPatch {
    /// Patch both blocks into `document`. Missing blocks are appended.
    pub fn apply(&self, document: &str) -> String {
        let patched = replace_marked_block(document, STATS_BLOCK, &self.stats);
        replace_marked_block(&patched, RECENT_BLOCK, &self.recent)
    }
}

/// Render all reports for a view.
pub fn render(view: &AggregateView, config: &ArchiveConfig) -> Reports {
    let docs_links = link_base(Path::new(&config.docs_dir), &config.problems_dir);
    let root_dir = Path::new(&config.root_document)
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let root_links = link_base(root_dir, &config.problems_dir);
    Reports {
        difficulty_index: difficulty_index(view, &docs_links),
        tag_index: tag_index(view, &docs_links),
        root_patch: RootPatch {
            stats: stats_table(view),
            recent: recent_table(&view.recent, &root_links),
        },
    }
}

/// Path prefix that leads from `from_dir` (relative to the root) to the
/// problem folders, e.g. `../problems/` from `docs`.
fn link_base(from_dir: &Path, problems_dir: &str) -> String {
    let depth = from_dir
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    let up = if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    };
    format!("{up}{}/", problems_dir.trim_end_matches('/'))
}

/// Escape a value for use inside a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn problem_link(entry: &ProblemEntry, links: &str) -> String {
    format!("[{}]({links}{})", cell(&entry.record.title), entry.folder)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "problem" } else { "problems" }
}

fn sorted_by_id<'a>(entries: impl Iterator<Item = &'a ProblemEntry>) -> Vec<&'a ProblemEntry> {
    let mut rows: Vec<&ProblemEntry> = entries.collect();
    rows.sort_by_key(|e| e.record.id);
    rows
}

/// Difficulties present in the view: recognized levels first, then any
/// other value in first-seen order.
fn difficulty_groups(view: &AggregateView) -> Vec<Difficulty> {
    let mut groups: Vec<Difficulty> = Difficulty::RECOGNIZED
        .into_iter()
        .filter(|d| view.entries.iter().any(|e| &e.record.difficulty == d))
        .collect();
    for entry in &view.entries {
        let d = &entry.record.difficulty;
        if !d.is_recognized() && !groups.contains(d) {
            groups.push(d.clone());
        }
    }
    groups
}

fn difficulty_index(view: &AggregateView, links: &str) -> String {
    let mut out = String::from("# Problem Index - By Difficulty\n\n");
    if view.entries.is_empty() {
        out.push_str("_No problems yet._\n");
        return out;
    }
    for difficulty in difficulty_groups(view) {
        let rows = sorted_by_id(
            view.entries
                .iter()
                .filter(|e| e.record.difficulty == difficulty),
        );
        out.push_str(&format!(
            "## {} ({} {})\n\n",
            difficulty.display_with_emoji(),
            rows.len(),
            plural(rows.len())
        ));
        out.push_str("| ID | Problem | Languages | Tags |\n");
        out.push_str("|------|------|------|------|\n");
        for entry in rows {
            let tags: Vec<&str> = entry.record.tags.real().collect();
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                entry.record.id,
                problem_link(entry, links),
                cell(&entry.record.languages.as_slice().join(", ")),
                cell(&tags.join(", ")),
            ));
        }
        out.push('\n');
    }
    out
}

fn tag_index(view: &AggregateView, links: &str) -> Option<String> {
    if view.tags.is_empty() {
        return None;
    }
    let mut out = String::from("# Problem Index - By Tags\n\n");
    for (tag, count) in view.tags.ranked() {
        let rows = sorted_by_id(view.entries.iter().filter(|e| e.record.tags.contains(tag)));
        out.push_str(&format!("## {} ({count} {})\n\n", cell(tag), plural(count)));
        out.push_str("| ID | Problem | Difficulty | Languages |\n");
        out.push_str("|------|------|------|------|\n");
        for entry in rows {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                entry.record.id,
                problem_link(entry, links),
                entry.record.difficulty.display_with_emoji(),
                cell(&entry.record.languages.as_slice().join(", ")),
            ));
        }
        out.push('\n');
    }
    Some(out)
}

fn stats_table(view: &AggregateView) -> String {
    let mut out = String::from("| Difficulty | Solved |\n|------|------|\n");
    for difficulty in Difficulty::RECOGNIZED {
        out.push_str(&format!(
            "| {} | {} |\n",
            difficulty.display_with_emoji(),
            view.counts.get(&difficulty)
        ));
    }
    out.push_str(&format!("| **Total** | **{}** |\n", view.total()));
    out
}

fn recent_table(recent: &[ProblemEntry], links: &str) -> String {
    if recent.is_empty() {
        return "_No solved problems yet._\n".to_string();
    }
    let mut out = String::from("| ID | Problem | Difficulty | Solved |\n|------|------|------|------|\n");
    for entry in recent.iter().take(ROOT_RECENT_LIMIT) {
        let solved = entry
            .record
            .date_solved
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "| {} | {} | {} | {solved} |\n",
            entry.record.id,
            problem_link(entry, links),
            entry.record.difficulty.display_with_emoji(),
        ));
    }
    out
}

/// Content of a root document created from scratch.
fn root_document_seed() -> String {
    format!(
        "# Problem Archive\n\n## Statistics\n\n{}\n{}\n\n## Recent Activity\n\n{}\n{}\n",
        block_start_marker(STATS_BLOCK),
        block_end_marker(STATS_BLOCK),
        block_start_marker(RECENT_BLOCK),
        block_end_marker(RECENT_BLOCK),
    )
}

/// What [`write_reports`] did on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenReports {
    pub difficulty_index: PathBuf,
    pub tag_index: Option<PathBuf>,
    /// A stale tag index was deleted because no real tags remain.
    pub removed_tag_index: bool,
    pub root_document: PathBuf,
    pub root_created: bool,
    pub root_changed: bool,
}

/// Render the reports for `view` and write them under `root`.
pub fn write_reports(
    root: &Path,
    config: &ArchiveConfig,
    view: &AggregateView,
) -> Result<WrittenReports, ReportError> {
    let reports = render(view, config);

    let docs = config.docs_path(root);
    fs::create_dir_all(&docs)?;
    let difficulty_index = docs.join(DIFFICULTY_INDEX_FILE);
    fs::write(&difficulty_index, &reports.difficulty_index)?;
    log::info!("wrote {}", difficulty_index.display());

    let tag_path = docs.join(TAG_INDEX_FILE);
    let mut removed_tag_index = false;
    let tag_index = match &reports.tag_index {
        Some(content) => {
            fs::write(&tag_path, content)?;
            log::info!("wrote {}", tag_path.display());
            Some(tag_path)
        }
        None => {
            match fs::remove_file(&tag_path) {
                Ok(()) => {
                    log::info!("removed stale {}", tag_path.display());
                    removed_tag_index = true;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            None
        }
    };

    let root_document = config.root_document_path(root);
    let (existing, root_created) = match fs::read_to_string(&root_document) {
        Ok(content) => (content, false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => (root_document_seed(), true),
        Err(e) => return Err(e.into()),
    };
    let patched = reports.root_patch.apply(&existing);
    let root_changed = root_created || patched != existing;
    if root_changed {
        if let Some(parent) = root_document.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&root_document, &patched)?;
        log::info!("patched {}", root_document.display());
    }

    Ok(WrittenReports {
        difficulty_index,
        tag_index,
        removed_tag_index,
        root_document,
        root_created,
        root_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::entry;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_view() -> AggregateView {
        let mut two_sum = entry(1, Difficulty::Easy);
        two_sum.record.title = "Two Sum".into();
        two_sum.folder = "00001-two-sum".into();
        two_sum.record.tags = ["Array", "Hash Table"].into_iter().collect();

        let mut parens = entry(20, Difficulty::Easy);
        parens.record.title = "Valid Parentheses".into();
        parens.folder = "00020-valid-parentheses".into();
        parens.record.tags = ["String", "Stack"].into_iter().collect();
        parens.record.date_solved = NaiveDate::from_ymd_opt(2024, 3, 9);

        let mut rain = entry(42, Difficulty::Hard);
        rain.record.title = "Trapping Rain Water".into();
        rain.folder = "00042-trapping-rain-water".into();
        rain.record.tags = ["Array", "Stack", "<tag 1>"].into_iter().collect();
        rain.record.languages = ["python", "cpp"].into_iter().collect();

        // Directory order is not id order here on purpose.
        AggregateView::from_entries(vec![rain, parens, two_sum], vec![])
    }

    #[test]
    fn difficulty_index_groups_sorted_by_id() {
        let reports = render(&sample_view(), &ArchiveConfig::default());
        let index = &reports.difficulty_index;

        assert!(index.contains("## 🟢 Easy (2 problems)\n"));
        assert!(index.contains("## 🔴 Hard (1 problem)\n"));
        assert!(!index.contains("Medium"));
        let one = index.find("| 1 | [Two Sum](../problems/00001-two-sum)").unwrap();
        let twenty = index.find("| 20 | [Valid Parentheses]").unwrap();
        assert!(one < twenty);
        assert!(index.contains("| python, cpp | Array, Stack |"));
    }

    #[test]
    fn other_difficulties_get_their_own_table_last() {
        let view = AggregateView::from_entries(
            vec![entry(5, Difficulty::Other("unknown".into())), entry(1, Difficulty::Medium)],
            vec![],
        );
        let index = render(&view, &ArchiveConfig::default()).difficulty_index;
        let medium = index.find("## 🟡 Medium").unwrap();
        let unknown = index.find("## ❓ Unknown (1 problem)").unwrap();
        assert!(medium < unknown);
    }

    #[test]
    fn tag_index_ordered_by_frequency_then_first_seen() {
        let index = render(&sample_view(), &ArchiveConfig::default())
            .tag_index
            .unwrap();
        let headings: Vec<&str> = index.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(
            headings,
            vec![
                "## Array (2 problems)",
                "## Stack (2 problems)",
                "## String (1 problem)",
                "## Hash Table (1 problem)",
            ]
        );
        assert!(!index.contains("<tag 1>"));
        assert!(index.contains("| 42 | [Trapping Rain Water](../problems/00042-trapping-rain-water) | 🔴 Hard | python, cpp |"));
    }

    #[test]
    fn tag_index_omitted_without_real_tags() {
        let mut only_placeholders = entry(1, Difficulty::Easy);
        only_placeholders.record.tags = ["<tag 1>", "<tag 2>"].into_iter().collect();
        let view = AggregateView::from_entries(vec![only_placeholders], vec![]);
        assert_eq!(render(&view, &ArchiveConfig::default()).tag_index, None);
    }

    #[test]
    fn stats_block_counts_and_total() {
        let patch = render(&sample_view(), &ArchiveConfig::default()).root_patch;
        assert_eq!(
            patch.stats,
            "| Difficulty | Solved |\n|------|------|\n| 🟢 Easy | 2 |\n| 🟡 Medium | 0 |\n| 🔴 Hard | 1 |\n| **Total** | **3** |\n"
        );
    }

    #[test]
    fn recent_block_shows_three_newest_with_root_links() {
        let mut entries = Vec::new();
        for day in 1..=5u32 {
            let mut e = entry(day, Difficulty::Medium);
            e.record.date_solved = NaiveDate::from_ymd_opt(2024, 1, day);
            entries.push(e);
        }
        let view = AggregateView::from_entries(entries, vec![]);
        let recent = render(&view, &ArchiveConfig::default()).root_patch.recent;
        let rows: Vec<&str> = recent.lines().skip(2).collect();
        assert_eq!(rows.len(), ROOT_RECENT_LIMIT);
        assert!(rows[0].starts_with("| 5 | [Problem 5](./problems/00005-problem-5)"));
        assert!(rows[0].ends_with("| 🟡 Medium | 2024-01-05 |"));
    }

    #[test]
    fn links_follow_configured_directories() {
        let config = ArchiveConfig {
            docs_dir: "site/docs".into(),
            problems_dir: "leetcode".into(),
            ..ArchiveConfig::default()
        };
        let index = render(&sample_view(), &config).difficulty_index;
        assert!(index.contains("(../../leetcode/00001-two-sum)"));
    }

    #[test]
    fn pipes_in_titles_are_escaped() {
        let mut e = entry(3, Difficulty::Easy);
        e.record.title = "A | B".into();
        let view = AggregateView::from_entries(vec![e], vec![]);
        assert!(render(&view, &ArchiveConfig::default()).difficulty_index.contains("[A \\| B]"));
    }

    #[test]
    fn root_patch_is_idempotent_and_keeps_prose() {
        let patch = render(&sample_view(), &ArchiveConfig::default()).root_patch;
        let doc = "# My Archive\n\nIntro.\n\n<!-- archive:stats:v1 -->\nstale\n<!-- /archive:stats:v1 -->\n\n## Footer\n";
        let once = patch.apply(doc);
        assert!(once.starts_with("# My Archive\n\nIntro.\n\n<!-- archive:stats:v1 -->\n| Difficulty"));
        assert!(once.contains("<!-- /archive:stats:v1 -->\n\n## Footer\n"));
        assert!(once.contains("<!-- archive:recent:v1 -->"));
        assert_eq!(patch.apply(&once), once);
    }

    #[test]
    fn write_creates_docs_and_root_document() {
        let tmp = TempDir::new().unwrap();
        let config = ArchiveConfig::default();

        let written = write_reports(tmp.path(), &config, &sample_view()).unwrap();

        assert!(written.root_created);
        assert!(tmp.path().join("docs/index-by-difficulty.md").is_file());
        assert!(tmp.path().join("docs/index-by-tags.md").is_file());
        let root = fs::read_to_string(tmp.path().join("README.md")).unwrap();
        assert!(root.starts_with("# Problem Archive\n\n## Statistics\n\n<!-- archive:stats:v1 -->\n| Difficulty"));
        assert!(root.contains("| **Total** | **3** |"));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let config = ArchiveConfig::default();
        let view = sample_view();
        write_reports(tmp.path(), &config, &view).unwrap();
        let read = |p: &str| fs::read_to_string(tmp.path().join(p)).unwrap();
        let before = (read("docs/index-by-difficulty.md"), read("docs/index-by-tags.md"), read("README.md"));

        fs::remove_dir_all(tmp.path().join("docs")).unwrap();
        let second = write_reports(tmp.path(), &config, &view).unwrap();

        assert!(!second.root_changed);
        let after = (read("docs/index-by-difficulty.md"), read("docs/index-by-tags.md"), read("README.md"));
        assert_eq!(before, after);
    }

    #[test]
    fn stale_tag_index_removed() {
        let tmp = TempDir::new().unwrap();
        let config = ArchiveConfig::default();
        write_reports(tmp.path(), &config, &sample_view()).unwrap();

        let untagged = AggregateView::from_entries(vec![entry(1, Difficulty::Easy)], vec![]);
        let written = write_reports(tmp.path(), &config, &untagged).unwrap();

        assert!(written.removed_tag_index);
        assert_eq!(written.tag_index, None);
        assert!(!tmp.path().join("docs/index-by-tags.md").exists());
    }

    #[test]
    fn empty_collection_renders_placeholders() {
        let reports = render(&AggregateView::default(), &ArchiveConfig::default());
        assert!(reports.difficulty_index.ends_with("_No problems yet._\n"));
        assert_eq!(reports.tag_index, None);
        assert_eq!(reports.root_patch.recent, "_No solved problems yet._\n");
    }
}
