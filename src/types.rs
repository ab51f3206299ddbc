//! Shared types used by every stage: the Problem Record and its field types.
//!
//! The record is the typed form of a document's frontmatter. Parsing and
//! serialization live in [`crate::frontmatter`]; this module only defines the
//! shape and the normalization rules of each field.

use crate::naming;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem difficulty.
///
/// Input is case-insensitive and stored lowercase. Values outside the three
/// recognized levels are kept verbatim in [`Difficulty::Other`] so they still
/// show up in listings, but they are never counted in the per-difficulty
/// partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    /// The recognized levels in display order.
    pub const RECOGNIZED: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Strict parse used for user input: only the three recognized levels.
    pub fn parse(input: &str) -> Option<Self> {
        match Self::from(input.to_string()) {
            Difficulty::Other(_) => None,
            level => Some(level),
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Other(s) => s,
        }
    }

    /// Title-cased display label (`"easy"` → `"Easy"`).
    pub fn label(&self) -> String {
        title_case(self.as_str())
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Medium => "🟡",
            Difficulty::Hard => "🔴",
            Difficulty::Other(_) => "❓",
        }
    }

    /// Emoji followed by the display label, e.g. `🟢 Easy`.
    pub fn display_with_emoji(&self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Difficulty::Other(_))
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(normalized),
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capitalize the first letter of every whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A language the scaffold can write a solution stub for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Cpp,
    JavaScript,
    Java,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::Cpp,
        Language::JavaScript,
        Language::Java,
    ];

    /// Identifier stored in the `languages` frontmatter field.
    pub fn id(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
            Language::Java => "java",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Cpp => "cpp",
            Language::JavaScript => "js",
            Language::Java => "java",
        }
    }

    /// Stub file name: `solution-python.py`, `solution-cpp.cpp`, ...
    ///
    /// The language id in the stem keeps several languages from colliding in
    /// one directory.
    pub fn stub_file_name(self) -> String {
        self.file_name_for("solution")
    }

    /// `{stem}-{id}.{ext}`, the flat-layout name of any file in this language.
    pub fn file_name_for(self, stem: &str) -> String {
        format!("{}-{}.{}", stem, self.id(), self.extension())
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.extension().eq_ignore_ascii_case(ext))
    }

    /// Comma-separated list of every supported id, for error messages.
    pub fn supported_list() -> String {
        Self::ALL.map(Language::id).join(", ")
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.id() == wanted)
            .ok_or_else(|| s.trim().to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Fallback tags written when no real tag information is available.
pub const PLACEHOLDER_TAGS: [&str; 2] = ["<tag 1>", "<tag 2>"];

/// Fallback topics written when no real topic information is available.
pub const PLACEHOLDER_TOPICS: [&str; 2] = ["<topic 1>", "<topic 2>"];

/// Template values written by earlier versions of the scaffold.
const LEGACY_PLACEHOLDERS: &[&str] = &[
    "tag1", "tag2", "tag3", "tag 1", "tag 2", "topic 1", "topic 2",
];

/// Whether a label is scaffold filler rather than a real tag.
///
/// Anything wrapped in angle brackets counts, as do the legacy template
/// values (`tag1`, `Tag 1`, `Topic 1`, ...).
pub fn is_placeholder_label(label: &str) -> bool {
    let trimmed = label.trim();
    (trimmed.starts_with('<') && trimmed.ends_with('>'))
        || LEGACY_PLACEHOLDERS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(trimmed))
}

/// Ordered set of free-text labels.
///
/// Insertion order is kept for display; duplicates and blank entries are
/// dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. Returns `false` if it was blank or already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into().trim().to_string();
        if label.is_empty() || self.0.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Labels that are not scaffold placeholders.
    pub fn real(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|l| !is_placeholder_label(l))
    }

    pub fn has_real(&self) -> bool {
        self.real().next().is_some()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.0
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// Notes value the scaffold writes before the user has anything to say.
pub const NOTES_PLACEHOLDER: &str = "Add notes here";

/// The structured metadata of one problem directory.
///
/// Field defaults when decoding a document (see [`crate::frontmatter`]):
/// `id` and `title` are required; `url_slug` falls back to the slug of the
/// title; `difficulty` falls back to `Other("unknown")`; label sets default to
/// empty; dates and notes default to absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub tags: LabelSet,
    pub topics: LabelSet,
    pub date_created: Option<NaiveDate>,
    pub date_solved: Option<NaiveDate>,
    pub languages: LabelSet,
    pub notes: Option<String>,
}

impl ProblemRecord {
    /// `{id:05}-{slug}`.
    pub fn dir_name(&self) -> String {
        naming::problem_dir_name(self.id, &self.slug)
    }

    /// Problem page URL: `{base}{slug}/`.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}/", base, self.slug)
    }

    /// Notes worth merging into the document body: non-blank and not the
    /// scaffold placeholder.
    pub fn mergeable_notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != NOTES_PLACEHOLDER)
    }
}
