//! Scaffold generator: creates a new problem directory.
//!
//! ```text
//! problems/
//! └── 00020-valid-parentheses/
//!     ├── README.md              # frontmatter + section skeleton
//!     ├── solution-python.py     # one stub per requested language
//!     └── solution-cpp.cpp
//! ```
//!
//! All input is validated before the filesystem is touched, so a bad
//! language, difficulty or title never leaves anything behind. An id is
//! taken as soon as any `NNNNN-*` directory carries it, whatever its slug,
//! and the final `create_dir` still refuses a directory that appeared in the
//! meantime.
//!
//! Writes after that point are not transactional: if one fails, the
//! partially populated directory stays and a retry reports `AlreadyExists`
//! until it is removed by hand.

use crate::config::ArchiveConfig;
use crate::frontmatter;
use crate::naming;
use crate::scan;
use crate::templates;
use crate::types::{
    Difficulty, LabelSet, Language, NOTES_PLACEHOLDER, PLACEHOLDER_TAGS, PLACEHOLDER_TOPICS,
    ProblemRecord,
};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("problem directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("unsupported languages: {} (supported: {})", .0.join(", "), Language::supported_list())]
    UnsupportedLanguage(Vec<String>),
    #[error("no languages requested")]
    NoLanguages,
    #[error("invalid difficulty {0:?} (expected easy, medium or hard)")]
    InvalidDifficulty(String),
    #[error("problem id must be a positive integer")]
    InvalidId,
    #[error("title {0:?} has no letters or digits to build a directory name from")]
    EmptySlug(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Caller input for a new problem.
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub id: u32,
    pub title: String,
    pub difficulty: String,
    pub languages: Vec<String>,
    /// Real topic labels, if any are known. They are used for both `tags`
    /// and `topics`; without them both fall back to placeholders.
    pub topics: Option<Vec<String>>,
    /// Creation and solve date stamped into the record.
    pub date: NaiveDate,
}

/// A freshly created problem directory.
#[derive(Debug, Clone)]
pub struct ProblemDirectory {
    pub path: PathBuf,
    pub record: ProblemRecord,
    pub document: PathBuf,
    pub stubs: Vec<PathBuf>,
}

/// Validate a request and build its record, without touching the filesystem.
///
/// Every unsupported language is reported at once.
pub fn prepare(request: &NewProblem) -> Result<(ProblemRecord, Vec<Language>), ScaffoldError> {
    if request.id == 0 {
        return Err(ScaffoldError::InvalidId);
    }

    let mut languages: Vec<Language> = Vec::new();
    let mut unsupported: Vec<String> = Vec::new();
    for raw in &request.languages {
        match raw.parse::<Language>() {
            Ok(lang) if !languages.contains(&lang) => languages.push(lang),
            Ok(_) => {}
            Err(name) if !unsupported.contains(&name) => unsupported.push(name),
            Err(_) => {}
        }
    }
    if !unsupported.is_empty() {
        return Err(ScaffoldError::UnsupportedLanguage(unsupported));
    }
    if languages.is_empty() {
        return Err(ScaffoldError::NoLanguages);
    }

    let difficulty = Difficulty::parse(&request.difficulty)
        .ok_or_else(|| ScaffoldError::InvalidDifficulty(request.difficulty.clone()))?;

    let title = request.title.trim().to_string();
    let slug = naming::slugify(&title);
    if slug.is_empty() {
        return Err(ScaffoldError::EmptySlug(title));
    }

    let real_topics: LabelSet = request.topics.iter().flatten().map(String::as_str).collect();
    let (tags, topics) = if real_topics.has_real() {
        (real_topics.clone(), real_topics)
    } else {
        (
            PLACEHOLDER_TAGS.into_iter().collect(),
            PLACEHOLDER_TOPICS.into_iter().collect(),
        )
    };

    let record = ProblemRecord {
        id: request.id,
        title,
        slug,
        difficulty,
        tags,
        topics,
        date_created: Some(request.date),
        date_solved: Some(request.date),
        languages: languages.iter().map(|l| l.id()).collect(),
        notes: Some(NOTES_PLACEHOLDER.to_string()),
    };
    Ok((record, languages))
}

/// Create the directory, document and stubs for a new problem under
/// `problems_root`.
pub fn create_problem(
    problems_root: &Path,
    request: &NewProblem,
    config: &ArchiveConfig,
) -> Result<ProblemDirectory, ScaffoldError> {
    let (record, languages) = prepare(request)?;
    if let Some(existing) = existing_dir_for_id(problems_root, record.id)? {
        return Err(ScaffoldError::AlreadyExists(existing));
    }
    let dir = problems_root.join(record.dir_name());

    fs::create_dir_all(problems_root)?;
    fs::create_dir(&dir).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => ScaffoldError::AlreadyExists(dir.clone()),
        _ => ScaffoldError::Io(e),
    })?;
    log::info!("created {}", dir.display());

    let source = config.source();
    let document = dir.join(&config.document_name);
    let content = frontmatter::encode_document(&record, &templates::document_body(&record, source));
    fs::write(&document, content)?;

    let mut stubs = Vec::with_capacity(languages.len());
    for lang in languages {
        let path = dir.join(lang.stub_file_name());
        fs::write(&path, templates::solution_stub(lang, &record, source))?;
        log::debug!("wrote {}", path.display());
        stubs.push(path);
    }

    Ok(ProblemDirectory {
        path: dir,
        record,
        document,
        stubs,
    })
}

/// The problem directory already holding `id`, if any.
fn existing_dir_for_id(problems_root: &Path, id: u32) -> io::Result<Option<PathBuf>> {
    Ok(scan::problem_dirs(problems_root)?.into_iter().find(|dir| {
        dir.file_name()
            .and_then(|name| naming::parse_dir_name(&name.to_string_lossy()))
            .is_some_and(|parsed| parsed.id == id)
    }))
}
