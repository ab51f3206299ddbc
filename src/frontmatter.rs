//! Frontmatter codec: the `---`-delimited YAML block at the top of a problem
//! document.
//!
//! ```text
//! ---
//! id: 20
//! title: "Valid Parentheses"
//! url_slug: "valid-parentheses"
//! difficulty: "easy"
//! tags: ["Stack", "String"]
//! topics: ["Stack", "String"]
//! date_created: "2024-03-02"
//! date_solved: "2024-03-02"
//! languages: ["python"]
//! notes: "Add notes here"
//! ---
//!
//! # 20. Valid Parentheses
//! ...
//! ```
//!
//! Decoding goes through serde_yaml so hand-edited blocks in any YAML style
//! (block sequences, unquoted scalars) are accepted. Encoding is written out
//! field by field in a fixed order with JSON-quoted scalars and flow
//! sequences. JSON strings are valid YAML double-quoted scalars, so the output
//! always decodes back to the same record.

use crate::naming;
use crate::types::{Difficulty, LabelSet, ProblemRecord};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

pub const DELIMITER: &str = "---";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("document does not start with a frontmatter block")]
    Missing,
    #[error("frontmatter block is not terminated")]
    Unterminated,
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A document split at its frontmatter delimiters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitDocument<'a> {
    /// YAML text between the delimiters.
    pub yaml: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split a document into its YAML block and body.
///
/// The first line must be `---` (a leading BOM is tolerated); the block ends
/// at the next line that is exactly `---` or `...`.
pub fn split(document: &str) -> Result<SplitDocument<'_>, FrontmatterError> {
    let document = document.trim_start_matches('\u{feff}');
    let first_end = document.find('\n').unwrap_or(document.len());
    if document[..first_end].trim_end() != DELIMITER {
        return Err(FrontmatterError::Missing);
    }

    let yaml_start = (first_end + 1).min(document.len());
    let mut offset = yaml_start;
    for line in document[yaml_start..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == DELIMITER || trimmed == "..." {
            return Ok(SplitDocument {
                yaml: &document[yaml_start..offset],
                body: &document[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

/// Field-by-field view of the YAML block before defaults are applied.
///
/// Unknown keys are ignored so users can keep their own annotations.
#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    id: Option<u32>,
    title: Option<String>,
    url_slug: Option<String>,
    difficulty: Option<Difficulty>,
    tags: Option<LabelSet>,
    topics: Option<LabelSet>,
    date_created: Option<String>,
    date_solved: Option<String>,
    languages: Option<LabelSet>,
    notes: Option<String>,
}

/// Decode a YAML block into a record, applying the documented defaults.
pub fn parse_record(yaml: &str) -> Result<ProblemRecord, FrontmatterError> {
    let raw = if yaml.trim().is_empty() {
        RawFrontmatter::default()
    } else {
        serde_yaml::from_str::<Option<RawFrontmatter>>(yaml)?.unwrap_or_default()
    };

    let id = raw.id.ok_or(FrontmatterError::MissingField("id"))?;
    if id == 0 {
        return Err(FrontmatterError::InvalidField {
            field: "id",
            reason: "must be a positive integer".into(),
        });
    }
    let title = raw.title.ok_or(FrontmatterError::MissingField("title"))?;
    let slug = raw
        .url_slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| naming::slugify(&title));

    Ok(ProblemRecord {
        id,
        title,
        slug,
        difficulty: raw
            .difficulty
            .unwrap_or_else(|| Difficulty::Other("unknown".into())),
        tags: raw.tags.unwrap_or_default(),
        topics: raw.topics.unwrap_or_default(),
        date_created: parse_date("date_created", raw.date_created)?,
        date_solved: parse_date("date_solved", raw.date_solved)?,
        languages: raw.languages.unwrap_or_default(),
        notes: raw.notes.filter(|n| !n.trim().is_empty()),
    })
}

fn parse_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, FrontmatterError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| FrontmatterError::InvalidField {
                field,
                reason: format!("{s:?} is not a YYYY-MM-DD date ({e})"),
            }),
    }
}

/// Decode a whole document: the record plus the body that follows it.
pub fn decode(document: &str) -> Result<(ProblemRecord, &str), FrontmatterError> {
    let split = split(document)?;
    Ok((parse_record(split.yaml)?, split.body))
}

/// Encode a record as a complete frontmatter block, delimiters included.
pub fn encode(record: &ProblemRecord) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    push_field(&mut out, "id", &record.id.to_string());
    push_field(&mut out, "title", &quote(&record.title));
    push_field(&mut out, "url_slug", &quote(&record.slug));
    push_field(&mut out, "difficulty", &quote(record.difficulty.as_str()));
    push_field(&mut out, "tags", &sequence(&record.tags));
    push_field(&mut out, "topics", &sequence(&record.topics));
    push_field(&mut out, "date_created", &quote(&format_date(record.date_created)));
    push_field(&mut out, "date_solved", &quote(&format_date(record.date_solved)));
    push_field(&mut out, "languages", &sequence(&record.languages));
    push_field(&mut out, "notes", &quote(record.notes.as_deref().unwrap_or("")));
    out.push_str(DELIMITER);
    out.push('\n');
    out
}

/// Encode a record and append the document body.
pub fn encode_document(record: &ProblemRecord, body: &str) -> String {
    let mut out = encode(record);
    out.push_str(body);
    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn sequence(labels: &LabelSet) -> String {
    let items: Vec<String> = labels.iter().map(quote).collect();
    format!("[{}]", items.join(", "))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
