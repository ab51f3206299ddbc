//! # Problem Archive
//!
//! Scaffolding, metadata synchronization and statistics for a collection of
//! practice problems kept one directory per problem. Each problem document
//! starts with a YAML frontmatter block; that block is the only source of
//! truth, and everything else (info cards, index documents, the stats table
//! in the root README) is a projection that can be regenerated at any time.
//!
//! ```text
//! archive/
//! ├── archive.toml                     # optional config
//! ├── README.md                        # root document, stats + recent blocks patched
//! ├── docs/
//! │   ├── index-by-difficulty.md       # generated
//! │   └── index-by-tags.md             # generated
//! └── problems/
//!     └── 00020-valid-parentheses/
//!         ├── README.md                # frontmatter + body
//!         └── solution-python.py
//! ```
//!
//! # Architecture
//!
//! ```text
//! create   naming → scaffold → templates + frontmatter      (one new directory)
//! sync     frontmatter → templates::info_card → document    (one directory, in place)
//! stats    scan → AggregateView → report                    (whole collection)
//! ```
//!
//! Creation and synchronization work on a single directory. Aggregation fans
//! out over every directory and folds the decoded records into a value
//! ([`scan::AggregateView`]) that the report renderer consumes; no state is
//! kept between runs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Slug normalization and `NNNNN-slug` directory names |
//! | [`types`] | Problem record and its field types (`Difficulty`, `Language`, `LabelSet`) |
//! | [`frontmatter`] | Frontmatter codec: split, decode, encode |
//! | [`document`] | Section model of a document body, marker-bounded block patching |
//! | [`templates`] | Document skeleton, info card and solution stubs |
//! | [`scaffold`] | Creates a new problem directory |
//! | [`sync`] | Projects frontmatter into the info card and notes section |
//! | [`scan`] | Walks the collection into an aggregate view |
//! | [`report`] | Index documents and root-document patch |
//! | [`lookup`] | Optional remote problem lookup |
//! | [`migrate`] | One-time move from per-language subfolders to the flat layout |
//! | [`config`] | `archive.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Section Model Over Pattern Rewriting
//!
//! Documents are edited by parsing the body into typed sections with
//! pulldown-cmark and swapping whole sections, never by matching text
//! patterns. Headings inside code fences or lists are not section boundaries,
//! and the info card ends where markdown ends the blockquote, so an edit
//! cannot swallow neighbouring content. Sections keep their raw text, so
//! untouched parts of a document come back byte-for-byte.
//!
//! ## Versioned Markers in the Root Document
//!
//! The root README is free-form prose owned by the user. Generated content
//! lives only between `<!-- archive:NAME:v1 -->` marker pairs; if a pair is
//! missing it is appended rather than guessed at from heading text.
//!
//! ## Skips Are Values
//!
//! Batch commands (sync of the whole collection, stats, migrate) never stop on
//! one broken directory. Each entry's problem is returned alongside the
//! results and logged; only single-directory commands fail the invocation.
//!
//! ## Empty Slugs Are Rejected
//!
//! A title with no letters or digits would produce a directory name that is
//! just the id and a dangling hyphen. Scaffolding refuses it before touching
//! the filesystem.

pub mod config;
pub mod document;
pub mod frontmatter;
pub mod lookup;
pub mod migrate;
pub mod naming;
pub mod output;
pub mod report;
pub mod scaffold;
pub mod scan;
pub mod sync;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
