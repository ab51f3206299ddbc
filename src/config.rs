//! Archive configuration module.
//!
//! Handles loading, validating, and merging `archive.toml`. The file lives in
//! the collection root and is optional: stock defaults are used for every key
//! it does not set.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! problems_dir = "problems"     # Directory holding the NNNNN-slug folders
//! docs_dir = "docs"             # Where the index documents are written
//! root_document = "README.md"   # Root document patched with stats
//! document_name = "README.md"   # Canonical document inside each problem folder
//! source_name = "LeetCode"      # Link label in info cards
//! problem_url_base = "https://leetcode.com/problems/"
//! default_languages = ["python"]
//!
//! [lookup]
//! enabled = true
//! endpoint = "https://leetcode.com/graphql"
//! timeout_secs = 10
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! default_languages = ["python", "cpp"]
//!
//! [lookup]
//! enabled = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::templates::Source;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the config in the collection root.
pub const CONFIG_FILE: &str = "archive.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Archive configuration loaded from `archive.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Directory (relative to the root) holding the problem folders.
    pub problems_dir: String,
    /// Directory (relative to the root) receiving the index documents.
    pub docs_dir: String,
    /// Root document whose stats and recent blocks are patched.
    pub root_document: String,
    /// Name of the canonical document inside each problem folder.
    pub document_name: String,
    /// Label of the problem link in info cards.
    pub source_name: String,
    /// Problem URLs are `{problem_url_base}{slug}/`.
    pub problem_url_base: String,
    /// Languages scaffolded when `create` gets no `--languages`.
    pub default_languages: Vec<String>,
    /// Remote problem lookup.
    pub lookup: LookupConfig,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            problems_dir: "problems".to_string(),
            docs_dir: "docs".to_string(),
            root_document: "README.md".to_string(),
            document_name: "README.md".to_string(),
            source_name: "LeetCode".to_string(),
            problem_url_base: "https://leetcode.com/problems/".to_string(),
            default_languages: vec!["python".to_string()],
            lookup: LookupConfig::default(),
        }
    }
}

/// Remote problem lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupConfig {
    /// When false, `create` never touches the network.
    pub enabled: bool,
    /// GraphQL endpoint.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://leetcode.com/graphql".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ArchiveConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("problems_dir", &self.problems_dir),
            ("docs_dir", &self.docs_dir),
            ("root_document", &self.root_document),
            ("document_name", &self.document_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if !self.problem_url_base.ends_with('/') {
            return Err(ConfigError::Validation(
                "problem_url_base must end with '/'".into(),
            ));
        }
        if self.default_languages.is_empty() {
            return Err(ConfigError::Validation(
                "default_languages must not be empty".into(),
            ));
        }
        let unsupported: Vec<&str> = self
            .default_languages
            .iter()
            .filter(|l| l.parse::<Language>().is_err())
            .map(String::as_str)
            .collect();
        if !unsupported.is_empty() {
            return Err(ConfigError::Validation(format!(
                "default_languages contains unsupported entries: {} (supported: {})",
                unsupported.join(", "),
                Language::supported_list()
            )));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "lookup.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn problems_path(&self, root: &Path) -> PathBuf {
        root.join(&self.problems_dir)
    }

    pub fn docs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.docs_dir)
    }

    pub fn root_document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.root_document)
    }

    pub fn source(&self) -> Source<'_> {
        Source {
            name: &self.source_name,
            url_base: &self.problem_url_base,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ArchiveConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `archive.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ArchiveConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ArchiveConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `archive.toml` in the collection root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ArchiveConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `archive.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Problem Archive Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the collection root as archive.toml.
# Unknown keys will cause an error.

# Directory holding one NNNNN-slug folder per problem.
problems_dir = "problems"

# Directory receiving index-by-difficulty.md and index-by-tags.md.
docs_dir = "docs"

# Root document whose stats and recent-activity blocks are regenerated.
root_document = "README.md"

# Canonical document inside each problem folder.
document_name = "README.md"

# Link label and URL prefix used in info cards and stub headers.
# Problem URLs are built as {problem_url_base}{slug}/
source_name = "LeetCode"
problem_url_base = "https://leetcode.com/problems/"

# Languages scaffolded when `create` is run without --languages.
# Supported: python, cpp, javascript, java
default_languages = ["python"]

# ---------------------------------------------------------------------------
# Remote problem lookup
# ---------------------------------------------------------------------------
[lookup]
# Set to false to always enter title and difficulty by hand.
enabled = true

# GraphQL endpoint queried for title, difficulty and topic tags.
endpoint = "https://leetcode.com/graphql"

# Per-request timeout in seconds.
timeout_secs = 10
"##
}
