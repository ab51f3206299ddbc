//! Centralized naming for problem directories and URL slugs.
//!
//! Every problem lives in a directory named `{id:05}-{slug}`:
//!
//! - `00020-valid-parentheses/`
//! - `01408-running-sum-of-1d-array/`
//!
//! The slug is a pure function of the title ([`slugify`]) and doubles as the
//! URL segment of the problem page, so the same derivation is shared by the
//! scaffold, the info card and the stub headers.

/// Width of the zero-padded id prefix.
pub const ID_WIDTH: usize = 5;

/// Derive the canonical slug of a title.
///
/// Lowercases, drops every character that is not a letter, digit, whitespace
/// or hyphen, turns each run of whitespace/hyphens into a single hyphen and
/// trims hyphens from both ends. Total and idempotent:
///
/// - `"Valid Parentheses"` → `"valid-parentheses"`
/// - `"Two Sum II - Input Array Is Sorted"` → `"two-sum-ii-input-array-is-sorted"`
/// - `"Pow(x, n)"` → `"powx-n"`
/// - `"!!!"` → `""`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }
    slug
}

/// Directory name for a problem: zero-padded id, a dash, the slug.
pub fn problem_dir_name(id: u32, slug: &str) -> String {
    format!("{:0width$}-{}", id, slug, width = ID_WIDTH)
}

/// Result of parsing a problem directory name like `00020-valid-parentheses`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDirName {
    pub id: u32,
    /// Everything after the first dash. Empty for `00020-`.
    pub slug: String,
}

/// Parse a directory name following the `NNNNN-slug` convention.
///
/// Exactly five ASCII digits followed by a dash are required; anything else
/// is not a problem directory:
///
/// - `"00020-valid-parentheses"` → id=20, slug="valid-parentheses"
/// - `"00020-"` → id=20, slug=""
/// - `"020-short"` → None
/// - `"docs"` → None
pub fn parse_dir_name(name: &str) -> Option<ParsedDirName> {
    let bytes = name.as_bytes();
    if bytes.len() <= ID_WIDTH
        || !bytes[..ID_WIDTH].iter().all(u8::is_ascii_digit)
        || bytes[ID_WIDTH] != b'-'
    {
        return None;
    }
    let id = name[..ID_WIDTH].parse().ok()?;
    Some(ParsedDirName {
        id,
        slug: name[ID_WIDTH + 1..].to_string(),
    })
}

/// Whether a directory name matches the `^\d{5}-` problem convention.
pub fn is_problem_dir_name(name: &str) -> bool {
    parse_dir_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_simple_title() {
        assert_eq!(slugify("Valid Parentheses"), "valid-parentheses");
    }

    #[test]
    fn slug_collapses_spaced_hyphens() {
        assert_eq!(
            slugify("Two Sum II - Input Array Is Sorted"),
            "two-sum-ii-input-array-is-sorted"
        );
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slugify("Pow(x, n)"), "powx-n");
        assert_eq!(slugify("Running Sum of 1d Array"), "running-sum-of-1d-array");
    }

    #[test]
    fn slug_drops_underscores() {
        assert_eq!(slugify("snake_case title"), "snakecase-title");
    }

    #[test]
    fn slug_trims_edge_hyphens() {
        assert_eq!(slugify("  --Hello--World--  "), "hello-world");
    }

    #[test]
    fn slug_deleted_chars_do_not_split_runs() {
        assert_eq!(slugify("a - ! - b"), "a-b");
    }

    #[test]
    fn slug_of_punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slug_is_idempotent() {
        for title in [
            "Valid Parentheses",
            "Pow(x, n)",
            "  LRU   Cache --- design ",
            "Ünïcödé Straße",
            "İstanbul",
        ] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "not idempotent for {title:?}");
        }
    }

    #[test]
    fn dir_name_is_zero_padded() {
        assert_eq!(problem_dir_name(20, "valid-parentheses"), "00020-valid-parentheses");
        assert_eq!(problem_dir_name(1408, "x"), "01408-x");
    }

    #[test]
    fn parse_numbered_dir() {
        let p = parse_dir_name("00020-valid-parentheses").unwrap();
        assert_eq!(p.id, 20);
        assert_eq!(p.slug, "valid-parentheses");
    }

    #[test]
    fn parse_dir_with_empty_slug() {
        let p = parse_dir_name("00020-").unwrap();
        assert_eq!(p.id, 20);
        assert_eq!(p.slug, "");
    }

    #[test]
    fn short_prefix_is_not_a_problem_dir() {
        assert_eq!(parse_dir_name("020-short"), None);
        assert_eq!(parse_dir_name("000201-six-digits"), None);
        assert_eq!(parse_dir_name("00020"), None);
    }

    #[test]
    fn unnumbered_is_not_a_problem_dir() {
        assert!(!is_problem_dir_name("docs"));
        assert!(!is_problem_dir_name("wip-drafts"));
        assert!(is_problem_dir_name("00001-two-sum"));
    }
}
