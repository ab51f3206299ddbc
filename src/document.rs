//! Typed section model of a problem document body.
//!
//! The body (everything after the frontmatter) is split into a flat sequence
//! of [`Section`]s at top-level block boundaries found by pulldown-cmark:
//!
//! ```text
//! Text      "\n"
//! Title     "# 20. Valid Parentheses\n"
//! Text      "\n"
//! InfoCard  "> **Problem Information**  \n> 🔗 ... | 📅 2024-03-02\n"
//! Text      "\n"
//! Heading   "## Problem Description\n"
//! Text      "\n[Add problem description here]\n\n"
//! ...
//! ```
//!
//! Every section keeps its raw source text, so [`DocumentBody::render`] is a
//! lossless concatenation and untouched regions come back byte-for-byte.
//! Only whole sections are ever replaced or inserted. Headings inside fenced
//! code or nested in lists are not section boundaries, which is what made the
//! old pattern-based rewriting fragile.
//!
//! The info card is a top-level blockquote whose first line is the
//! [`INFO_CARD_MARKER`]. Markdown ends a blockquote at the next blank line or
//! heading, so the card region never swallows the content after it.
//!
//! Marker-delimited blocks in free-form documents (the root README) are
//! handled by [`replace_marked_block`].

use pulldown_cmark::{Event, Parser, Tag};

/// First line of every info card.
pub const INFO_CARD_MARKER: &str = "**Problem Information**";

/// Marker used by documents written before the English templates.
const LEGACY_INFO_CARD_MARKER: &str = "**題目資訊**";

/// Heading of the notes section appended by the synchronizer.
pub const NOTES_HEADING: &str = "Learning Notes";

/// Headings that count as an existing notes section.
pub const NOTES_HEADINGS: &[&str] = &[NOTES_HEADING, "學習筆記"];

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// The first level-1 heading of the body.
    Title { text: String, raw: String },
    Heading { level: u8, text: String, raw: String },
    InfoCard { raw: String },
    /// Anything between the sections above, blank lines included.
    Text { raw: String },
}

impl Section {
    pub fn raw(&self) -> &str {
        match self {
            Section::Title { raw, .. }
            | Section::Heading { raw, .. }
            | Section::InfoCard { raw }
            | Section::Text { raw } => raw,
        }
    }

    fn heading_text(&self) -> Option<&str> {
        match self {
            Section::Title { text, .. } | Section::Heading { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBody {
    sections: Vec<Section>,
}

/// A top-level block found while walking the markdown events.
enum Mark {
    Heading { level: u8, text: String },
    InfoCard,
}

impl DocumentBody {
    pub fn parse(body: &str) -> Self {
        let mut marks: Vec<(usize, usize, Mark)> = Vec::new();
        let mut depth = 0usize;
        let mut open_heading: Option<(usize, usize, u8, String)> = None;

        for (event, range) in Parser::new(body).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    if depth == 0 {
                        match tag {
                            Tag::Heading { level, .. } => {
                                open_heading =
                                    Some((range.start, range.end, level as u8, String::new()));
                            }
                            Tag::BlockQuote(_) if is_info_card(&body[range.clone()]) => {
                                marks.push((
                                    range.start,
                                    block_end(body, range.start, range.end),
                                    Mark::InfoCard,
                                ));
                            }
                            _ => {}
                        }
                    }
                    depth += 1;
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0
                        && let Some((start, end, level, text)) = open_heading.take()
                    {
                        let text = text.trim().to_string();
                        marks.push((start, block_end(body, start, end), Mark::Heading { level, text }));
                    }
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some((_, _, _, text)) = open_heading.as_mut() {
                        text.push_str(&t);
                    }
                }
                _ => {}
            }
        }

        let mut sections = Vec::new();
        let mut pos = 0;
        let mut seen_title = false;
        for (start, end, mark) in marks {
            if start < pos {
                continue;
            }
            if start > pos {
                sections.push(Section::Text {
                    raw: body[pos..start].to_string(),
                });
            }
            let raw = body[start..end].to_string();
            sections.push(match mark {
                Mark::Heading { level: 1, text } if !seen_title => {
                    seen_title = true;
                    Section::Title { text, raw }
                }
                Mark::Heading { level, text } => Section::Heading { level, text, raw },
                Mark::InfoCard => Section::InfoCard { raw },
            });
            pos = end;
        }
        if pos < body.len() {
            sections.push(Section::Text {
                raw: body[pos..].to_string(),
            });
        }
        Self { sections }
    }

    /// Reassemble the body. Inverse of [`DocumentBody::parse`] for unmodified bodies.
    pub fn render(&self) -> String {
        self.sections.iter().map(Section::raw).collect()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn title(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::Title { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn info_card(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::InfoCard { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    /// Replace the existing info card, or insert one right after the title.
    ///
    /// `card` is the card text without a trailing newline. Returns `false`
    /// when the body has neither a card nor a title to anchor a new one.
    pub fn set_info_card(&mut self, card: &str) -> bool {
        if let Some(idx) = self
            .sections
            .iter()
            .position(|s| matches!(s, Section::InfoCard { .. }))
        {
            self.sections[idx] = Section::InfoCard {
                raw: format!("{card}\n"),
            };
            return true;
        }

        let Some(title_idx) = self
            .sections
            .iter()
            .position(|s| matches!(s, Section::Title { .. }))
        else {
            return false;
        };

        // A paragraph glued to the card would become a lazy continuation
        // line of the blockquote, so keep a blank line after it.
        let needs_gap = match self.sections.get(title_idx + 1) {
            Some(Section::Text { raw }) => !raw.starts_with('\n') && !raw.starts_with("\r\n"),
            _ => false,
        };
        let mut raw = format!("\n{card}\n");
        if needs_gap {
            raw.push('\n');
        }
        self.sections.insert(title_idx + 1, Section::InfoCard { raw });
        true
    }

    /// Whether a heading with one of `names` exists (case-insensitive).
    pub fn has_heading(&self, names: &[&str]) -> bool {
        self.sections
            .iter()
            .filter_map(Section::heading_text)
            .any(|text| names.iter().any(|n| n.eq_ignore_ascii_case(text)))
    }

    /// Append a level-2 section at the end of the body.
    pub fn append_section(&mut self, heading: &str, content: &str) {
        let ends_with_newline = self.render().ends_with('\n') || self.sections.is_empty();
        let separator = if ends_with_newline { "\n" } else { "\n\n" };
        self.sections.push(Section::Text {
            raw: separator.to_string(),
        });
        self.sections.push(Section::Heading {
            level: 2,
            text: heading.to_string(),
            raw: format!("## {heading}\n"),
        });
        self.sections.push(Section::Text {
            raw: format!("\n{}\n", content.trim_end()),
        });
    }
}

fn is_info_card(blockquote: &str) -> bool {
    let first_line = blockquote.lines().next().unwrap_or("");
    let content = first_line.trim_start().trim_start_matches('>').trim();
    content.starts_with(INFO_CARD_MARKER) || content.starts_with(LEGACY_INFO_CARD_MARKER)
}

/// End offset of a block: trailing blank lines excluded, the newline of its
/// last content line included.
fn block_end(body: &str, start: usize, end: usize) -> usize {
    let content_end = start + body[start..end].trim_end().len();
    line_end(body, content_end)
}

fn line_end(body: &str, end: usize) -> usize {
    if end == 0 || body[..end].ends_with('\n') {
        return end;
    }
    body[end..]
        .find('\n')
        .map(|i| end + i + 1)
        .unwrap_or(body.len())
}

/// Opening marker of a named, versioned block: `<!-- archive:stats:v1 -->`.
pub fn block_start_marker(name: &str) -> String {
    format!("<!-- archive:{name}:v1 -->")
}

/// Closing marker of a named, versioned block: `<!-- /archive:stats:v1 -->`.
pub fn block_end_marker(name: &str) -> String {
    format!("<!-- /archive:{name}:v1 -->")
}

/// Replace the content between a marker pair, or append the block when the
/// pair is missing.
///
/// Everything outside the markers is left untouched, and repeated calls with
/// the same content produce the same document.
pub fn replace_marked_block(document: &str, name: &str, content: &str) -> String {
    let start_marker = block_start_marker(name);
    let end_marker = block_end_marker(name);
    let content = content.trim_end();

    // Pair the last start marker that is still followed by an end marker, so
    // a dangling start left earlier never captures text up to a later block.
    let pair = document.rmatch_indices(&start_marker).find_map(|(start, _)| {
        let inner_start = start + start_marker.len();
        document[inner_start..]
            .find(&end_marker)
            .map(|rel_end| (inner_start, inner_start + rel_end))
    });
    if let Some((inner_start, inner_end)) = pair {
        return format!(
            "{}\n{}\n{}",
            &document[..inner_start],
            content,
            &document[inner_end..]
        );
    }

    let mut out = document.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("{start_marker}\n{content}\n{end_marker}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "> **Problem Information**  \n> 🔗 [LeetCode](https://leetcode.com/problems/x/) | 🎯 🟢 **Easy**";

    fn body_without_card() -> &'static str {
        "\n# 1. Two Sum\n\n## Problem Description\n\nFind two numbers.\n\n## Notes\n\nnone\n"
    }

    #[test]
    fn parse_render_is_lossless() {
        for body in [
            body_without_card(),
            "",
            "no headings at all",
            "# T\n> **Problem Information**\n> x\n\ntext\n```\n# not a heading\n```\n",
            "Setext\n======\n\nbody",
        ] {
            assert_eq!(DocumentBody::parse(body).render(), body);
        }
    }

    #[test]
    fn title_is_first_h1() {
        let doc = DocumentBody::parse(body_without_card());
        assert_eq!(doc.title(), Some("1. Two Sum"));
        assert!(matches!(doc.sections()[1], Section::Title { .. }));
    }

    #[test]
    fn headings_in_code_fences_are_not_sections() {
        let doc = DocumentBody::parse("# T\n\n```md\n## Learning Notes\n```\n");
        assert!(!doc.has_heading(NOTES_HEADINGS));
    }

    #[test]
    fn insert_card_after_title() {
        let mut doc = DocumentBody::parse(body_without_card());
        assert!(doc.set_info_card(CARD));
        let out = doc.render();
        assert!(out.starts_with(&format!("\n# 1. Two Sum\n\n{CARD}\n\n## Problem Description")));
        assert_eq!(out.matches("**Problem Information**").count(), 1);
    }

    #[test]
    fn reparse_finds_inserted_card() {
        let mut doc = DocumentBody::parse(body_without_card());
        doc.set_info_card(CARD);
        let reparsed = DocumentBody::parse(&doc.render());
        assert_eq!(reparsed.info_card(), Some(format!("{CARD}\n").as_str()));
    }

    #[test]
    fn replace_existing_card_anywhere() {
        let body = "# T\n\nintro\n\n> **Problem Information**  \n> stale line\n> another stale line\n\n## Next\n";
        let mut doc = DocumentBody::parse(body);
        assert!(doc.set_info_card(CARD));
        let out = doc.render();
        assert_eq!(out, format!("# T\n\nintro\n\n{CARD}\n\n## Next\n"));
    }

    #[test]
    fn card_stops_at_heading() {
        let body = "# T\n> **Problem Information**\n> old\n## Next\nkeep me\n";
        let mut doc = DocumentBody::parse(body);
        doc.set_info_card("> **Problem Information**");
        assert_eq!(doc.render(), "# T\n> **Problem Information**\n## Next\nkeep me\n");
    }

    #[test]
    fn legacy_card_marker_is_replaced() {
        let body = "# T\n\n> **題目資訊**\n> old\n\nrest\n";
        let mut doc = DocumentBody::parse(body);
        doc.set_info_card(CARD);
        assert_eq!(doc.render(), format!("# T\n\n{CARD}\n\nrest\n"));
    }

    #[test]
    fn ordinary_blockquote_is_not_a_card() {
        let doc = DocumentBody::parse("# T\n\n> just a quote\n");
        assert_eq!(doc.info_card(), None);
    }

    #[test]
    fn insert_keeps_gap_before_glued_paragraph() {
        let mut doc = DocumentBody::parse("# T\nparagraph right after\n");
        doc.set_info_card(CARD);
        let out = doc.render();
        assert_eq!(out, format!("# T\n\n{CARD}\n\nparagraph right after\n"));
        let mut again = DocumentBody::parse(&out);
        again.set_info_card(CARD);
        assert_eq!(again.render(), out);
    }

    #[test]
    fn no_title_no_card_cannot_insert() {
        let mut doc = DocumentBody::parse("## Only a subsection\n");
        assert!(!doc.set_info_card(CARD));
    }

    #[test]
    fn append_notes_section() {
        let mut doc = DocumentBody::parse("# T\n\nbody");
        doc.append_section(NOTES_HEADING, "remember the stack");
        let out = doc.render();
        assert_eq!(out, "# T\n\nbody\n\n## Learning Notes\n\nremember the stack\n");
        assert!(DocumentBody::parse(&out).has_heading(NOTES_HEADINGS));
    }

    #[test]
    fn notes_heading_match_is_case_insensitive() {
        let doc = DocumentBody::parse("# T\n\n## learning notes\n");
        assert!(doc.has_heading(NOTES_HEADINGS));
        let doc = DocumentBody::parse("# T\n\n## 學習筆記\n");
        assert!(doc.has_heading(NOTES_HEADINGS));
    }

    #[test]
    fn marked_block_replaced_in_place() {
        let doc = "# Root\n\n<!-- archive:stats:v1 -->\nold\n<!-- /archive:stats:v1 -->\n\n## After\n";
        let out = replace_marked_block(doc, "stats", "new table\n");
        assert_eq!(
            out,
            "# Root\n\n<!-- archive:stats:v1 -->\nnew table\n<!-- /archive:stats:v1 -->\n\n## After\n"
        );
        assert_eq!(replace_marked_block(&out, "stats", "new table\n"), out);
    }

    #[test]
    fn missing_marked_block_is_appended_once() {
        let out = replace_marked_block("# Root\nintro", "recent", "rows");
        assert_eq!(
            out,
            "# Root\nintro\n\n<!-- archive:recent:v1 -->\nrows\n<!-- /archive:recent:v1 -->\n"
        );
        assert_eq!(replace_marked_block(&out, "recent", "rows"), out);
    }

    #[test]
    fn unterminated_marker_appends_fresh_block() {
        let doc = "<!-- archive:stats:v1 -->\ndangling\n";
        let out = replace_marked_block(doc, "stats", "x");
        assert!(out.ends_with("<!-- archive:stats:v1 -->\nx\n<!-- /archive:stats:v1 -->\n"));
    }

    #[test]
    fn dangling_start_marker_text_survives_repeated_patching() {
        let doc = "<!-- archive:stats:v1 -->\nuser text\n";
        let once = replace_marked_block(doc, "stats", "x");
        let twice = replace_marked_block(&once, "stats", "x");
        assert_eq!(twice, once);
        assert!(twice.starts_with(doc));

        let updated = replace_marked_block(&once, "stats", "y");
        assert!(updated.starts_with(doc));
        assert!(updated.ends_with("<!-- archive:stats:v1 -->\ny\n<!-- /archive:stats:v1 -->\n"));
    }

    #[test]
    fn dangling_start_after_complete_pair_is_left_alone() {
        let doc = "<!-- archive:stats:v1 -->\nold\n<!-- /archive:stats:v1 -->\n\n<!-- archive:stats:v1 -->\nnote\n";
        let out = replace_marked_block(doc, "stats", "new");
        assert_eq!(
            out,
            "<!-- archive:stats:v1 -->\nnew\n<!-- /archive:stats:v1 -->\n\n<!-- archive:stats:v1 -->\nnote\n"
        );
    }
}
