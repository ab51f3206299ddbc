//! Text templates for scaffolded files.
//!
//! Placeholder substitution only: each template is a `format!` string filled
//! from a [`ProblemRecord`]. The info card is also rendered here because the
//! scaffold and the synchronizer must produce exactly the same card.

use crate::document::INFO_CARD_MARKER;
use crate::types::{Language, ProblemRecord};

/// Where generated links point and how the source is labelled.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub name: &'a str,
    pub url_base: &'a str,
}

/// Tag summary used in cards and stub headers.
fn tag_badges(record: &ProblemRecord) -> String {
    let badges: Vec<String> = record.tags.real().map(|t| format!("`{t}`")).collect();
    if badges.is_empty() {
        "To be filled".to_string()
    } else {
        badges.join(" ")
    }
}

fn tag_list(record: &ProblemRecord) -> String {
    let tags: Vec<&str> = record.tags.real().collect();
    if tags.is_empty() {
        "To be filled".to_string()
    } else {
        tags.join(", ")
    }
}

/// The info card projected from a record, without a trailing newline.
///
/// ```text
/// > **Problem Information**
/// > 🔗 [LeetCode](https://leetcode.com/problems/valid-parentheses/) | 🎯 🟢 **Easy** | 🏷️ `Stack` | 📅 2024-03-02
/// ```
pub fn info_card(record: &ProblemRecord, source: Source<'_>) -> String {
    let solved = record
        .date_solved
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "> {marker}  \n> 🔗 [{name}]({url}) | 🎯 {emoji} **{label}** | 🏷️ {tags} | 📅 {solved}",
        marker = INFO_CARD_MARKER,
        name = source.name,
        url = record.url(source.url_base),
        emoji = record.difficulty.emoji(),
        label = record.difficulty.label(),
        tags = tag_badges(record),
    )
}

/// Document body that follows the frontmatter of a new problem.
pub fn document_body(record: &ProblemRecord, source: Source<'_>) -> String {
    format!(
        r#"
# {id}. {title}

{card}

## Problem Description

[Add problem description here]

## Approach

### Method 1:

[Add approach description here]

1. [Step 1]
2. [Step 2]
3. [Step 3]

## Complexity Analysis

### Method 1
- **Time Complexity**: O(?)
- **Space Complexity**: O(?)

## Notes

Add solution notes and insights here
"#,
        id = record.id,
        title = record.title,
        card = info_card(record, source),
    )
}

/// Solution stub for one language: header comment, empty entry point and a
/// self-check harness with no cases.
pub fn solution_stub(language: Language, record: &ProblemRecord, source: Source<'_>) -> String {
    let id = record.id;
    let title = &record.title;
    let url = record.url(source.url_base);
    let tags = tag_list(record);
    match language {
        Language::Python => format!(
            r#""""
{id}. {title}
{url}

Time Complexity: O(?)
Space Complexity: O(?)

Tags: {tags}
"""


class Solution:
    def solve(self, param):
        pass


def test_solution():
    solution = Solution()

    test_cases = [
        # (input, expected_output),
    ]

    for i, (input_data, expected) in enumerate(test_cases):
        result = solution.solve(input_data)
        print(f"Test {{i + 1}}: input={{input_data}} -> {{result}} (Expected: {{expected}})")
        assert result == expected, f"Test {{i + 1}} failed"

    print("All tests passed!")


if __name__ == "__main__":
    test_solution()
"#
        ),
        Language::Cpp => format!(
            r#"/*
{id}. {title}
{url}

Time Complexity: O(?)
Space Complexity: O(?)

Tags: {tags}
*/

#include <iostream>
#include <vector>
using namespace std;

class Solution {{
public:
    // ReturnType solve(ParamType param) {{
    // }}
}};

int main() {{
    Solution solution;

    // Test cases: {{input, expected}}

    cout << "All tests passed!" << endl;
    return 0;
}}
"#
        ),
        Language::JavaScript => format!(
            r#"/**
 * {id}. {title}
 * {url}
 *
 * Time Complexity: O(?)
 * Space Complexity: O(?)
 *
 * Tags: {tags}
 */

/**
 * @param {{*}} param
 * @return {{*}}
 */
var solve = function(param) {{
}};

function testSolution() {{
    const testCases = [
        // [input, expectedOutput],
    ];

    testCases.forEach(([input, expected], i) => {{
        const result = solve(input);
        console.log(`Test ${{i + 1}}: input=${{JSON.stringify(input)}} -> ${{JSON.stringify(result)}} (Expected: ${{JSON.stringify(expected)}})`);
        console.assert(JSON.stringify(result) === JSON.stringify(expected), `Test ${{i + 1}} failed`);
    }});

    console.log("All tests passed!");
}}

testSolution();
"#
        ),
        Language::Java => format!(
            r#"/*
 * {id}. {title}
 * {url}
 *
 * Time Complexity: O(?)
 * Space Complexity: O(?)
 *
 * Tags: {tags}
 */

import java.util.*;

class Solution {{
    // public ReturnType solve(ParamType param) {{
    // }}
}}

class SolutionTest {{
    public static void main(String[] args) {{
        Solution solution = new Solution();

        // Test cases: {{input, expected}}

        System.out.println("All tests passed!");
    }}
}}
"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SOURCE, record};
    use crate::types::Difficulty;

    #[test]
    fn card_contains_all_projections() {
        let mut r = record(20, "Valid Parentheses", Difficulty::Easy);
        r.tags = ["Stack", "String"].into_iter().collect();
        let card = info_card(&r, SOURCE);
        assert!(card.starts_with("> **Problem Information**  \n> "));
        assert!(card.contains("[LeetCode](https://leetcode.com/problems/valid-parentheses/)"));
        assert!(card.contains("🎯 🟢 **Easy**"));
        assert!(card.contains("🏷️ `Stack` `String`"));
        assert!(card.contains("📅 2024-03-02"));
        assert!(!card.ends_with('\n'));
    }

    #[test]
    fn card_hides_placeholder_tags() {
        let mut r = record(1, "Two Sum", Difficulty::Easy);
        r.tags = ["<tag 1>", "<tag 2>"].into_iter().collect();
        r.date_solved = None;
        let card = info_card(&r, SOURCE);
        assert!(card.contains("🏷️ To be filled"));
        assert!(card.ends_with("📅 -"));
    }

    #[test]
    fn body_has_sections_in_order() {
        let body = document_body(&record(20, "Valid Parentheses", Difficulty::Easy), SOURCE);
        let order = [
            "# 20. Valid Parentheses",
            "> **Problem Information**",
            "## Problem Description",
            "## Approach",
            "## Complexity Analysis",
            "## Notes",
        ];
        let positions: Vec<usize> = order.iter().map(|h| body.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn stubs_carry_header_fields() {
        let mut r = record(20, "Valid Parentheses", Difficulty::Easy);
        r.tags = ["Stack"].into_iter().collect();
        for lang in Language::ALL {
            let stub = solution_stub(lang, &r, SOURCE);
            assert!(stub.contains("20. Valid Parentheses"), "{lang}");
            assert!(stub.contains("https://leetcode.com/problems/valid-parentheses/"), "{lang}");
            assert!(stub.contains("Time Complexity: O(?)"), "{lang}");
            assert!(stub.contains("Tags: Stack"), "{lang}");
        }
    }

    #[test]
    fn python_stub_harness_has_no_cases() {
        let stub = solution_stub(Language::Python, &record(1, "Two Sum", Difficulty::Easy), SOURCE);
        assert!(stub.contains("test_cases = [\n        # (input, expected_output),\n    ]"));
        assert!(stub.contains("print(f\"Test {i + 1}:"));
        assert!(stub.contains("Tags: To be filled"));
    }
}
