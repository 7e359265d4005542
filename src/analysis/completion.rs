//! Completion
//!
//! Proposals are derived from live grammar state rather than a static
//! keyword list: the parser records, at every token boundary, the grammar
//! alternatives that would be valid there. Completion looks up the boundary
//! token for the cursor, maps each alternative's leading token through the
//! snippet library, and filters against the word prefix under the cursor.

use sms2_syntax::position::Position;

use crate::analysis::Analysis;
use crate::analysis::snippets::SnippetLibrary;
use crate::protocol::CompletionItem;

pub fn complete(analysis: &Analysis, position: Position) -> Vec<CompletionItem> {
    complete_with(analysis, position, SnippetLibrary::builtin())
}

pub fn complete_with(
    analysis: &Analysis,
    position: Position,
    library: &SnippetLibrary,
) -> Vec<CompletionItem> {
    let offset = analysis.line_index().offset(position);
    let (index, _) = analysis.boundary_token(offset);
    let prefix = word_prefix(analysis.text(), offset).to_ascii_lowercase();

    let mut items: Vec<CompletionItem> = Vec::new();
    for alternative in analysis.expectations().at(index) {
        let Some(head) = alternative.head() else {
            continue;
        };
        for item in library.for_token(head) {
            if !prefix.is_empty() && !item.label.to_ascii_lowercase().contains(&prefix) {
                continue;
            }
            if items.iter().any(|existing| existing.label == item.label) {
                continue;
            }
            items.push(item.clone());
        }
    }

    items.sort_by(|a, b| {
        let a_key = a.sort_text.as_deref().unwrap_or(&a.label);
        let b_key = b.sort_text.as_deref().unwrap_or(&b.label);
        a_key.cmp(b_key).then_with(|| a.label.cmp(&b.label))
    });
    items
}

/// The word characters immediately before `offset`. The cursor column is a
/// byte count, so an offset can land inside a multi-byte character; it is
/// clamped back to the nearest char boundary before slicing.
fn word_prefix(text: &str, offset: usize) -> &str {
    let bytes = text.as_bytes();
    let mut end = offset.min(bytes.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && is_word_byte(bytes[start - 1]) {
        start -= 1;
    }
    &text[start..end]
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Analysis {
        Analysis::new(text.to_string())
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_empty_document_offers_document_start_items() {
        let analysis = analyze("");
        let items = complete(&analysis, Position::new(0, 0));
        let labels = labels(&items);
        assert!(labels.contains(&"basicSMS2Mapping"), "got {labels:?}");
        assert!(labels.contains(&"fromClause"), "got {labels:?}");
    }

    #[test]
    fn test_after_from_offers_source_types() {
        let analysis = analyze("FROM ");
        let items = complete(&analysis, Position::new(0, 5));
        // Recovery also merges the post-clause follow set at this boundary,
        // so the source types are a subset, not the whole list.
        let labels = labels(&items);
        for expected in ["SQL", "JSON", "GRAPHQL", "CSV"] {
            assert!(labels.contains(&expected), "missing {expected} in {labels:?}");
        }
    }

    #[test]
    fn test_prefix_filters_case_insensitively() {
        let analysis = analyze("FROM gra");
        let items = complete(&analysis, Position::new(0, 8));
        assert_eq!(labels(&items), vec!["GRAPHQL"]);
    }

    #[test]
    fn test_prefix_matches_anywhere_in_label() {
        // "map" matches basicSMS2Mapping by containment, not just prefix.
        let analysis = analyze("map");
        let items = complete(&analysis, Position::new(0, 3));
        assert_eq!(labels(&items), vec!["basicSMS2Mapping"]);
    }

    #[test]
    fn test_after_complete_from_clause_offers_to() {
        let analysis = analyze("FROM SQL { x } ");
        let items = complete(&analysis, Position::new(0, 15));
        assert!(labels(&items).contains(&"toClause"));
    }

    #[test]
    fn test_inside_block_offers_closing_brace() {
        let analysis = analyze("FROM SQL { ");
        let items = complete(&analysis, Position::new(0, 11));
        assert!(labels(&items).contains(&"}"));
    }

    #[test]
    fn test_after_to_clause_offers_where() {
        let analysis = analyze("FROM SQL { x } TO { y } ");
        let items = complete(&analysis, Position::new(0, 24));
        assert!(labels(&items).contains(&"whereClause"));
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        let analysis = analyze("FROM zzz");
        let items = complete(&analysis, Position::new(0, 8));
        assert!(items.is_empty());
    }

    #[test]
    fn test_cursor_inside_multibyte_character_does_not_panic() {
        // Column 1 of "π" is a byte offset inside the two-byte character.
        let analysis = analyze("π");
        let _ = complete(&analysis, Position::new(0, 1));
    }

    #[test]
    fn test_cursor_sweep_over_non_ascii_text() {
        let text = "FROM # cafés and π";
        let analysis = analyze(text);
        for character in 0..=(text.len() as u32 + 2) {
            let _ = complete(&analysis, Position::new(0, character));
        }
    }

    #[test]
    fn test_prefix_before_multibyte_text_still_matches() {
        // The word prefix ends at the cursor even with non-ASCII later in
        // the line.
        let analysis = analyze("FROM gra π");
        let items = complete(&analysis, Position::new(0, 8));
        assert!(labels(&items).contains(&"GRAPHQL"));
    }

    #[test]
    fn test_completion_does_not_mutate_analysis() {
        let analysis = analyze("FROM ");
        let first = complete(&analysis, Position::new(0, 5));
        let second = complete(&analysis, Position::new(0, 5));
        assert_eq!(first, second);
    }
}
