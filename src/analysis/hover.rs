//! Hover resolution
//!
//! Maps a cursor position to the innermost syntax node and renders its
//! grammar-rule name as a fenced code block. Positions on whitespace
//! between clauses (or past the end of the document) resolve to the root
//! and produce no hover.

use sms2_syntax::ast::SyntaxTree;
use sms2_syntax::position::Position;

use crate::analysis::Analysis;
use crate::protocol::Hover;

pub fn hover(analysis: &Analysis, position: Position) -> Option<Hover> {
    let offset = analysis.line_index().offset(position);
    let id = analysis.tree().node_at(offset);
    if id == SyntaxTree::ROOT {
        return None;
    }
    let node = analysis.tree().node(id);
    Some(Hover {
        contents: vec![format!("```\n{}\n```", node.kind.rule_name())],
        range: analysis.line_index().range(node.span),
    })
}
