//! Editor-facing wire types
//!
//! Serialization shapes for the three operations exposed to editor clients:
//! diagnostics, hover, and completion. Positions are zero-based
//! line/character pairs; a diagnostic range serializes as a two-element
//! array, a hover range as a `{start, end}` object.

use serde::{Deserialize, Serialize};
use sms2_syntax::position::{Position, Range};

/// Diagnostic severity. Only `Error` is produced today; the full scale is
/// part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// One reported problem in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Serializes as `[start, end]`.
    pub range: (Position, Position),
    /// The grammar rule (or "Lexer") that reported the problem.
    pub source: String,
}

/// Hover information for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    /// Markdown blocks, outermost context first.
    pub contents: Vec<String>,
    /// The span of the hovered node.
    pub range: Range,
}

/// Text inserted when a completion item is accepted: either plain text or
/// an editor snippet with tab stops and placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsertText {
    Plain(String),
    Snippet { value: String },
}

/// One completion proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    /// Item kind as the client names it, e.g. `"Enum"` or `"Keyword"`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub insert_text: InsertText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
}
