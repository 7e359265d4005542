//! Syntax errors for SMS2 documents
//!
//! Lex and parse failures are both non-fatal: they are collected as
//! [`SyntaxError`] values and analysis always completes with a best-effort
//! tree. Nothing in this crate ever propagates a failure to the caller.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::ast::Span;

/// Which stage produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token, e.g. an unterminated string literal.
    Lex,
    /// Token sequence matched no grammar alternative.
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lex error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A non-fatal error with location information.
///
/// `rule` is the grammar-rule name active when the failure occurred
/// (`"FromClause"`, `"Block"`, ...; `"Lexer"` for lex errors) and becomes the
/// `source` field of the published diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub rule: &'static str,
    pub kind: ErrorKind,
}

impl SyntaxError {
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            rule: "Lexer",
            kind: ErrorKind::Lex,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span, rule: &'static str) -> Self {
        Self {
            message: message.into(),
            span,
            rule,
            kind: ErrorKind::Syntax,
        }
    }
}

impl Diagnostic for SyntaxError {
    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(self.rule.to_string()),
            self.span.start,
            self.span.len(),
        ))))
    }
}
