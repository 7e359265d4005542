//! Document analysis
//!
//! [`Analysis`] is an immutable snapshot of everything derived from one
//! version of a document's text: tokens, syntax tree, collected errors, and
//! the parser's expectation table. Hover and completion read snapshots, so
//! an edit arriving mid-query never produces a torn view.
//!
//! [`DocumentStore`] keeps the latest snapshot per open document behind an
//! `Arc`, swapped atomically on each edit.

pub mod completion;
pub mod hover;
pub mod snippets;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use sms2_syntax::ast::SyntaxTree;
use sms2_syntax::diagnostics::SyntaxError;
use sms2_syntax::lexer::{self, Token};
use sms2_syntax::parser::{self, Expectations};
use sms2_syntax::position::LineIndex;

/// Analysis snapshot for one version of a document.
#[derive(Debug, Clone)]
pub struct Analysis {
    text: String,
    line_index: LineIndex,
    tokens: Vec<Token>,
    tree: SyntaxTree,
    errors: Vec<SyntaxError>,
    expectations: Expectations,
}

impl Analysis {
    /// Lex and parse `text`. Total: any input produces a snapshot, with
    /// failures collected into `errors` (lexer errors first, then parser
    /// errors, sorted by span).
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn new(text: String) -> Self {
        let line_index = LineIndex::new(&text);
        let lexed = lexer::lex(&text);
        let outcome = parser::parse(&lexed.tokens);

        let mut errors = lexed.errors;
        errors.extend(outcome.errors);
        errors.sort_by_key(|e| (e.span.start, e.span.end));

        tracing::debug!(
            tokens = lexed.tokens.len(),
            errors = errors.len(),
            "analyzed document"
        );

        Self {
            text,
            line_index,
            tokens: lexed.tokens,
            tree: outcome.tree,
            errors,
            expectations: outcome.expectations,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn expectations(&self) -> &Expectations {
        &self.expectations
    }

    /// The boundary token for a byte offset: the first significant token
    /// whose end reaches the offset, or the final `Eof`. The returned index
    /// counts significant tokens only and keys into [`Expectations`].
    pub(crate) fn boundary_token(&self, offset: usize) -> (usize, &Token) {
        let mut last = None;
        for (index, token) in self
            .tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .enumerate()
        {
            if token.span.end >= offset {
                return (index, token);
            }
            last = Some((index, token));
        }
        // Unreachable for lexer output (Eof spans the end of text), but a
        // hand-built snapshot should still get a sane answer.
        last.unwrap_or((0, &self.tokens[0]))
    }
}

/// Latest analysis snapshot per open document, keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<String, Arc<Analysis>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot for `uri` with a fresh analysis of `text`.
    /// Readers holding the previous `Arc` keep a consistent old view.
    pub fn update(&self, uri: &str, text: String) -> Arc<Analysis> {
        let analysis = Arc::new(Analysis::new(text));
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        documents.insert(uri.to_string(), Arc::clone(&analysis));
        analysis
    }

    pub fn get(&self, uri: &str) -> Option<Arc<Analysis>> {
        let documents = self
            .documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        documents.get(uri).cloned()
    }

    pub fn close(&self, uri: &str) {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        documents.remove(uri);
    }
}
