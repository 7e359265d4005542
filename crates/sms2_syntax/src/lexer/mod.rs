//! Lexer for SMS2 documents
//!
//! Handles tokenization including:
//! - Clause keywords (`MAPPING`, `FROM`, `TO`, `WHERE`)
//! - Source-type literals (`SQL`, `JSON`, `GRAPHQL`, `CSV`)
//! - Identifiers, braces, string literals, `#` line comments
//! - Opaque symbol runs for embedded block-body text
//!
//! Lexing is total: it terminates for any input, never panics, and emits
//! malformed constructs as explicit [`TokenKind::Error`] tokens (with a
//! matching [`SyntaxError`]) so the parser can recover around them.

pub mod tokens;

pub use tokens::{KeywordId, PunctId, Token, TokenKind, TokenName, keyword_id};

use crate::ast::{SourceType, Span};
use crate::diagnostics::SyntaxError;

/// Everything produced by one lexer run. The token stream always ends with
/// an `Eof` token whose span is `[len, len)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

/// Lexer for SMS2 source text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source text.
    pub fn tokenize(mut self) -> LexOutput {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.source.len(), self.source.len()),
        ));

        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Whitespace is skipped, not emitted
            ' ' | '\t' | '\r' | '\n' => {}

            // Line comments
            '#' => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
                self.add_token(TokenKind::Comment, start);
            }

            '{' => self.add_token(TokenKind::Punct(PunctId::LBrace), start),
            '}' => self.add_token(TokenKind::Punct(PunctId::RBrace), start),

            // String literals appear inside block bodies (SQL predicates,
            // JSON paths). They are opaque to the grammar but must be
            // scanned as units so an embedded `}` does not close the block.
            '"' => self.scan_string(start, '"'),
            '\'' => self.scan_string(start, '\''),

            _ if is_ident_start(c) => self.scan_identifier(start),

            // Anything else is an opaque symbol run
            _ => self.scan_symbol(start),
        }
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    fn scan_string(&mut self, start: usize, quote: char) {
        loop {
            match self.advance() {
                Some('\\') => {
                    // Escapes: consume the escaped character blindly
                    self.advance();
                }
                Some(c) if c == quote => {
                    let text = self.source[start..self.current_pos].to_string();
                    self.add_token(TokenKind::Symbol(text), start);
                    return;
                }
                Some('\n') | None => {
                    let span = Span::new(start, self.current_pos);
                    self.errors
                        .push(SyntaxError::lex("Unterminated string literal", span));
                    let text = self.source[start..self.current_pos].to_string();
                    self.tokens.push(Token::new(TokenKind::Error(text), span));
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else if let Some(st) = SourceType::from_str(spelling) {
            self.add_token(TokenKind::SourceTypeLit(st), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    fn scan_symbol(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_symbol_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Symbol(text), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that extend an opaque symbol run. Stops at whitespace and at
/// anything the grammar cares about.
fn is_symbol_continue(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}' | '"' | '\'' | '#') && !is_ident_start(c)
}

/// Convenience function to lex a source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
