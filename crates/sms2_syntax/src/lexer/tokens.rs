//! Token types for the SMS2 lexer.
//!
//! Clause bodies embed foreign text (SQL queries, JSON paths, graph
//! templates), so the token set is deliberately small: the grammar keywords
//! and source-type literals are recognized precisely, and everything else
//! tokenizes as identifiers, braces, string literals, or opaque symbol runs.
//! The stream is total: any input produces a token sequence ending in `Eof`.

use std::fmt;

use crate::ast::{SourceType, Span};

/// Reserved clause keywords. Spellings are uppercase and case-sensitive;
/// lowercase look-alikes lex as identifiers (and routinely appear inside SQL
/// block bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Mapping,
    From,
    To,
    Where,
}

impl KeywordId {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordId::Mapping => "MAPPING",
            KeywordId::From => "FROM",
            KeywordId::To => "TO",
            KeywordId::Where => "WHERE",
        }
    }
}

/// Punctuation recognized by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctId {
    LBrace,
    RBrace,
}

impl PunctId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunctId::LBrace => "{",
            PunctId::RBrace => "}",
        }
    }
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    /// Source-type literal (`SQL`, `JSON`, `GRAPHQL`, `CSV`).
    SourceTypeLit(SourceType),
    Ident(String),
    Punct(PunctId),
    /// Opaque run of block-body characters (operators, numbers, IRIs, quoted
    /// strings). Never matched by the grammar, consumed only inside blocks.
    Symbol(String),
    /// `# ...` line comment. Trivia: filtered out before parsing.
    Comment,
    /// Malformed construct (e.g. unterminated string literal), carrying its
    /// raw text. Trivia for the parser; the lexer has already recorded the
    /// error.
    Error(String),
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_punct(&self, id: PunctId) -> bool {
        matches!(self, TokenKind::Punct(p) if *p == id)
    }

    /// Tokens the parser never sees.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Error(_))
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The literal text of the token, as it appears in the document. Empty
    /// for `Eof` (and for comments, which the parser never inspects).
    pub fn lexeme(&self) -> &str {
        match &self.kind {
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::SourceTypeLit(st) => st.as_str(),
            TokenKind::Ident(s) | TokenKind::Symbol(s) | TokenKind::Error(s) => s,
            TokenKind::Punct(p) => p.as_str(),
            TokenKind::Comment | TokenKind::Eof => "",
        }
    }
}

/// Grammar-facing token names, as printed in expectation diagnostics
/// (`[Sql]`, `[From]`, ...) and used as snippet-library keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenName {
    Mapping,
    From,
    To,
    Where,
    Sql,
    Json,
    GraphQl,
    Csv,
    Identifier,
    LBrace,
    RBrace,
    Eof,
}

impl TokenName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenName::Mapping => "Mapping",
            TokenName::From => "From",
            TokenName::To => "To",
            TokenName::Where => "Where",
            TokenName::Sql => "Sql",
            TokenName::Json => "Json",
            TokenName::GraphQl => "GraphQl",
            TokenName::Csv => "Csv",
            TokenName::Identifier => "Identifier",
            TokenName::LBrace => "LBrace",
            TokenName::RBrace => "RBrace",
            TokenName::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(spelling: &str) -> Option<KeywordId> {
    match spelling {
        "MAPPING" => Some(KeywordId::Mapping),
        "FROM" => Some(KeywordId::From),
        "TO" => Some(KeywordId::To),
        "WHERE" => Some(KeywordId::Where),
        _ => None,
    }
}
