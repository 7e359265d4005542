//! Recovering recursive-descent parser for SMS2
//!
//! Grammar (one-token lookahead, predictive):
//!
//! ```text
//! MappingDoc  := MappingDecl? FromClause ToClause WhereClause? Eof
//! MappingDecl := 'MAPPING' Identifier?
//! FromClause  := 'FROM' SourceType Block
//! ToClause    := 'TO' Block
//! WhereClause := 'WHERE' Block
//! Block       := '{' <balanced opaque content> '}'
//! ```
//!
//! The parser never fails: it always produces a best-effort [`SyntaxTree`]
//! plus a list of [`SyntaxError`]s. On a token matching no alternative it
//! records one diagnostic and synchronizes at the next clause-starting
//! keyword (or end of input), then resumes with the remaining clauses so
//! that as much of the document as possible stays analyzable. Once an error
//! has been recorded, reaching end of input suppresses further
//! missing-clause diagnostics to avoid cascades.
//!
//! At every alternative-choice point the parser also records the set of
//! grammar alternatives that would be valid there, keyed by token index.
//! This [`Expectations`] table is the live grammar state that drives
//! completion: the set recorded at a point is exactly the set an error at
//! that point would print.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use crate::ast::{NodeId, NodeKind, Span, SyntaxTree, TreeBuilder};
use crate::diagnostics::SyntaxError;
use crate::lexer::{KeywordId, PunctId, Token, TokenKind, TokenName};

// ============================================================================
// Expectations
// ============================================================================

/// One grammar alternative: the token sequence that would have been valid.
/// Printed bracketed, e.g. `[Sql]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative(pub &'static [TokenName]);

impl Alternative {
    /// Leading token of the sequence; the snippet-library key for completion.
    pub fn head(&self) -> Option<TokenName> {
        self.0.first().copied()
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "]")
    }
}

/// Grammar alternatives recorded per token index (indices into the
/// trivia-filtered token stream). Merged across choice points, duplicates
/// removed, source order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectations {
    map: BTreeMap<usize, Vec<Alternative>>,
}

impl Expectations {
    fn record(&mut self, index: usize, alternatives: &[Alternative]) {
        let entry = self.map.entry(index).or_default();
        for alt in alternatives {
            if !entry.contains(alt) {
                entry.push(*alt);
            }
        }
    }

    /// Alternatives valid at the given token boundary.
    pub fn at(&self, index: usize) -> &[Alternative] {
        self.map.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Build the published expectation-failure message. The format is part of
/// the wire contract and is reproduced byte-for-byte:
///
/// ```text
/// Expecting: one of these possible Token sequences:
///   1. [Sql]
///   2. [Json]
/// but found: 'xyz'
/// ```
pub fn expectation_message(alternatives: &[Alternative], found: &str) -> String {
    let mut message = String::from("Expecting: one of these possible Token sequences:\n");
    for (i, alt) in alternatives.iter().enumerate() {
        // Infallible for String targets.
        let _ = writeln!(message, "  {}. {}", i + 1, alt);
    }
    let _ = write!(message, "but found: '{found}'");
    message
}

// ============================================================================
// Alternative tables
// ============================================================================

const ALT_MAPPING: Alternative = Alternative(&[TokenName::Mapping]);
const ALT_FROM: Alternative = Alternative(&[TokenName::From]);
const ALT_TO: Alternative = Alternative(&[TokenName::To]);
const ALT_WHERE: Alternative = Alternative(&[TokenName::Where]);
const ALT_IDENTIFIER: Alternative = Alternative(&[TokenName::Identifier]);
const ALT_LBRACE: Alternative = Alternative(&[TokenName::LBrace]);
const ALT_RBRACE: Alternative = Alternative(&[TokenName::RBrace]);
const ALT_EOF: Alternative = Alternative(&[TokenName::Eof]);

/// Document start: the header is optional, so a mapping may also open
/// directly with its FROM clause.
const START_ALTS: [Alternative; 2] = [ALT_MAPPING, ALT_FROM];
const HEADER_TAIL_ALTS: [Alternative; 2] = [ALT_IDENTIFIER, ALT_FROM];
const SOURCE_TYPE_ALTS: [Alternative; 4] = [
    Alternative(&[TokenName::Sql]),
    Alternative(&[TokenName::Json]),
    Alternative(&[TokenName::GraphQl]),
    Alternative(&[TokenName::Csv]),
];

// ============================================================================
// Parse outcome
// ============================================================================

/// Everything produced by one parser run. Parsing is total: there is always
/// a tree, and all failures are in `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub tree: SyntaxTree,
    pub errors: Vec<SyntaxError>,
    pub expectations: Expectations,
}

/// Parse a token stream into a syntax tree.
///
/// Trivia tokens (comments, lexer error tokens) are filtered out first: the
/// parser recovers *around* malformed regions, and each lex error has
/// already been recorded by the lexer. Expectation indices refer to the
/// filtered stream (see [`TokenKind::is_trivia`]).
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    let stream: Vec<&Token> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
    let doc_end = stream.last().map(|t| t.span.end).unwrap_or(0);
    let mut tree = TreeBuilder::new(Span::new(0, doc_end));

    if stream.is_empty() {
        // Defensive: the lexer always emits Eof, so this only happens for a
        // hand-built token slice.
        return ParseOutcome {
            tree: tree.finish(),
            errors: Vec::new(),
            expectations: Expectations::default(),
        };
    }

    let mut parser = Parser {
        tokens: stream,
        pos: 0,
        prev_end: 0,
        errors: Vec::new(),
        expectations: Expectations::default(),
    };
    parser.document(&mut tree);

    ParseOutcome {
        tree: tree.finish(),
        errors: parser.errors,
        expectations: parser.expectations,
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Parser state. The token stream is trivia-filtered and always ends with
/// `Eof`.
struct Parser<'a> {
    tokens: Vec<&'a Token>,
    pos: usize,
    /// End offset of the last consumed token; closes interior node spans.
    prev_end: usize,
    errors: Vec<SyntaxError>,
    expectations: Expectations,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Token-stream helpers
    // ========================================================================

    fn peek(&self) -> &'a Token {
        self.tokens[self.pos]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.tokens[self.pos];
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Record the alternatives valid at the current token boundary.
    fn record(&mut self, alternatives: &[Alternative]) {
        self.expectations.record(self.pos, alternatives);
    }

    /// Record a diagnostic at the current token: the published expectation
    /// message, the found token's span, and the rule being parsed.
    fn report(&mut self, alternatives: &[Alternative], rule: &'static str) {
        let found = self.peek();
        self.errors.push(SyntaxError::syntax(
            expectation_message(alternatives, found.lexeme()),
            found.span,
            rule,
        ));
    }

    /// Panic-mode recovery: skip tokens until one of the `follow` keywords
    /// (a clause start that can still legally appear) or end of input.
    fn synchronize(&mut self, follow: &[KeywordId]) {
        while !self.is_at_end() {
            if let TokenKind::Keyword(k) = &self.peek().kind {
                if follow.contains(k) {
                    return;
                }
            }
            self.advance();
        }
    }

    /// True when further "missing clause" diagnostics would only restate an
    /// already-reported failure.
    fn suppress_at_end(&self) -> bool {
        self.is_at_end() && !self.errors.is_empty()
    }

    // ========================================================================
    // Grammar rules
    // ========================================================================

    fn document(&mut self, tree: &mut TreeBuilder) {
        self.record(&START_ALTS);
        if self.is_at_end() {
            // The empty document is a valid (empty) mapping.
            return;
        }

        let mut saw_header = false;
        let mut saw_name = false;
        if self.check_keyword(KeywordId::Mapping) {
            saw_name = self.mapping_decl(tree);
            saw_header = true;
        }

        // FROM clause (required). After an unnamed header an identifier is
        // still a valid alternative, and the reported set must match what
        // the expectations table recorded at this boundary.
        if !self.check_keyword(KeywordId::From) {
            let (alts, rule): (&[Alternative], &'static str) = if !saw_header {
                (&START_ALTS, "Mapping")
            } else if saw_name {
                (&[ALT_FROM], "FromClause")
            } else {
                (&HEADER_TAIL_ALTS, "FromClause")
            };
            if self.is_at_end() {
                if self.errors.is_empty() {
                    self.report(alts, rule);
                }
                return;
            }
            self.report(alts, rule);
            self.synchronize(&[KeywordId::From, KeywordId::To, KeywordId::Where]);
        }
        if self.check_keyword(KeywordId::From) {
            self.from_clause(tree);
        }

        // TO clause (required)
        self.record(&[ALT_TO]);
        if !self.check_keyword(KeywordId::To) {
            if self.is_at_end() {
                if self.errors.is_empty() {
                    self.report(&[ALT_TO], "ToClause");
                }
                return;
            }
            self.report(&[ALT_TO], "ToClause");
            self.synchronize(&[KeywordId::To, KeywordId::Where]);
        }
        if self.check_keyword(KeywordId::To) {
            self.to_clause(tree);
        }

        // WHERE clause (optional)
        self.record(&[ALT_WHERE]);
        let saw_where = if self.check_keyword(KeywordId::Where) {
            self.where_clause(tree);
            true
        } else {
            false
        };

        if !self.is_at_end() && !self.suppress_at_end() {
            if saw_where {
                self.report(&[ALT_EOF], "Mapping");
            } else {
                self.report(&[ALT_WHERE, ALT_EOF], "Mapping");
            }
            self.synchronize(&[]);
        }
    }

    /// Returns whether a mapping name was consumed.
    fn mapping_decl(&mut self, tree: &mut TreeBuilder) -> bool {
        let keyword = self.advance();
        let decl = tree.add(SyntaxTree::ROOT, NodeKind::MappingDecl, keyword.span);

        self.record(&HEADER_TAIL_ALTS);
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            let token = self.advance();
            tree.add(decl, NodeKind::Identifier(name), token.span);
            tree.set_span(decl, Span::new(keyword.span.start, token.span.end));
            return true;
        }
        false
    }

    fn from_clause(&mut self, tree: &mut TreeBuilder) {
        let keyword = self.advance();
        let clause = tree.add(SyntaxTree::ROOT, NodeKind::FromClause, keyword.span);

        self.record(&SOURCE_TYPE_ALTS);
        match &self.peek().kind {
            TokenKind::SourceTypeLit(st) => {
                let st = *st;
                let token = self.advance();
                tree.add(clause, NodeKind::SourceTypeRef(st), token.span);
            }
            _ => {
                self.report(&SOURCE_TYPE_ALTS, "FromClause");
                self.synchronize(&[KeywordId::To, KeywordId::Where]);
                tree.set_span(clause, Span::new(keyword.span.start, self.prev_end));
                return;
            }
        }

        self.block(tree, clause, "FromClause", &[KeywordId::To, KeywordId::Where]);
        tree.set_span(clause, Span::new(keyword.span.start, self.prev_end));
    }

    fn to_clause(&mut self, tree: &mut TreeBuilder) {
        let keyword = self.advance();
        let clause = tree.add(SyntaxTree::ROOT, NodeKind::ToClause, keyword.span);
        self.block(tree, clause, "ToClause", &[KeywordId::Where]);
        tree.set_span(clause, Span::new(keyword.span.start, self.prev_end));
    }

    fn where_clause(&mut self, tree: &mut TreeBuilder) {
        let keyword = self.advance();
        let clause = tree.add(SyntaxTree::ROOT, NodeKind::WhereClause, keyword.span);
        self.block(tree, clause, "WhereClause", &[]);
        tree.set_span(clause, Span::new(keyword.span.start, self.prev_end));
    }

    /// `{ ... }` with balanced nested braces. Content is opaque: string
    /// literals and symbol runs were already grouped by the lexer, so the
    /// scan only tracks brace depth.
    fn block(&mut self, tree: &mut TreeBuilder, parent: NodeId, rule: &'static str, follow: &[KeywordId]) {
        self.record(&[ALT_LBRACE]);
        if !self.peek().kind.is_punct(PunctId::LBrace) {
            if !self.suppress_at_end() {
                self.report(&[ALT_LBRACE], rule);
                self.synchronize(follow);
            }
            return;
        }

        let open = self.advance();
        let block = tree.add(parent, NodeKind::Block, open.span);
        let mut depth = 1usize;
        loop {
            self.record(&[ALT_RBRACE]);
            match &self.peek().kind {
                TokenKind::Punct(PunctId::LBrace) => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Punct(PunctId::RBrace) => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => {
                    self.report(&[ALT_RBRACE], "Block");
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }
        tree.set_span(block, Span::new(open.span.start, self.prev_end));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceType;
    use crate::lexer;

    fn parse_str(source: &str) -> ParseOutcome {
        parse(&lexer::lex(source).tokens)
    }

    fn rule_names(outcome: &ParseOutcome) -> Vec<&'static str> {
        outcome.tree.iter().map(|(_, n)| n.kind.rule_name()).collect()
    }

    const WELL_FORMED: &str = "MAPPING myMapping\nFROM SQL {\n  SELECT * FROM t\n}\nTO {\n  :s :p :o\n}\nWHERE {\n  BIND(1)\n}\n";

    #[test]
    fn test_well_formed_document_structure() {
        let outcome = parse_str(WELL_FORMED);
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        assert_eq!(
            rule_names(&outcome),
            vec![
                "Mapping",
                "MappingDecl",
                "Identifier",
                "FromClause",
                "SourceTypeRef",
                "Block",
                "ToClause",
                "Block",
                "WhereClause",
                "Block",
            ]
        );
        assert!(outcome.tree.is_well_formed());
    }

    #[test]
    fn test_clause_spans_cover_their_tokens() {
        let source = "MAPPING\nFROM SQL { x }\nTO { y }\nWHERE { z }";
        let outcome = parse_str(source);
        assert!(outcome.errors.is_empty());

        let decl = outcome
            .tree
            .iter()
            .find(|(_, n)| n.kind == NodeKind::MappingDecl)
            .map(|(_, n)| n.span)
            .unwrap();
        assert_eq!(decl, Span::new(0, 7));

        let from = outcome
            .tree
            .iter()
            .find(|(_, n)| n.kind == NodeKind::FromClause)
            .map(|(_, n)| n.span)
            .unwrap();
        assert_eq!(&source[from.start..from.end], "FROM SQL { x }");

        let source_type = outcome
            .tree
            .iter()
            .find(|(_, n)| matches!(n.kind, NodeKind::SourceTypeRef(_)))
            .map(|(_, n)| n.span)
            .unwrap();
        assert_eq!(&source[source_type.start..source_type.end], "SQL");
    }

    #[test]
    fn test_header_is_optional() {
        let outcome = parse_str("FROM JSON { a } TO { b }");
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        assert!(rule_names(&outcome).contains(&"FromClause"));
        assert!(!rule_names(&outcome).contains(&"MappingDecl"));
    }

    #[test]
    fn test_header_name_is_optional() {
        let outcome = parse_str("MAPPING\nFROM CSV { a }\nTO { b }");
        assert!(outcome.errors.is_empty());
        assert!(!rule_names(&outcome).contains(&"Identifier"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let outcome = parse_str("");
        assert!(outcome.errors.is_empty());
        assert_eq!(rule_names(&outcome), vec!["Mapping"]);
    }

    #[test]
    fn test_comment_only_document_is_valid() {
        let outcome = parse_str("# just a note\n");
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_missing_source_type_at_end_of_input() {
        // The comment is trivia, so the parser hits end of input right after
        // FROM. The diagnostic sits on the zero-width Eof span.
        let outcome = parse_str("FROM #foobar");
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(
            err.message,
            "Expecting: one of these possible Token sequences:\n  1. [Sql]\n  2. [Json]\n  3. [GraphQl]\n  4. [Csv]\nbut found: ''"
        );
        assert_eq!(err.rule, "FromClause");
        assert_eq!(err.span, Span::new(12, 12));
    }

    #[test]
    fn test_bad_source_type_reports_found_lexeme() {
        let outcome = parse_str("FROM PSQL { x } TO { y }");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.ends_with("but found: 'PSQL'"));
        assert_eq!(outcome.errors[0].rule, "FromClause");
    }

    #[test]
    fn test_recovery_resumes_at_later_clauses() {
        let outcome = parse_str("MAPPING\nFROM PSQL {\n  x\n}\nTO {\n  y\n}\nWHERE {\n  z\n}");
        assert_eq!(outcome.errors.len(), 1, "no cascaded errors: {:?}", outcome.errors);
        let names = rule_names(&outcome);
        assert!(names.contains(&"ToClause"));
        assert!(names.contains(&"WhereClause"));
        assert!(outcome.tree.is_well_formed());
    }

    #[test]
    fn test_missing_to_clause_reported_when_otherwise_clean() {
        let outcome = parse_str("FROM SQL { x }");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, "ToClause");
        assert!(outcome.errors[0].message.contains("1. [To]"));
        assert!(outcome.errors[0].message.ends_with("but found: ''"));
    }

    #[test]
    fn test_missing_from_clause_reported_for_named_header() {
        // With the name consumed, FROM is the only remaining alternative.
        let outcome = parse_str("MAPPING myMap");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, "FromClause");
        assert_eq!(
            outcome.errors[0].message,
            "Expecting: one of these possible Token sequences:\n  1. [From]\nbut found: ''"
        );
    }

    #[test]
    fn test_unnamed_header_reports_identifier_alternative() {
        // After a bare MAPPING keyword the name is still a valid next token,
        // so the message must list the same set the expectations table
        // records at that boundary.
        let outcome = parse_str("MAPPING 123\nFROM SQL { x }\nTO { y }");
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(err.rule, "FromClause");
        assert_eq!(
            err.message,
            "Expecting: one of these possible Token sequences:\n  1. [Identifier]\n  2. [From]\nbut found: '123'"
        );
        // Recovery still picks up the remaining clauses.
        assert!(rule_names(&outcome).contains(&"ToClause"));
    }

    #[test]
    fn test_bare_header_at_end_reports_identifier_alternative() {
        let outcome = parse_str("MAPPING");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            outcome.errors[0].message,
            "Expecting: one of these possible Token sequences:\n  1. [Identifier]\n  2. [From]\nbut found: ''"
        );
    }

    #[test]
    fn test_reported_alternatives_match_recorded_expectations() {
        // The failure after the bare header happens at filtered index 1; the
        // error's alternative set and the expectation set must agree.
        let outcome = parse_str("MAPPING 123");
        let alts = outcome.expectations.at(1);
        assert_eq!(
            outcome.errors[0].message,
            expectation_message(alts, "123")
        );
    }

    #[test]
    fn test_error_then_end_of_input_does_not_cascade() {
        // One failure inside FromClause, then the missing TO clause at end of
        // input stays silent.
        let outcome = parse_str("FROM");
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_garbage_document_start() {
        let outcome = parse_str("xyz FROM SQL { a } TO { b }");
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(err.rule, "Mapping");
        assert!(err.message.contains("1. [Mapping]"));
        assert!(err.message.contains("2. [From]"));
        assert!(err.message.ends_with("but found: 'xyz'"));
        // Recovery still picks up every clause.
        assert!(rule_names(&outcome).contains(&"ToClause"));
    }

    #[test]
    fn test_unterminated_block() {
        let outcome = parse_str("FROM SQL { SELECT 1");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, "Block");
        assert!(outcome.errors[0].message.contains("1. [RBrace]"));
    }

    #[test]
    fn test_nested_braces_in_block_body() {
        let outcome = parse_str("FROM JSON { a { b { c } } d } TO { e }");
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        // One Block per clause; nested braces stay opaque.
        let blocks = outcome
            .tree
            .iter()
            .filter(|(_, n)| n.kind == NodeKind::Block)
            .count();
        assert_eq!(blocks, 2);
    }

    #[test]
    fn test_trailing_content_after_where() {
        let outcome = parse_str("FROM SQL { a } TO { b } WHERE { c } garbage");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, "Mapping");
        assert!(outcome.errors[0].message.contains("1. [Eof]"));
        assert!(outcome.errors[0].message.ends_with("but found: 'garbage'"));
    }

    #[test]
    fn test_trailing_content_without_where() {
        let outcome = parse_str("FROM SQL { a } TO { b } garbage");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.contains("1. [Where]"));
        assert!(outcome.errors[0].message.contains("2. [Eof]"));
    }

    #[test]
    fn test_source_type_variants() {
        for (spelling, st) in [
            ("SQL", SourceType::Sql),
            ("JSON", SourceType::Json),
            ("GRAPHQL", SourceType::GraphQl),
            ("CSV", SourceType::Csv),
        ] {
            let outcome = parse_str(&format!("FROM {spelling} {{ a }} TO {{ b }}"));
            assert!(outcome.errors.is_empty());
            assert!(
                outcome
                    .tree
                    .iter()
                    .any(|(_, n)| n.kind == NodeKind::SourceTypeRef(st))
            );
        }
    }

    #[test]
    fn test_expectations_at_document_start() {
        let outcome = parse_str("");
        let alts = outcome.expectations.at(0);
        assert!(alts.contains(&ALT_MAPPING));
        assert!(alts.contains(&ALT_FROM));
    }

    #[test]
    fn test_expectations_after_from_keyword() {
        let outcome = parse_str("FROM ");
        // Token 0 is FROM, token 1 is Eof; the source-type alternatives are
        // recorded at the boundary after FROM.
        let alts = outcome.expectations.at(1);
        for alt in SOURCE_TYPE_ALTS {
            assert!(alts.contains(&alt), "missing {alt} in {alts:?}");
        }
    }

    #[test]
    fn test_expectation_message_format() {
        let message = expectation_message(&SOURCE_TYPE_ALTS, "");
        assert_eq!(
            message,
            "Expecting: one of these possible Token sequences:\n  1. [Sql]\n  2. [Json]\n  3. [GraphQl]\n  4. [Csv]\nbut found: ''"
        );
        let message = expectation_message(&[ALT_TO], "}");
        assert_eq!(
            message,
            "Expecting: one of these possible Token sequences:\n  1. [To]\nbut found: '}'"
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse_str(WELL_FORMED);
        let second = parse_str(WELL_FORMED);
        assert_eq!(first, second);

        let broken = "MAPPING FROM { TO WHERE";
        assert_eq!(parse_str(broken), parse_str(broken));
    }

    #[test]
    fn test_containment_invariant_on_broken_documents() {
        for source in [
            "FROM",
            "FROM PSQL {",
            "MAPPING FROM SQL TO {}",
            "} { FROM TO WHERE",
            "MAPPING m FROM SQL { 'x } TO { y }",
        ] {
            let outcome = parse_str(source);
            assert!(outcome.tree.is_well_formed(), "invariant broken for {source:?}");
        }
    }
}
