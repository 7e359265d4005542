//! Syntax frontend for SMS2 (Stardog Mapping Syntax v2): lexer, parser, AST, syntax errors.
//!
//! SMS2 documents bind relational/JSON/GraphQL/CSV data sources to graph output
//! via `MAPPING`/`FROM`/`TO`/`WHERE` clauses. This crate turns raw document text
//! into a position-indexed tree that editor tooling can query, and it keeps
//! working on broken documents: lexing and parsing are total, and every failure
//! becomes a [`diagnostics::SyntaxError`] instead of an aborted analysis.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does no semantic validation
//!   of clause bodies and performs no I/O.
//! - Spans are byte offsets ([`ast::Span`]); conversion to editor line/character
//!   coordinates lives in [`position`].
//!
//! ## Examples
//! ```rust
//! use sms2_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("MAPPING\nFROM SQL { t } TO { u } WHERE { v }\n");
//! let outcome = parser::parse(&lexed.tokens);
//! assert!(outcome.errors.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod position;
