#![forbid(unsafe_code)]
//! SMS2 Language Tools
//!
//! Language intelligence for Stardog Mapping Syntax 2 (SMS2): total lexing
//! and parsing with error recovery, diagnostics, hover, and
//! grammar-state-driven completion, plus a CLI front end. The syntax layer
//! (lexer, parser, AST, positions) lives in the `sms2_syntax` crate; this
//! crate adds document analysis and the editor-facing surfaces.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod analysis;
pub mod cli;
pub mod diagnostics;
pub mod protocol;

pub use sms2_syntax as syntax;

pub use analysis::{Analysis, DocumentStore};
pub use analysis::completion::complete;
pub use analysis::hover::hover;
pub use analysis::snippets::SnippetLibrary;
pub use diagnostics::collect;
pub use protocol::{CompletionItem, Diagnostic, Hover, InsertText, Severity};
