//! Completion snippet library
//!
//! Completion items keyed by the leading token of a grammar alternative.
//! The bundled library is embedded at compile time from `snippets.json`;
//! editors with custom snippet sets can load their own with
//! [`SnippetLibrary::from_json`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use sms2_syntax::lexer::TokenName;

use crate::protocol::CompletionItem;

static BUILTIN: LazyLock<SnippetLibrary> = LazyLock::new(|| {
    SnippetLibrary::from_json(include_str!("snippets.json"))
        .expect("INVARIANT: bundled snippets.json is valid snippet-library JSON")
});

/// Completion items grouped by token name.
#[derive(Debug, Clone, Default)]
pub struct SnippetLibrary {
    entries: BTreeMap<String, Vec<CompletionItem>>,
}

impl SnippetLibrary {
    /// Parse a library from its JSON form: an object mapping token names
    /// (`"Mapping"`, `"From"`, ...) to arrays of completion items.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// The library compiled into the binary.
    pub fn builtin() -> &'static SnippetLibrary {
        &BUILTIN
    }

    /// Items offered where `token` would be a valid next token.
    pub fn for_token(&self, token: TokenName) -> &[CompletionItem] {
        self.entries
            .get(token.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
