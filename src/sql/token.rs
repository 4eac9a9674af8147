//! Token model pairing a `TokenKind` with its trimmed text.
//!
//! A `Token` is immutable once built: the parser creates it when a clause item
//! is complete and pushes it into the `TokenList` that owns it.
use crate::sql::token_kind::TokenKind;

/// A classified fragment of a logical statement.
///
/// Invariants:
/// - `text` is trimmed
/// - `text` is never empty for tokens emitted by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Construct a new token, trimming the surrounding whitespace of `text`.
    pub fn new(kind: TokenKind, text: impl AsRef<str>) -> Self {
        Self {
            kind,
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
