//! Token kind definitions for the logical SQL tokenizer.
//!
//! Unlike a lexical tokenizer, each kind names the *clause* a token belongs to:
//! a whole predicate such as `a = 'x'` is a single `Predicate` token.

use derive_more::Display;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// A column of the projection list.
    #[display("identifier")]
    Identifier,
    /// One condition of the `where` clause.
    #[display("predicate")]
    Predicate,
    /// `and` / `or` between two predicates.
    #[display("logicalOperator")]
    LogicalOperator,
    /// One sort expression, direction included.
    #[display("orderBy")]
    OrderBy,
    #[display("limit")]
    Limit,
}

impl TokenKind {
    /// True if tokens of this kind are separated by commas.
    pub fn is_comma_separated(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::OrderBy)
    }
}
