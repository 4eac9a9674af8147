//! Logical SQL tokenization.
//!
//! Page authors query page metadata with a deliberately small dialect:
//!
//! `select <col>[,<col>...] [where <pred> [(and|or) <pred>]...] [order by <col> [asc|desc][,...]] [limit <n>]`
//!
//! No joins, no sub-queries, no parentheses. The tokenizer is a single pass
//! finite-state machine whose states are the clauses of the statement; every
//! token it emits is a whole clause item (a column, a predicate, a sort
//! expression, a limit) rather than a lexeme.
//!
//! Modules:
//! - `keyword`    : Structural keywords, including the compound `order by`.
//! - `token_kind` : Clause a token belongs to.
//! - `token`      : Token struct pairing a `TokenKind` with trimmed text.
//! - `token_list` : Ordered parse output with per-clause accessors.
//! - `state`      : Clause states, quote tracking and pending text of one pass.
//! - `parser`     : `parse` and the compound keyword lookahead.
//!
//! Example:
//! ```rust
//! use pagesql::prelude::*;
//!
//! let tokens = parse("select title, words where words > 100 order by words desc limit 5").unwrap();
//! assert_eq!(tokens.column_identifiers(), ["title", "words"]);
//! assert_eq!(tokens.predicates(), ["words > 100"]);
//! assert_eq!(tokens.order_bys(), ["words desc"]);
//! assert_eq!(tokens.limit(), Some("5"));
//! ```

pub mod keyword;
pub mod parser;
pub mod state;
pub mod token;
pub mod token_kind;
pub mod token_list;


pub use keyword::Keyword;
pub use parser::{parse, try_consume_compound_keyword};
pub use state::State;
pub use token::Token;
pub use token_kind::TokenKind;
pub use token_list::{Condition, TokenList};

/// Convenience prelude re‑exporting the most commonly used items.
///
/// Import with:
/// `use pagesql::prelude::*;`
pub mod prelude {
    pub use super::{Condition, Keyword, Token, TokenKind, TokenList, parse};
}
