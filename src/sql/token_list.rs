//! Ordered output of one `parse` call, with per-clause accessors.
use crate::sql::{token::Token, token_kind::TokenKind};

/// A predicate together with the logical operator written before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    /// `None` for the first predicate of the `where` clause.
    pub operator: Option<&'a str>,
    pub predicate: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn texts(&self, kind: TokenKind) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.is_kind(kind))
            .map(Token::text)
            .collect()
    }

    pub fn column_identifiers(&self) -> Vec<&str> {
        self.texts(TokenKind::Identifier)
    }

    pub fn predicates(&self) -> Vec<&str> {
        self.texts(TokenKind::Predicate)
    }

    /// `and` / `or`, lowercased, in order of appearance.
    pub fn logical_operators(&self) -> Vec<&str> {
        self.texts(TokenKind::LogicalOperator)
    }

    pub fn order_bys(&self) -> Vec<&str> {
        self.texts(TokenKind::OrderBy)
    }

    pub fn limit(&self) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.is_kind(TokenKind::Limit))
            .map(Token::text)
    }

    /// Predicates paired with the operator that precedes each of them.
    pub fn conditions(&self) -> Vec<Condition<'_>> {
        let mut out = Vec::new();
        let mut operator = None;
        for token in &self.tokens {
            match token.kind {
                TokenKind::LogicalOperator => operator = Some(token.text()),
                TokenKind::Predicate => out.push(Condition {
                    operator: operator.take(),
                    predicate: token.text(),
                }),
                _ => {}
            }
        }
        out
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> TokenList {
        vec![
            Token::new(TokenKind::Identifier, "title"),
            Token::new(TokenKind::Identifier, "words"),
            Token::new(TokenKind::Predicate, "words > 10"),
            Token::new(TokenKind::LogicalOperator, "or"),
            Token::new(TokenKind::Predicate, "title = 'home'"),
            Token::new(TokenKind::OrderBy, "words desc"),
            Token::new(TokenKind::Limit, "5"),
        ]
        .into()
    }

    #[test]
    fn accessors_filter_by_kind_in_order() {
        let list = list();
        assert_eq!(list.len(), 7);
        assert_eq!(list.column_identifiers(), ["title", "words"]);
        assert_eq!(list.predicates(), ["words > 10", "title = 'home'"]);
        assert_eq!(list.logical_operators(), ["or"]);
        assert_eq!(list.order_bys(), ["words desc"]);
        assert_eq!(list.limit(), Some("5"));
    }

    #[test]
    fn conditions_carry_preceding_operator() {
        let list = list();
        assert_eq!(
            list.conditions(),
            [
                Condition {
                    operator: None,
                    predicate: "words > 10"
                },
                Condition {
                    operator: Some("or"),
                    predicate: "title = 'home'"
                },
            ]
        );
    }

    #[test]
    fn empty_list_has_nothing() {
        let list = TokenList::default();
        assert!(list.is_empty());
        assert!(list.column_identifiers().is_empty());
        assert!(list.conditions().is_empty());
        assert_eq!(list.limit(), None);
    }
}
