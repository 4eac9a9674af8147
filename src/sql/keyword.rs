//! Structural keywords of the logical SQL dialect.
//!
//! Keywords only drive state transitions of the tokenizer; their text never
//! ends up inside a token (except `and`/`or`, which become logical operator
//! tokens). Anything that is not listed here is data.
//!
//! Design notes:
//! - Single-word keywords are matched case‑insensitively via `from_lower` using
//!   a pre‑lower‑cased string slice.
//! - Two-word keywords (`order by`) are listed in `COMPOUND` and recognised by
//!   the parser's lookahead, never by `from_lower`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Where,
    And,
    Or,
    OrderBy,
    Limit,
}

impl Keyword {
    /// Keywords made of two words, as `(first, second, keyword)`.
    pub const COMPOUND: [(&'static str, &'static str, Self); 1] =
        [("order", "by", Keyword::OrderBy)];

    /// Attempt to classify a *lower‑cased* word slice into a single-word `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    ///
    /// NOTE: The caller is responsible for lower‑casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "where" => Where,
            "and" => And,
            "or" => Or,
            "limit" => Limit,
            _ => return None,
        };
        Some(kw)
    }

    /// True for the keywords chaining two predicates.
    pub const fn is_logical_operator(self) -> bool {
        matches!(self, Keyword::And | Keyword::Or)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            Where => "where",
            And => "and",
            Or => "or",
            OrderBy => "order by",
            Limit => "limit",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_single_word_keywords() {
        for w in ["select", "where", "and", "or", "limit"] {
            assert!(Keyword::from_lower(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["order", "by", "from", "asc", "desc", "selected", "SELECT"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn only_and_or_are_logical_operators() {
        assert!(Keyword::And.is_logical_operator());
        assert!(Keyword::Or.is_logical_operator());
        assert!(!Keyword::Where.is_logical_operator());
        assert!(!Keyword::OrderBy.is_logical_operator());
    }

    #[test]
    fn display_matches_as_str() {
        for kw in [
            Keyword::Select,
            Keyword::Where,
            Keyword::And,
            Keyword::Or,
            Keyword::OrderBy,
            Keyword::Limit,
        ] {
            assert_eq!(kw.to_string(), kw.as_str());
        }
    }
}
