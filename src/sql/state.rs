//! Mutable state of a single tokenizer pass.
use crate::sql::token_kind::TokenKind;
use derive_more::Display;

/// Clause context of the tokenizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum State {
    #[default]
    #[display("start")]
    Start,
    #[display("column identifier")]
    ColumnIdentifier,
    #[display("quoted value")]
    InQuote,
    #[display("order by")]
    OrderBy,
    #[display("predicate")]
    Predicate,
    #[display("limit")]
    Limit,
}

impl State {
    /// Kind of the token flushed while in this state.
    ///
    /// `Start` and `InQuote` never own a token.
    pub const fn token_kind(self) -> Option<TokenKind> {
        match self {
            State::ColumnIdentifier => Some(TokenKind::Identifier),
            State::Predicate => Some(TokenKind::Predicate),
            State::OrderBy => Some(TokenKind::OrderBy),
            State::Limit => Some(TokenKind::Limit),
            State::Start | State::InQuote => None,
        }
    }
}

/// The quote currently open, kept to match the closing character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub character: char,
    pub position: usize,
    /// State to return to once the quote closes.
    pub previous: State,
}

impl Quote {
    pub fn is_quote(character: char) -> bool {
        matches!(character, '\'' | '"')
    }

    pub fn closes(&self, character: char) -> bool {
        self.character == character
    }
}

/// Text collected since the last flush.
///
/// `word` holds the characters since the last word boundary; `token` joins the
/// words of the item being built, one space apart.
#[derive(Debug, Default)]
pub struct Pending {
    word: String,
    word_start: Option<usize>,
    token: String,
}

impl Pending {
    pub fn push(&mut self, character: char, position: usize) {
        self.word_start.get_or_insert(position);
        self.word.push(character);
    }

    /// Take the current word and the offset of its first character.
    pub fn take_word(&mut self) -> Option<(String, usize)> {
        let start = self.word_start.take()?;
        Some((std::mem::take(&mut self.word), start))
    }

    pub fn append(&mut self, word: &str) {
        self.token.push_str(word);
        self.token.push(' ');
    }

    /// Take the token built so far, trimmed.
    pub fn take_token(&mut self) -> String {
        let token = self.token.trim().to_string();
        self.token.clear();
        token
    }
}
