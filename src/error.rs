use crate::sql::{keyword::Keyword, state::State};
use sqlparser::parser::ParserError;

/// Malformed logical SQL. Offsets are counted in characters from the start of
/// the trimmed statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty statement")]
    EmptyStatement,

    #[error("Statement must start with `select`, found `{found}` at position {position}")]
    MissingSelect { found: String, position: usize },

    #[error("Unexpected `{keyword}` at position {position} in the {state} clause")]
    UnexpectedKeyword {
        keyword: Keyword,
        state: State,
        position: usize,
    },

    #[error("Unexpected `,` at position {position} in the {state} clause")]
    UnexpectedComma { state: State, position: usize },

    #[error("Expected a {state} value before position {position}")]
    EmptyItem { state: State, position: usize },

    #[error("Unterminated {quote} quote opened at position {position}: {context}")]
    UnterminatedQuote {
        quote: char,
        position: usize,
        context: String,
    },

    #[error("Internal parser error: {0}")]
    Internal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid logical statement: {0}")]
    Parse(ParseError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(ParserError),

    #[error("Invalid physical statement: {0}")]
    InvalidPhysical(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

/// Parser faults are not the caller's input being wrong; keep them apart.
impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        match value {
            ParseError::Internal(message) => Error::Internal(message),
            invalid => Error::Parse(invalid),
        }
    }
}

impl From<ParserError> for Error {
    fn from(value: ParserError) -> Self {
        Error::InvalidQuery(value)
    }
}

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_faults_are_internal_errors() {
        let err = Error::from(ParseError::Internal("no token can be flushed".to_string()));
        assert!(matches!(
            err,
            Error::Internal(ref message) if message == "no token can be flushed"
        ));
        assert_eq!(err.to_string(), "Internal error: no token can be flushed");
    }

    #[test]
    fn invalid_input_stays_a_parse_error() {
        let err = Error::from(ParseError::EmptyStatement);
        assert!(matches!(err, Error::Parse(ParseError::EmptyStatement)));
    }
}
