use crate::sql::{
    keyword::Keyword,
    state::{Pending, Quote, State},
    token::Token,
    token_kind::TokenKind,
    token_list::TokenList,
};
use crate::{ParseError, trace, warn};

/// Tokenize a logical statement into clause tokens.
///
/// Grammar:
/// `select <col>[,<col>...] [where <pred> [(and|or) <pred>]...] [order by <col> [asc|desc][,...]] [limit <n>]`
///
/// Behavior:
/// - Scans the trimmed input one `char` at a time (multibyte safe).
/// - Keywords are matched case‑insensitively and dropped; `and` / `or` are kept
///   as `LogicalOperator` tokens with their lowercase text.
/// - Quoted text (`'…'` or `"…"`) is copied verbatim, quotes included; only the
///   opening character closes it, so `"it's"` is one value.
/// - Words of a clause item are joined with single spaces and trimmed.
///
/// Every rejected statement is logged at `warn` under the `pagesql::parser`
/// target before the error is returned; no partial token list escapes.
pub fn parse(sql: &str) -> Result<TokenList, ParseError> {
    let result = Lexer::default().run(sql);
    if let Err(err) = &result {
        warn!(target: "pagesql::parser", sql, %err, "rejected logical statement");
    }
    result
}

/// Recognize a two-word keyword starting at `position`.
///
/// Reads the run of non-blank characters at `position`, skips any whitespace,
/// reads the next run and compares both (case‑insensitively) with
/// `Keyword::COMPOUND`. Runs also stop at `,` so `order by,` still matches.
///
/// Returns the keyword and the offset just past its second word.
pub fn try_consume_compound_keyword(input: &[char], position: usize) -> Option<(Keyword, usize)> {
    fn run(input: &[char], from: usize) -> (String, usize) {
        let end = input[from..]
            .iter()
            .position(|c| c.is_whitespace() || *c == ',')
            .map_or(input.len(), |len| from + len);
        (input[from..end].iter().collect::<String>().to_lowercase(), end)
    }

    if position >= input.len() {
        return None;
    }
    let (first, end) = run(input, position);
    let (_, second_word, keyword) = Keyword::COMPOUND
        .into_iter()
        .find(|(first_word, _, _)| *first_word == first)?;

    let second_start = input[end..]
        .iter()
        .position(|c| !c.is_whitespace())
        .map(|skip| end + skip)?;
    if second_start == end {
        return None;
    }
    let (second, next) = run(input, second_start);
    (second == second_word).then_some((keyword, next))
}

/// Scratch space for one `parse` call; consumed by `run`.
#[derive(Debug, Default)]
struct Lexer {
    state: State,
    quote: Option<Quote>,
    pending: Pending,
    tokens: Vec<Token>,
}

impl Lexer {
    fn run(mut self, sql: &str) -> Result<TokenList, ParseError> {
        let input = sql.trim().chars().collect::<Vec<_>>();
        if input.is_empty() {
            return Err(ParseError::EmptyStatement);
        }

        let mut position = 0;
        while let Some(&character) = input.get(position) {
            position = self.step(&input, position, character)?;
        }
        self.finish(&input)
    }

    /// Consume the character at `position`, returning where to resume.
    fn step(
        &mut self,
        input: &[char],
        position: usize,
        character: char,
    ) -> Result<usize, ParseError> {
        if let Some(quote) = self.quote {
            self.pending.push(character, position);
            if quote.closes(character) {
                self.state = quote.previous;
                self.quote = None;
            }
            return Ok(position + 1);
        }

        match character {
            c if c.is_whitespace() => {
                let resume = self.end_word(input)?;
                Ok(resume.unwrap_or(position + 1))
            }
            ',' => {
                self.end_word(input)?;
                self.comma(position)?;
                Ok(position + 1)
            }
            c if Quote::is_quote(c) => {
                if self.state == State::Start {
                    self.end_word(input)?;
                }
                if self.state == State::Start {
                    return Err(ParseError::MissingSelect {
                        found: c.to_string(),
                        position,
                    });
                }
                self.pending.push(c, position);
                self.quote = Some(Quote {
                    character: c,
                    position,
                    previous: self.state,
                });
                self.state = State::InQuote;
                Ok(position + 1)
            }
            c => {
                self.pending.push(c, position);
                Ok(position + 1)
            }
        }
    }

    /// Classify the word that just ended.
    ///
    /// Returns the resume offset when a compound keyword consumed input beyond
    /// the word itself.
    fn end_word(&mut self, input: &[char]) -> Result<Option<usize>, ParseError> {
        let Some((word, start)) = self.pending.take_word() else {
            return Ok(None);
        };

        if let Some((keyword, next)) = try_consume_compound_keyword(input, start) {
            self.keyword(keyword, start)?;
            return Ok(Some(next));
        }

        match Keyword::from_lower(&word.to_lowercase()) {
            Some(keyword) => self.keyword(keyword, start)?,
            None => self.data(&word, start)?,
        }
        Ok(None)
    }

    fn keyword(&mut self, keyword: Keyword, position: usize) -> Result<(), ParseError> {
        use State::*;
        match (keyword, self.state) {
            (Keyword::Select, Start) => self.state = ColumnIdentifier,
            (_, Start) => {
                return Err(ParseError::MissingSelect {
                    found: keyword.to_string(),
                    position,
                });
            }
            (Keyword::Where, ColumnIdentifier) => self.transition(Predicate, position)?,
            (keyword, Predicate) if keyword.is_logical_operator() => {
                self.flush(position)?;
                self.tokens
                    .push(Token::new(TokenKind::LogicalOperator, keyword.as_str()));
            }
            (Keyword::OrderBy, ColumnIdentifier | Predicate) => {
                self.transition(OrderBy, position)?
            }
            (Keyword::Limit, ColumnIdentifier | Predicate | OrderBy) => {
                self.transition(Limit, position)?
            }
            (keyword, state) => {
                return Err(ParseError::UnexpectedKeyword {
                    keyword,
                    state,
                    position,
                });
            }
        }
        Ok(())
    }

    fn data(&mut self, word: &str, position: usize) -> Result<(), ParseError> {
        match self.state {
            State::Start => Err(ParseError::MissingSelect {
                found: word.to_string(),
                position,
            }),
            State::InQuote => Err(ParseError::Internal(format!(
                "word `{word}` at position {position} ended inside a quote"
            ))),
            _ => {
                self.pending.append(word);
                Ok(())
            }
        }
    }

    fn comma(&mut self, position: usize) -> Result<(), ParseError> {
        match self.state.token_kind() {
            Some(kind) if kind.is_comma_separated() => self.flush(position),
            _ => Err(ParseError::UnexpectedComma {
                state: self.state,
                position,
            }),
        }
    }

    /// Flush the item of the current clause, then enter `next`.
    fn transition(&mut self, next: State, position: usize) -> Result<(), ParseError> {
        self.flush(position)?;
        trace!(from = %self.state, to = %next, "clause");
        self.state = next;
        Ok(())
    }

    fn flush(&mut self, position: usize) -> Result<(), ParseError> {
        let kind = self.state.token_kind().ok_or_else(|| {
            ParseError::Internal(format!("no token can be flushed in the {} state", self.state))
        })?;
        let text = self.pending.take_token();
        if text.is_empty() {
            return Err(ParseError::EmptyItem {
                state: self.state,
                position,
            });
        }
        trace!(%kind, text, "token");
        self.tokens.push(Token::new(kind, text));
        Ok(())
    }

    fn finish(mut self, input: &[char]) -> Result<TokenList, ParseError> {
        if let Some(quote) = self.quote {
            return Err(ParseError::UnterminatedQuote {
                quote: quote.character,
                position: quote.position,
                context: input[quote.position..].iter().collect(),
            });
        }

        self.end_word(input)?;
        if self.state == State::Start {
            return Err(ParseError::MissingSelect {
                found: input.iter().collect(),
                position: 0,
            });
        }
        self.flush(input.len())?;
        Ok(TokenList::new(self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn compound_keyword_consumes_both_words() {
        let input = chars("order by a");
        assert_eq!(
            try_consume_compound_keyword(&input, 0),
            Some((Keyword::OrderBy, 8))
        );
    }

    #[test]
    fn compound_keyword_skips_extra_whitespace_and_ignores_case() {
        let input = chars("x ORDER \t  By a");
        assert_eq!(
            try_consume_compound_keyword(&input, 2),
            Some((Keyword::OrderBy, 13))
        );
    }

    #[test]
    fn compound_keyword_stops_at_comma() {
        let input = chars("order by,a");
        assert_eq!(
            try_consume_compound_keyword(&input, 0),
            Some((Keyword::OrderBy, 8))
        );
    }

    #[test]
    fn compound_keyword_requires_second_word() {
        assert_eq!(try_consume_compound_keyword(&chars("order"), 0), None);
        assert_eq!(try_consume_compound_keyword(&chars("order  "), 0), None);
        assert_eq!(try_consume_compound_keyword(&chars("order bye"), 0), None);
        assert_eq!(try_consume_compound_keyword(&chars("orders by"), 0), None);
        assert_eq!(try_consume_compound_keyword(&chars("order,by"), 0), None);
        assert_eq!(try_consume_compound_keyword(&chars("ab"), 5), None);
    }

    #[test]
    fn fresh_state_per_call() {
        let first = parse("select a where a = 'x").unwrap_err();
        assert!(matches!(first, ParseError::UnterminatedQuote { .. }));
        let second = parse("select b").expect("previous failure must not leak");
        assert_eq!(second.column_identifiers(), ["b"]);
    }
}
