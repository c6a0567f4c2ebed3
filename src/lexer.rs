use std::fmt;

use tracing::debug;

use crate::mode::{ModeKind, ModeStack};
use crate::source::Cursor;
use crate::token::{Location, Token, TokenKind};

mod heredoc;
mod interpolation;
mod structural;
mod template;

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token in the active mode.
    UnrecognizedCharacter(char),
    /// Backslash escape not understood inside a quoted string.
    InvalidEscape,
    /// Number with a dangling `.` or exponent.
    MalformedNumber,
    /// `/*` with no closing `*/`.
    UnterminatedComment,
    /// Raw line break inside a quoted string.
    NewlineInString,
    /// String, heredoc or template sequence still open at end of input.
    Unterminated(ModeKind),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCharacter(ch) => {
                write!(f, "unrecognized character: {ch:?}")
            }
            Self::InvalidEscape => write!(f, "invalid escape sequence"),
            Self::MalformedNumber => write!(f, "malformed number"),
            Self::UnterminatedComment => write!(f, "unterminated block comment"),
            Self::NewlineInString => {
                write!(f, "quoted string cannot span lines")
            }
            Self::Unterminated(kind) => {
                write!(f, "unterminated {kind} starting here")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", location.line, location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
}

/// Tokenize an HCL source string.
///
/// Never fails: malformed input shows up as error tokens, and the last
/// token is always [`TokenKind::Eof`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    debug!(
        tokens = tokens.len(),
        errors = tokens.iter().filter(|t| t.kind.is_error()).count(),
        "tokenized input"
    );
    tokens
}

/// Tokenize an HCL source string, failing on the first lexical error.
///
/// # Errors
///
/// Returns `LexError` for the first error token, or for the outermost
/// construct left open at end of input.
pub fn tokenize_strict(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let tokens = tokenize(input);
    match tokens.iter().find_map(|t| t.errors().into_iter().next()) {
        Some(err) => Err(err),
        None => Ok(tokens),
    }
}

/// Every error signalled by a token sequence, in source order of the
/// tokens that carry them.
#[must_use]
pub fn collect_errors(tokens: &[Token<'_>]) -> Vec<LexError> {
    tokens.iter().flat_map(Token::errors).collect()
}

/// Pull-based HCL lexer.
///
/// Each call to [`Lexer::next_token`] consumes at least one character
/// until input runs out, then keeps returning end-of-file tokens.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    modes: ModeStack<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            modes: ModeStack::new(),
            done: false,
        }
    }

    /// Current mode stack, bottom first.
    #[must_use]
    pub const fn modes(&self) -> &ModeStack<'a> {
        &self.modes
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        let Some(first) = self.cursor.peek(0) else {
            return self.eof();
        };

        let cursor = &mut self.cursor;
        let modes = &mut self.modes;
        let token = match modes.current().kind() {
            ModeKind::Structural => structural::scan(cursor, modes, first),
            ModeKind::QuotedTemplate => template::scan_quoted(cursor, modes, first),
            ModeKind::HeredocTemplate => heredoc::scan(cursor, modes, first),
            ModeKind::Interpolation => interpolation::scan(cursor, modes, first),
        };
        debug_assert!(
            token.end.offset > token.start.offset,
            "lexer rule consumed no input"
        );

        if let TokenKind::Error(kind) = &token.kind {
            debug!(
                error = %kind,
                line = token.start.line,
                column = token.start.column,
                "lexical error"
            );
        }
        token
    }

    fn eof(&self) -> Token<'a> {
        let here = self.cursor.location();
        Token {
            kind: TokenKind::Eof {
                unterminated: self.modes.open_constructs(),
            },
            text: "",
            start: here,
            end: here,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to and including the first end-of-file token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.is_eof();
        Some(token)
    }
}

/// Build a token spanning from `start` to the cursor.
fn finish<'a>(cursor: &Cursor<'a>, kind: TokenKind, start: Location) -> Token<'a> {
    Token {
        kind,
        text: cursor.slice_from(start.offset),
        start,
        end: cursor.location(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    fn clean_eof() -> TokenKind {
        TokenKind::Eof {
            unterminated: Vec::new(),
        }
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![clean_eof()]);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        let first = lexer.next_token();
        let second = lexer.next_token();
        assert!(first.is_eof());
        assert_eq!(first, second);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut lexer = Lexer::new("a b");
        let collected: Vec<_> = lexer.by_ref().collect();
        assert_eq!(collected.len(), 4);
        assert!(lexer.next().is_none());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn attribute_with_string() {
        assert_eq!(
            kinds("foo = \"bar\""),
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::OpenQuote,
                TokenKind::TemplateLiteral,
                TokenKind::CloseQuote,
                clean_eof(),
            ]
        );
    }

    #[test]
    fn modes_balance_after_interpolation() {
        let mut lexer = Lexer::new("x = \"a${b}c\"");
        while !lexer.next_token().is_eof() {}
        assert!(lexer.modes().is_balanced());
    }

    #[test]
    fn strict_reports_first_error() {
        let err = tokenize_strict("a = 1 @ 2 @").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('@'));
        assert_eq!(err.location.column, 7);
    }

    #[test]
    fn strict_accepts_clean_input() {
        let tokens = tokenize_strict("a = [1, 2]\n").expect("should tokenize");
        assert!(tokens.last().is_some_and(Token::is_eof));
    }

    #[test]
    fn collect_errors_gathers_every_error() {
        let tokens = tokenize("a = @\nb = \"x\\q\" $ \"open");
        let errors = collect_errors(&tokens);
        let found: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            found,
            vec![
                LexErrorKind::UnrecognizedCharacter('@'),
                LexErrorKind::InvalidEscape,
                LexErrorKind::UnrecognizedCharacter('$'),
                LexErrorKind::Unterminated(ModeKind::QuotedTemplate),
            ]
        );
    }

    #[test]
    fn error_display_includes_location() {
        let err = tokenize_strict("a = 1\nb = \"open").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unterminated string starting here at line 2, column 5"
        );
    }
}
