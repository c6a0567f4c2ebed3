//! Rules shared by quoted and heredoc templates, and the quoted-string
//! rule-set itself.

use super::{LexErrorKind, finish};
use crate::mode::{Mode, ModeStack};
use crate::source::Cursor;
use crate::token::{Location, Token, TokenKind};

/// Single-character escapes accepted after a backslash.
const SIMPLE_ESCAPES: &[char] = &['n', 'r', 't', '"', '\\'];

pub(super) fn scan_quoted<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    first: char,
) -> Token<'a> {
    let start = cursor.location();

    if let Some(token) = read_introducer(cursor, modes, start) {
        return token;
    }

    match first {
        '"' => {
            cursor.bump();
            modes.pop();
            finish(cursor, TokenKind::CloseQuote, start)
        }
        '\n' | '\r' if cursor.at_newline() => {
            cursor.eat_newline();
            finish(
                cursor,
                TokenKind::Error(LexErrorKind::NewlineInString),
                start,
            )
        }
        '\\' => match escape_len(cursor.rest()) {
            Ok(_) => read_quoted_literal(cursor, start),
            Err(len) => {
                cursor.bump_bytes(len);
                finish(cursor, TokenKind::Error(LexErrorKind::InvalidEscape), start)
            }
        },
        _ => read_quoted_literal(cursor, start),
    }
}

/// `${`, `%{`, or their `~` strip-marker forms. Pushes an interpolation.
pub(super) fn read_introducer<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    start: Location,
) -> Option<Token<'a>> {
    let kind = match (cursor.peek(0), cursor.peek(1)) {
        (Some('$'), Some('{')) => TokenKind::TemplateInterp,
        (Some('%'), Some('{')) => TokenKind::TemplateControl,
        _ => return None,
    };
    cursor.bump();
    cursor.bump();
    if cursor.peek(0) == Some('~') {
        cursor.bump();
    }
    modes.push(Mode::Interpolation { brace_depth: 0 }, start);
    Some(finish(cursor, kind, start))
}

/// Length in bytes of a `$${` or `%%{` literal escape at the cursor.
pub(super) fn literal_escape_len(cursor: &Cursor<'_>) -> Option<usize> {
    match (cursor.peek(0), cursor.peek(1), cursor.peek(2)) {
        (Some('$'), Some('$'), Some('{')) | (Some('%'), Some('%'), Some('{')) => Some(3),
        _ => None,
    }
}

/// Whether an interpolation or directive starts at the cursor.
pub(super) fn at_introducer(cursor: &Cursor<'_>) -> bool {
    matches!(
        (cursor.peek(0), cursor.peek(1)),
        (Some('$' | '%'), Some('{'))
    )
}

/// Literal text up to a quote, line break, introducer, or invalid escape.
fn read_quoted_literal<'a>(cursor: &mut Cursor<'a>, start: Location) -> Token<'a> {
    loop {
        match cursor.peek(0) {
            None | Some('"') => break,
            Some('\\') => match escape_len(cursor.rest()) {
                Ok(len) => cursor.bump_bytes(len),
                Err(_) => break,
            },
            Some(_) if cursor.at_newline() || at_introducer(cursor) => break,
            Some(_) => match literal_escape_len(cursor) {
                Some(len) => cursor.bump_bytes(len),
                None => {
                    cursor.bump();
                }
            },
        }
    }
    finish(cursor, TokenKind::TemplateLiteral, start)
}

/// Validate the escape sequence at the start of `rest`, which begins
/// with a backslash.
///
/// Returns the byte length of a valid sequence, or of the bad prefix that
/// should be reported. A backslash before a line break is reported alone so
/// the line break is handled by the string rules.
fn escape_len(rest: &str) -> Result<usize, usize> {
    let mut chars = rest.chars().skip(1);
    match chars.next() {
        None | Some('\n' | '\r') => Err(1),
        Some(c) if SIMPLE_ESCAPES.contains(&c) => Ok(2),
        Some(c @ ('u' | 'U')) => {
            let want = if c == 'u' { 4 } else { 8 };
            let digits = &rest[2..];
            let found = digits
                .chars()
                .take(want)
                .take_while(char::is_ascii_hexdigit)
                .count();
            if found < want {
                return Err(2 + found);
            }
            let valid = u32::from_str_radix(&digits[..want], 16)
                .ok()
                .and_then(char::from_u32)
                .is_some();
            if valid { Ok(2 + want) } else { Err(2 + want) }
        }
        Some(c) => Err(1 + c.len_utf8()),
    }
}
