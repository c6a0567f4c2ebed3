//! Rules for body and expression syntax.
//!
//! Also used for the expression inside template sequences, which only
//! adds its own brace handling on top.

use super::{LexErrorKind, finish};
use crate::mode::{Heredoc, Mode, ModeStack};
use crate::source::Cursor;
use crate::token::{Location, Token, TokenKind};

pub(super) fn scan<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    first: char,
) -> Token<'a> {
    let start = cursor.location();

    if first == '<' && cursor.peek(1) == Some('<') {
        if let Some(token) = read_heredoc_open(cursor, modes, start) {
            return token;
        }
    }

    match first {
        '\n' => {
            cursor.bump();
            finish(cursor, TokenKind::Newline, start)
        }
        '\r' if cursor.peek(1) == Some('\n') => {
            cursor.eat_newline();
            finish(cursor, TokenKind::Newline, start)
        }
        ' ' | '\t' | '\r' => {
            eat_whitespace(cursor);
            finish(cursor, TokenKind::Whitespace, start)
        }
        '#' => read_line_comment(cursor, start),
        '/' if cursor.peek(1) == Some('/') => read_line_comment(cursor, start),
        '/' if cursor.peek(1) == Some('*') => read_block_comment(cursor, start),
        '"' => {
            cursor.bump();
            modes.push(Mode::QuotedTemplate, start);
            finish(cursor, TokenKind::OpenQuote, start)
        }
        c if is_ident_start(c) => {
            cursor.bump();
            cursor.eat_while(is_ident_continue);
            finish(cursor, TokenKind::Ident, start)
        }
        c if c.is_ascii_digit() => read_number(cursor, start),
        _ => read_punctuation(cursor, start, first),
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '-' || c.is_alphanumeric()
}

/// Spaces, tabs, and carriage returns not followed by `\n`.
fn eat_whitespace(cursor: &mut Cursor<'_>) {
    loop {
        match cursor.peek(0) {
            Some(' ' | '\t') => {}
            Some('\r') if cursor.peek(1) != Some('\n') => {}
            _ => break,
        }
        cursor.bump();
    }
}

fn read_line_comment<'a>(cursor: &mut Cursor<'a>, start: Location) -> Token<'a> {
    while !cursor.is_at_end() && !cursor.at_newline() {
        cursor.bump();
    }
    finish(cursor, TokenKind::Comment, start)
}

fn read_block_comment<'a>(cursor: &mut Cursor<'a>, start: Location) -> Token<'a> {
    cursor.bump(); // skip /
    cursor.bump(); // skip *
    loop {
        if cursor.peek(0) == Some('*') && cursor.peek(1) == Some('/') {
            cursor.bump();
            cursor.bump();
            return finish(cursor, TokenKind::Comment, start);
        }
        if cursor.bump().is_none() {
            return finish(
                cursor,
                TokenKind::Error(LexErrorKind::UnterminatedComment),
                start,
            );
        }
    }
}

/// `<<ID` or `<<-ID` directly followed by a line break or end of input.
/// Anything else is left for the operator rules.
fn read_heredoc_open<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    start: Location,
) -> Option<Token<'a>> {
    let after = &cursor.rest()[2..];
    let (strip_indent, after) = match after.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, after),
    };

    let ident_len = after
        .char_indices()
        .find(|&(i, c)| {
            if i == 0 {
                !is_ident_start(c)
            } else {
                !is_ident_continue(c)
            }
        })
        .map_or(after.len(), |(i, _)| i);
    if ident_len == 0 {
        return None;
    }

    let tail = &after[ident_len..];
    if !(tail.is_empty() || tail.starts_with('\n') || tail.starts_with("\r\n")) {
        return None;
    }

    let terminator = &after[..ident_len];
    cursor.bump_bytes(2 + usize::from(strip_indent) + ident_len);
    modes.push(
        Mode::HeredocTemplate(Heredoc::new(terminator, strip_indent)),
        start,
    );
    Some(finish(cursor, TokenKind::HeredocOpen { strip_indent }, start))
}

/// Integer or decimal with optional exponent. A dot followed by an
/// identifier or another dot ends the number (`a.0.b`, `1...`).
fn read_number<'a>(cursor: &mut Cursor<'a>, start: Location) -> Token<'a> {
    let malformed = TokenKind::Error(LexErrorKind::MalformedNumber);
    cursor.eat_while(|c| c.is_ascii_digit());

    if cursor.peek(0) == Some('.') {
        match cursor.peek(1) {
            Some(c) if c.is_ascii_digit() => {
                cursor.bump();
                cursor.eat_while(|c| c.is_ascii_digit());
            }
            Some(c) if c == '.' || is_ident_start(c) => {
                return finish(cursor, TokenKind::Number, start);
            }
            _ => {
                cursor.bump();
                return finish(cursor, malformed, start);
            }
        }
    }

    if matches!(cursor.peek(0), Some('e' | 'E')) {
        let signed = matches!(cursor.peek(1), Some('+' | '-'));
        let digit_at = if signed { 2 } else { 1 };
        let has_digits = cursor.peek(digit_at).is_some_and(|c| c.is_ascii_digit());
        cursor.bump();
        if signed {
            cursor.bump();
        }
        if !has_digits {
            return finish(cursor, malformed, start);
        }
        cursor.eat_while(|c| c.is_ascii_digit());
    }

    finish(cursor, TokenKind::Number, start)
}

/// Operators and delimiters, longest match first.
fn read_punctuation<'a>(cursor: &mut Cursor<'a>, start: Location, first: char) -> Token<'a> {
    let (kind, len) = match (first, cursor.peek(1), cursor.peek(2)) {
        ('.', Some('.'), Some('.')) => (TokenKind::Ellipsis, 3),
        ('=', Some('='), _) => (TokenKind::Equal, 2),
        ('=', Some('>'), _) => (TokenKind::FatArrow, 2),
        ('!', Some('='), _) => (TokenKind::NotEqual, 2),
        ('<', Some('='), _) => (TokenKind::LessEqual, 2),
        ('>', Some('='), _) => (TokenKind::GreaterEqual, 2),
        ('&', Some('&'), _) => (TokenKind::And, 2),
        ('|', Some('|'), _) => (TokenKind::Or, 2),
        ('{', ..) => (TokenKind::OpenBrace, 1),
        ('}', ..) => (TokenKind::CloseBrace, 1),
        ('[', ..) => (TokenKind::OpenBracket, 1),
        (']', ..) => (TokenKind::CloseBracket, 1),
        ('(', ..) => (TokenKind::OpenParen, 1),
        (')', ..) => (TokenKind::CloseParen, 1),
        ('.', ..) => (TokenKind::Dot, 1),
        (',', ..) => (TokenKind::Comma, 1),
        ('=', ..) => (TokenKind::Assign, 1),
        ('!', ..) => (TokenKind::Not, 1),
        ('<', ..) => (TokenKind::Less, 1),
        ('>', ..) => (TokenKind::Greater, 1),
        ('+', ..) => (TokenKind::Plus, 1),
        ('-', ..) => (TokenKind::Minus, 1),
        ('*', ..) => (TokenKind::Star, 1),
        ('/', ..) => (TokenKind::Slash, 1),
        ('%', ..) => (TokenKind::Percent, 1),
        ('?', ..) => (TokenKind::Question, 1),
        (':', ..) => (TokenKind::Colon, 1),
        (other, ..) => (
            TokenKind::Error(LexErrorKind::UnrecognizedCharacter(other)),
            1,
        ),
    };
    for _ in 0..len {
        cursor.bump();
    }
    finish(cursor, kind, start)
}
