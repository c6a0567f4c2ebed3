//! Heredoc body rules.
//!
//! Bodies are scanned line by line. At the start of each line the
//! remaining text up to the line break is compared with the terminator;
//! otherwise the line yields literal text and template sequences, then a
//! newline token. Heredocs have no backslash escapes.

use super::finish;
use super::template::{at_introducer, literal_escape_len, read_introducer};
use crate::mode::{Heredoc, Mode, ModeStack};
use crate::source::Cursor;
use crate::token::{Location, Token, TokenKind};

pub(super) fn scan<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    first: char,
) -> Token<'a> {
    let start = cursor.location();

    if heredoc_mut(modes).at_line_start {
        if let Some(token) = read_terminator(cursor, modes, start) {
            return token;
        }
    }

    if matches!(first, '\n' | '\r') && cursor.eat_newline() {
        heredoc_mut(modes).at_line_start = true;
        return finish(cursor, TokenKind::Newline, start);
    }

    if let Some(token) = read_introducer(cursor, modes, start) {
        return token;
    }

    loop {
        if cursor.is_at_end() || cursor.at_newline() || at_introducer(cursor) {
            break;
        }
        match literal_escape_len(cursor) {
            Some(len) => cursor.bump_bytes(len),
            None => {
                cursor.bump();
            }
        }
    }
    finish(cursor, TokenKind::TemplateLiteral, start)
}

/// Check the line at the cursor against the terminator. On a match the
/// line is consumed and the heredoc mode popped; otherwise the line's
/// indentation is recorded and the line-start flag cleared.
fn read_terminator<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    start: Location,
) -> Option<Token<'a>> {
    let rest = cursor.rest();
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let line = rest[..line_end].strip_suffix('\r').unwrap_or(&rest[..line_end]);
    let content = line.trim_start_matches([' ', '\t']);

    let doc = heredoc_mut(modes);
    doc.at_line_start = false;

    let candidate = if doc.strip_indent { content } else { line };
    if candidate == doc.terminator {
        let min_indent = doc.strip_indent.then_some(doc.min_indent.unwrap_or(0));
        cursor.bump_bytes(line.len());
        modes.pop();
        return Some(finish(cursor, TokenKind::HeredocClose { min_indent }, start));
    }

    if !content.trim_end_matches([' ', '\t', '\r']).is_empty() {
        doc.record_indent(line.len() - content.len());
    }
    None
}

fn heredoc_mut<'s, 'a>(modes: &'s mut ModeStack<'a>) -> &'s mut Heredoc<'a> {
    match modes.current_mut() {
        Mode::HeredocTemplate(doc) => doc,
        _ => unreachable!("heredoc rules run only in heredoc mode"),
    }
}
