//! Rules inside `${ ... }` and `%{ ... }`.
//!
//! Expressions use the structural rules; this layer only tracks braces
//! so an object literal's `}` is not taken for the sequence closer.

use super::{finish, structural};
use crate::mode::{Mode, ModeStack};
use crate::source::Cursor;
use crate::token::{Location, Token, TokenKind};

pub(super) fn scan<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    first: char,
) -> Token<'a> {
    let start = cursor.location();
    let depth = brace_depth(modes);

    match first {
        '{' => {
            cursor.bump();
            *brace_depth_mut(modes) += 1;
            finish(cursor, TokenKind::OpenBrace, start)
        }
        '}' if depth > 0 => {
            cursor.bump();
            *brace_depth_mut(modes) -= 1;
            finish(cursor, TokenKind::CloseBrace, start)
        }
        '}' => close_sequence(cursor, modes, start, 1),
        '~' if depth == 0 && cursor.peek(1) == Some('}') => {
            close_sequence(cursor, modes, start, 2)
        }
        _ => structural::scan(cursor, modes, first),
    }
}

fn close_sequence<'a>(
    cursor: &mut Cursor<'a>,
    modes: &mut ModeStack<'a>,
    start: Location,
    len: usize,
) -> Token<'a> {
    cursor.bump_bytes(len);
    modes.pop();
    finish(cursor, TokenKind::TemplateSeqEnd, start)
}

fn brace_depth(modes: &ModeStack<'_>) -> usize {
    match modes.current() {
        Mode::Interpolation { brace_depth } => *brace_depth,
        _ => unreachable!("interpolation rules run only in interpolation mode"),
    }
}

fn brace_depth_mut<'s>(modes: &'s mut ModeStack<'_>) -> &'s mut usize {
    match modes.current_mut() {
        Mode::Interpolation { brace_depth } => brace_depth,
        _ => unreachable!("interpolation rules run only in interpolation mode"),
    }
}
