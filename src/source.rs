//! Character source the lexer reads from.
//!
//! Provides a small fixed lookahead over decoded text and keeps the
//! byte offset, line and column of the next character.

use crate::token::Location;

/// UTF-8 encoded byte-order mark as a character.
const BOM: char = '\u{FEFF}';

/// Forward-only cursor over a source string.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor, dropping a leading byte-order mark.
    ///
    /// Offsets are relative to the text after the mark.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.strip_prefix(BOM).unwrap_or(input),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// The text being scanned, without any byte-order mark.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        Location {
            offset: self.pos,
            line: self.line,
            column: self.col,
        }
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Character `offset` positions ahead of the cursor.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Unconsumed input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Source text from `start` up to the cursor.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    /// Consume one character, updating line and column.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume `len` bytes of input. `len` must end on a char boundary.
    pub fn bump_bytes(&mut self, len: usize) {
        let target = self.pos + len;
        while self.pos < target && self.bump().is_some() {}
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek(0).is_some_and(&mut pred) {
            self.bump();
        }
    }

    /// Whether the cursor sits on `\n` or `\r\n`.
    #[must_use]
    pub fn at_newline(&self) -> bool {
        let rest = self.rest();
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    /// Consume a `\n` or `\r\n` if one is next.
    pub fn eat_newline(&mut self) -> bool {
        if self.rest().starts_with("\r\n") {
            self.bump_bytes(2);
            true
        } else if self.rest().starts_with('\n') {
            self.bump();
            true
        } else {
            false
        }
    }
}
