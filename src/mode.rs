//! Lexical modes and the stack that selects the active one.

use std::fmt;

use tracing::trace;

use crate::token::Location;

/// Lexical context deciding which scanning rules apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Body, attribute, block and expression syntax.
    Structural,
    /// Inside `"..."`.
    QuotedTemplate,
    /// Inside a heredoc body.
    HeredocTemplate(Heredoc<'a>),
    /// Inside `${...}` or `%{...}`.
    Interpolation { brace_depth: usize },
}

impl Mode<'_> {
    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Structural => ModeKind::Structural,
            Self::QuotedTemplate => ModeKind::QuotedTemplate,
            Self::HeredocTemplate(_) => ModeKind::HeredocTemplate,
            Self::Interpolation { .. } => ModeKind::Interpolation,
        }
    }
}

/// State of an open heredoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heredoc<'a> {
    pub terminator: &'a str,
    pub strip_indent: bool,
    /// Set after each body newline; the next line may be the terminator.
    pub(crate) at_line_start: bool,
    /// Smallest leading-whitespace width over non-blank body lines.
    pub min_indent: Option<usize>,
}

impl<'a> Heredoc<'a> {
    #[must_use]
    pub const fn new(terminator: &'a str, strip_indent: bool) -> Self {
        Self {
            terminator,
            strip_indent,
            at_line_start: false,
            min_indent: None,
        }
    }

    pub(crate) fn record_indent(&mut self, width: usize) {
        self.min_indent = Some(self.min_indent.map_or(width, |min| min.min(width)));
    }
}

/// Payload-free tag of a [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Structural,
    QuotedTemplate,
    HeredocTemplate,
    Interpolation,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "body"),
            Self::QuotedTemplate => write!(f, "string"),
            Self::HeredocTemplate => write!(f, "heredoc"),
            Self::Interpolation => write!(f, "template sequence"),
        }
    }
}

/// A construct still open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenConstruct {
    pub kind: ModeKind,
    pub opened_at: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame<'a> {
    mode: Mode<'a>,
    opened_at: Location,
}

/// Stack of lexical modes. The bottom entry is always
/// [`Mode::Structural`] and is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl Default for ModeStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ModeStack<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                mode: Mode::Structural,
                opened_at: Location::START,
            }],
        }
    }

    /// Active mode.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty, which only a lexer bug can cause.
    #[must_use]
    pub fn current(&self) -> &Mode<'a> {
        match self.frames.last() {
            Some(frame) => &frame.mode,
            None => unreachable!("mode stack is never empty"),
        }
    }

    /// Active mode, for updating its own counters in place.
    pub fn current_mut(&mut self) -> &mut Mode<'a> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.mode,
            None => unreachable!("mode stack is never empty"),
        }
    }

    pub fn push(&mut self, mode: Mode<'a>, opened_at: Location) {
        trace!(mode = ?mode.kind(), depth = self.frames.len() + 1, "push lexer mode");
        self.frames.push(Frame { mode, opened_at });
    }

    /// Leave the active mode.
    ///
    /// # Panics
    ///
    /// Panics when asked to pop the base structural mode.
    pub fn pop(&mut self) -> Mode<'a> {
        assert!(
            self.frames.len() > 1,
            "attempted to pop the base structural mode"
        );
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => unreachable!("mode stack is never empty"),
        };
        trace!(mode = ?frame.mode.kind(), depth = self.frames.len(), "pop lexer mode");
        frame.mode
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether only the base structural mode remains.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.frames.len() == 1
    }

    /// Mode tags from bottom to top.
    #[must_use]
    pub fn kinds(&self) -> Vec<ModeKind> {
        self.frames.iter().map(|frame| frame.mode.kind()).collect()
    }

    /// Every mode above the base, outermost first.
    #[must_use]
    pub fn open_constructs(&self) -> Vec<OpenConstruct> {
        self.frames
            .iter()
            .skip(1)
            .map(|frame| OpenConstruct {
                kind: frame.mode.kind(),
                opened_at: frame.opened_at,
            })
            .collect()
    }
}
