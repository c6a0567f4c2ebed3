use crate::lexer::{LexError, LexErrorKind};
use crate::mode::OpenConstruct;

/// Position in the source text.
///
/// `offset` is a byte offset so token text can borrow the input directly;
/// `column` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// The first character of any input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input, carrying every construct still open at that point.
    Eof { unterminated: Vec<OpenConstruct> },
    /// Identifier or keyword (`resource`, `for`, `true`, ...).
    Ident,
    /// Numeric literal (`42`, `1.5`, `6e-3`).
    Number,

    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `!`
    Not,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `...`
    Ellipsis,
    /// `=>`
    FatArrow,

    /// `"` opening a quoted template.
    OpenQuote,
    /// `"` closing a quoted template.
    CloseQuote,
    /// Run of literal template text, escapes left undecoded.
    TemplateLiteral,
    /// `${` or `${~`.
    TemplateInterp,
    /// `%{` or `%{~`.
    TemplateControl,
    /// `}` or `~}` closing an interpolation or directive.
    TemplateSeqEnd,
    /// `<<ID` or `<<-ID`.
    HeredocOpen { strip_indent: bool },
    /// Terminator line of a heredoc. `min_indent` is reported for `<<-`
    /// heredocs only.
    HeredocClose { min_indent: Option<usize> },

    /// `# ...`, `// ...` or `/* ... */`.
    Comment,
    /// `\n` or `\r\n`.
    Newline,
    /// Spaces, tabs and lone carriage returns.
    Whitespace,

    /// Malformed input. Scanning continues after it.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Tokens a parser can skip without changing meaning.
    ///
    /// Newlines are not trivia: they separate attributes and blocks.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Whether this token signals a lexical error, including an end of
    /// input with unterminated constructs.
    #[must_use]
    pub fn is_error(&self) -> bool {
        match self {
            Self::Error(_) => true,
            Self::Eof { unterminated } => !unterminated.is_empty(),
            _ => false,
        }
    }
}

/// A single token with its kind, source text, and location span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: Location,
    pub end: Location,
}

impl<'a> Token<'a> {
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof { .. })
    }

    /// Errors signalled by this token, located at the offending source.
    ///
    /// An end-of-file token yields one error per unterminated construct,
    /// each located where that construct was opened.
    #[must_use]
    pub fn errors(&self) -> Vec<LexError> {
        match &self.kind {
            TokenKind::Error(kind) => vec![LexError {
                kind: kind.clone(),
                location: self.start,
            }],
            TokenKind::Eof { unterminated } => unterminated
                .iter()
                .map(|open| LexError {
                    kind: LexErrorKind::Unterminated(open.kind),
                    location: open.opened_at,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The bare terminator identifier of a heredoc open or close token.
    #[must_use]
    pub fn heredoc_terminator(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::HeredocOpen { strip_indent } => {
                let prefix = if strip_indent { "<<-" } else { "<<" };
                self.text.strip_prefix(prefix)
            }
            TokenKind::HeredocClose { .. } => Some(self.text.trim_start_matches([' ', '\t'])),
            _ => None,
        }
    }
}
