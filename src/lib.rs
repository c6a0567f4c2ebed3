//! Lexer for the HCL configuration language.
//!
//! Turns HCL source text into typed, source-located tokens for a
//! recursive-descent parser. Strings, heredocs and `${ ... }` template
//! sequences nest to any depth; an explicit stack of lexical modes keeps
//! track of which rules apply.
//!
//! Malformed input never stops the lexer. Problems come back as
//! [`TokenKind::Error`] tokens, and the final [`TokenKind::Eof`] token lists
//! every string, heredoc or template sequence left open.
//!
//! # Quick start
//!
//! ## Tokenize a file
//!
//! ```
//! use hcl_lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("name = \"web-${env}\"\n");
//! let kinds: Vec<_> = tokens
//!     .iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .map(|t| &t.kind)
//!     .collect();
//! assert_eq!(kinds[0], &TokenKind::Ident);
//! assert_eq!(kinds[3], &TokenKind::TemplateLiteral);
//! assert_eq!(kinds[4], &TokenKind::TemplateInterp);
//!
//! // Token text borrows the input, so concatenating it gives it back.
//! let text: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(text, "name = \"web-${env}\"\n");
//! ```
//!
//! ## Pull tokens one at a time
//!
//! ```
//! use hcl_lexer::Lexer;
//!
//! let mut lexer = Lexer::new("x = \"open");
//! while !lexer.next_token().is_eof() {}
//!
//! let eof = lexer.next_token();
//! let errors = eof.errors();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].to_string(), "unterminated string starting here at line 1, column 5");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod mode;
pub mod source;
pub mod token;

pub use lexer::{LexError, LexErrorKind, Lexer, collect_errors, tokenize, tokenize_strict};
pub use mode::{Heredoc, Mode, ModeKind, ModeStack, OpenConstruct};
pub use source::Cursor;
pub use token::{Location, Token, TokenKind};
