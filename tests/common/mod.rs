#![allow(dead_code)]

use hcl_lexer::{Token, TokenKind, tokenize};

/// Significant tokens as `(kind, text)` pairs, whitespace and comments
/// dropped. The final end-of-file token is kept.
pub fn significant(input: &str) -> Vec<(TokenKind, &str)> {
    tokenize(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, t.text))
        .collect()
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    significant(input).into_iter().map(|(k, _)| k).collect()
}

pub const fn eof() -> TokenKind {
    TokenKind::Eof {
        unterminated: Vec::new(),
    }
}

/// Assert that token texts concatenate back to the input and that
/// spans are contiguous.
pub fn assert_lossless(input: &str) {
    let tokens = tokenize(input);
    let rebuilt: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(
        rebuilt, input,
        "token text mismatch:\n--- expected ---\n{input}\n--- got ---\n{rebuilt}"
    );
    for pair in tokens.windows(2) {
        assert_eq!(
            pair[0].end, pair[1].start,
            "gap between {:?} and {:?}",
            pair[0], pair[1]
        );
    }
    for token in &tokens {
        assert_spans_text(input, token);
    }
}

fn assert_spans_text(input: &str, token: &Token<'_>) {
    assert!(token.start.offset <= token.end.offset);
    assert_eq!(&input[token.start.offset..token.end.offset], token.text);
}
