//! Property-based tests with proptest.
//!
//! Arbitrary input checks the guarantees that hold for any text: the
//! lexer always makes progress, its tokens cover the input exactly, and
//! end of file is sticky. Generated well-formed documents additionally
//! must lex without errors and leave only the base mode on the stack.

mod common;

use common::assert_lossless;
use hcl_lexer::{Lexer, TokenKind, tokenize};
use proptest::prelude::*;

// -- Arbitrary text --

/// Text biased towards the characters that switch lexer modes.
fn hcl_noise() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[a-z0-9_ ]{1,4}",
            1 => Just("\"".to_string()),
            1 => Just("${".to_string()),
            1 => Just("%{".to_string()),
            1 => Just("}".to_string()),
            1 => Just("{".to_string()),
            1 => Just("~}".to_string()),
            1 => Just("\n".to_string()),
            1 => Just("\r\n".to_string()),
            1 => Just("<<EOT\n".to_string()),
            1 => Just("<<-EOT\n".to_string()),
            1 => Just("  EOT\n".to_string()),
            1 => Just("\\".to_string()),
            1 => Just("/*".to_string()),
            1 => Just("*/".to_string()),
            1 => Just("#".to_string()),
            1 => Just("1.".to_string()),
            1 => Just("é€".to_string()),
            1 => Just("$${".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

// -- Well-formed documents --

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}".prop_map(|s| s)
}

fn number() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,5}".prop_map(|s| s),
        "[0-9]{1,3}\\.[0-9]{1,3}".prop_map(|s| s),
        "[0-9]{1,2}e[+-]?[0-9]{1,2}".prop_map(|s| s),
    ]
}

/// Literal text that is safe inside a quoted template.
fn quoted_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .:/_-]{0,12}".prop_map(|s| s)
}

fn expression(depth: u32) -> BoxedStrategy<String> {
    let leaf = prop_oneof![ident(), number(), quoted_text().prop_map(|t| format!("\"{t}\""))];
    if depth == 0 {
        return leaf.boxed();
    }
    let inner = expression(depth - 1);
    prop_oneof![
        3 => leaf,
        1 => (quoted_text(), inner.clone(), quoted_text())
            .prop_map(|(a, e, b)| format!("\"{a}${{{e}}}{b}\"")),
        1 => (ident(), inner.clone())
            .prop_map(|(k, e)| format!("{{ {k} = {e} }}")),
        1 => prop::collection::vec(inner.clone(), 0..3)
            .prop_map(|items| format!("[{}]", items.join(", "))),
        1 => (ident(), inner.clone()).prop_map(|(f, e)| format!("{f}({e})")),
        1 => (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a} + {b}")),
        1 => (quoted_text(), inner).prop_map(|(a, e)| {
            format!("<<-EOT\n  - {a}\n  ${{{e}}}\n  EOT\n")
        }),
    ]
    .boxed()
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec((ident(), expression(3)), 1..6).prop_map(|attrs| {
        attrs
            .into_iter()
            .map(|(name, value)| format!("{name} = {value}\n"))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tokens_cover_arbitrary_input(input in hcl_noise()) {
        assert_lossless(&input);
    }

    #[test]
    fn every_token_makes_progress(input in hcl_noise()) {
        let mut lexer = Lexer::new(&input);
        let mut count = 0;
        loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break;
            }
            prop_assert!(token.end.offset > token.start.offset);
            count += 1;
            prop_assert!(count <= input.len());
        }
    }

    #[test]
    fn eof_is_sticky(input in hcl_noise()) {
        let mut lexer = Lexer::new(&input);
        let eof = loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break token;
            }
        };
        for _ in 0..3 {
            prop_assert_eq!(lexer.next_token(), eof.clone());
        }
    }

    #[test]
    fn eof_reports_exactly_the_open_modes(input in hcl_noise()) {
        let mut lexer = Lexer::new(&input);
        let eof = loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break token;
            }
        };
        let TokenKind::Eof { unterminated } = eof.kind else {
            unreachable!();
        };
        let open: Vec<_> = unterminated.iter().map(|o| o.kind).collect();
        prop_assert_eq!(open, lexer.modes().kinds()[1..].to_vec());
    }

    #[test]
    fn well_formed_documents_lex_cleanly(doc in document()) {
        let tokens = tokenize(&doc);
        let errors: Vec<_> = tokens.iter().filter(|t| t.kind.is_error()).collect();
        prop_assert!(errors.is_empty(), "errors {:?} in\n{}", errors, doc);
        assert_lossless(&doc);
    }

    #[test]
    fn well_formed_documents_balance_modes(doc in document()) {
        let mut lexer = Lexer::new(&doc);
        while !lexer.next_token().is_eof() {}
        prop_assert!(lexer.modes().is_balanced());
    }
}
