//! CLI tool to inspect and check the tokens of HCL files.

use std::fs;
use std::process::ExitCode;

use hcl_lexer::{Token, collect_errors, tokenize};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: hcl-lex <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens  Print the tokens of each file");
        eprintln!("  check   Report lexical errors in each file");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  hcl-lex tokens main.tf");
        eprintln!("  hcl-lex check main.tf variables.tf");
        eprintln!();
        eprintln!("Set RUST_LOG=hcl_lexer=trace to trace mode changes.");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let tokens = tokenize(&content);
        match command {
            "tokens" => print!("{}", render_tokens(path, &tokens)),
            "check" => {
                let errors = collect_errors(&tokens);
                if errors.is_empty() {
                    eprintln!("{path}: ok ({} token(s))", tokens.len());
                } else {
                    for err in &errors {
                        eprintln!("{path}: {err}");
                    }
                    had_error = true;
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// A `{path}:` header followed by one line per token.
fn render_tokens(path: &str, tokens: &[Token<'_>]) -> String {
    let mut out = format!("{path}:\n");
    for token in tokens {
        out.push_str("  ");
        out.push_str(&describe(token));
        out.push('\n');
    }
    out
}

fn describe(token: &Token<'_>) -> String {
    format!(
        "{}:{} {:?} {:?}",
        token.start.line, token.start.column, token.kind, token.text
    )
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
