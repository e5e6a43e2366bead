//! Handlers for the non-interactive CLI commands.
//!
//! Each prints its result and exits the process with status 1 on failure.

use std::path::Path;
use std::process;

use crate::{FileLoader, Session};

/// Read a source file or exit with a readable message.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            process::exit(1);
        }
    }
}

/// Evaluate a file in a fresh shell session.
pub fn run_file(path: &str) {
    let session = Session::builder().build();
    if let Err(err) = session.run_file(Path::new(path)) {
        eprintln!("{err}");
        process::exit(1);
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    match lash_lexer::lex(&content, path) {
        Ok(tokens) => {
            println!("Tokens for '{}' ({} tokens):", path, tokens.len());
            for token in &tokens {
                println!("  {} @ {}:{}", token.kind, token.loc.line, token.loc.col);
            }
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// Load a file through the whole front end and print the forms that would
/// be evaluated.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    match FileLoader::new().load_source(&content, path) {
        Ok(forms) => {
            println!("Forms for '{}' ({} forms):", path, forms.len());
            for form in &forms {
                println!("  {form}");
            }
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
