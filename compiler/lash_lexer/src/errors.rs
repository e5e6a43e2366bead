//! Lex error factories.

use lash_ir::{ErrorKind, LashError, Location};

#[cold]
pub(crate) fn unclosed_string(loc: &Location) -> LashError {
    loc.fail(ErrorKind::Lex, "Unclosed string")
}

#[cold]
pub(crate) fn expected_number(loc: &Location, found: char) -> LashError {
    loc.fail(ErrorKind::Lex, format!("Expected number but found {found}"))
}

#[cold]
pub(crate) fn invalid_number(loc: &Location, text: &str) -> LashError {
    loc.fail(ErrorKind::Lex, format!("Invalid number {text}"))
}

#[cold]
pub(crate) fn unexpected_character(loc: &Location, text: &str) -> LashError {
    loc.fail(ErrorKind::Lex, format!("Unexpected character {text}"))
}
