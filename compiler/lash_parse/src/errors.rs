//! Parse error factories.

use lash_ir::{ErrorKind, LashError, Location};

#[cold]
pub(crate) fn unterminated_sexpr(loc: &Location) -> LashError {
    loc.fail(ErrorKind::Parse, "Unterminated SExpression")
}

#[cold]
pub(crate) fn unexpected_eof(loc: &Location) -> LashError {
    loc.fail(ErrorKind::Parse, "Unexpected end of file")
}

#[cold]
pub(crate) fn empty_sexpr(loc: &Location) -> LashError {
    loc.fail(ErrorKind::Parse, "Empty s expression")
}

#[cold]
pub(crate) fn odd_map_literal(loc: &Location) -> LashError {
    loc.fail(
        ErrorKind::Parse,
        "Map literal must have an even number of values to form key -> value pairs!",
    )
}

#[cold]
pub(crate) fn unexpected_token(loc: &Location, symbol: char) -> LashError {
    loc.fail(ErrorKind::Parse, format!("Unexpected token {symbol}"))
}
