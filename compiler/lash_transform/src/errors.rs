//! Transform error factories.

use lash_ir::{ErrorKind, LashError, Location};

#[cold]
pub(crate) fn transform_error(loc: &Location, message: impl Into<String>) -> LashError {
    loc.fail(ErrorKind::Transform, message)
}

#[cold]
pub(crate) fn illegal_macro_value(loc: &Location, name: &str) -> LashError {
    transform_error(loc, format!("Illegal use of macro {name} as a value"))
}

#[cold]
pub(crate) fn wrong_arity(loc: &Location, form: &str, expected: &str) -> LashError {
    transform_error(loc, format!("{form} must contain {expected}"))
}
