//! The single located failure type shared by every phase.

use crate::Location;

/// Which phase raised an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Parse,
    Transform,
    Runtime,
    /// Raised by the `throw` builtin.
    Thrown,
}

impl ErrorKind {
    /// Name exposed to scripts as the `name` field of a caught error.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Lex => "LexError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Transform => "TransformError",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::Thrown => "Error",
        }
    }

    /// Load-time errors abort the whole file or line before evaluation.
    pub fn is_load_time(self) -> bool {
        matches!(self, ErrorKind::Lex | ErrorKind::Parse | ErrorKind::Transform)
    }
}

/// A failure carrying its message and where it happened.
///
/// Rendered as `"{message} at {line}:{col} in {file}"`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message} at {location}")]
pub struct LashError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_message_with_location() {
        let err = Location::new("lib.lash", 3, 7).fail(ErrorKind::Parse, "Empty s expression");
        assert_eq!(err.to_string(), "Empty s expression at 3:7 in lib.lash");
        assert_eq!(err.kind.name(), "ParseError");
        assert!(err.kind.is_load_time());
    }
}
