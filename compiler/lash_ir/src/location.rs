//! Source positions.

use std::fmt;
use std::rc::Rc;

use crate::{ErrorKind, LashError};

/// A position in a source file or REPL line.
///
/// `line` and `col` are 1-based. Tokens carry the position of their first
/// character; expression nodes carry the position of their opening token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Rc<str>,
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub fn new(file: impl Into<Rc<str>>, line: u32, col: u32) -> Self {
        Location {
            file: file.into(),
            line,
            col,
        }
    }

    /// Location for values created by the runtime rather than parsed.
    pub fn builtin() -> Self {
        Location::new("<builtin>", 0, 0)
    }

    /// Raise a failure at this location.
    ///
    /// This is the only way errors are created anywhere in lash; crates wrap
    /// it in small `#[cold]` factories for their own messages.
    #[cold]
    pub fn fail(&self, kind: ErrorKind, message: impl Into<String>) -> LashError {
        LashError {
            kind,
            message: message.into(),
            location: self.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.line, self.col, self.file)
    }
}
