//! Errors raised while talking to the host system.

use std::io;
use std::path::Path;

use lash_ir::{ErrorKind, LashError, Location};

#[cold]
pub fn unreadable_file(loc: &Location, path: &Path, err: &io::Error) -> LashError {
    let reason = match err.kind() {
        io::ErrorKind::NotFound => "file not found".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        io::ErrorKind::InvalidData => "file is not valid UTF-8".to_string(),
        _ => err.to_string(),
    };
    loc.fail(
        ErrorKind::Runtime,
        format!("Cannot read {}: {reason}", path.display()),
    )
}

#[cold]
pub fn spawn_failed(program: &str, err: &io::Error) -> String {
    format!("Cannot run {program}: {err}")
}

#[cold]
pub fn signal_exit() -> String {
    "Execution of shell command failed.".to_string()
}
