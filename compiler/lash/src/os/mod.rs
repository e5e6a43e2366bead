//! Platform handlers: how environment variables are named and which files
//! on the `PATH` count as executables.

mod nix;
mod windows;

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lash_eval::host::OsHandler;
use rustc_hash::FxHashSet;

pub use nix::NixOs;
pub use windows::WindowsOs;

/// The handler for the platform lash was built for.
pub fn default_os() -> Rc<dyn OsHandler> {
    if cfg!(windows) {
        Rc::new(WindowsOs::from_env())
    } else {
        Rc::new(NixOs)
    }
}

/// Regular files directly inside `dir`. Missing or unreadable directories
/// contribute nothing.
fn files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::trace!(dir = %dir.display(), "skipping unreadable PATH entry");
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file() || kind.is_symlink()))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

/// Walk the `PATH` directories in order and name every accepted file.
/// The first directory providing a name wins.
fn scan_dirs<'a>(
    dirs: impl Iterator<Item = &'a str>,
    name_of: impl Fn(&Path) -> Option<String>,
) -> Vec<(String, PathBuf)> {
    let mut seen = FxHashSet::default();
    let mut found = Vec::new();
    for dir in dirs.filter(|dir| !dir.is_empty()) {
        for file in files_in(Path::new(dir)) {
            if let Some(name) = name_of(&file) {
                if seen.insert(name.clone()) {
                    found.push((name, file));
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests;
