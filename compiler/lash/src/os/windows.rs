use std::env;
use std::path::{Path, PathBuf};

use lash_eval::host::OsHandler;
use rustc_hash::FxHashSet;

use super::scan_dirs;

const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// Windows hosts. `PATH` entries are separated by `;`, executables are
/// recognised by the extensions in `PATHEXT`, and both environment names and
/// program names are case-folded: `Path` becomes `PATH`, `Git.EXE` becomes `git`.
pub struct WindowsOs {
    /// Lowercased, without the leading dot.
    extensions: FxHashSet<String>,
}

impl WindowsOs {
    pub fn from_env() -> Self {
        let pathext = env::var("PATHEXT").unwrap_or_else(|_| DEFAULT_PATHEXT.to_string());
        WindowsOs::with_extensions(&pathext)
    }

    /// `pathext` in `PATHEXT` syntax, e.g. `".EXE;.BAT"`.
    pub fn with_extensions(pathext: &str) -> Self {
        let extensions = pathext
            .split(';')
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        WindowsOs { extensions }
    }

    fn program_name(&self, file: &Path) -> Option<String> {
        let ext = file.extension()?.to_str()?.to_lowercase();
        if !self.extensions.contains(&ext) {
            return None;
        }
        Some(file.file_stem()?.to_str()?.to_lowercase())
    }
}

impl OsHandler for WindowsOs {
    fn load_env(&self) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(name, value)| {
                Some((name.into_string().ok()?.to_uppercase(), value.into_string().ok()?))
            })
            .collect()
    }

    fn path_var(&self) -> String {
        env::var("Path")
            .or_else(|_| env::var("PATH"))
            .unwrap_or_default()
    }

    fn scan_path(&self, path: &str) -> Vec<(String, PathBuf)> {
        scan_dirs(path.split(';'), |file| self.program_name(file))
    }
}
