use std::env;
use std::path::{Path, PathBuf};

use lash_eval::host::OsHandler;

use super::scan_dirs;

/// Linux and other unix hosts. `PATH` entries are separated by `:` and any
/// execute bit makes a file runnable. Names are used unchanged.
pub struct NixOs;

impl NixOs {
    fn is_executable(path: &Path) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            path.metadata()
                .is_ok_and(|meta| meta.permissions().mode() & 0o111 != 0)
        }
        #[cfg(not(unix))]
        {
            path.is_file()
        }
    }
}

impl OsHandler for NixOs {
    fn load_env(&self) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn path_var(&self) -> String {
        env::var("PATH").unwrap_or_default()
    }

    fn scan_path(&self, path: &str) -> Vec<(String, PathBuf)> {
        scan_dirs(path.split(':'), |file| {
            if !NixOs::is_executable(file) {
                return None;
            }
            file.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
    }
}
