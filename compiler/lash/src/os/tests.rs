#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use lash_eval::host::OsHandler;
use pretty_assertions::assert_eq;

use super::{NixOs, WindowsOs};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").unwrap();
}

fn names(found: Vec<(String, std::path::PathBuf)>) -> Vec<String> {
    found.into_iter().map(|(name, _)| name).collect()
}

#[cfg(unix)]
fn make_executable(dir: &Path, name: &str) {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn nix_only_lists_files_with_an_execute_bit() {
    let dir = tempfile::tempdir().unwrap();
    make_executable(dir.path(), "run-me");
    touch(dir.path(), "notes.txt");
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let found = NixOs.scan_path(&dir.path().to_string_lossy());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, "run-me");
    assert_eq!(found[0].1, dir.path().join("run-me"));
}

#[cfg(unix)]
#[test]
fn nix_earlier_path_entries_win() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    make_executable(first.path(), "tool");
    make_executable(second.path(), "tool");
    make_executable(second.path(), "other");

    let path = format!(
        "{}:/no/such/dir::{}",
        first.path().display(),
        second.path().display()
    );
    let found = NixOs.scan_path(&path);
    let tool = found.iter().find(|(name, _)| name == "tool").unwrap();
    assert_eq!(tool.1, first.path().join("tool"));
    assert_eq!(found.len(), 2);
}

#[test]
fn windows_matches_pathext_and_folds_case() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Git.EXE");
    touch(dir.path(), "build.cmd");
    touch(dir.path(), "readme.md");
    touch(dir.path(), "noext");

    let os = WindowsOs::with_extensions(".EXE;.CMD");
    let mut found = names(os.scan_path(&dir.path().to_string_lossy()));
    found.sort();
    assert_eq!(found, vec!["build".to_string(), "git".to_string()]);
}

#[test]
fn windows_splits_path_on_semicolons() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    touch(first.path(), "a.exe");
    touch(second.path(), "b.exe");

    let path = format!("{};{}", first.path().display(), second.path().display());
    let mut found = names(WindowsOs::with_extensions(".exe").scan_path(&path));
    found.sort();
    assert_eq!(found, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn windows_uppercases_environment_names() {
    let vars = WindowsOs::with_extensions(".exe").load_env();
    assert!(vars.iter().all(|(name, _)| name == &name.to_uppercase()));
}
