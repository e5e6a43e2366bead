//! Collaborators the interpreter calls out to.
//!
//! The evaluator never touches the file system, the process table or the
//! host environment directly. The `lash` crate supplies real implementations;
//! tests supply fakes.

use std::path::{Path, PathBuf};

use lash_ir::{ExprRef, LashError, Location};

use crate::errors;

/// Platform knowledge: the host environment and how to find executables.
pub trait OsHandler {
    /// Environment variables with names already normalized for the platform.
    fn load_env(&self) -> Vec<(String, String)>;

    /// The initial executable search path.
    fn path_var(&self) -> String;

    /// Every executable reachable through `path`, as script-visible name and
    /// full file path. Earlier directories win on name clashes.
    fn scan_path(&self, path: &str) -> Vec<(String, PathBuf)>;
}

/// What to do with one output stream of a child process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamMode {
    /// Discard it.
    Ignore,
    /// Buffer it and hand it back.
    Keep,
    /// Stream it live to the host's stderr.
    Forward,
}

impl StreamMode {
    pub fn parse(flag: &str) -> Option<StreamMode> {
        match flag {
            "ignore" => Some(StreamMode::Ignore),
            "keep" => Some(StreamMode::Keep),
            "forward" => Some(StreamMode::Forward),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExecRequest {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: PathBuf,
    pub out: StreamMode,
    pub err: StreamMode,
}

/// Result of a finished process. Streams not kept are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub code: i32,
}

/// Runs an external program to completion.
///
/// The call must block until the child has exited and every kept stream has
/// been drained.
pub trait ProcessRunner {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput, String>;
}

/// Reads a source file and turns it into evaluable forms.
pub trait SourceLoader {
    fn load_file(&self, path: &Path, loc: &Location) -> Result<Vec<ExprRef>, LashError>;
}

/// Stand-in used when no process runner was configured.
pub struct NoProcessRunner;

impl ProcessRunner for NoProcessRunner {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput, String> {
        Err(format!("Cannot run {}: no process runner configured", request.program))
    }
}

/// Stand-in used when no source loader was configured.
pub struct NoSourceLoader;

impl SourceLoader for NoSourceLoader {
    fn load_file(&self, _path: &Path, loc: &Location) -> Result<Vec<ExprRef>, LashError> {
        Err(errors::imports_unavailable(loc))
    }
}
