//! The scope chain.
//!
//! # Architecture
//!
//! Scopes form a parent-linked chain of frames, innermost first:
//!
//! ```text
//! Local* -> Shell | Library -> Environment -> Global
//! ```
//!
//! - **Global** holds every builtin. It is built once and never mutated.
//! - **Environment** is per process: exported strings (including `cwd` and
//!   `PATH`), executables found on the `PATH`, and the inherited host
//!   environment.
//! - **Shell** is the interactive top level: definitions, numbered results,
//!   shell-only builtins and the exit flag.
//! - **Library** is one imported file: private definitions, a separate export
//!   table and the file's directory for relative imports.
//! - **Local** frames are created per `fn` call and per `let`.
//!
//! Lookup walks outward and stops at the first hit. Definitions always land in
//! the nearest Shell or Library, never in a Local frame; exports from a
//! library stay in its own table while exports from the shell go to the
//! Environment.
//!
//! Frames are `Rc` and share their parents. Each mutable layer keeps its
//! tables in a `RefCell`; borrows never outlive a single method call.

use std::cell::RefCell;
use std::iter;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lash_ir::{LashError, Location};
use rustc_hash::FxHashMap;

use crate::host::OsHandler;
use crate::{builtins, errors, EvalResult, Value};

type Table = FxHashMap<String, Value>;

struct EnvironmentTable {
    os: Rc<dyn OsHandler>,
    /// Exported strings, `cwd` and `PATH` included.
    exports: Table,
    executables: Table,
    external: Table,
}

impl EnvironmentTable {
    fn get(&self, name: &str) -> Option<Value> {
        self.exports
            .get(name)
            .or_else(|| self.executables.get(name))
            .or_else(|| self.external.get(name))
            .cloned()
    }

    fn rescan(&mut self, path: &str) {
        self.executables = self
            .os
            .scan_path(path)
            .into_iter()
            .map(|(name, file)| {
                let function = builtins::shell_function(&name, file);
                (name, function)
            })
            .collect();
        tracing::debug!(count = self.executables.len(), "scanned PATH");
    }
}

#[derive(Default)]
struct ShellTable {
    defs: Table,
    results: Table,
    next_result: usize,
    builtins: Table,
    exit: bool,
}

struct LibraryTable {
    defs: Table,
    exports: Table,
    dir: PathBuf,
}

enum Layer {
    Global(Table),
    Environment(RefCell<EnvironmentTable>),
    Shell(RefCell<ShellTable>),
    Library(RefCell<LibraryTable>),
    Local(RefCell<Table>),
}

impl Layer {
    fn get(&self, name: &str) -> Option<Value> {
        match self {
            Layer::Global(table) => table.get(name).cloned(),
            Layer::Environment(env) => env.borrow().get(name),
            Layer::Shell(shell) => {
                let shell = shell.borrow();
                shell
                    .defs
                    .get(name)
                    .or_else(|| shell.results.get(name))
                    .or_else(|| shell.builtins.get(name))
                    .cloned()
            }
            Layer::Library(lib) => {
                let lib = lib.borrow();
                lib.defs.get(name).or_else(|| lib.exports.get(name)).cloned()
            }
            Layer::Local(vars) => vars.borrow().get(name).cloned(),
        }
    }
}

struct Frame {
    layer: Layer,
    parent: Option<Scope>,
}

/// A handle on one frame of the chain. Cloning shares the frame.
#[derive(Clone)]
pub struct Scope(Rc<Frame>);

impl Scope {
    fn new(layer: Layer, parent: Option<&Scope>) -> Scope {
        Scope(Rc::new(Frame {
            layer,
            parent: parent.cloned(),
        }))
    }

    /// The root of every chain.
    pub fn global(builtins: FxHashMap<String, Value>) -> Scope {
        Scope::new(Layer::Global(builtins), None)
    }

    /// A process environment on top of `self`, normally the global scope.
    pub fn environment(&self, os: Rc<dyn OsHandler>, cwd: &Path) -> Scope {
        let path = os.path_var();
        let external = os
            .load_env()
            .into_iter()
            .map(|(name, value)| (name, Value::str(value)))
            .collect();
        let mut exports = Table::default();
        exports.insert("cwd".to_string(), Value::str(cwd.to_string_lossy()));
        exports.insert("PATH".to_string(), Value::str(path.as_str()));
        let mut table = EnvironmentTable {
            os,
            exports,
            executables: Table::default(),
            external,
        };
        table.rescan(&path);
        Scope::new(Layer::Environment(RefCell::new(table)), Some(self))
    }

    /// The interactive top level, on top of an environment.
    pub fn shell(&self) -> Scope {
        let table = ShellTable {
            builtins: builtins::shell::builtins(),
            ..ShellTable::default()
        };
        Scope::new(Layer::Shell(RefCell::new(table)), Some(self))
    }

    /// A fresh library for a file living in `dir`, on top of an environment.
    pub fn library(&self, dir: PathBuf) -> Scope {
        let table = LibraryTable {
            defs: Table::default(),
            exports: Table::default(),
            dir,
        };
        Scope::new(Layer::Library(RefCell::new(table)), Some(self))
    }

    /// A new local frame for `fn` parameters or `let` bindings.
    pub fn child(&self) -> Scope {
        Scope::new(Layer::Local(RefCell::new(Table::default())), Some(self))
    }

    /// This frame followed by every ancestor.
    fn frames(&self) -> impl Iterator<Item = &Scope> {
        iter::successors(Some(self), |scope| scope.0.parent.as_ref())
    }

    pub fn lookup(&self, name: &str, loc: &Location) -> EvalResult {
        self.frames()
            .find_map(|scope| scope.0.layer.get(name))
            .ok_or_else(|| errors::undefined_variable(loc, name))
    }

    /// Bind a parameter or `let` variable in the nearest local frame.
    pub fn bind(&self, name: &str, value: Value) {
        for scope in self.frames() {
            if let Layer::Local(vars) = &scope.0.layer {
                vars.borrow_mut().insert(name.to_string(), value);
                return;
            }
        }
        tracing::warn!(name, "bind outside of a local frame ignored");
    }

    /// `def`: store in the nearest Shell or Library.
    pub fn define(&self, name: &str, value: Value, loc: &Location) -> Result<(), LashError> {
        for scope in self.frames() {
            match &scope.0.layer {
                Layer::Shell(shell) => {
                    shell.borrow_mut().defs.insert(name.to_string(), value);
                    return Ok(());
                }
                Layer::Library(lib) => {
                    lib.borrow_mut().defs.insert(name.to_string(), value);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(errors::define_outside_module(loc, name))
    }

    /// `export`: into the nearest library's export table, or from the shell
    /// into the environment, where only strings are allowed.
    pub fn export(&self, name: &str, value: Value, loc: &Location) -> Result<(), LashError> {
        for scope in self.frames() {
            match &scope.0.layer {
                Layer::Library(lib) => {
                    lib.borrow_mut().exports.insert(name.to_string(), value);
                    return Ok(());
                }
                Layer::Environment(env) => {
                    let Value::Str(text) = &value else {
                        return Err(errors::export_non_string(loc));
                    };
                    let mut env = env.borrow_mut();
                    if name == "PATH" {
                        env.rescan(text);
                    }
                    env.exports.insert(name.to_string(), value);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(errors::export_outside_module(loc, name))
    }

    // Environment

    fn with_environment<R>(&self, f: impl FnOnce(&RefCell<EnvironmentTable>) -> R) -> Option<R> {
        self.frames().find_map(|scope| match &scope.0.layer {
            Layer::Environment(env) => Some(env),
            _ => None,
        }).map(f)
    }

    /// The environment frame this scope hangs off.
    pub fn environment_frame(&self) -> Option<Scope> {
        self.frames()
            .find(|scope| matches!(scope.0.layer, Layer::Environment(_)))
            .cloned()
    }

    /// The environment's current working directory.
    pub fn cwd(&self, loc: &Location) -> Result<PathBuf, LashError> {
        self.with_environment(|env| {
            env.borrow()
                .exports
                .get("cwd")
                .and_then(Value::as_str)
                .map(PathBuf::from)
        })
        .flatten()
        .ok_or_else(|| errors::no_environment(loc))
    }

    pub fn set_cwd(&self, dir: &Path, loc: &Location) -> Result<(), LashError> {
        self.with_environment(|env| {
            tracing::debug!(dir = %dir.display(), "cd");
            env.borrow_mut()
                .exports
                .insert("cwd".to_string(), Value::str(dir.to_string_lossy()));
        })
        .ok_or_else(|| errors::no_environment(loc))
    }

    /// Variables handed to child processes: the inherited environment
    /// overlaid with every exported string.
    pub fn process_env(&self, loc: &Location) -> Result<Vec<(String, String)>, LashError> {
        self.with_environment(|env| {
            let env = env.borrow();
            let mut merged: FxHashMap<&str, &str> = FxHashMap::default();
            for (name, value) in env.external.iter().chain(env.exports.iter()) {
                if let Some(text) = value.as_str() {
                    merged.insert(name, text);
                }
            }
            let mut vars: Vec<(String, String)> = merged
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            vars.sort();
            vars
        })
        .ok_or_else(|| errors::no_environment(loc))
    }

    /// Names of the executables found on the `PATH`, sorted.
    pub fn path_names(&self) -> Vec<String> {
        let mut names = self
            .with_environment(|env| env.borrow().executables.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        names.sort();
        names
    }

    // Libraries

    fn with_library<R>(&self, f: impl FnOnce(&RefCell<LibraryTable>) -> R) -> Option<R> {
        self.frames().find_map(|scope| match &scope.0.layer {
            Layer::Library(lib) => Some(lib),
            _ => None,
        }).map(f)
    }

    /// Directory of the library this scope belongs to, if any.
    pub fn module_dir(&self) -> Option<PathBuf> {
        self.with_library(|lib| lib.borrow().dir.clone())
    }

    pub fn in_library(&self) -> bool {
        self.with_library(|_| ()).is_some()
    }

    /// Every export of the enclosing library, sorted by name.
    pub fn exports(&self) -> Vec<(String, Value)> {
        let mut exports = self
            .with_library(|lib| {
                lib.borrow()
                    .exports
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        exports.sort_by(|a, b| a.0.cmp(&b.0));
        exports
    }

    /// One export of the enclosing library.
    pub fn exported(&self, name: &str, loc: &Location) -> EvalResult {
        self.with_library(|lib| lib.borrow().exports.get(name).cloned())
            .flatten()
            .ok_or_else(|| errors::not_exported(loc, name))
    }

    // Shell

    fn with_shell<R>(&self, f: impl FnOnce(&mut ShellTable) -> R) -> Option<R> {
        self.frames().find_map(|scope| match &scope.0.layer {
            Layer::Shell(shell) => Some(shell),
            _ => None,
        }).map(|shell| f(&mut shell.borrow_mut()))
    }

    /// Store a REPL result as `resultN` and return that name.
    pub fn record_result(&self, value: Value) -> Option<String> {
        self.with_shell(|shell| {
            let name = format!("result{}", shell.next_result);
            shell.next_result += 1;
            shell.results.insert(name.clone(), value);
            name
        })
    }

    pub fn clear_results(&self) {
        self.with_shell(|shell| {
            shell.results.clear();
            shell.next_result = 0;
        });
    }

    pub fn clear_defs(&self) {
        self.with_shell(|shell| shell.defs.clear());
    }

    /// Names defined in the shell, sorted.
    pub fn def_names(&self) -> Vec<String> {
        let mut names = self
            .with_shell(|shell| shell.defs.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Remove a shell definition. Returns whether it existed.
    pub fn remove_def(&self, name: &str) -> bool {
        self.with_shell(|shell| shell.defs.remove(name).is_some())
            .unwrap_or(false)
    }

    pub fn request_exit(&self) {
        self.with_shell(|shell| shell.exit = true);
    }

    pub fn exit_requested(&self) -> bool {
        self.with_shell(|shell| shell.exit).unwrap_or(false)
    }
}
