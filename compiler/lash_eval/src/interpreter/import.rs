use std::path::{Component, Path, PathBuf};

use lash_ir::{Expr, ImportMode, LashError, Location};

use super::Interpreter;
use crate::{errors, EvalResult, Scope, Value};

/// Lexically resolve `.` and `..` without touching the file system.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

impl Interpreter {
    /// Load the file into a brand-new library and copy its exports into
    /// `scope` according to `mode`.
    ///
    /// There is no module cache: every import re-reads and re-runs the file.
    #[tracing::instrument(level = "debug", skip_all, fields(at = %loc))]
    pub(super) fn eval_import(
        &self,
        loc: &Location,
        mode: &ImportMode,
        path: &Expr,
        scope: &Scope,
    ) -> EvalResult {
        let raw = match self.evaluate(path, scope)? {
            Value::Str(raw) => raw,
            other => return Err(errors::import_path_not_string(loc, &other)),
        };
        let base = match scope.module_dir() {
            Some(dir) => dir,
            None => scope.cwd(loc)?,
        };
        let full = normalize(&base.join(&*raw));
        let dir = full
            .parent()
            .map_or_else(|| base.clone(), Path::to_path_buf);
        tracing::debug!(path = %full.display(), "importing");

        let forms = self.loader.load_file(&full, loc)?;
        let library = environment_of(scope, loc)?.library(dir);
        let body = library.child();
        for form in &forms {
            self.evaluate(form, &body)?;
        }

        merge_exports(mode, &library, scope, loc)?;
        Ok(Value::Null)
    }
}

/// The frame a new library hangs off: the environment `scope` lives in.
fn environment_of(scope: &Scope, loc: &Location) -> Result<Scope, LashError> {
    scope.environment_frame().ok_or_else(|| errors::no_environment(loc))
}

fn merge_exports(
    mode: &ImportMode,
    library: &Scope,
    scope: &Scope,
    loc: &Location,
) -> Result<(), LashError> {
    match mode {
        ImportMode::Wildcard => {
            for (name, value) in library.exports() {
                scope.define(&name, value, loc)?;
            }
        }
        ImportMode::Namespaced(ns) => {
            for (name, value) in library.exports() {
                scope.define(&format!("{ns}/{name}"), value, loc)?;
            }
        }
        ImportMode::Named(names) => {
            // Resolve everything first so a missing name imports nothing.
            let values = names
                .iter()
                .map(|name| library.exported(name, loc))
                .collect::<Result<Vec<_>, _>>()?;
            for (name, value) in names.iter().zip(values) {
                scope.define(name, value, loc)?;
            }
        }
    }
    Ok(())
}
