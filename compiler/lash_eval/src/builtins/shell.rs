//! Shell integration: functions backed by executables, and the builtins that
//! only exist at the interactive top level.

use std::path::PathBuf;

use lash_ir::ExprKind;
use rustc_hash::FxHashMap;

use super::args::Check;
use super::Registry;
use crate::host::StreamMode;
use crate::{errors, Callable, Value};

/// A function that runs the executable at `path` with its arguments
/// stringified and returns what it printed to stdout. Stderr is forwarded.
pub(crate) fn shell_function(name: &str, path: PathBuf) -> Value {
    let program = path.to_string_lossy().into_owned();
    Value::Function(Callable::native(name, move |interpreter, site, args| {
        let args = args.iter().map(ToString::to_string).collect();
        let output = interpreter.run_program(
            &program,
            args,
            StreamMode::Keep,
            StreamMode::Forward,
            site.loc,
            site.scope,
        )?;
        Ok(output.stdout.map_or(Value::Null, Value::from))
    }))
}

pub(super) fn register(registry: &mut Registry) {
    registry.function("@", |_, site, args| {
        let check = Check::new("@", site);
        let [path] = check.exactly(args, "the path of an executable")?;
        let path = check.string(0, &path)?;
        Ok(shell_function(&path, PathBuf::from(&*path)))
    });
}

/// Builtins of the Shell layer. They act on the shell the caller runs in.
pub(crate) fn builtins() -> FxHashMap<String, Value> {
    let mut registry = Registry::default();
    registry.function("exit", |_, site, args| {
        Check::new("exit", site).exactly::<0>(args, "")?;
        site.scope.request_exit();
        Ok(Value::Null)
    });
    registry.function("clearResults", |_, site, args| {
        Check::new("clearResults", site).exactly::<0>(args, "")?;
        site.scope.clear_results();
        Ok(Value::Null)
    });
    registry.function("clearDefs", |_, site, args| {
        Check::new("clearDefs", site).exactly::<0>(args, "")?;
        site.scope.clear_defs();
        Ok(Value::Null)
    });
    registry.function("listDefs", |_, site, args| {
        Check::new("listDefs", site).exactly::<0>(args, "")?;
        Ok(site.scope.def_names().into_iter().map(Value::from).collect())
    });
    registry.function("listPath", |_, site, args| {
        Check::new("listPath", site).exactly::<0>(args, "")?;
        Ok(site.scope.path_names().into_iter().map(Value::from).collect())
    });
    // (delete $name): returns whether a definition was removed.
    registry.macro_fn("delete", |_, site, body| {
        let [target] = body else {
            return Err(errors::delete_arity(site.loc));
        };
        let ExprKind::Variable(name) = &target.kind else {
            return Err(errors::delete_not_variable(&target.loc));
        };
        Ok(Value::Bool(site.scope.remove_def(name)))
    });
    registry.into_table()
}
