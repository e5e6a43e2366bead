//! Builtin function packs.
//!
//! Each pack registers its functions into a [`Registry`], which becomes the
//! immutable Global scope. Shell-only builtins (`exit`, `listDefs`, ...) are
//! not global; they live in the Shell layer, see [`shell::builtins`].
//!
//! Every builtin checks its arity and argument kinds through [`args::Check`],
//! so the messages read the same everywhere:
//! `"list/get expected exactly two arguments, a list and an index"`.

mod args;
mod lang;
mod list;
mod map;
mod math;
mod parse;
mod seq;
pub(crate) mod shell;
mod string;

use lash_ir::ExprRef;
use rustc_hash::FxHashMap;

use crate::{CallSite, Callable, EvalResult, Interpreter, Scope, Value};

pub(crate) use shell::shell_function;

/// Collects builtins by name.
#[derive(Default)]
pub struct Registry {
    values: FxHashMap<String, Value>,
}

impl Registry {
    /// Register a normal function: arguments arrive evaluated.
    pub fn function(
        &mut self,
        name: &'static str,
        func: impl Fn(&Interpreter, &CallSite<'_>, Vec<Value>) -> EvalResult + 'static,
    ) {
        self.values
            .insert(name.to_string(), Value::Function(Callable::native(name, func)));
    }

    /// Register a macro: arguments arrive as syntax.
    pub fn macro_fn(
        &mut self,
        name: &'static str,
        func: impl Fn(&Interpreter, &CallSite<'_>, &[ExprRef]) -> EvalResult + 'static,
    ) {
        self.values
            .insert(name.to_string(), Value::Function(Callable::macro_fn(name, func)));
    }

    pub fn into_table(self) -> FxHashMap<String, Value> {
        self.values
    }
}

/// Every global builtin.
pub fn global_table() -> FxHashMap<String, Value> {
    let mut registry = Registry::default();
    lang::register(&mut registry);
    math::register(&mut registry);
    string::register(&mut registry);
    list::register(&mut registry);
    map::register(&mut registry);
    seq::register(&mut registry);
    parse::register(&mut registry);
    shell::register(&mut registry);
    registry.into_table()
}

/// A fresh Global scope holding every builtin.
pub fn global_scope() -> Scope {
    Scope::global(global_table())
}

#[cfg(test)]
mod tests;
