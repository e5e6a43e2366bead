//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! [`Interpreter::evaluate`] is a single match over [`ExprKind`]. It carries no
//! state of its own besides the collaborators chosen at build time; all
//! mutable program state lives in the [`Scope`] chain passed in.
//!
//! Forms with more moving parts live in submodules:
//! - `forms`: `try` and `cd`
//! - `import`: loading a library and merging its exports
//! - `process`: `execute` and running PATH executables
//!
//! Evaluation is strictly left to right, depth first. Only `if`, `try` and
//! macros choose what to evaluate.

mod builder;
mod forms;
mod import;
mod process;

use std::rc::Rc;

use im::Vector;
use lash_ir::{Expr, ExprKind, ExprRef};
use lash_stack::ensure_sufficient_stack;

use crate::host::{ProcessRunner, SourceLoader};
use crate::{errors, CallSite, Callable, Closure, EvalResult, MapValue, Scope, SharedPrintHandler, Value};

pub use builder::InterpreterBuilder;

pub struct Interpreter {
    loader: Rc<dyn SourceLoader>,
    runner: Rc<dyn ProcessRunner>,
    print: SharedPrintHandler,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Evaluate one expression in `scope`.
    pub fn evaluate(&self, expr: &Expr, scope: &Scope) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    /// Evaluate each form in order and return the last value.
    pub fn evaluate_all(&self, forms: &[ExprRef], scope: &Scope) -> EvalResult {
        forms
            .iter()
            .try_fold(Value::Null, |_, form| self.evaluate(form, scope))
    }

    fn eval_inner(&self, expr: &Expr, scope: &Scope) -> EvalResult {
        let loc = &expr.loc;
        match &expr.kind {
            ExprKind::NoOp => Ok(Value::Null),
            ExprKind::Value { value, .. } => Ok(Value::from_literal(value)),
            ExprKind::Variable(name) => scope.lookup(name, loc),
            ExprKind::List(items) => items
                .iter()
                .map(|item| self.evaluate(item, scope))
                .collect::<Result<Vector<_>, _>>()
                .map(Value::List),
            ExprKind::Map(entries) => {
                let mut map = MapValue::new();
                for (key, value) in entries {
                    let key = self.evaluate(key, scope)?;
                    let value = self.evaluate(value, scope)?;
                    map = map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
            ExprKind::If {
                condition,
                then,
                otherwise,
            } => {
                if self.evaluate(condition, scope)?.is_truthy() {
                    self.evaluate(then, scope)
                } else if let Some(otherwise) = otherwise {
                    self.evaluate(otherwise, scope)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::Def { name, value } => {
                let value = self.evaluate(value, scope)?;
                scope.define(name, value.clone(), loc)?;
                Ok(value)
            }
            ExprKind::Export { name, value } => {
                let value = self.evaluate(value, scope)?;
                scope.export(name, value.clone(), loc)?;
                Ok(value)
            }
            ExprKind::Import { mode, path } => self.eval_import(loc, mode, path, scope),
            ExprKind::Fn { params, body } => Ok(Value::Function(Callable::Closure(Rc::new(
                Closure {
                    params: params.clone(),
                    body: body.clone(),
                    scope: scope.clone(),
                },
            )))),
            ExprKind::Let { bindings, body } => {
                let frame = scope.child();
                for (name, value) in bindings {
                    let value = self.evaluate(value, &frame)?;
                    frame.bind(name, value);
                }
                self.evaluate(body, &frame)
            }
            ExprKind::Try {
                body,
                catch_name,
                catch_body,
                finally_body,
            } => self.eval_try(body, catch_name, catch_body, finally_body, scope),
            ExprKind::Cd { path, body } => self.eval_cd(loc, path, body.as_deref(), scope),
            ExprKind::Execute {
                path,
                args,
                options,
            } => self.eval_execute(loc, path, args.as_deref(), options.as_deref(), scope),
            ExprKind::SExpr { head, body } => {
                let callee = self.evaluate(head, scope)?;
                let site = CallSite { loc, scope };
                match &callee {
                    Value::Function(Callable::Macro(m)) => m.expand(self, &site, body),
                    Value::Function(_) => {
                        let args = body
                            .iter()
                            .map(|arg| self.evaluate(arg, scope))
                            .collect::<Result<Vec<_>, _>>()?;
                        self.call(&callee, args, &site)
                    }
                    other => Err(errors::not_callable(&head.loc, other)),
                }
            }
        }
    }

    /// Invoke a normal function with already evaluated arguments.
    pub fn call(&self, callee: &Value, args: Vec<Value>, site: &CallSite<'_>) -> EvalResult {
        match callee {
            Value::Function(Callable::Native(native)) => native.call(self, site, args),
            Value::Function(Callable::Closure(closure)) => self.call_closure(closure, args),
            Value::Function(Callable::Macro(m)) => Err(errors::macro_as_function(site.loc, &m.name)),
            other => Err(errors::not_callable(site.loc, other)),
        }
    }

    /// `$0` is the whole argument list; arguments past the declared
    /// parameters are reachable as `$3`, `$4`, ... by position.
    fn call_closure(&self, closure: &Closure, args: Vec<Value>) -> EvalResult {
        let frame = closure.scope.child();
        frame.bind("0", args.iter().cloned().collect());
        for (index, arg) in args.into_iter().enumerate() {
            match closure.params.get(index) {
                Some(param) => frame.bind(param, arg),
                None => frame.bind(&(index + 1).to_string(), arg),
            }
        }
        self.evaluate(&closure.body, &frame)
    }
}
