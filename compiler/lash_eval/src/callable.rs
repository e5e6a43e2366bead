//! Callable values.
//!
//! A callable is either a *normal* function, which receives evaluated
//! arguments, or a *macro*, which receives the unevaluated argument syntax and
//! decides itself what to evaluate. Normal functions are either native
//! (builtins, PATH executables) or closures created by `fn`.

use std::fmt;
use std::rc::Rc;

use lash_ir::{ExprRef, Location};

use crate::{EvalResult, Interpreter, Scope, Value};

/// Where a call happens: its location and the caller's scope.
///
/// Natives that touch the environment (shell functions, shell builtins) find
/// it through `scope`.
#[derive(Clone, Copy)]
pub struct CallSite<'a> {
    pub loc: &'a Location,
    pub scope: &'a Scope,
}

pub type NativeFn = dyn Fn(&Interpreter, &CallSite<'_>, Vec<Value>) -> EvalResult;
pub type MacroFn = dyn Fn(&Interpreter, &CallSite<'_>, &[ExprRef]) -> EvalResult;

pub struct NativeFunction {
    pub name: Rc<str>,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Rc<str>>,
        func: impl Fn(&Interpreter, &CallSite<'_>, Vec<Value>) -> EvalResult + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn call(&self, interpreter: &Interpreter, site: &CallSite<'_>, args: Vec<Value>) -> EvalResult {
        (self.func)(interpreter, site, args)
    }
}

pub struct MacroFunction {
    pub name: Rc<str>,
    func: Box<MacroFn>,
}

impl MacroFunction {
    pub fn new(
        name: impl Into<Rc<str>>,
        func: impl Fn(&Interpreter, &CallSite<'_>, &[ExprRef]) -> EvalResult + 'static,
    ) -> Self {
        MacroFunction {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn expand(&self, interpreter: &Interpreter, site: &CallSite<'_>, args: &[ExprRef]) -> EvalResult {
        (self.func)(interpreter, site, args)
    }
}

/// A `fn` value: parameter names, body, and the scope it was created in.
pub struct Closure {
    pub params: Vec<String>,
    pub body: ExprRef,
    pub scope: Scope,
}

#[derive(Clone)]
pub enum Callable {
    Native(Rc<NativeFunction>),
    Closure(Rc<Closure>),
    Macro(Rc<MacroFunction>),
}

impl Callable {
    pub fn native(
        name: impl Into<Rc<str>>,
        func: impl Fn(&Interpreter, &CallSite<'_>, Vec<Value>) -> EvalResult + 'static,
    ) -> Self {
        Callable::Native(Rc::new(NativeFunction::new(name, func)))
    }

    pub fn macro_fn(
        name: impl Into<Rc<str>>,
        func: impl Fn(&Interpreter, &CallSite<'_>, &[ExprRef]) -> EvalResult + 'static,
    ) -> Self {
        Callable::Macro(Rc::new(MacroFunction::new(name, func)))
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::Native(f) => &f.name,
            Callable::Closure(_) => "anonymous",
            Callable::Macro(m) => &m.name,
        }
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, Callable::Macro(_))
    }

    /// Identity comparison: two callables are equal only if they are the same object.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            (Callable::Macro(a), Callable::Macro(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(n) => write!(f, "Native({})", n.name),
            Callable::Closure(c) => write!(f, "Closure([{}])", c.params.join(" ")),
            Callable::Macro(m) => write!(f, "Macro({})", m.name),
        }
    }
}
