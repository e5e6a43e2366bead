//! Lazy sequences.
//!
//! A sequence is a chain of stages built by the `seq/*` builtins. Nothing
//! runs until a consumer (`seq/toList`) drives it. Elements are pushed from
//! the source through each stage into a sink; a sink stops the whole chain
//! by returning `ControlFlow::Break`, which is how `seq/take` ends an
//! infinite range.

use std::ops::ControlFlow;
use std::rc::Rc;

use im::Vector;
use lash_ir::{LashError, Location};

use crate::{errors, CallSite, Interpreter, Scope, Value};

type Flow = Result<ControlFlow<()>, LashError>;

/// A function applied by a stage, with the call site it was captured at.
struct StageFn {
    func: Value,
    loc: Location,
    scope: Scope,
}

impl StageFn {
    fn call(&self, interpreter: &Interpreter, arg: Value) -> Result<Value, LashError> {
        let site = CallSite {
            loc: &self.loc,
            scope: &self.scope,
        };
        interpreter.call(&self.func, vec![arg], &site)
    }
}

enum Stage {
    /// `start`, `start + 1`, ... up to but excluding `end`.
    Range { start: f64, end: Option<f64> },
    Items(Vector<Value>),
    Map(SeqValue, StageFn),
    Filter(SeqValue, StageFn),
    FlatMap(SeqValue, StageFn),
    Take(SeqValue, usize),
}

#[derive(Clone)]
pub struct SeqValue(Rc<Stage>);

impl SeqValue {
    pub fn range(start: f64, end: Option<f64>) -> Self {
        SeqValue(Rc::new(Stage::Range { start, end }))
    }

    pub fn from_list(items: Vector<Value>) -> Self {
        SeqValue(Rc::new(Stage::Items(items)))
    }

    #[must_use]
    pub fn map(&self, func: Value, site: &CallSite<'_>) -> Self {
        SeqValue(Rc::new(Stage::Map(self.clone(), stage_fn(func, site))))
    }

    #[must_use]
    pub fn filter(&self, func: Value, site: &CallSite<'_>) -> Self {
        SeqValue(Rc::new(Stage::Filter(self.clone(), stage_fn(func, site))))
    }

    #[must_use]
    pub fn flat_map(&self, func: Value, site: &CallSite<'_>) -> Self {
        SeqValue(Rc::new(Stage::FlatMap(self.clone(), stage_fn(func, site))))
    }

    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        SeqValue(Rc::new(Stage::Take(self.clone(), count)))
    }

    pub fn ptr_eq(&self, other: &SeqValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Drive the sequence to completion and collect it.
    ///
    /// An unbounded range that is never limited by `take` does not terminate.
    pub fn to_list(&self, interpreter: &Interpreter) -> Result<Vector<Value>, LashError> {
        let mut out = Vector::new();
        self.for_each(interpreter, &mut |value| {
            out.push_back(value);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(out)
    }

    fn for_each(&self, interpreter: &Interpreter, sink: &mut dyn FnMut(Value) -> Flow) -> Flow {
        match &*self.0 {
            Stage::Range { start, end } => {
                let mut current = *start;
                while end.map_or(true, |end| current < end) {
                    if sink(Value::Number(current))?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                    current += 1.0;
                }
                Ok(ControlFlow::Continue(()))
            }
            Stage::Items(items) => {
                for item in items {
                    if sink(item.clone())?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                Ok(ControlFlow::Continue(()))
            }
            Stage::Map(source, func) => source.for_each(interpreter, &mut |value| {
                sink(func.call(interpreter, value)?)
            }),
            Stage::Filter(source, func) => source.for_each(interpreter, &mut |value| {
                if func.call(interpreter, value.clone())?.is_truthy() {
                    sink(value)
                } else {
                    Ok(ControlFlow::Continue(()))
                }
            }),
            Stage::FlatMap(source, func) => source.for_each(interpreter, &mut |value| {
                match func.call(interpreter, value)? {
                    Value::List(items) => SeqValue::from_list(items).for_each(interpreter, sink),
                    Value::Seq(inner) => inner.for_each(interpreter, sink),
                    other => Err(errors::flat_map_result(&func.loc, "seq/flatMap", &other)),
                }
            }),
            Stage::Take(source, count) => {
                if *count == 0 {
                    return Ok(ControlFlow::Continue(()));
                }
                let mut taken = 0;
                let mut limit_reached = false;
                let flow = source.for_each(interpreter, &mut |value| {
                    taken += 1;
                    if sink(value)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                    if taken >= *count {
                        limit_reached = true;
                        return Ok(ControlFlow::Break(()));
                    }
                    Ok(ControlFlow::Continue(()))
                })?;
                // Our own limit ends this stage only, not the consumer.
                if limit_reached {
                    Ok(ControlFlow::Continue(()))
                } else {
                    Ok(flow)
                }
            }
        }
    }
}

fn stage_fn(func: Value, site: &CallSite<'_>) -> StageFn {
    StageFn {
        func,
        loc: site.loc.clone(),
        scope: site.scope.clone(),
    }
}
