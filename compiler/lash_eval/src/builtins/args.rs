use std::rc::Rc;

use im::Vector;
use lash_ir::{LashError, Location};

use crate::{errors, CallSite, Callable, MapValue, SeqValue, Value};

/// Argument validation for one builtin call.
pub(super) struct Check<'a> {
    name: &'static str,
    loc: &'a Location,
}

impl<'a> Check<'a> {
    pub(super) fn new(name: &'static str, site: &CallSite<'a>) -> Self {
        Check {
            name,
            loc: site.loc,
        }
    }

    /// Exactly `N` arguments; `shape` names them for the error message.
    pub(super) fn exactly<const N: usize>(
        &self,
        args: Vec<Value>,
        shape: &str,
    ) -> Result<[Value; N], LashError> {
        <[Value; N]>::try_from(args).map_err(|_| errors::wrong_arity(self.loc, self.name, N, shape))
    }

    fn wrong(&self, index: usize, expected: &str) -> LashError {
        errors::wrong_argument(self.loc, self.name, index, expected)
    }

    pub(super) fn number(&self, index: usize, value: &Value) -> Result<f64, LashError> {
        match value {
            Value::Number(n) => Ok(*n),
            _ => Err(self.wrong(index, "a number")),
        }
    }

    /// A non-negative count; fractions round down and negatives become zero.
    pub(super) fn count(&self, index: usize, value: &Value) -> Result<usize, LashError> {
        let n = self.number(index, value)?;
        Ok(if n.is_nan() || n <= 0.0 { 0 } else { n.floor() as usize })
    }

    pub(super) fn string(&self, index: usize, value: &Value) -> Result<Rc<str>, LashError> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            _ => Err(self.wrong(index, "a string")),
        }
    }

    pub(super) fn list(&self, index: usize, value: Value) -> Result<Vector<Value>, LashError> {
        match value {
            Value::List(items) => Ok(items),
            _ => Err(self.wrong(index, "a list")),
        }
    }

    pub(super) fn map(&self, index: usize, value: Value) -> Result<MapValue, LashError> {
        match value {
            Value::Map(map) => Ok(map),
            _ => Err(self.wrong(index, "a map")),
        }
    }

    /// A sequence; lists are accepted and viewed as finite sequences.
    pub(super) fn seq(&self, index: usize, value: Value) -> Result<SeqValue, LashError> {
        match value {
            Value::Seq(seq) => Ok(seq),
            Value::List(items) => Ok(SeqValue::from_list(items)),
            _ => Err(self.wrong(index, "a seq")),
        }
    }

    /// A normal function. Macros cannot be applied to values.
    pub(super) fn function(&self, index: usize, value: Value) -> Result<Value, LashError> {
        match &value {
            Value::Function(callable) if !matches!(callable, Callable::Macro(_)) => Ok(value),
            _ => Err(self.wrong(index, "a function")),
        }
    }

    pub(super) fn out_of_range(&self, index: f64, len: usize) -> LashError {
        errors::index_out_of_range(self.loc, self.name, index, len)
    }

    pub(super) fn loc(&self) -> &'a Location {
        self.loc
    }
}
