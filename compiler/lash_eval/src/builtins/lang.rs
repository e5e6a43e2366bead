//! Core language builtins: sequencing, strings, logic, comparison, output and errors.

use std::cmp::Ordering;

use super::args::Check;
use super::Registry;
use crate::{errors, CallSite, EvalResult, Value};

pub(super) fn register(registry: &mut Registry) {
    registry.function("do", |_, _, args| Ok(args.last().cloned().unwrap_or(Value::Null)));
    registry.function("&", |_, _, args| {
        Ok(Value::from(args.iter().map(Value::to_text).collect::<String>()))
    });
    registry.function("not", |_, site, args| {
        let [value] = Check::new("not", site).exactly(args, "")?;
        Ok(Value::Bool(!value.is_truthy()))
    });
    registry.function("==", |_, site, args| {
        let [a, b] = Check::new("==", site).exactly(args, "the values to compare")?;
        Ok(Value::Bool(a == b))
    });
    registry.function("!=", |_, site, args| {
        let [a, b] = Check::new("!=", site).exactly(args, "the values to compare")?;
        Ok(Value::Bool(a != b))
    });
    registry.function(">", |_, site, args| compare(">", site, args, Ordering::is_gt));
    registry.function(">=", |_, site, args| compare(">=", site, args, Ordering::is_ge));
    registry.function("<", |_, site, args| compare("<", site, args, Ordering::is_lt));
    registry.function("<=", |_, site, args| compare("<=", site, args, Ordering::is_le));

    registry.function("echo", |interpreter, _, args| {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        interpreter.print_handler().println(&line);
        Ok(Value::Null)
    });
    registry.function("throw", |_, site, args| {
        let [message] = Check::new("throw", site).exactly(args, "the message")?;
        Err(errors::thrown(site.loc, message.to_string()))
    });

    // Fallbacks for when `and`/`or` were not rewritten into `if` chains.
    registry.macro_fn("and", |interpreter, site, body| {
        for expr in body {
            if !interpreter.evaluate(expr, site.scope)?.is_truthy() {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    });
    registry.macro_fn("or", |interpreter, site, body| {
        for expr in body {
            if interpreter.evaluate(expr, site.scope)?.is_truthy() {
                return Ok(Value::Bool(true));
            }
        }
        Ok(Value::Bool(false))
    });
}

/// Numbers with numbers, strings with strings. `null` counts as `0`.
fn compare(
    name: &'static str,
    site: &CallSite<'_>,
    args: Vec<Value>,
    test: fn(Ordering) -> bool,
) -> EvalResult {
    let [left, right] = Check::new(name, site).exactly(args, "the values to compare")?;
    let as_operand = |value: Value| match value {
        Value::Null => Value::Number(0.0),
        other => other,
    };
    let (left, right) = (as_operand(left), as_operand(right));
    let ordering = match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(errors::incomparable(site.loc, name, &left, &right)),
    };
    Ok(Value::Bool(ordering.is_some_and(test)))
}
