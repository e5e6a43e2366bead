use super::args::Check;
use super::Registry;
use crate::{CallSite, EvalResult, Value};

pub(super) fn register(registry: &mut Registry) {
    registry.function("+", |_, site, args| binary("+", site, args, |a, b| a + b));
    registry.function("-", |_, site, args| binary("-", site, args, |a, b| a - b));
    registry.function("*", |_, site, args| binary("*", site, args, |a, b| a * b));
    registry.function("/", |_, site, args| binary("/", site, args, |a, b| a / b));
    registry.function("neg", |_, site, args| {
        let check = Check::new("neg", site);
        let [value] = check.exactly(args, "a number")?;
        Ok(Value::Number(-check.number(0, &value)?))
    });
}

fn binary(
    name: &'static str,
    site: &CallSite<'_>,
    args: Vec<Value>,
    op: fn(f64, f64) -> f64,
) -> EvalResult {
    let check = Check::new(name, site);
    let [a, b] = check.exactly(args, "two numbers")?;
    Ok(Value::Number(op(check.number(0, &a)?, check.number(1, &b)?)))
}
