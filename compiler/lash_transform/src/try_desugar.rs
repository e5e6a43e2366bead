use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, LashError, Location, Visitor};

use crate::errors::transform_error;
use crate::{call, closure_syntax, is_call_to, null};

/// Rewrites `(try body (catch $e handler) (finally cleanup))` into
/// `(try (fn [] body) (fn [$e] handler) (fn [] cleanup))`.
///
/// A missing catch becomes a parameterless `(fn [] null)`, which is how the
/// expander tells "no catch" apart from a real handler. A missing finally
/// becomes `(fn [] null)` as well.
pub struct TryDeSugar;

/// A validated `try` form.
pub(crate) struct TryParts {
    pub(crate) body: ExprRef,
    pub(crate) catch: Option<(String, ExprRef)>,
    pub(crate) finally: Option<ExprRef>,
}

/// Anything that runs code: a call or an already lowered form.
fn is_form(expr: &Expr) -> bool {
    !matches!(
        expr.kind,
        ExprKind::NoOp
            | ExprKind::List(_)
            | ExprKind::Map(_)
            | ExprKind::Value { .. }
            | ExprKind::Variable(_)
    )
}

fn catch_block(block: &Expr) -> Result<(String, ExprRef), LashError> {
    let Some((_, args)) = call(block) else {
        return Err(transform_error(&block.loc, "Expected a catch block"));
    };
    let [name, handler] = args else {
        return Err(transform_error(&block.loc, "Expected exactly two arguments to catch block"));
    };
    let Some(name) = name.as_variable() else {
        return Err(transform_error(
            &name.loc,
            "Expected first argument to catch block to be a variable",
        ));
    };
    Ok((name.to_string(), handler.clone()))
}

fn finally_block(block: &Expr) -> Result<ExprRef, LashError> {
    match call(block) {
        Some((_, [cleanup])) => Ok(cleanup.clone()),
        _ => Err(transform_error(&block.loc, "Expected exactly one argument to finally block")),
    }
}

/// Validate the shape and ordering of a sugared `try`.
pub(crate) fn split_try(loc: &Location, args: &[ExprRef]) -> Result<TryParts, LashError> {
    let (body, rest) = match args {
        [body, rest @ ..] if (1..=2).contains(&rest.len()) => (body, rest),
        _ => return Err(transform_error(loc, "Expected two or three arguments to try")),
    };
    if !is_form(body) {
        return Err(transform_error(
            &body.loc,
            "Expected first argument to try to be an sExpression",
        ));
    }

    let (catch, finally) = match rest {
        [only] if is_call_to(only, "catch") => (Some(catch_block(only)?), None),
        [only] if is_call_to(only, "finally") => (None, Some(finally_block(only)?)),
        [_] => {
            return Err(transform_error(
                loc,
                "Try block expected second argument to be either a catch or finally block",
            ))
        }
        [first, second] if is_call_to(first, "finally") => {
            let message = if is_call_to(second, "catch") {
                "Try block has both catch and finally, but in the wrong order. Please put catch before finally"
            } else {
                "Try block expects nothing after finally block"
            };
            return Err(transform_error(&second.loc, message));
        }
        [first, _] if !is_call_to(first, "catch") => {
            return Err(transform_error(
                &first.loc,
                "Try block expected second argument to be either a catch or finally block",
            ))
        }
        [first, second] if is_call_to(second, "finally") => {
            (Some(catch_block(first)?), Some(finally_block(second)?))
        }
        _ => {
            return Err(transform_error(
                loc,
                "Expected final argument to try to be a finally block",
            ))
        }
    };

    Ok(TryParts {
        body: body.clone(),
        catch,
        finally,
    })
}

impl Visitor for TryDeSugar {
    fn name(&self) -> &'static str {
        "TryDeSugar"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let Some(("try", args)) = call(&expr) else {
            return Ok(expr);
        };
        let loc = &expr.loc;
        let parts = split_try(loc, args)?;

        let body = closure_syntax(loc, Vec::new(), parts.body);
        let catch = match parts.catch {
            Some((name, handler)) => {
                closure_syntax(loc, vec![Expr::variable(loc.clone(), name)], handler)
            }
            None => closure_syntax(loc, Vec::new(), null(loc)),
        };
        let finally = closure_syntax(loc, Vec::new(), parts.finally.unwrap_or_else(|| null(loc)));

        Ok(Expr::sexpr(
            loc.clone(),
            Expr::variable(loc.clone(), "try"),
            vec![body, catch, finally],
        ))
    }
}
