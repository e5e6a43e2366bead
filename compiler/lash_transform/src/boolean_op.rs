use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprRef, Literal, Location, Visitor};

use crate::call;

/// Lowers variadic `and`/`or` into nested `if` calls so the right-hand
/// operands are only evaluated when needed.
///
/// ```text
/// (and a b c) => (if (if a b false) c false)
/// (or a b)    => (if a true b)
/// ```
pub struct BooleanOp;

fn boolean(loc: &Location, value: bool) -> ExprRef {
    Expr::value(loc.clone(), false, Literal::Bool(value))
}

fn if_call(loc: &Location, args: Vec<ExprRef>) -> ExprRef {
    Expr::sexpr(loc.clone(), Expr::variable(loc.clone(), "if"), args)
}

impl Visitor for BooleanOp {
    fn name(&self) -> &'static str {
        "BooleanOp"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let (is_and, args) = match call(&expr) {
            Some(("and", args)) => (true, args),
            Some(("or", args)) => (false, args),
            _ => return Ok(expr),
        };
        let loc = &expr.loc;

        let Some((first, rest)) = args.split_first() else {
            // `(and)` is true, `(or)` is false
            return Ok(boolean(loc, is_and));
        };
        let lowered = rest.iter().fold(first.clone(), |acc, next| {
            if is_and {
                if_call(loc, vec![acc, next.clone(), boolean(loc, false)])
            } else {
                if_call(loc, vec![acc, boolean(loc, true), next.clone()])
            }
        });
        Ok(lowered)
    }
}
