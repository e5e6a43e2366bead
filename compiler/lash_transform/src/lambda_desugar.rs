use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprRef, Visitor};

use crate::errors::transform_error;
use crate::{call, closure_syntax};

/// `(\ f a b)` => `(fn [] (f a b))`
pub struct LambdaDeSugar;

impl Visitor for LambdaDeSugar {
    fn name(&self) -> &'static str {
        "LambdaDeSugar"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let Some(("\\", args)) = call(&expr) else {
            return Ok(expr);
        };
        let Some((head, rest)) = args.split_first() else {
            return Err(transform_error(&expr.loc, "Expected at least one argument to \\"));
        };
        let inner = Expr::sexpr(head.loc.clone(), head.clone(), rest.to_vec());
        Ok(closure_syntax(&expr.loc, Vec::new(), inner))
    }
}
