use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, Visitor};

use crate::call;

/// `(export $x)` => `(export $x $x)`
pub struct ExportShorthand;

impl Visitor for ExportShorthand {
    fn name(&self) -> &'static str {
        "ExportShorthand"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let Some(("export", [name])) = call(&expr) else {
            return Ok(expr);
        };
        if name.as_variable().is_none() {
            return Ok(expr);
        }
        let ExprKind::SExpr { head, .. } = &expr.kind else {
            return Ok(expr);
        };
        Ok(Expr::sexpr(
            expr.loc.clone(),
            head.clone(),
            vec![name.clone(), name.clone()],
        ))
    }
}
