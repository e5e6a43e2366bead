use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, Visitor};

/// Bare-word call heads are variable references: `(echo 1)` calls `$echo`.
/// Quoted heads are left alone, so `("echo" 1)` stays a call on a string.
pub struct AutoVariable;

impl Visitor for AutoVariable {
    fn name(&self) -> &'static str {
        "AutoVariable"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::SExpr { head, body } = &expr.kind else {
            return Ok(expr);
        };
        let Some(word) = head.as_word() else {
            return Ok(expr);
        };
        Ok(Expr::sexpr(
            expr.loc.clone(),
            Expr::variable(head.loc.clone(), word),
            body.clone(),
        ))
    }
}
