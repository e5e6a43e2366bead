use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, Visitor};

/// Drops no-op children from calls, lists and maps. A call whose head is a
/// no-op becomes a no-op itself.
///
/// Children are pruned before their parents, so a second run finds nothing
/// to remove and returns the tree unchanged.
pub struct NoOpRemover;

impl Visitor for NoOpRemover {
    fn name(&self) -> &'static str {
        "NoOpRemover"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::SExpr { head, body } = &expr.kind else {
            return Ok(expr);
        };
        if head.is_noop() {
            return Ok(Expr::noop(expr.loc.clone()));
        }
        if !body.iter().any(|arg| arg.is_noop()) {
            return Ok(expr);
        }
        let body = body.iter().filter(|arg| !arg.is_noop()).cloned().collect();
        Ok(Expr::sexpr(expr.loc.clone(), head.clone(), body))
    }

    fn visit_list(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::List(items) = &expr.kind else {
            return Ok(expr);
        };
        if !items.iter().any(|item| item.is_noop()) {
            return Ok(expr);
        }
        let items = items.iter().filter(|item| !item.is_noop()).cloned().collect();
        Ok(Expr::new(expr.loc.clone(), ExprKind::List(items)))
    }

    fn visit_map(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::Map(entries) = &expr.kind else {
            return Ok(expr);
        };
        let keep = |(k, v): &&(ExprRef, ExprRef)| !k.is_noop() && !v.is_noop();
        if entries.iter().all(|entry| keep(&entry)) {
            return Ok(expr);
        }
        let entries = entries.iter().filter(keep).cloned().collect();
        Ok(Expr::new(expr.loc.clone(), ExprKind::Map(entries)))
    }
}
