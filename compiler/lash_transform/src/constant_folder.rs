use std::rc::Rc;

use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, Literal, Visitor};

/// Collapses list and map syntax whose elements are all literal values into a
/// single literal, so `[1 2 [3]]` is built once at load time.
pub struct ConstantFolder;

fn literal(expr: &Expr) -> Option<Literal> {
    expr.as_literal().cloned()
}

impl Visitor for ConstantFolder {
    fn name(&self) -> &'static str {
        "ConstantFolder"
    }

    fn visit_list(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::List(items) = &expr.kind else {
            return Ok(expr);
        };
        let folded: Option<Vec<Literal>> = items.iter().map(|item| literal(item)).collect();
        match folded {
            Some(values) => Ok(Expr::value(expr.loc.clone(), false, Literal::List(Rc::from(values)))),
            None => Ok(expr),
        }
    }

    fn visit_map(&self, expr: ExprRef) -> RewriteResult {
        let ExprKind::Map(entries) = &expr.kind else {
            return Ok(expr);
        };
        let folded: Option<Vec<(Literal, Literal)>> = entries
            .iter()
            .map(|(key, value)| Some((literal(key)?, literal(value)?)))
            .collect();
        match folded {
            Some(entries) => Ok(Expr::value(expr.loc.clone(), false, Literal::Map(Rc::from(entries)))),
            None => Ok(expr),
        }
    }
}
