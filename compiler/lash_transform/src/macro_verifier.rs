use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, LashError, Visitor};

use crate::errors;

/// Names that only make sense in call position.
const SPECIAL_FORMS: [&str; 10] = [
    "def", "defn", "fn", "let", "export", "import", "try", "catch", "finally", "\\",
];

/// Rejects `$fn`, `$let` and friends used as values inside calls, lists and maps.
pub struct MacroVerifier;

fn check(expr: &Expr) -> Result<(), LashError> {
    match expr.as_variable() {
        Some(name) if SPECIAL_FORMS.contains(&name) => {
            Err(errors::illegal_macro_value(&expr.loc, name))
        }
        _ => Ok(()),
    }
}

impl Visitor for MacroVerifier {
    fn name(&self) -> &'static str {
        "MacroVerifier"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        if let ExprKind::SExpr { body, .. } = &expr.kind {
            body.iter().try_for_each(|arg| check(arg))?;
        }
        Ok(expr)
    }

    fn visit_list(&self, expr: ExprRef) -> RewriteResult {
        if let ExprKind::List(items) = &expr.kind {
            items.iter().try_for_each(|item| check(item))?;
        }
        Ok(expr)
    }

    fn visit_map(&self, expr: ExprRef) -> RewriteResult {
        if let ExprKind::Map(entries) = &expr.kind {
            for (key, value) in entries {
                check(key)?;
                check(value)?;
            }
        }
        Ok(expr)
    }
}
