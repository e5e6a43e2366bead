use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, Visitor};

use crate::call;
use crate::errors::transform_error;

/// `(defn $f [$a] body)` => `(def $f (fn [$a] body))`, and the same for
/// `exportfn` with `export`.
pub struct DefnDeSugar;

impl Visitor for DefnDeSugar {
    fn name(&self) -> &'static str {
        "DefnDeSugar"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let (sugar, target, args) = match call(&expr) {
            Some(("defn", args)) => ("defn", "def", args),
            Some(("exportfn", args)) => ("exportfn", "export", args),
            _ => return Ok(expr),
        };
        let [name, params, body] = args else {
            return Err(transform_error(
                &expr.loc,
                format!(
                    "Invalid syntax of '{sugar}' macro. Must be exactly three arguments, a name, an array of variables, and the body"
                ),
            ));
        };

        let loc = &expr.loc;
        let closure = Expr::new(
            loc.clone(),
            ExprKind::SExpr {
                head: Expr::variable(loc.clone(), "fn"),
                body: vec![params.clone(), body.clone()],
            },
        );
        Ok(Expr::sexpr(
            loc.clone(),
            Expr::variable(loc.clone(), target),
            vec![name.clone(), closure],
        ))
    }
}
