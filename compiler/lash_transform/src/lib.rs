//! The transform pipeline: rewrite passes run between parsing and evaluation.
//!
//! # Architecture
//!
//! Each pass is a [`Visitor`](lash_ir::Visitor) in its own module. The
//! [`Pipeline`] walks the whole tree once per pass, in order:
//!
//! 1. [`MacroVerifier`] rejects special-form names used as values
//! 2. [`TryDeSugar`] turns `try`/`catch`/`finally` into three closures
//! 3. [`BooleanOp`] turns `and`/`or` into `if` chains
//! 4. [`LambdaDeSugar`] turns `(\ f a)` into `(fn [] (f a))`
//! 5. [`DefnDeSugar`] turns `defn`/`exportfn` into `def`/`export` of a `fn`
//! 6. [`ExportShorthand`] turns `(export $x)` into `(export $x $x)`
//! 7. [`AutoVariable`] turns bare-word call heads into variables
//! 8. [`ConstantFolder`] collapses all-literal lists and maps into one value
//! 9. [`NoOpRemover`] prunes no-op placeholders
//! 10. [`ExpressionExpander`] lowers special forms into dedicated nodes
//!
//! A pass relies on the passes before it. Lambda desugaring has to precede
//! auto-variables, for instance, or `\` would become a variable reference.
//! Any pass except the expander can be dropped without breaking the ones
//! after it.

mod auto_variable;
mod boolean_op;
mod constant_folder;
mod defn_desugar;
mod errors;
mod expander;
mod export_shorthand;
mod lambda_desugar;
mod macro_verifier;
mod noop_remover;
mod pipeline;
mod try_desugar;

pub use auto_variable::AutoVariable;
pub use boolean_op::BooleanOp;
pub use constant_folder::ConstantFolder;
pub use defn_desugar::DefnDeSugar;
pub use expander::ExpressionExpander;
pub use export_shorthand::ExportShorthand;
pub use lambda_desugar::LambdaDeSugar;
pub use macro_verifier::MacroVerifier;
pub use noop_remover::NoOpRemover;
pub use pipeline::Pipeline;
pub use try_desugar::TryDeSugar;

use lash_ir::{Expr, ExprKind, ExprRef, Literal, Location};

/// Head name and arguments of a call, when `expr` is one.
fn call(expr: &Expr) -> Option<(&str, &[ExprRef])> {
    match &expr.kind {
        ExprKind::SExpr { head, body } => head.head_name().map(|name| (name, body.as_slice())),
        _ => None,
    }
}

/// Whether `expr` is a call to `name`.
fn is_call_to(expr: &Expr, name: &str) -> bool {
    call(expr).is_some_and(|(head, _)| head == name)
}

/// `(fn [params...] body)` as unlowered syntax.
fn closure_syntax(loc: &Location, params: Vec<ExprRef>, body: ExprRef) -> ExprRef {
    Expr::sexpr(
        loc.clone(),
        Expr::variable(loc.clone(), "fn"),
        vec![Expr::new(loc.clone(), ExprKind::List(params)), body],
    )
}

fn null(loc: &Location) -> ExprRef {
    Expr::value(loc.clone(), false, Literal::Null)
}
