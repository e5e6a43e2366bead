//! Bottom-up tree rewriting.
//!
//! # Design
//!
//! A transform pass implements [`Visitor`], overriding only the node kinds it
//! cares about. Every method defaults to the identity, so a pass is a partial
//! per-kind rewrite. [`walk_expr`] drives the recursion: it rewrites all
//! children first, rebuilds the parent only if some child actually changed,
//! then hands the (possibly rebuilt) node to the visitor method for its kind.
//!
//! Untouched subtrees keep their `Rc` identity, so running a pass that
//! changes nothing returns the very same tree.
//!
//! # Example
//!
//! ```text
//! struct UppercaseWords;
//!
//! impl Visitor for UppercaseWords {
//!     fn name(&self) -> &'static str { "UppercaseWords" }
//!
//!     fn visit_value(&self, expr: ExprRef) -> Result<ExprRef, LashError> {
//!         match expr.as_word() {
//!             Some(w) => Ok(Expr::value(expr.loc.clone(), false, Literal::str(w.to_uppercase()))),
//!             None => Ok(expr),
//!         }
//!     }
//! }
//! ```

use std::rc::Rc;

use lash_stack::ensure_sufficient_stack;

use crate::{Expr, ExprKind, ExprRef, LashError};

pub type RewriteResult = Result<ExprRef, LashError>;

/// A partial rewrite of the expression tree. Unhandled kinds are the identity.
pub trait Visitor {
    /// Pass name, used in tracing output.
    fn name(&self) -> &'static str;

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }

    fn visit_list(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }

    fn visit_map(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }

    fn visit_value(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }

    fn visit_variable(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }

    /// `NoOp` and the lowered special forms.
    fn visit_form(&self, expr: ExprRef) -> RewriteResult {
        Ok(expr)
    }
}

/// Rewrite `expr` bottom-up with `visitor`.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &V, expr: &ExprRef) -> RewriteResult {
    ensure_sufficient_stack(|| {
        let expr = rewrite_children(visitor, expr)?;
        let visit = match &expr.kind {
            ExprKind::SExpr { .. } => V::visit_sexpr,
            ExprKind::List(_) => V::visit_list,
            ExprKind::Map(_) => V::visit_map,
            ExprKind::Value { .. } => V::visit_value,
            ExprKind::Variable(_) => V::visit_variable,
            _ => V::visit_form,
        };
        visit(visitor, expr)
    })
}

/// Tracks whether any child came back as a different node.
struct Children<'v, V: ?Sized> {
    visitor: &'v V,
    changed: bool,
}

impl<V: Visitor + ?Sized> Children<'_, V> {
    fn one(&mut self, child: &ExprRef) -> RewriteResult {
        let rewritten = walk_expr(self.visitor, child)?;
        self.changed |= !Rc::ptr_eq(child, &rewritten);
        Ok(rewritten)
    }

    fn many(&mut self, children: &[ExprRef]) -> Result<Vec<ExprRef>, LashError> {
        children.iter().map(|child| self.one(child)).collect()
    }

    fn optional(&mut self, child: Option<&ExprRef>) -> Result<Option<ExprRef>, LashError> {
        child.map(|child| self.one(child)).transpose()
    }
}

fn rewrite_children<V: Visitor + ?Sized>(visitor: &V, expr: &ExprRef) -> RewriteResult {
    let mut c = Children {
        visitor,
        changed: false,
    };
    let kind = match &expr.kind {
        ExprKind::NoOp | ExprKind::Value { .. } | ExprKind::Variable(_) => {
            return Ok(Rc::clone(expr));
        }
        ExprKind::SExpr { head, body } => ExprKind::SExpr {
            head: c.one(head)?,
            body: c.many(body)?,
        },
        ExprKind::List(items) => ExprKind::List(c.many(items)?),
        ExprKind::Map(entries) => {
            let mut rewritten = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                rewritten.push((c.one(key)?, c.one(value)?));
            }
            ExprKind::Map(rewritten)
        }
        ExprKind::If {
            condition,
            then,
            otherwise,
        } => ExprKind::If {
            condition: c.one(condition)?,
            then: c.one(then)?,
            otherwise: c.optional(otherwise.as_ref())?,
        },
        ExprKind::Def { name, value } => ExprKind::Def {
            name: name.clone(),
            value: c.one(value)?,
        },
        ExprKind::Export { name, value } => ExprKind::Export {
            name: name.clone(),
            value: c.one(value)?,
        },
        ExprKind::Import { mode, path } => ExprKind::Import {
            mode: mode.clone(),
            path: c.one(path)?,
        },
        ExprKind::Fn { params, body } => ExprKind::Fn {
            params: params.clone(),
            body: c.one(body)?,
        },
        ExprKind::Let { bindings, body } => {
            let mut rewritten = Vec::with_capacity(bindings.len());
            for (name, value) in bindings {
                rewritten.push((name.clone(), c.one(value)?));
            }
            ExprKind::Let {
                bindings: rewritten,
                body: c.one(body)?,
            }
        }
        ExprKind::Try {
            body,
            catch_name,
            catch_body,
            finally_body,
        } => ExprKind::Try {
            body: c.one(body)?,
            catch_name: catch_name.clone(),
            catch_body: c.one(catch_body)?,
            finally_body: c.one(finally_body)?,
        },
        ExprKind::Cd { path, body } => ExprKind::Cd {
            path: c.one(path)?,
            body: c.optional(body.as_ref())?,
        },
        ExprKind::Execute {
            path,
            args,
            options,
        } => ExprKind::Execute {
            path: c.one(path)?,
            args: c.optional(args.as_ref())?,
            options: c.optional(options.as_ref())?,
        },
    };
    if c.changed {
        Ok(Expr::new(expr.loc.clone(), kind))
    } else {
        Ok(Rc::clone(expr))
    }
}

#[cfg(test)]
mod tests;
