//! Lowering of special-form calls into dedicated expression kinds.
//!
//! Every form checks its arity and the shape of its arguments here, so the
//! interpreter can trust what it receives. A call whose head is not a
//! special form passes through untouched.

use lash_ir::visitor::RewriteResult;
use lash_ir::{Expr, ExprKind, ExprRef, ImportMode, LashError, Literal, Location, Visitor};

use crate::call;
use crate::errors::{transform_error, wrong_arity};
use crate::try_desugar::split_try;

pub struct ExpressionExpander;

impl Visitor for ExpressionExpander {
    fn name(&self) -> &'static str {
        "ExpressionExpander"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        let Some((form, args)) = call(&expr) else {
            return Ok(expr);
        };
        let loc = &expr.loc;
        let kind = match form {
            "if" => lower_if(loc, args)?,
            "def" => lower_def(loc, args)?,
            "export" => lower_export(loc, args)?,
            "import" => lower_import(loc, args)?,
            "fn" => lower_fn(loc, args)?,
            "let" => lower_let(loc, args)?,
            "try" => lower_try(loc, args)?,
            "cd" => lower_cd(loc, args)?,
            "execute" => lower_execute(loc, args)?,
            _ => return Ok(expr),
        };
        Ok(Expr::new(loc.clone(), kind))
    }
}

fn lower_if(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    match args {
        [condition, then] => Ok(ExprKind::If {
            condition: condition.clone(),
            then: then.clone(),
            otherwise: None,
        }),
        [condition, then, otherwise] => Ok(ExprKind::If {
            condition: condition.clone(),
            then: then.clone(),
            otherwise: Some(otherwise.clone()),
        }),
        _ => Err(wrong_arity(loc, "if", "either two or three arguments")),
    }
}

fn lower_def(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let [name, value] = args else {
        return Err(wrong_arity(loc, "def", "exactly two arguments"));
    };
    let Some(name) = name.as_variable() else {
        return Err(transform_error(
            &name.loc,
            "Expected variable name as first argument to def",
        ));
    };
    Ok(ExprKind::Def {
        name: name.to_string(),
        value: value.clone(),
    })
}

fn lower_export(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let (name_expr, value) = match args {
        [name] => (name, name),
        [name, value] => (name, value),
        _ => {
            return Err(transform_error(
                loc,
                "Expected either one or two arguments to export",
            ))
        }
    };
    let Some(name) = name_expr.as_variable() else {
        return Err(transform_error(
            &name_expr.loc,
            "Expected first argument to export to be a variable",
        ));
    };
    Ok(ExprKind::Export {
        name: name.to_string(),
        value: value.clone(),
    })
}

/// A name written as `$name` or as a bare word.
fn binding_name(expr: &Expr) -> Option<&str> {
    expr.head_name()
}

fn import_mode(selector: &Expr) -> Result<ImportMode, LashError> {
    let empty = || {
        transform_error(
            &selector.loc,
            "The list of imported variables from an import [] cannot be empty",
        )
    };
    let invalid = || {
        transform_error(
            &selector.loc,
            "Expected either a single variable, a * wild card or an array of variables to import",
        )
    };

    match &selector.kind {
        ExprKind::Value {
            value: Literal::Str(s),
            ..
        } if &**s == "*" => Ok(ImportMode::Wildcard),
        ExprKind::Variable(ns) => Ok(ImportMode::Namespaced(ns.clone())),
        ExprKind::Value {
            quoted: false,
            value: Literal::Str(ns),
        } => Ok(ImportMode::Namespaced(ns.to_string())),
        ExprKind::List(items) => {
            if items.is_empty() {
                return Err(empty());
            }
            let names = items
                .iter()
                .map(|item| binding_name(item).map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ImportMode::Named(names))
        }
        // `[foo bar]` arrives folded into a literal list of words
        ExprKind::Value {
            value: Literal::List(items),
            ..
        } => {
            if items.is_empty() {
                return Err(empty());
            }
            let names = items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ImportMode::Named(names))
        }
        _ => Err(invalid()),
    }
}

fn lower_import(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let [selector, path] = args else {
        return Err(transform_error(loc, "Expected exactly two arguments to import"));
    };
    Ok(ExprKind::Import {
        mode: import_mode(selector)?,
        path: path.clone(),
    })
}

fn fn_params(list: &Expr) -> Result<Vec<String>, LashError> {
    match &list.kind {
        ExprKind::List(items) => items
            .iter()
            .map(|item| {
                item.as_variable()
                    .map(str::to_string)
                    .ok_or_else(|| transform_error(&item.loc, "Expected variable name in fn"))
            })
            .collect(),
        // `[]` is folded into an empty literal list
        ExprKind::Value {
            value: Literal::List(items),
            ..
        } if items.is_empty() => Ok(Vec::new()),
        _ => Err(transform_error(
            &list.loc,
            "Expected list of variables as first argument to fn",
        )),
    }
}

fn lower_fn(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let [params, body] = args else {
        return Err(wrong_arity(loc, "fn", "exactly two arguments"));
    };
    Ok(ExprKind::Fn {
        params: fn_params(params)?,
        body: body.clone(),
    })
}

fn lower_let(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let [bindings, body] = args else {
        return Err(transform_error(loc, "Expected exactly two arguments to let"));
    };
    let bindings = match &bindings.kind {
        ExprKind::Map(entries) => entries
            .iter()
            .map(|(key, value)| match key.as_variable() {
                Some(name) => Ok((name.to_string(), value.clone())),
                None => Err(transform_error(&key.loc, "Expected keys of let map to be variables")),
            })
            .collect::<Result<Vec<_>, _>>()?,
        ExprKind::Value {
            value: Literal::Map(entries),
            ..
        } if entries.is_empty() => Vec::new(),
        ExprKind::Value {
            value: Literal::Map(_),
            ..
        } => {
            return Err(transform_error(
                &bindings.loc,
                "Expected keys of let map to be variables",
            ))
        }
        _ => {
            return Err(transform_error(
                &bindings.loc,
                "Expected first argument to let to be a map of variable names to values",
            ))
        }
    };
    Ok(ExprKind::Let {
        bindings,
        body: body.clone(),
    })
}

/// The closure form `(fn [params] body)` after lowering.
fn closure(expr: &Expr) -> Option<(&[String], &ExprRef)> {
    match &expr.kind {
        ExprKind::Fn { params, body } => Some((params.as_slice(), body)),
        _ => None,
    }
}

fn is_null(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Value {
            value: Literal::Null,
            ..
        }
    )
}

fn lower_try(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    let noop = || Expr::noop(loc.clone());

    // Canonical form from the try desugaring: three closures.
    if let [body, catch, finally] = args {
        if let (Some(([], body)), Some((catch_params, handler)), Some(([], cleanup))) =
            (closure(body), closure(catch), closure(finally))
        {
            let (catch_name, catch_body) = match catch_params {
                [name] => (name.clone(), handler.clone()),
                _ => (String::new(), noop()),
            };
            let finally_body = if is_null(cleanup) { noop() } else { cleanup.clone() };
            return Ok(ExprKind::Try {
                body: body.clone(),
                catch_name,
                catch_body,
                finally_body,
            });
        }
    }

    // Raw `(try body (catch $e ...) (finally ...))` when the desugaring did not run.
    let parts = split_try(loc, args)?;
    let (catch_name, catch_body) = parts.catch.unwrap_or_else(|| (String::new(), noop()));
    Ok(ExprKind::Try {
        body: parts.body,
        catch_name,
        catch_body,
        finally_body: parts.finally.unwrap_or_else(noop),
    })
}

fn lower_cd(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    match args {
        [path] => Ok(ExprKind::Cd {
            path: path.clone(),
            body: None,
        }),
        [path, body] => Ok(ExprKind::Cd {
            path: path.clone(),
            body: Some(body.clone()),
        }),
        _ => Err(transform_error(loc, "Expected either one or two arguments to cd")),
    }
}

fn lower_execute(loc: &Location, args: &[ExprRef]) -> Result<ExprKind, LashError> {
    match args {
        [path, rest @ ..] if rest.len() <= 2 => Ok(ExprKind::Execute {
            path: path.clone(),
            args: rest.first().cloned(),
            options: rest.get(1).cloned(),
        }),
        _ => Err(transform_error(
            loc,
            "Expected at least one and up to three arguments to execute",
        )),
    }
}
