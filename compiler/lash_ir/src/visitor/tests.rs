#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Literal, Location};

fn loc() -> Location {
    Location::new("test", 1, 1)
}

fn word(w: &str) -> ExprRef {
    Expr::value(loc(), false, Literal::str(w))
}

fn num(n: f64) -> ExprRef {
    Expr::value(loc(), false, Literal::Number(n))
}

/// `(echo [1 two] $x)`
fn sample() -> ExprRef {
    Expr::sexpr(
        loc(),
        word("echo"),
        vec![
            Expr::new(loc(), ExprKind::List(vec![num(1.0), word("two")])),
            Expr::variable(loc(), "x"),
        ],
    )
}

struct Identity;

impl Visitor for Identity {
    fn name(&self) -> &'static str {
        "Identity"
    }
}

struct UppercaseWords;

impl Visitor for UppercaseWords {
    fn name(&self) -> &'static str {
        "UppercaseWords"
    }

    fn visit_value(&self, expr: ExprRef) -> RewriteResult {
        match expr.as_word() {
            Some(w) if w == "two" => Ok(word("TWO")),
            _ => Ok(expr),
        }
    }
}

/// Records the order in which nodes are handed to the visitor.
struct Trace(RefCell<Vec<String>>);

impl Visitor for Trace {
    fn name(&self) -> &'static str {
        "Trace"
    }

    fn visit_sexpr(&self, expr: ExprRef) -> RewriteResult {
        self.0.borrow_mut().push("sexpr".to_string());
        Ok(expr)
    }

    fn visit_list(&self, expr: ExprRef) -> RewriteResult {
        self.0.borrow_mut().push("list".to_string());
        Ok(expr)
    }

    fn visit_value(&self, expr: ExprRef) -> RewriteResult {
        self.0.borrow_mut().push(expr.to_string());
        Ok(expr)
    }

    fn visit_variable(&self, expr: ExprRef) -> RewriteResult {
        self.0.borrow_mut().push(expr.to_string());
        Ok(expr)
    }
}

#[test]
fn identity_pass_returns_same_tree() {
    let tree = sample();
    let out = walk_expr(&Identity, &tree).unwrap();
    assert!(Rc::ptr_eq(&tree, &out));
}

#[test]
fn rewrite_shares_untouched_children() {
    let tree = sample();
    let out = walk_expr(&UppercaseWords, &tree).unwrap();
    assert_eq!(out.to_string(), "(echo [1 TWO] $x)");
    assert!(!Rc::ptr_eq(&tree, &out));

    let (ExprKind::SExpr { head, body }, ExprKind::SExpr { head: old_head, body: old_body }) =
        (&out.kind, &tree.kind)
    else {
        panic!("expected s-expressions");
    };
    assert!(Rc::ptr_eq(head, old_head));
    assert!(Rc::ptr_eq(&body[1], &old_body[1]));
    assert!(!Rc::ptr_eq(&body[0], &old_body[0]));
}

#[test]
fn children_are_visited_before_parents() {
    let trace = Trace(RefCell::new(Vec::new()));
    walk_expr(&trace, &sample()).unwrap();
    assert_eq!(
        trace.0.into_inner(),
        vec!["echo", "1", "two", "list", "$x", "sexpr"]
    );
}

#[test]
fn lowered_forms_are_walked() {
    let tree = Expr::new(
        loc(),
        ExprKind::If {
            condition: word("two"),
            then: num(1.0),
            otherwise: None,
        },
    );
    let out = walk_expr(&UppercaseWords, &tree).unwrap();
    assert_eq!(out.to_string(), "(if TWO 1)");
}
