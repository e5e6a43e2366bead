//! The expression tree.
//!
//! Parsing produces only the five syntactic kinds (`SExpr`, `List`, `Map`,
//! `Value`, `Variable`). The transform pipeline lowers special-form calls into
//! the dedicated kinds (`If`, `Def`, ...) that the interpreter dispatches on.
//!
//! Nodes are immutable. A rewrite allocates a new parent and shares every
//! child it did not touch, see [`crate::visitor`].

use std::fmt;
use std::rc::Rc;

use crate::literal::write_quoted;
use crate::{Literal, Location};

pub type ExprRef = Rc<Expr>;

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub loc: Location,
    pub kind: ExprKind,
}

/// How an `import` merges the library's exports into the importing scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportMode {
    /// `(import * "path")`: every export under its own name.
    Wildcard,
    /// `(import ns "path")`: every export as `ns/name`.
    Namespaced(String),
    /// `(import [a b] "path")`: only the listed exports.
    Named(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Placeholder erased by the no-op remover. Evaluates to null.
    NoOp,
    SExpr {
        head: ExprRef,
        body: Vec<ExprRef>,
    },
    List(Vec<ExprRef>),
    Map(Vec<(ExprRef, ExprRef)>),
    /// `quoted` is false for bare words, numbers and keyword literals.
    Value {
        quoted: bool,
        value: Literal,
    },
    Variable(String),
    If {
        condition: ExprRef,
        then: ExprRef,
        otherwise: Option<ExprRef>,
    },
    Def {
        name: String,
        value: ExprRef,
    },
    Export {
        name: String,
        value: ExprRef,
    },
    Import {
        mode: ImportMode,
        path: ExprRef,
    },
    Fn {
        params: Vec<String>,
        body: ExprRef,
    },
    Let {
        bindings: Vec<(String, ExprRef)>,
        body: ExprRef,
    },
    /// A missing catch is a `NoOp` `catch_body` with an empty `catch_name`;
    /// a missing finally is a `NoOp` `finally_body`.
    Try {
        body: ExprRef,
        catch_name: String,
        catch_body: ExprRef,
        finally_body: ExprRef,
    },
    Cd {
        path: ExprRef,
        body: Option<ExprRef>,
    },
    Execute {
        path: ExprRef,
        args: Option<ExprRef>,
        options: Option<ExprRef>,
    },
}

impl Expr {
    pub fn new(loc: Location, kind: ExprKind) -> ExprRef {
        Rc::new(Expr { loc, kind })
    }

    pub fn noop(loc: Location) -> ExprRef {
        Expr::new(loc, ExprKind::NoOp)
    }

    pub fn value(loc: Location, quoted: bool, value: Literal) -> ExprRef {
        Expr::new(loc, ExprKind::Value { quoted, value })
    }

    pub fn variable(loc: Location, name: impl Into<String>) -> ExprRef {
        Expr::new(loc, ExprKind::Variable(name.into()))
    }

    pub fn sexpr(loc: Location, head: ExprRef, body: Vec<ExprRef>) -> ExprRef {
        Expr::new(loc, ExprKind::SExpr { head, body })
    }

    pub fn is_noop(&self) -> bool {
        matches!(self.kind, ExprKind::NoOp)
    }

    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// The literal payload of a `Value` node.
    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            ExprKind::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// A bare word such as `fn` or `ns`: an unquoted string `Value`.
    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Value {
                quoted: false,
                value: Literal::Str(s),
            } => Some(s),
            _ => None,
        }
    }

    /// The name a call head refers to, written either as `$name` or as a bare word.
    pub fn head_name(&self) -> Option<&str> {
        self.as_variable().or_else(|| self.as_word())
    }

    /// Short description used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ExprKind::NoOp => "no-op",
            ExprKind::SExpr { .. } => "s-expression",
            ExprKind::List(_) => "list",
            ExprKind::Map(_) => "map",
            ExprKind::Value { .. } => "value",
            ExprKind::Variable(_) => "variable",
            ExprKind::If { .. } => "if",
            ExprKind::Def { .. } => "def",
            ExprKind::Export { .. } => "export",
            ExprKind::Import { .. } => "import",
            ExprKind::Fn { .. } => "fn",
            ExprKind::Let { .. } => "let",
            ExprKind::Try { .. } => "try",
            ExprKind::Cd { .. } => "cd",
            ExprKind::Execute { .. } => "execute",
        }
    }
}

fn write_spaced(f: &mut fmt::Formatter<'_>, items: &[ExprRef]) -> fmt::Result {
    for item in items {
        write!(f, " {item}")?;
    }
    Ok(())
}

/// Renders the tree back into lash syntax. Lowered forms print as the call
/// they came from, so the output of the pipeline can be re-read by a person.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::NoOp => f.write_str("<noop>"),
            ExprKind::SExpr { head, body } => {
                write!(f, "({head}")?;
                write_spaced(f, body)?;
                f.write_str(")")
            }
            ExprKind::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ExprKind::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                f.write_str("}")
            }
            ExprKind::Value {
                quoted: false,
                value: Literal::Str(word),
            } => f.write_str(word),
            ExprKind::Value {
                quoted: true,
                value: Literal::Str(s),
            } => write_quoted(f, s),
            ExprKind::Value { value, .. } => write!(f, "{value}"),
            ExprKind::Variable(name) => write!(f, "${name}"),
            ExprKind::If {
                condition,
                then,
                otherwise,
            } => {
                write!(f, "(if {condition} {then}")?;
                if let Some(otherwise) = otherwise {
                    write!(f, " {otherwise}")?;
                }
                f.write_str(")")
            }
            ExprKind::Def { name, value } => write!(f, "(def ${name} {value})"),
            ExprKind::Export { name, value } => write!(f, "(export ${name} {value})"),
            ExprKind::Import { mode, path } => {
                f.write_str("(import ")?;
                match mode {
                    ImportMode::Wildcard => f.write_str("*")?,
                    ImportMode::Namespaced(ns) => write!(f, "${ns}")?,
                    ImportMode::Named(names) => {
                        let names: Vec<String> = names.iter().map(|n| format!("${n}")).collect();
                        write!(f, "[{}]", names.join(" "))?;
                    }
                }
                write!(f, " {path})")
            }
            ExprKind::Fn { params, body } => {
                let params: Vec<String> = params.iter().map(|p| format!("${p}")).collect();
                write!(f, "(fn [{}] {body})", params.join(" "))
            }
            ExprKind::Let { bindings, body } => {
                f.write_str("(let {")?;
                for (i, (name, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "${name} {value}")?;
                }
                write!(f, "}} {body})")
            }
            ExprKind::Try {
                body,
                catch_name,
                catch_body,
                finally_body,
            } => {
                write!(f, "(try {body}")?;
                if !catch_body.is_noop() {
                    write!(f, " (catch ${catch_name} {catch_body})")?;
                }
                if !finally_body.is_noop() {
                    write!(f, " (finally {finally_body})")?;
                }
                f.write_str(")")
            }
            ExprKind::Cd { path, body } => {
                write!(f, "(cd {path}")?;
                if let Some(body) = body {
                    write!(f, " {body}")?;
                }
                f.write_str(")")
            }
            ExprKind::Execute {
                path,
                args,
                options,
            } => {
                write!(f, "(execute {path}")?;
                for part in [args, options].into_iter().flatten() {
                    write!(f, " {part}")?;
                }
                f.write_str(")")
            }
        }
    }
}
