//! Lash IR - the shared data model of the lash front end.
//!
//! This crate contains the types every phase agrees on:
//! - [`Location`] for source positions and [`LashError`] for located failures
//! - [`Token`] for lexer output
//! - [`Literal`] for compile-time constants
//! - [`Expr`] for the expression tree, plus the bottom-up rewrite driver in [`visitor`]
//!
//! # Design Philosophy
//!
//! - **Persistent trees**: children are `Rc<Expr>`, a rewrite builds new
//!   parents and shares every untouched subtree.
//! - **One error type**: every phase fails through [`Location::fail`].

mod error;
mod expr;
mod literal;
mod location;
mod token;
pub mod visitor;

pub use error::{ErrorKind, LashError};
pub use expr::{Expr, ExprKind, ExprRef, ImportMode};
pub use literal::{format_number, Literal};
pub use location::Location;
pub use token::{Symbol, Token, TokenKind};
pub use visitor::{walk_expr, Visitor};
