//! Recursive descent parser for lash.
//!
//! The grammar is tiny:
//!
//! ```text
//! program    := expression*
//! expression := "(" expression+ ")"        s-expression, first child is the head
//!             | "[" expression* "]"        list
//!             | "{" (expression expression)* "}"   map, entries in source order
//!             | string | number | literal | variable
//! ```
//!
//! The parser only builds syntactic nodes. Special forms such as `if` or
//! `def` are ordinary s-expressions here; the transform pipeline lowers them.

mod cursor;
mod errors;

use lash_ir::{Expr, ExprKind, ExprRef, LashError, Literal, Location, Symbol, Token, TokenKind};
use lash_stack::ensure_sufficient_stack;

use cursor::Cursor;

/// Parse a whole token stream into top-level forms.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Vec<ExprRef>, LashError> {
    let mut parser = Parser {
        cursor: Cursor::new(tokens),
    };
    let mut forms = Vec::new();
    while !parser.cursor.is_at_end() {
        forms.push(parser.expression()?);
    }
    Ok(forms)
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl Parser<'_> {
    fn expression(&mut self) -> Result<ExprRef, LashError> {
        ensure_sufficient_stack(|| self.expression_inner())
    }

    fn expression_inner(&mut self) -> Result<ExprRef, LashError> {
        let Some(token) = self.cursor.next() else {
            return Err(errors::unexpected_eof(&self.cursor.last_location()));
        };
        let loc = token.loc.clone();

        let kind = match &token.kind {
            TokenKind::Symbol(Symbol::OpenParen) => return self.sexpr(loc),
            TokenKind::Symbol(Symbol::OpenBracket) => {
                let items = self.until(Symbol::CloseBracket, errors::unexpected_eof)?;
                ExprKind::List(items)
            }
            TokenKind::Symbol(Symbol::OpenBrace) => return self.map(loc),
            TokenKind::Symbol(close) => return Err(errors::unexpected_token(&loc, close.as_char())),
            TokenKind::Str { value, quoted } => ExprKind::Value {
                quoted: *quoted,
                value: Literal::str(value.as_str()),
            },
            TokenKind::Number(n) => ExprKind::Value {
                quoted: false,
                value: Literal::Number(*n),
            },
            TokenKind::Literal(literal) => ExprKind::Value {
                quoted: false,
                value: literal.clone(),
            },
            TokenKind::Variable(name) => ExprKind::Variable(name.clone()),
        };
        Ok(Expr::new(loc, kind))
    }

    fn sexpr(&mut self, loc: Location) -> Result<ExprRef, LashError> {
        let mut items = self.until(Symbol::CloseParen, errors::unterminated_sexpr)?.into_iter();
        let Some(head) = items.next() else {
            return Err(errors::empty_sexpr(&loc));
        };
        Ok(Expr::sexpr(loc, head, items.collect()))
    }

    fn map(&mut self, loc: Location) -> Result<ExprRef, LashError> {
        let items = self.until(Symbol::CloseBrace, errors::unexpected_eof)?;
        if items.len() % 2 != 0 {
            return Err(errors::odd_map_literal(&loc));
        }
        let mut entries = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            entries.push((key, value));
        }
        Ok(Expr::new(loc, ExprKind::Map(entries)))
    }

    /// Parse expressions up to and including the `close` symbol.
    fn until(
        &mut self,
        close: Symbol,
        at_end: fn(&Location) -> LashError,
    ) -> Result<Vec<ExprRef>, LashError> {
        let mut items = Vec::new();
        loop {
            if self.cursor.eat(close) {
                return Ok(items);
            }
            if self.cursor.peek().is_none() {
                return Err(at_end(&self.cursor.last_location()));
            }
            items.push(self.expression()?);
        }
    }
}
