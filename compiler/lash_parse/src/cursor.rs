//! Token cursor with one token of lookahead.

use lash_ir::{Location, Symbol, Token};

pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the next token if it is `symbol`.
    pub(crate) fn eat(&mut self, symbol: Symbol) -> bool {
        if self.peek().and_then(Token::symbol) == Some(symbol) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Where end-of-input errors are reported: the last token in the stream.
    pub(crate) fn last_location(&self) -> Location {
        self.tokens
            .last()
            .map_or_else(Location::builtin, |token| token.loc.clone())
    }
}
