//! Lexer output.

use std::fmt;

use crate::{Literal, Location};

/// One of the six grouping characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::OpenParen => '(',
            Symbol::CloseParen => ')',
            Symbol::OpenBracket => '[',
            Symbol::CloseBracket => ']',
            Symbol::OpenBrace => '{',
            Symbol::CloseBrace => '}',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// A quoted string or a bare word.
    Str { value: String, quoted: bool },
    /// `$name`, stored without the sigil.
    Variable(String),
    Number(f64),
    /// `null`, `true` or `false`.
    Literal(Literal),
    Symbol(Symbol),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Location,
}

impl Token {
    pub fn new(kind: TokenKind, loc: Location) -> Self {
        Token { kind, loc }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Str { value, quoted: true } => write!(f, "string {value:?}"),
            TokenKind::Str { value, quoted: false } => write!(f, "word {value}"),
            TokenKind::Variable(name) => write!(f, "variable ${name}"),
            TokenKind::Number(n) => write!(f, "number {}", crate::format_number(*n)),
            TokenKind::Literal(lit) => write!(f, "literal {lit}"),
            TokenKind::Symbol(s) => write!(f, "symbol {}", s.as_char()),
        }
    }
}
