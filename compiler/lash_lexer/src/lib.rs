//! Lexer for lash using logos.
//!
//! # Architecture
//!
//! `logos` classifies everything outside string literals (symbols, numbers,
//! `$variables`, bare words). When it reports an opening quote, the string is
//! scanned by hand in [`string`], because strings may interpolate:
//!
//! ```text
//! "hi $name, you are $(+ $age 1)"
//!   => ( $& "hi " $name ", you are " ( + $age 1 ) )
//! ```
//!
//! `$(` re-enters the token loop at that offset and stops at the matching
//! `)`, so strings can nest inside interpolations to any depth.

mod errors;
mod line_index;
mod raw_token;
mod string;

use std::rc::Rc;

use lash_ir::{LashError, Literal, Location, Symbol, Token, TokenKind};
use logos::Logos;

use line_index::LineIndex;
use raw_token::RawToken;

/// Lex `source`, tagging every token with `file`.
#[tracing::instrument(level = "debug", skip(source))]
pub fn lex(source: &str, file: &str) -> Result<Vec<Token>, LashError> {
    let lexer = Lexer::new(source, file);
    let mut tokens = Vec::new();
    lexer.lex_tokens(0, Until::EndOfInput, &mut tokens)?;
    tracing::debug!(count = tokens.len(), "lexed");
    Ok(tokens)
}

/// Where a run of tokens ends.
enum Until {
    EndOfInput,
    /// Inside `$(`: stop after the `)` that balances the first `(`.
    ClosingParen { string_start: Location },
}

struct Lexer<'src> {
    source: &'src str,
    file: Rc<str>,
    lines: LineIndex,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str, file: &str) -> Self {
        Lexer {
            source,
            file: Rc::from(file),
            lines: LineIndex::new(source),
        }
    }

    fn location(&self, offset: usize) -> Location {
        let (line, col) = self.lines.line_col(self.source, offset);
        Location {
            file: Rc::clone(&self.file),
            line,
            col,
        }
    }

    /// Lex tokens from byte offset `start`, returning the offset just past
    /// the last consumed character.
    fn lex_tokens(&self, start: usize, until: Until, out: &mut Vec<Token>) -> Result<usize, LashError> {
        let mut raw = RawToken::lexer(self.source);
        raw.bump(start);
        let mut depth = 0usize;

        while let Some(result) = raw.next() {
            let span = raw.span();
            let loc = self.location(span.start);
            let Ok(kind) = result else {
                return Err(errors::unexpected_character(&loc, raw.slice()));
            };

            let symbol = match kind {
                RawToken::Quote => {
                    let end = self.lex_string(span.start, out)?;
                    raw.bump(end - span.end);
                    continue;
                }
                RawToken::Number => {
                    out.push(Token::new(self.number(raw.slice(), span.start)?, loc));
                    continue;
                }
                RawToken::Variable => {
                    let name = raw.slice()[1..].to_string();
                    out.push(Token::new(TokenKind::Variable(name), loc));
                    continue;
                }
                RawToken::Word => {
                    out.push(Token::new(word(raw.slice()), loc));
                    continue;
                }
                RawToken::OpenParen => Symbol::OpenParen,
                RawToken::CloseParen => Symbol::CloseParen,
                RawToken::OpenBracket => Symbol::OpenBracket,
                RawToken::CloseBracket => Symbol::CloseBracket,
                RawToken::OpenBrace => Symbol::OpenBrace,
                RawToken::CloseBrace => Symbol::CloseBrace,
            };
            out.push(Token::new(TokenKind::Symbol(symbol), loc));

            if let Until::ClosingParen { .. } = until {
                match symbol {
                    Symbol::OpenParen => depth += 1,
                    Symbol::CloseParen => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return Ok(span.end);
                        }
                    }
                    _ => {}
                }
            }
        }

        match until {
            Until::EndOfInput => Ok(self.source.len()),
            Until::ClosingParen { string_start } => Err(errors::unclosed_string(&string_start)),
        }
    }

    /// Numbers are a digit followed by digits and dots, ending at whitespace or a symbol.
    fn number(&self, text: &str, start: usize) -> Result<TokenKind, LashError> {
        if let Some((offset, c)) = text.char_indices().find(|&(_, c)| c != '.' && !c.is_ascii_digit()) {
            return Err(errors::expected_number(&self.location(start + offset), c));
        }
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| errors::invalid_number(&self.location(start), text))
    }
}

fn word(text: &str) -> TokenKind {
    match text {
        "null" => TokenKind::Literal(Literal::Null),
        "true" => TokenKind::Literal(Literal::Bool(true)),
        "false" => TokenKind::Literal(Literal::Bool(false)),
        _ => TokenKind::Str {
            value: text.to_string(),
            quoted: false,
        },
    }
}

/// Characters that end a bare word.
pub(crate) fn ends_word(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\r' | '\n' | ',' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' | '`'
    )
}
