//! String literals and interpolation.

use lash_ir::{LashError, Symbol, Token, TokenKind};
use lash_stack::ensure_sufficient_stack;

use crate::{ends_word, errors, Lexer, Until};

fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        'r' => '\r',
        'n' => '\n',
        's' => ' ',
        // `\$`, `\\`, `\"` and anything unknown pass through as themselves
        other => other,
    }
}

/// A word after `$` also stops at `\` and another `$`.
fn ends_interpolated_word(c: char) -> bool {
    ends_word(c) || c == '\\' || c == '$'
}

impl Lexer<'_> {
    fn char_at(&self, offset: usize) -> Option<char> {
        self.source.get(offset..).and_then(|rest| rest.chars().next())
    }

    fn word_at(&self, offset: usize, ends: fn(char) -> bool) -> &str {
        let rest = self.source.get(offset..).unwrap_or_default();
        let len = rest.find(ends).unwrap_or(rest.len());
        &rest[..len]
    }

    /// Scan the string whose opening quote is at `start`. Returns the offset
    /// just past the closing quote.
    pub(crate) fn lex_string(&self, start: usize, out: &mut Vec<Token>) -> Result<usize, LashError> {
        ensure_sufficient_stack(|| self.lex_string_inner(start, out))
    }

    fn lex_string_inner(&self, start: usize, out: &mut Vec<Token>) -> Result<usize, LashError> {
        let opened = self.location(start);
        let Some(quote) = self.char_at(start) else {
            return Err(errors::unclosed_string(&opened));
        };

        let mut pos = start + quote.len_utf8();
        let mut chunks = Chunks {
            lexer: self,
            parts: Vec::new(),
            text: String::new(),
            text_start: pos,
            interpolated: false,
        };

        loop {
            let Some(c) = self.char_at(pos) else {
                return Err(errors::unclosed_string(&opened));
            };
            pos += c.len_utf8();

            match c {
                c if c == quote => break,
                '\\' => {
                    let Some(escaped) = self.char_at(pos) else {
                        return Err(errors::unclosed_string(&opened));
                    };
                    pos += escaped.len_utf8();
                    chunks.text.push(unescape(escaped));
                }
                '$' => match self.char_at(pos) {
                    None => return Err(errors::unclosed_string(&opened)),
                    Some('(') => {
                        chunks.flush();
                        let until = Until::ClosingParen {
                            string_start: opened.clone(),
                        };
                        pos = self.lex_tokens(pos, until, &mut chunks.parts)?;
                        chunks.resume_at(pos);
                    }
                    Some('{') => {
                        let name = self.word_at(pos + 1, ends_interpolated_word);
                        let close = pos + 1 + name.len();
                        if !name.is_empty() && self.char_at(close) == Some('}') {
                            chunks.variable(pos - 1, name);
                            pos = close + 1;
                            chunks.resume_at(pos);
                        } else {
                            chunks.text.push('$');
                        }
                    }
                    Some(_) => {
                        let name = self.word_at(pos, ends_interpolated_word);
                        if name.is_empty() {
                            chunks.text.push('$');
                        } else {
                            chunks.variable(pos, name);
                            pos += name.len();
                            chunks.resume_at(pos);
                        }
                    }
                },
                c => chunks.text.push(c),
            }
        }

        if chunks.interpolated {
            chunks.flush();
            let close = self.location(pos - quote.len_utf8());
            out.push(Token::new(TokenKind::Symbol(Symbol::OpenParen), opened.clone()));
            out.push(Token::new(TokenKind::Variable("&".to_string()), opened));
            out.append(&mut chunks.parts);
            out.push(Token::new(TokenKind::Symbol(Symbol::CloseParen), close));
        } else {
            out.push(Token::new(
                TokenKind::Str {
                    value: chunks.text,
                    quoted: true,
                },
                opened,
            ));
        }
        Ok(pos)
    }
}

/// The pieces of an interpolated string, in order.
struct Chunks<'l, 'src> {
    lexer: &'l Lexer<'src>,
    parts: Vec<Token>,
    text: String,
    text_start: usize,
    interpolated: bool,
}

impl Chunks<'_, '_> {
    /// Emit the pending literal text, if any.
    fn flush(&mut self) {
        self.interpolated = true;
        if !self.text.is_empty() {
            let value = std::mem::take(&mut self.text);
            let loc = self.lexer.location(self.text_start);
            self.parts.push(Token::new(TokenKind::Str { value, quoted: true }, loc));
        }
    }

    fn variable(&mut self, offset: usize, name: &str) {
        self.flush();
        let loc = self.lexer.location(offset);
        self.parts.push(Token::new(TokenKind::Variable(name.to_string()), loc));
    }

    fn resume_at(&mut self, offset: usize) {
        self.text_start = offset;
    }
}
