use logos::Logos;

/// Token classes recognised outside string literals.
///
/// A quote only marks where a string begins; the string body is scanned by
/// hand because of interpolation.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n,]+")]
pub(crate) enum RawToken {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[regex(r#"['"`]"#)]
    Quote,

    /// Validated afterwards so `12ab` reports the offending character.
    #[regex(r#"[0-9][^ \t\r\n,()\[\]{}]*"#)]
    Number,

    #[regex(r#"\$[^ \t\r\n,()\[\]{}'"`]*"#)]
    Variable,

    #[regex(r#"[^ \t\r\n,()\[\]{}'"`$0-9][^ \t\r\n,()\[\]{}'"`]*"#)]
    Word,
}
