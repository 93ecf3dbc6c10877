//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before keyword
//! cooking. Identifier-shaped words come out as `RawIdent` and are promoted
//! by [`crate::keywords::lookup`]; anything logos cannot match becomes an
//! `Unknown` token in the cooked stream.

use logos::Logos;

/// Raw token from logos (before keyword cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0c]+")] // Skip whitespace
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    RawIdent,

    // Integer and floating literals, with the usual bases and suffixes.
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    #[regex(r"0[bB][01]+[uUlL]*")]
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?[uUlLfF]*")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]*")]
    Numeric,

    #[regex(r"[LuU]?'([^'\\\n]|\\.)*'")]
    CharLit,

    #[regex(r#"[LuU]?"([^"\\\n]|\\.)*""#)]
    StringLit,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(".")]
    Period,
    #[token("->")]
    Arrow,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
}
