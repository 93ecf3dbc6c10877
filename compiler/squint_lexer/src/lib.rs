//! Host lexer for the squint fuzzy parser.
//!
//! Tokenizes C-family source into annotated tokens. Two passes fused into
//! one loop:
//!
//! 1. logos produces [`raw_token::RawToken`]s; anything it cannot match
//!    becomes an `Unknown` token rather than an error.
//! 2. Cooking promotes raw identifiers to keywords or `Identifier` — a
//!    `RawIdentifier` never escapes this crate.
//!
//! Comments are kept as `Comment` tokens (the parser's cursor hides them);
//! whitespace is dropped. The output always ends with an `Eof` token.

mod keywords;
mod raw_token;

use logos::Logos;
use squint_ir::{Span, Token, TokenKind, TokenList};

use raw_token::RawToken;

/// Tokenize `src` into an annotated token list, ending with `Eof`.
pub fn lex(src: &str) -> TokenList {
    let mut list = TokenList::new();
    let mut lexer = RawToken::lexer(src);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(raw) => cook(raw, lexer.slice()),
            Err(()) => TokenKind::Unknown,
        };
        list.push(Token::new(kind, span));
    }

    let end = u32::try_from(src.len()).unwrap_or(u32::MAX);
    list.push(Token::new(TokenKind::Eof, Span::point(end)));
    list
}

/// Convert a raw token to its final kind.
fn cook(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Comment => TokenKind::Comment,
        RawToken::RawIdent => keywords::lookup(slice).unwrap_or(TokenKind::Identifier),
        RawToken::Numeric => TokenKind::NumericLiteral,
        RawToken::CharLit => TokenKind::CharLiteral,
        RawToken::StringLit => TokenKind::StringLiteral,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Period => TokenKind::Period,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Less => TokenKind::Less,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Amp => TokenKind::Amp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
    }
}
