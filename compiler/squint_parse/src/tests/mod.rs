//! Parser test suite.
//!
//! `parser` covers the grammar scenario by scenario; `invariants` checks
//! the token-ownership properties on real and generated streams.

mod parser;

use squint_ir::{Stmt, TokenId, TokenList, TranslationUnit};

use crate::fuzzy_parse;
use crate::verify::verify_tree;

/// Lex, parse, and assert the ownership invariants hold.
pub(crate) fn parse_checked(src: &str) -> (TokenList, TranslationUnit) {
    let tokens = squint_lexer::lex(src);
    let tu = fuzzy_parse(&tokens);
    if let Err(violation) = verify_tree(&tu, &tokens) {
        panic!("invariant violation for {src:?}: {violation}");
    }
    (tokens, tu)
}

/// The `i`-th top-level statement.
pub(crate) fn stmt<'a>(tu: &'a TranslationUnit, i: usize) -> &'a Stmt {
    tu.element(tu.stmts[i]).as_stmt().expect("top level is a statement")
}

/// Source text of a token.
pub(crate) fn text<'s>(tokens: &TokenList, src: &'s str, id: TokenId) -> &'s str {
    tokens.text(id, src)
}
