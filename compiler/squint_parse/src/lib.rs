//! Fuzzy recursive descent parser for C-family token streams.
//!
//! Never rejects input: recognizers speculate, rewind on failure, and a
//! salvage path swallows anything unrecognizable into opaque blocks, so
//! every significant token ends up owned by exactly one AST element and a
//! highlighter can map each token to a semantic role through its
//! back-reference.
//!
//! ## Architecture
//!
//! - [`cursor`]: filtered, backtrackable view over the token array
//! - [`precedence`]: pure binary-operator oracle plus two synthetic levels
//! - [`grammar`]: the statement dispatcher and the recognizers
//! - [`verify`]: post-parse invariant checking for tests
//!
//! ## Backtracking
//!
//! Every speculative recognizer runs inside [`Parser::speculate`]: a
//! [`ParserSnapshot`] captures the cursor window and the arena length on
//! entry; returning `None` rewinds the cursor and truncates the arena, so a
//! failed attempt leaves no element behind and the stream position equals
//! the pre-call position. Token claims made by a failed attempt are
//! overwritten when the committed path re-consumes those tokens.

mod cursor;
mod grammar;
pub mod precedence;
pub mod verify;

pub use cursor::{Cursor, CursorState};

use squint_ir::{
    AstArena, Element, NodeId, QualifiedName, TokenId, TokenKind, TokenList, TranslationUnit,
};
use tracing::trace;

/// Saved parser state: cursor window plus arena length.
#[derive(Debug, Clone, Copy)]
pub struct ParserSnapshot {
    cursor: CursorState,
    nodes: usize,
}

/// Parser state over one token list.
pub struct Parser<'t> {
    tokens: &'t TokenList,
    cursor: Cursor<'t>,
    arena: AstArena,
}

impl<'t> Parser<'t> {
    /// Create a parser positioned at the start of the stream.
    pub fn new(tokens: &'t TokenList) -> Self {
        Parser {
            tokens,
            cursor: Cursor::new(tokens),
            arena: AstArena::new(),
        }
    }

    /// Drive the top-level statement loop until the stream is empty.
    pub fn parse_translation_unit(mut self) -> TranslationUnit {
        let mut stmts = Vec::new();
        while !self.cursor.is_empty() {
            match self.parse_any(true, false) {
                Some(stmt) => stmts.push(stmt),
                // Unreachable with salvage enabled; bail rather than spin.
                None => break,
            }
        }
        trace!(statements = stmts.len(), "parsed translation unit");
        TranslationUnit {
            stmts,
            arena: self.arena,
        }
    }

    // --- Backtracking ---

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            cursor: self.cursor.mark(),
            nodes: self.arena.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.rewind(snapshot.cursor);
        self.arena.truncate(snapshot.nodes);
    }

    /// Run a recognizer transactionally: commit on `Some`, rewind the
    /// cursor and drop the partial subtree on `None`.
    pub(crate) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_none() {
            self.restore(snapshot);
        }
        result
    }

    // --- Token access (cursor delegation) ---

    #[inline]
    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.cursor.peek_kind()
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    /// Consume the current token, which the caller has already checked.
    #[inline]
    pub(crate) fn bump(&mut self) -> TokenId {
        self.cursor.next().expect("bump past end of stream")
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.cursor.is_empty()
    }

    #[inline]
    pub(crate) fn raw_pos(&self) -> usize {
        self.cursor.raw_pos()
    }

    // --- Claims and allocation ---

    /// Install `node` as the owner of `tok`.
    #[inline]
    pub(crate) fn claim(&self, tok: TokenId, node: NodeId) {
        self.tokens[tok].set_ast_node(node);
    }

    pub(crate) fn claim_all(&self, toks: &[TokenId], node: NodeId) {
        for &tok in toks {
            self.claim(tok, node);
        }
    }

    /// Claim a qualified name's own tokens (segments and template
    /// separators) for `node`. Template argument elements claim themselves.
    pub(crate) fn claim_qualified_name(&self, name: &QualifiedName, node: NodeId) {
        self.claim_all(&name.toks, node);
        if let Some(template) = &name.template {
            self.claim_all(&template.seps, node);
        }
    }

    #[inline]
    pub(crate) fn alloc(&mut self, element: Element) -> NodeId {
        self.arena.alloc(element)
    }

    #[inline]
    pub(crate) fn arena(&self) -> &AstArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut AstArena {
        &mut self.arena
    }
}

/// Parse a token stream into a translation unit.
///
/// Every input yields a tree; unparsable regions are preserved as
/// [`squint_ir::UnparsableBlock`]s. The token list's back-reference slots
/// are filled in as a side effect.
pub fn fuzzy_parse(tokens: &TokenList) -> TranslationUnit {
    Parser::new(tokens).parse_translation_unit()
}

#[cfg(test)]
mod tests;
