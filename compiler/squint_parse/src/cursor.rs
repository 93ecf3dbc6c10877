//! Backtrackable cursor over the token list.
//!
//! Presents a `[first, last)` window as a forward stream that hides
//! unknown and comment tokens from the recognizers. The whole cursor
//! state is the index pair, so a snapshot is two words and a rewind is a
//! copy.

use squint_ir::{Token, TokenId, TokenKind, TokenList};

/// Filtered, backtrackable view over the token array.
pub struct Cursor<'t> {
    tokens: &'t TokenList,
    first: usize,
    last: usize,
}

/// Saved `(first, last)` pair for rewinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    first: usize,
    last: usize,
}

impl<'t> Cursor<'t> {
    /// Create a cursor over the whole list.
    ///
    /// Leading unknown/comment tokens are skipped immediately and the
    /// stream collapses to empty if the first significant token is `Eof`,
    /// so trivia-only input is an empty stream.
    pub fn new(tokens: &'t TokenList) -> Self {
        let mut cursor = Cursor {
            tokens,
            first: 0,
            last: tokens.len(),
        };
        cursor.skip_trivia_and_collapse();
        cursor
    }

    fn skip_trivia_and_collapse(&mut self) {
        while self.first < self.last && self.tokens[self.first].kind.is_trivia() {
            self.first += 1;
        }
        if self.first < self.last && self.tokens[self.first].kind == TokenKind::Eof {
            // Collapse to empty; `first` stays on the eof index so the raw
            // position never counts the eof token as consumed.
            self.last = self.first;
        }
    }

    /// Current token without consuming, `None` when exhausted.
    #[inline]
    pub fn peek(&self) -> Option<&'t Token> {
        if self.first < self.last {
            Some(&self.tokens[self.first])
        } else {
            None
        }
    }

    /// Kind of the current token.
    #[inline]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Check the current token against a kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume and return the current token's id, then advance past any
    /// following unknown/comment tokens, collapsing on `Eof`.
    ///
    /// A raw identifier surfacing here is a lexer bug: those must have been
    /// promoted to identifier or keyword before parsing.
    pub fn next(&mut self) -> Option<TokenId> {
        if self.first >= self.last {
            return None;
        }
        debug_assert!(
            self.tokens[self.first].kind != TokenKind::RawIdentifier,
            "raw identifier reached the parser"
        );
        let id = TokenId::new(self.first as u32);
        self.first += 1;
        self.skip_trivia_and_collapse();
        Some(id)
    }

    /// Snapshot the stream position.
    #[inline]
    pub fn mark(&self) -> CursorState {
        CursorState {
            first: self.first,
            last: self.last,
        }
    }

    /// Restore a snapshot taken with [`Cursor::mark`].
    #[inline]
    pub fn rewind(&mut self, state: CursorState) {
        self.first = state.first;
        self.last = state.last;
    }

    /// Raw index of the next unconsumed token (trivia included). Used by
    /// salvage to claim whole token ranges.
    #[inline]
    pub fn raw_pos(&self) -> usize {
        self.first
    }

    /// True when no significant tokens remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squint_ir::Token;

    fn toks(kinds: &[TokenKind]) -> TokenList {
        let mut list = TokenList::new();
        for &kind in kinds {
            list.push(Token::dummy(kind));
        }
        list.push(Token::dummy(TokenKind::Eof));
        list
    }

    #[test]
    fn next_skips_interior_trivia() {
        let list = toks(&[
            TokenKind::Identifier,
            TokenKind::Comment,
            TokenKind::Unknown,
            TokenKind::Semi,
        ]);
        let mut cursor = Cursor::new(&list);
        assert_eq!(cursor.peek_kind(), Some(TokenKind::Identifier));
        cursor.next();
        // Comment and unknown are hidden.
        assert_eq!(cursor.peek_kind(), Some(TokenKind::Semi));
        cursor.next();
        assert!(cursor.is_empty());
    }

    #[test]
    fn leading_trivia_is_hidden_at_construction() {
        let list = toks(&[TokenKind::Comment, TokenKind::Unknown, TokenKind::Int]);
        let cursor = Cursor::new(&list);
        assert_eq!(cursor.peek_kind(), Some(TokenKind::Int));
    }

    #[test]
    fn trivia_only_input_is_empty() {
        let list = toks(&[TokenKind::Comment, TokenKind::Comment, TokenKind::Unknown]);
        let cursor = Cursor::new(&list);
        assert!(cursor.is_empty());
        assert!(cursor.peek().is_none());
    }

    #[test]
    fn collapses_on_eof() {
        let list = toks(&[TokenKind::Semi]);
        let mut cursor = Cursor::new(&list);
        assert!(!cursor.is_empty());
        cursor.next();
        assert!(cursor.is_empty());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn mark_and_rewind_restore_the_position() {
        let list = toks(&[TokenKind::Int, TokenKind::Identifier, TokenKind::Semi]);
        let mut cursor = Cursor::new(&list);
        let state = cursor.mark();
        cursor.next();
        cursor.next();
        assert_eq!(cursor.peek_kind(), Some(TokenKind::Semi));
        cursor.rewind(state);
        assert_eq!(cursor.peek_kind(), Some(TokenKind::Int));
    }

    #[test]
    fn raw_pos_excludes_eof_after_collapse() {
        let list = toks(&[TokenKind::Semi, TokenKind::Comment]);
        let mut cursor = Cursor::new(&list);
        cursor.next();
        // Collapsed: raw position rests on the eof index, past the trailing
        // comment but not counting eof itself.
        assert_eq!(cursor.raw_pos(), 2);
    }
}
