//! The statement dispatcher and the simple statement recognizers.
//!
//! `parse_any` tries the recognizers in a fixed order and, when nothing
//! matches, salvages a bounded token run so the entry loop always makes
//! progress. Ordering matters: declarations must precede expressions
//! because `T x;` reads as both a declaration of `x` and an expression
//! reference to `T` followed by an orphan identifier, and the declaration
//! reading wins.

mod decl;
mod expr;
mod ty;

use squint_ir::{
    CompoundStmt, Element, ExprLineStmt, LabelStmt, NodeId, ReturnStmt, Stmt, TokenId, TokenKind,
    UnparsableBlock,
};
use tracing::trace;

use crate::precedence::PREC_COMMA;
use crate::Parser;

impl Parser<'_> {
    /// Try every statement recognizer in order and return the first
    /// success.
    ///
    /// With `salvage` enabled an unrecognizable run is consumed into an
    /// [`UnparsableBlock`] (guaranteeing forward progress); disabled, the
    /// dispatcher reports failure instead. `name_optional` is set inside
    /// brace scopes, where constructors and destructors may omit names.
    pub(crate) fn parse_any(&mut self, salvage: bool, name_optional: bool) -> Option<NodeId> {
        if let Some(stmt) = self.parse_return_stmt() {
            return Some(stmt);
        }
        if let Some(stmt) = self.parse_decl_stmt() {
            return Some(stmt);
        }
        if let Some(stmt) = self.parse_label_stmt() {
            return Some(stmt);
        }
        if let Some(func) = self.parse_function_decl(name_optional) {
            if !self.function_has_semi(func) && self.check(TokenKind::LBrace) {
                if let Some(body) = self.parse_compound_stmt() {
                    self.set_function_body(func, body);
                }
            }
            return Some(func);
        }
        if let Some(stmt) = self.parse_class_decl() {
            return Some(stmt);
        }
        if let Some(stmt) = self.parse_expr_line_stmt() {
            return Some(stmt);
        }
        if salvage {
            Some(self.skip_unparsable())
        } else {
            None
        }
    }

    /// `return` with an optional expression and a required semicolon.
    fn parse_return_stmt(&mut self) -> Option<NodeId> {
        self.speculate(|p| {
            if !p.check(TokenKind::Return) {
                return None;
            }
            let return_tok = p.bump();
            let body = if p.check(TokenKind::Semi) {
                None
            } else {
                Some(p.parse_expr(PREC_COMMA, false)?)
            };
            if !p.check(TokenKind::Semi) {
                return None;
            }
            let semi = p.bump();
            let id = p.alloc(Element::Stmt(Stmt::Return(ReturnStmt {
                return_tok,
                body,
                semi,
            })));
            p.claim(return_tok, id);
            p.claim(semi, id);
            Some(id)
        })
    }

    /// An identifier or access specifier followed by `:`.
    fn parse_label_stmt(&mut self) -> Option<NodeId> {
        self.speculate(|p| {
            let kind = p.peek_kind()?;
            if kind != TokenKind::Identifier && !kind.is_access_specifier() {
                return None;
            }
            let name = p.bump();
            if !p.check(TokenKind::Colon) {
                return None;
            }
            let colon = p.bump();
            let id = p.alloc(Element::Stmt(Stmt::Label(LabelStmt { name, colon })));
            p.claim(name, id);
            p.claim(colon, id);
            Some(id)
        })
    }

    /// An expression followed by `;`.
    fn parse_expr_line_stmt(&mut self) -> Option<NodeId> {
        self.speculate(|p| {
            let expr = p.parse_expr(PREC_COMMA, false)?;
            if !p.check(TokenKind::Semi) {
                return None;
            }
            let semi = p.bump();
            let id = p.alloc(Element::Stmt(Stmt::ExprLine(ExprLineStmt { expr, semi })));
            p.claim(semi, id);
            Some(id)
        })
    }

    /// `{` scope `}` — the right brace may be missing in truncated input.
    pub(crate) fn parse_compound_stmt(&mut self) -> Option<NodeId> {
        if !self.check(TokenKind::LBrace) {
            return None;
        }
        let lbrace = self.bump();
        let body = self.parse_scope();
        let rbrace = self.check(TokenKind::RBrace).then(|| self.bump());
        let id = self.alloc(Element::Stmt(Stmt::Compound(CompoundStmt {
            lbrace,
            rbrace,
            body,
        })));
        self.claim(lbrace, id);
        if let Some(tok) = rbrace {
            self.claim(tok, id);
        }
        Some(id)
    }

    /// Statement loop inside braces: salvage enabled, names optional, stop
    /// at `}` or exhaustion. Never fails on malformed content.
    pub(crate) fn parse_scope(&mut self) -> Vec<NodeId> {
        let mut body = Vec::new();
        while !self.at_end() && !self.check(TokenKind::RBrace) {
            match self.parse_any(true, true) {
                Some(stmt) => body.push(stmt),
                None => break,
            }
        }
        body
    }

    /// Consume tokens up to and including the next `;`, `{` or `}` (or end
    /// of input) into an opaque block. The block owns the whole raw token
    /// range, including the unknown/comment tokens the cursor skipped over
    /// inside it.
    fn skip_unparsable(&mut self) -> NodeId {
        let start = self.raw_pos();
        let mut end = start;
        let mut terminated = false;

        while let Some(kind) = self.peek_kind() {
            let tok = self.bump();
            end = tok.index() + 1;
            if matches!(kind, TokenKind::Semi | TokenKind::LBrace | TokenKind::RBrace) {
                terminated = true;
                break;
            }
        }
        if !terminated {
            // Ran to end of input: own the trailing skipped trivia too.
            end = self.raw_pos();
        }

        let tokens: Vec<TokenId> = (start..end).map(|i| TokenId::new(i as u32)).collect();
        debug_assert!(!tokens.is_empty(), "salvage must consume at least one token");
        let count = tokens.len();

        let id = self.alloc(Element::Stmt(Stmt::Unparsable(UnparsableBlock { tokens })));
        if let Element::Stmt(Stmt::Unparsable(block)) = &self.arena()[id] {
            self.claim_all(&block.tokens, id);
        }
        trace!(node = ?id, tokens = count, "salvaged unparsable block");
        id
    }
}
