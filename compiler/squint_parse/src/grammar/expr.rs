//! Expression parsing: precedence climbing with unary and postfix special
//! cases.

use squint_ir::{
    BinaryOperator, CallExpr, DeclRefExpr, Element, Expr, LiteralConstant, NodeId, ParenExpr,
    QualifiedName, TokenKind, UnaryOperator,
};

use crate::precedence::{binary_precedence, PREC_ARROW_AND_PERIOD, PREC_COMMA, PREC_UNARY};
use crate::Parser;

impl Parser<'_> {
    /// Parse an expression at `precedence` or tighter.
    ///
    /// `stop_at_greater` makes a `>` terminate the expression instead of
    /// reading it as a comparison; template argument lists parse with it
    /// set, and parenthesized groups reset it.
    ///
    /// The two synthetic levels are layered here, above the oracle:
    /// [`PREC_UNARY`] delegates to the prefix-operator parser and anything
    /// above [`PREC_ARROW_AND_PERIOD`] is a primary.
    pub(crate) fn parse_expr(&mut self, precedence: u8, stop_at_greater: bool) -> Option<NodeId> {
        if precedence == PREC_UNARY {
            return self.parse_unary_operator();
        }
        if precedence > PREC_ARROW_AND_PERIOD {
            return self.parse_primary();
        }

        let mut left = self.parse_expr(precedence + 1, stop_at_greater)?;

        while let Some(kind) = self.peek_kind() {
            if stop_at_greater && kind == TokenKind::Greater {
                break;
            }

            let current = if matches!(kind, TokenKind::Period | TokenKind::Arrow) {
                PREC_ARROW_AND_PERIOD
            } else {
                binary_precedence(kind)
            };
            if current == 0 {
                return Some(left);
            }
            if current < precedence {
                break;
            }
            // Climbing descends one level at a time, so a tighter operator
            // would already have been folded by a deeper call.
            debug_assert_eq!(current, precedence);

            let op = self.bump();
            let rhs = self.parse_expr(precedence + 1, stop_at_greater)?;
            let id = self.alloc(Element::Expr(Expr::Binary(BinaryOperator {
                lhs: left,
                op,
                rhs,
            })));
            self.claim(op, id);
            left = id;
        }

        Some(left)
    }

    /// Prefix unary operators `+ - ! ~ * & ++ --`, recursively applied.
    fn parse_unary_operator(&mut self) -> Option<NodeId> {
        match self.peek_kind() {
            Some(
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Star
                | TokenKind::Amp
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus,
            ) => self.speculate(|p| {
                let op = p.bump();
                let operand = p.parse_unary_operator()?;
                let id = p.alloc(Element::Expr(Expr::Unary(UnaryOperator { op, operand })));
                p.claim(op, id);
                Some(id)
            }),
            _ => self.parse_expr(PREC_ARROW_AND_PERIOD, false),
        }
    }

    /// Primary: literal/constant, qualified name (optionally a call), or a
    /// parenthesized group.
    fn parse_primary(&mut self) -> Option<NodeId> {
        let kind = self.peek_kind()?;

        if kind.is_literal_or_constant() {
            let tok = self.bump();
            let id = self.alloc(Element::Expr(Expr::Literal(LiteralConstant { tok })));
            self.claim(tok, id);
            return Some(id);
        }

        if matches!(kind, TokenKind::Identifier | TokenKind::ColonColon) {
            let mut name = QualifiedName::default();
            if !self.parse_qualified_id_into(&mut name) {
                return None;
            }
            let id = self.alloc(Element::Expr(Expr::DeclRef(DeclRefExpr { name })));
            if let Element::Expr(Expr::DeclRef(dr)) = &self.arena()[id] {
                self.claim_qualified_name(&dr.name, id);
            }
            if self.check(TokenKind::LParen) {
                return self.parse_call_expr(id);
            }
            return Some(id);
        }

        if kind == TokenKind::LParen {
            let lparen = self.bump();
            // Grouping resets the template-argument `>` handling.
            let inner = self.parse_expr(PREC_COMMA, false)?;
            if !self.check(TokenKind::RParen) {
                return None;
            }
            let rparen = self.bump();
            let id = self.alloc(Element::Expr(Expr::Paren(ParenExpr {
                lparen,
                rparen,
                inner,
            })));
            self.claim(lparen, id);
            self.claim(rparen, id);
            return Some(id);
        }

        None
    }

    /// `callee(args)` — arguments at comma-precedence + 1 so the comma
    /// operator cannot appear unparenthesized inside a call.
    fn parse_call_expr(&mut self, callee: NodeId) -> Option<NodeId> {
        debug_assert!(self.check(TokenKind::LParen));
        let lparen = self.bump();

        let mut args = Vec::new();
        let mut commas = Vec::new();
        while !self.check(TokenKind::RParen) {
            let Some(arg) = self.parse_expr(PREC_COMMA + 1, false) else {
                break;
            };
            args.push(arg);
            if self.check(TokenKind::Comma) {
                commas.push(self.bump());
            } else {
                break;
            }
        }

        if !self.check(TokenKind::RParen) {
            return None;
        }
        let rparen = self.bump();

        let id = self.alloc(Element::Expr(Expr::Call(CallExpr {
            callee,
            lparen,
            rparen,
            args,
            commas,
        })));
        self.claim(lparen, id);
        self.claim(rparen, id);
        if let Element::Expr(Expr::Call(call)) = &self.arena()[id] {
            self.claim_all(&call.commas, id);
        }
        Some(id)
    }
}
