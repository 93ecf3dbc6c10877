//! Declaration recognizers: variables, declaration statements, functions
//! and classes.

use squint_ir::{
    BaseClass, ClassDecl, DeclStmt, Element, FunctionDecl, InitKind, NodeId, Stmt, TokenKind,
    VarDecl, VarInit,
};
use tracing::trace;

use crate::precedence::PREC_COMMA;
use crate::Parser;

impl Parser<'_> {
    /// Parse one declarator.
    ///
    /// With a supplied `base` (second and later declarators of a
    /// multi-declarator statement) the base type is cloned without
    /// decorations; otherwise this declarator parses its own base type,
    /// decoration-less, and owns its tokens. Either way the declarator then
    /// takes its own decorations, an optional-by-flag name, and an optional
    /// `= expression` initializer.
    pub(crate) fn parse_var_decl(
        &mut self,
        base: Option<NodeId>,
        name_optional: bool,
    ) -> Option<NodeId> {
        self.speculate(|p| {
            let var_type = match base {
                Some(b) => p.clone_type_without_decorations(b),
                None => p.parse_type(false)?,
            };
            p.parse_type_decorations(var_type);

            let name = if p.check(TokenKind::Identifier) {
                Some(p.bump())
            } else if name_optional {
                None
            } else {
                return None;
            };

            let init = if p.check(TokenKind::Eq) {
                let eq = p.bump();
                let value = p.parse_expr(PREC_COMMA + 1, false)?;
                let vi = p.alloc(Element::VarInit(VarInit {
                    kind: InitKind::Assignment,
                    ops: [Some(eq), None],
                    value,
                }));
                p.claim(eq, vi);
                Some(vi)
            } else {
                None
            };

            let id = p.alloc(Element::VarDecl(VarDecl {
                var_type,
                name,
                init,
            }));
            if let Some(name) = name {
                p.claim(name, id);
            }
            Some(id)
        })
    }

    /// One or more comma-separated declarators sharing a leading base type,
    /// terminated by `;`. The statement owns the base type element.
    pub(crate) fn parse_decl_stmt(&mut self) -> Option<NodeId> {
        self.speculate(|p| {
            let base_type = p.parse_type(false)?;

            let mut decls = Vec::new();
            let mut commas = Vec::new();
            loop {
                if p.at_end() {
                    return None;
                }
                if p.check(TokenKind::Semi) {
                    if decls.is_empty() {
                        return None;
                    }
                    let semi = p.bump();
                    let id = p.alloc(Element::Stmt(Stmt::Decl(DeclStmt {
                        base_type,
                        decls,
                        commas,
                        semi,
                    })));
                    if let Element::Stmt(Stmt::Decl(d)) = &p.arena()[id] {
                        p.claim_all(&d.commas, id);
                        p.claim(d.semi, id);
                    }
                    trace!(node = ?id, "declaration statement");
                    return Some(id);
                }

                let decl = p.parse_var_decl(Some(base_type), false)?;
                decls.push(decl);

                if p.check(TokenKind::Comma) {
                    commas.push(p.bump());
                } else if !p.check(TokenKind::Semi) {
                    return None;
                }
            }
        })
    }

    /// Function declaration: optional fused `static`/`virtual` marker, a
    /// return type (or the destructor pattern when names are optional), the
    /// name rules, a parenthesized parameter list, an opaque trailer, and
    /// an optional `;`. A `{` body is attached by the dispatcher.
    pub(crate) fn parse_function_decl(&mut self, name_optional: bool) -> Option<NodeId> {
        self.speculate(|p| {
            let modifier = match p.peek_kind() {
                Some(TokenKind::Static | TokenKind::Virtual) => Some(p.bump()),
                _ => None,
            };

            let mut name = None;
            let mut in_destructor = false;
            let return_type = if let Some(ty) = p.parse_type(true) {
                ty
            } else if name_optional && p.check(TokenKind::Tilde) {
                // Destructor: the tilde is the name token and the class
                // name is captured by the type recognizer run after it.
                name = Some(p.bump());
                in_destructor = true;
                p.parse_type(true)?
            } else {
                return None;
            };

            if !in_destructor {
                if p.check(TokenKind::Identifier) {
                    name = Some(p.bump());
                } else if !name_optional {
                    return None;
                }
            }

            if !p.check(TokenKind::LParen) {
                return None;
            }
            let lparen = p.bump();

            let mut params = Vec::new();
            let mut commas = Vec::new();
            while !p.check(TokenKind::RParen) {
                let param = p.parse_var_decl(None, true)?;
                params.push(param);
                if p.check(TokenKind::Comma) {
                    commas.push(p.bump());
                } else {
                    break;
                }
            }
            if !p.check(TokenKind::RParen) {
                return None;
            }
            let rparen = p.bump();

            // Member-initializer lists, attribute specifiers and trailing
            // qualifiers fold into the function without interpretation.
            let mut trailer = Vec::new();
            while !p.at_end() && !p.check(TokenKind::LBrace) && !p.check(TokenKind::Semi) {
                trailer.push(p.bump());
            }

            let semi = p.check(TokenKind::Semi).then(|| p.bump());

            let id = p.alloc(Element::Stmt(Stmt::Function(FunctionDecl {
                modifier,
                return_type,
                name,
                lparen,
                rparen,
                params,
                commas,
                trailer,
                semi,
                body: None,
            })));
            if let Element::Stmt(Stmt::Function(f)) = &p.arena()[id] {
                if let Some(m) = f.modifier {
                    p.claim(m, id);
                }
                if let Some(n) = f.name {
                    p.claim(n, id);
                }
                p.claim(f.lparen, id);
                p.claim(f.rparen, id);
                p.claim_all(&f.commas, id);
                p.claim_all(&f.trailer, id);
                if let Some(s) = f.semi {
                    p.claim(s, id);
                }
            }
            trace!(node = ?id, destructor = in_destructor, "function declaration");
            Some(id)
        })
    }

    /// True when the function recognizer already took its semicolon.
    pub(crate) fn function_has_semi(&self, id: NodeId) -> bool {
        matches!(
            &self.arena()[id],
            Element::Stmt(Stmt::Function(f)) if f.semi.is_some()
        )
    }

    /// Attach a compound-statement body to a function declaration.
    pub(crate) fn set_function_body(&mut self, id: NodeId, body: NodeId) {
        match self.arena_mut().get_mut(id) {
            Some(Element::Stmt(Stmt::Function(f))) => f.body = Some(body),
            _ => unreachable!("body target is always a function declaration"),
        }
    }

    /// Class declaration: class key, a type as the name, an optional base
    /// clause (skipping to `{` when it cannot be fully parsed), then either
    /// `;` or a brace-delimited member scope with an optional trailing `;`.
    pub(crate) fn parse_class_decl(&mut self) -> Option<NodeId> {
        self.speculate(|p| {
            if !p.peek_kind().is_some_and(TokenKind::is_class_key) {
                return None;
            }
            let class_key = p.bump();
            let name = p.parse_type(true)?;

            let mut colon = None;
            let mut bases = Vec::new();
            let mut skipped = Vec::new();
            if p.check(TokenKind::Colon) {
                colon = Some(p.bump());
                let mut found_body = false;
                loop {
                    let base_snapshot = p.snapshot();
                    let access = p
                        .peek_kind()
                        .is_some_and(TokenKind::is_access_specifier)
                        .then(|| p.bump());
                    let Some(base) = p.parse_type(false) else {
                        p.restore(base_snapshot);
                        break;
                    };
                    if p.check(TokenKind::LBrace) {
                        bases.push(BaseClass {
                            access,
                            base,
                            comma: None,
                        });
                        found_body = true;
                        break;
                    }
                    if !p.check(TokenKind::Comma) {
                        // Not a well-formed entry: rewind it into the skip
                        // run below so its tokens stay claimed.
                        p.restore(base_snapshot);
                        break;
                    }
                    bases.push(BaseClass {
                        access,
                        base,
                        comma: Some(p.bump()),
                    });
                }
                if !found_body {
                    while !p.at_end() && !p.check(TokenKind::LBrace) {
                        skipped.push(p.bump());
                    }
                }
            }

            let mut lbrace = None;
            let mut rbrace = None;
            let mut body = Vec::new();
            let mut semi = None;
            if p.check(TokenKind::Semi) {
                semi = Some(p.bump());
            } else if p.check(TokenKind::LBrace) {
                lbrace = Some(p.bump());
                body = p.parse_scope();
                if p.check(TokenKind::RBrace) {
                    rbrace = Some(p.bump());
                }
                if p.check(TokenKind::Semi) {
                    semi = Some(p.bump());
                }
            }

            let base_count = bases.len();
            let id = p.alloc(Element::Stmt(Stmt::Class(ClassDecl {
                class_key,
                name,
                colon,
                bases,
                skipped,
                lbrace,
                rbrace,
                body,
                semi,
            })));
            if let Element::Stmt(Stmt::Class(c)) = &p.arena()[id] {
                p.claim(c.class_key, id);
                if let Some(t) = c.colon {
                    p.claim(t, id);
                }
                for base in &c.bases {
                    if let Some(a) = base.access {
                        p.claim(a, id);
                    }
                    if let Some(t) = base.comma {
                        p.claim(t, id);
                    }
                }
                p.claim_all(&c.skipped, id);
                for tok in [c.lbrace, c.rbrace, c.semi].into_iter().flatten() {
                    p.claim(tok, id);
                }
            }
            trace!(node = ?id, bases = base_count, "class declaration");
            Some(id)
        })
    }
}
