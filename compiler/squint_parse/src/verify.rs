//! Post-parse invariant checking.
//!
//! Walks a finished tree and cross-checks it against the token list's
//! back-references:
//!
//! - *coverage*: every significant token is owned by a node in the tree
//! - *uniqueness*: no token is stored by two nodes
//! - *bidirectional consistency*: a node storing a token is the node the
//!   token's back-reference names
//!
//! A declarator type cloned from a shared base replicates the base's name
//! token ids as data; only the base owns them, so the walker skips a
//! clone's name when collecting claims.

use std::fmt;

use squint_ir::{
    Element, Expr, NodeId, Stmt, TokenId, TokenKind, TokenList, TranslationUnit,
};

/// An invariant violation found by [`verify_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A significant token has no back-reference.
    UnclaimedToken { token: TokenId },
    /// A token's back-reference names a node outside the tree.
    DanglingBackRef { token: TokenId, node: NodeId },
    /// Two nodes store the same token.
    DoubleClaim {
        token: TokenId,
        first: NodeId,
        second: NodeId,
    },
    /// A token's back-reference disagrees with the node storing it.
    BackRefMismatch {
        token: TokenId,
        stored_by: Option<NodeId>,
        slot: Option<NodeId>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnclaimedToken { token } => {
                write!(f, "token {:?} is not owned by any AST node", token)
            }
            Violation::DanglingBackRef { token, node } => {
                write!(f, "token {token:?} references {node:?}, which is not in the tree")
            }
            Violation::DoubleClaim {
                token,
                first,
                second,
            } => write!(f, "token {token:?} is claimed by both {first:?} and {second:?}"),
            Violation::BackRefMismatch {
                token,
                stored_by,
                slot,
            } => write!(
                f,
                "token {token:?} points at {slot:?} but is stored by {stored_by:?}"
            ),
        }
    }
}

impl std::error::Error for Violation {}

/// Check the token-ownership invariants of a finished parse.
pub fn verify_tree(tu: &TranslationUnit, tokens: &TokenList) -> Result<(), Violation> {
    let mut walker = Walker {
        tu,
        claims: vec![None; tokens.len()],
        reachable: vec![false; tu.arena.len()],
    };
    for &stmt in &tu.stmts {
        walker.visit_stmt(stmt)?;
    }

    for (id, tok) in tokens.iter_ids() {
        let stored_by = walker.claims[id.index()];
        let slot = tok.ast_node();

        match slot {
            None => {
                let ignorable = tok.kind.is_trivia() || tok.kind == TokenKind::Eof;
                if !ignorable {
                    return Err(Violation::UnclaimedToken { token: id });
                }
                // An unclaimed trivia/eof token must not be stored either.
                if stored_by.is_some() {
                    return Err(Violation::BackRefMismatch {
                        token: id,
                        stored_by,
                        slot: None,
                    });
                }
            }
            Some(node) => {
                if node.index() >= walker.reachable.len() || !walker.reachable[node.index()] {
                    return Err(Violation::DanglingBackRef { token: id, node });
                }
                if stored_by != Some(node) {
                    return Err(Violation::BackRefMismatch {
                        token: id,
                        stored_by,
                        slot: Some(node),
                    });
                }
            }
        }
    }

    Ok(())
}

struct Walker<'a> {
    tu: &'a TranslationUnit,
    claims: Vec<Option<NodeId>>,
    reachable: Vec<bool>,
}

impl Walker<'_> {
    fn own(&mut self, token: TokenId, node: NodeId) -> Result<(), Violation> {
        if let Some(first) = self.claims[token.index()] {
            return Err(Violation::DoubleClaim {
                token,
                first,
                second: node,
            });
        }
        self.claims[token.index()] = Some(node);
        Ok(())
    }

    fn own_all(&mut self, toks: &[TokenId], node: NodeId) -> Result<(), Violation> {
        for &tok in toks {
            self.own(tok, node)?;
        }
        Ok(())
    }

    fn mark(&mut self, id: NodeId) {
        self.reachable[id.index()] = true;
    }

    /// Visit a type element. `owns_name` is false for declarator types
    /// cloned from a shared base: the base owns the name tokens and the
    /// template argument elements.
    fn visit_type(&mut self, id: NodeId, owns_name: bool) -> Result<(), Violation> {
        self.mark(id);
        let ty = self.tu.element(id).as_type().expect("type node").clone();
        if owns_name {
            self.own_all(&ty.name.toks, id)?;
            if let Some(template) = ty.name.template {
                self.own_all(&template.seps, id)?;
                for arg in template.args {
                    match self.tu.element(arg) {
                        Element::Type(_) => self.visit_type(arg, true)?,
                        _ => self.visit_expr(arg)?,
                    }
                }
            }
        }
        for dec in ty.decorations {
            self.own(dec.tok, id)?;
        }
        Ok(())
    }

    fn visit_var_decl(&mut self, id: NodeId, type_owns_name: bool) -> Result<(), Violation> {
        self.mark(id);
        let decl = self.tu.element(id).as_var_decl().expect("var decl node").clone();
        self.visit_type(decl.var_type, type_owns_name)?;
        if let Some(name) = decl.name {
            self.own(name, id)?;
        }
        if let Some(init) = decl.init {
            self.mark(init);
            let init_node = self.tu.element(init).as_var_init().expect("init node").clone();
            for op in init_node.ops.into_iter().flatten() {
                self.own(op, init)?;
            }
            self.visit_expr(init_node.value)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, id: NodeId) -> Result<(), Violation> {
        self.mark(id);
        let stmt = self.tu.element(id).as_stmt().expect("stmt node").clone();
        match stmt {
            Stmt::Compound(c) => {
                self.own(c.lbrace, id)?;
                if let Some(tok) = c.rbrace {
                    self.own(tok, id)?;
                }
                for child in c.body {
                    self.visit_stmt(child)?;
                }
            }
            Stmt::Decl(d) => {
                self.visit_type(d.base_type, true)?;
                for decl in d.decls {
                    self.visit_var_decl(decl, false)?;
                }
                self.own_all(&d.commas, id)?;
                self.own(d.semi, id)?;
            }
            Stmt::Return(r) => {
                self.own(r.return_tok, id)?;
                self.own(r.semi, id)?;
                if let Some(body) = r.body {
                    self.visit_expr(body)?;
                }
            }
            Stmt::Label(l) => {
                self.own(l.name, id)?;
                self.own(l.colon, id)?;
            }
            Stmt::ExprLine(e) => {
                self.own(e.semi, id)?;
                self.visit_expr(e.expr)?;
            }
            Stmt::Function(f) => {
                for tok in [f.modifier, f.name, f.semi].into_iter().flatten() {
                    self.own(tok, id)?;
                }
                self.own(f.lparen, id)?;
                self.own(f.rparen, id)?;
                self.own_all(&f.commas, id)?;
                self.own_all(&f.trailer, id)?;
                self.visit_type(f.return_type, true)?;
                for param in f.params {
                    self.visit_var_decl(param, true)?;
                }
                if let Some(body) = f.body {
                    self.visit_stmt(body)?;
                }
            }
            Stmt::Class(c) => {
                self.own(c.class_key, id)?;
                for tok in [c.colon, c.lbrace, c.rbrace, c.semi].into_iter().flatten() {
                    self.own(tok, id)?;
                }
                self.own_all(&c.skipped, id)?;
                self.visit_type(c.name, true)?;
                for base in c.bases {
                    for tok in [base.access, base.comma].into_iter().flatten() {
                        self.own(tok, id)?;
                    }
                    self.visit_type(base.base, true)?;
                }
                for member in c.body {
                    self.visit_stmt(member)?;
                }
            }
            Stmt::Unparsable(u) => {
                self.own_all(&u.tokens, id)?;
            }
        }
        Ok(())
    }

    fn visit_expr(&mut self, id: NodeId) -> Result<(), Violation> {
        self.mark(id);
        let expr = self.tu.element(id).as_expr().expect("expr node").clone();
        match expr {
            Expr::Literal(l) => self.own(l.tok, id)?,
            Expr::DeclRef(d) => {
                self.own_all(&d.name.toks, id)?;
                if let Some(template) = d.name.template {
                    self.own_all(&template.seps, id)?;
                    for arg in template.args {
                        match self.tu.element(arg) {
                            Element::Type(_) => self.visit_type(arg, true)?,
                            _ => self.visit_expr(arg)?,
                        }
                    }
                }
            }
            Expr::Call(c) => {
                self.own(c.lparen, id)?;
                self.own(c.rparen, id)?;
                self.own_all(&c.commas, id)?;
                self.visit_expr(c.callee)?;
                for arg in c.args {
                    self.visit_expr(arg)?;
                }
            }
            Expr::Unary(u) => {
                self.own(u.op, id)?;
                self.visit_expr(u.operand)?;
            }
            Expr::Binary(b) => {
                self.own(b.op, id)?;
                self.visit_expr(b.lhs)?;
                self.visit_expr(b.rhs)?;
            }
            Expr::Paren(p) => {
                self.own(p.lparen, id)?;
                self.own(p.rparen, id)?;
                self.visit_expr(p.inner)?;
            }
        }
        Ok(())
    }
}
