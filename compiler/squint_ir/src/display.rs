//! Indented dump of a parsed tree.
//!
//! Debug aid and test oracle: renders each element on its own line with
//! token text sliced from the original source.

use crate::ast::{Element, Expr, NodeId, Stmt, TranslationUnit, Type};
use crate::token::{TokenId, TokenList};

/// Render a translation unit as an indented tree.
pub fn dump(tu: &TranslationUnit, tokens: &TokenList, src: &str) -> String {
    let mut out = String::new();
    let mut printer = Printer {
        tu,
        tokens,
        src,
        out: &mut out,
    };
    printer.line(0, "TranslationUnit");
    for &stmt in &tu.stmts {
        printer.node(stmt, 1);
    }
    out
}

struct Printer<'a> {
    tu: &'a TranslationUnit,
    tokens: &'a TokenList,
    src: &'a str,
    out: &'a mut String,
}

impl Printer<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn text(&self, tok: TokenId) -> &str {
        self.tokens.text(tok, self.src)
    }

    fn join(&self, toks: &[TokenId]) -> String {
        toks.iter()
            .map(|&t| self.text(t))
            .collect::<Vec<_>>()
            .join("")
    }

    fn type_text(&self, ty: &Type) -> String {
        let mut s = ty
            .name
            .toks
            .iter()
            .map(|&t| self.text(t))
            .collect::<Vec<_>>()
            .join(" ");
        if ty.name.template.is_some() {
            s.push_str("<…>");
        }
        for dec in &ty.decorations {
            s.push_str(self.text(dec.tok));
        }
        s
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        match self.tu.element(id) {
            Element::Stmt(stmt) => self.stmt(stmt, depth),
            Element::Expr(expr) => self.expr(expr, depth),
            Element::Type(ty) => {
                let text = format!("Type `{}`", self.type_text(ty));
                self.line(depth, &text);
                if let Some(template) = &ty.name.template {
                    for &arg in &template.args {
                        self.node(arg, depth + 1);
                    }
                }
            }
            Element::VarDecl(decl) => {
                let name = decl
                    .name
                    .map(|t| self.text(t).to_string())
                    .unwrap_or_else(|| "<unnamed>".to_string());
                let text = format!("VarDecl `{name}`");
                self.line(depth, &text);
                self.node(decl.var_type, depth + 1);
                if let Some(init) = decl.init {
                    self.node(init, depth + 1);
                }
            }
            Element::VarInit(init) => {
                self.line(depth, &format!("VarInit {:?}", init.kind));
                self.node(init.value, depth + 1);
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Compound(c) => {
                self.line(depth, "CompoundStmt");
                for &child in &c.body {
                    self.node(child, depth + 1);
                }
            }
            Stmt::Decl(d) => {
                self.line(depth, "DeclStmt");
                self.node(d.base_type, depth + 1);
                for &decl in &d.decls {
                    self.node(decl, depth + 1);
                }
            }
            Stmt::Return(r) => {
                self.line(depth, "ReturnStmt");
                if let Some(body) = r.body {
                    self.node(body, depth + 1);
                }
            }
            Stmt::Label(l) => {
                let text = format!("LabelStmt `{}`", self.text(l.name));
                self.line(depth, &text);
            }
            Stmt::ExprLine(e) => {
                self.line(depth, "ExprLineStmt");
                self.node(e.expr, depth + 1);
            }
            Stmt::Function(f) => {
                let name = f
                    .name
                    .map(|t| self.text(t).to_string())
                    .unwrap_or_else(|| "<unnamed>".to_string());
                self.line(depth, &format!("FunctionDecl `{name}`"));
                self.node(f.return_type, depth + 1);
                for &param in &f.params {
                    self.node(param, depth + 1);
                }
                if let Some(body) = f.body {
                    self.node(body, depth + 1);
                }
            }
            Stmt::Class(c) => {
                let text = format!("ClassDecl `{}`", self.text(c.class_key));
                self.line(depth, &text);
                self.node(c.name, depth + 1);
                for base in &c.bases {
                    self.node(base.base, depth + 1);
                }
                for &member in &c.body {
                    self.node(member, depth + 1);
                }
            }
            Stmt::Unparsable(u) => {
                let text = format!("UnparsableBlock `{}`", self.join(&u.tokens));
                self.line(depth, &text);
            }
        }
    }

    fn expr(&mut self, expr: &Expr, depth: usize) {
        match expr {
            Expr::Literal(l) => {
                let text = format!("LiteralConstant `{}`", self.text(l.tok));
                self.line(depth, &text);
            }
            Expr::DeclRef(d) => {
                let text = format!("DeclRefExpr `{}`", self.join(&d.name.toks));
                self.line(depth, &text);
                if let Some(template) = &d.name.template {
                    for &arg in &template.args {
                        self.node(arg, depth + 1);
                    }
                }
            }
            Expr::Call(c) => {
                self.line(depth, "CallExpr");
                self.node(c.callee, depth + 1);
                for &arg in &c.args {
                    self.node(arg, depth + 1);
                }
            }
            Expr::Unary(u) => {
                let text = format!("UnaryOperator `{}`", self.text(u.op));
                self.line(depth, &text);
                self.node(u.operand, depth + 1);
            }
            Expr::Binary(b) => {
                let text = format!("BinaryOperator `{}`", self.text(b.op));
                self.line(depth, &text);
                self.node(b.lhs, depth + 1);
                self.node(b.rhs, depth + 1);
            }
            Expr::Paren(p) => {
                self.line(depth, "ParenExpr");
                self.node(p.inner, depth + 1);
            }
        }
    }
}
