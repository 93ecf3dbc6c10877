//! Type and qualified-name recognizers.

use squint_ir::{
    Decoration, DecorationClass, Element, NodeId, QualifiedName, TemplateArgs, TokenKind, Type,
};
use tracing::trace;

use crate::precedence::PREC_COMMA;
use crate::Parser;

impl Parser<'_> {
    /// Parse a qualified identifier into `name`: optional leading `::`,
    /// identifier segments joined by `::`, optional template argument list.
    ///
    /// Appends to the caller-provided sink so `DeclRefExpr` and `Type` can
    /// share the recognizer. On failure the cursor is rewound and partial
    /// appends are the caller's to discard.
    pub(crate) fn parse_qualified_id_into(&mut self, name: &mut QualifiedName) -> bool {
        let snapshot = self.snapshot();

        if self.check(TokenKind::ColonColon) {
            name.toks.push(self.bump());
        }
        loop {
            if !self.check(TokenKind::Identifier) {
                self.restore(snapshot);
                return false;
            }
            name.toks.push(self.bump());
            if !self.check(TokenKind::ColonColon) {
                break;
            }
            name.toks.push(self.bump());
        }

        if self.check(TokenKind::Less) {
            let mut template = TemplateArgs::default();
            let mut is_first = true;
            loop {
                // Consumes the `<` first, then each `,`.
                template.seps.push(self.bump());

                if is_first && self.check(TokenKind::Greater) {
                    break;
                }
                is_first = false;

                if let Some(arg) = self.parse_type(true) {
                    template.args.push(arg);
                } else if let Some(arg) = self.parse_expr(PREC_COMMA + 1, true) {
                    template.args.push(arg);
                } else {
                    self.restore(snapshot);
                    return false;
                }

                if !self.check(TokenKind::Comma) {
                    break;
                }
            }
            if !self.check(TokenKind::Greater) {
                self.restore(snapshot);
                return false;
            }
            template.seps.push(self.bump());
            name.template = Some(template);
        }

        true
    }

    /// Parse a type: CV qualifiers, then `auto` / builtin keywords /
    /// qualified identifier, then trailing CV qualifiers, then (optionally)
    /// `*`/`&`/`&&` decorations.
    ///
    /// Allocates the `Type` element and claims its tokens.
    pub(crate) fn parse_type(&mut self, with_decorations: bool) -> Option<NodeId> {
        self.speculate(|p| {
            let mut name = QualifiedName::default();

            while p.peek_kind().is_some_and(TokenKind::is_cv_qualifier) {
                name.toks.push(p.bump());
            }

            if p.check(TokenKind::Auto) {
                name.toks.push(p.bump());
            } else if p.peek_kind().is_some_and(TokenKind::is_builtin_type) {
                while p.peek_kind().is_some_and(TokenKind::is_builtin_type) {
                    name.toks.push(p.bump());
                }
            } else if !p.parse_qualified_id_into(&mut name) {
                return None;
            }

            while p.peek_kind().is_some_and(TokenKind::is_cv_qualifier) {
                name.toks.push(p.bump());
            }

            let mut decorations = Vec::new();
            if with_decorations {
                p.collect_decorations(&mut decorations);
            }

            let id = p.alloc(Element::Type(Type { name, decorations }));
            let ty = p.arena()[id].as_type().expect("just allocated a type");
            p.claim_qualified_name(&ty.name, id);
            for dec in &ty.decorations {
                p.claim(dec.tok, id);
            }
            trace!(node = ?id, "type");
            Some(id)
        })
    }

    fn collect_decorations(&mut self, out: &mut Vec<Decoration>) {
        loop {
            let class = match self.peek_kind() {
                Some(TokenKind::Star) => DecorationClass::Pointer,
                Some(TokenKind::Amp) | Some(TokenKind::AmpAmp) => DecorationClass::Reference,
                _ => break,
            };
            out.push(Decoration {
                class,
                tok: self.bump(),
            });
        }
    }

    /// Parse this declarator's own decorations onto an existing type
    /// element and claim them for it.
    pub(crate) fn parse_type_decorations(&mut self, ty: NodeId) {
        let mut decorations = Vec::new();
        self.collect_decorations(&mut decorations);
        if decorations.is_empty() {
            return;
        }
        for dec in &decorations {
            self.claim(dec.tok, ty);
        }
        match self.arena_mut().get_mut(ty) {
            Some(Element::Type(t)) => t.decorations.extend(decorations),
            _ => unreachable!("decorations target is always a type"),
        }
    }

    /// Replicate a base type without decorations for a later declarator in
    /// a multi-declarator statement. The clone claims no tokens: the base
    /// keeps ownership of the shared name.
    pub(crate) fn clone_type_without_decorations(&mut self, base: NodeId) -> NodeId {
        let clone = self.arena()[base]
            .as_type()
            .expect("cloned base is always a type")
            .clone_without_decorations();
        self.alloc(Element::Type(clone))
    }
}
