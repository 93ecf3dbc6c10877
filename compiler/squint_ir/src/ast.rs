//! The fuzzy AST node family.
//!
//! Elements live in a flat [`AstArena`]; tree edges are [`NodeId`] indices
//! and token references are [`TokenId`] indices into the externally owned
//! token list. Tokens point back at their owning element through their
//! back-reference cells, so the arena index doubles as the classification
//! handle the highlighter follows.
//!
//! Two closed sums form the tree proper — [`Stmt`] and [`Expr`] — with
//! [`Type`], [`VarInit`] and [`VarDecl`] as the remaining referenceable
//! elements. [`ElementClass`] is the flat classification tag downstream
//! consumers switch over; it is redundant with the enum discriminators but
//! part of the public contract.

use crate::token::TokenId;

/// Index of an element in its [`AstArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Flat classification tag for everything a token can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Type,
    VarInitialization,
    VarDecl,
    CompoundStmt,
    DeclStmt,
    ReturnStmt,
    LabelStmt,
    ExprLineStmt,
    FunctionDecl,
    ClassDecl,
    UnparsableBlock,
    DeclRefExpr,
    LiteralConstant,
    CallExpr,
    UnaryOperator,
    BinaryOperator,
    ParenExpr,
}

/// A qualified name: `::`-joined identifier segments with an optional
/// template argument list. Shared by [`DeclRefExpr`] and [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedName {
    /// Name-qualifier tokens in source order: leading `::` if present,
    /// identifier segments, interior `::`s. For types this also holds the
    /// CV qualifiers and builtin type keywords.
    pub toks: Vec<TokenId>,
    pub template: Option<TemplateArgs>,
}

/// Template argument list between `<` and `>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateArgs {
    /// The `<`, the commas, and the `>`, in source order.
    pub seps: Vec<TokenId>,
    /// Each argument is a `Type` or an `Expr` element.
    pub args: Vec<NodeId>,
}

/// Pointer or reference decoration on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationClass {
    Pointer,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub class: DecorationClass,
    pub tok: TokenId,
}

/// A type: qualified name plus an ordered decoration list.
///
/// A type cloned from a shared base (multi-declarator statements) replicates
/// the base's name token ids as data; those tokens keep their back-reference
/// to the base type element, so the clone only ever claims its own
/// decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: QualifiedName,
    pub decorations: Vec<Decoration>,
}

impl Type {
    /// Replicate the name, dropping decorations. The clone makes no token
    /// claims of its own.
    pub fn clone_without_decorations(&self) -> Type {
        Type {
            name: self.name.clone(),
            decorations: Vec::new(),
        }
    }
}

/// Initializer variant of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitKind {
    Assignment,
    /// Reserved; not produced by the parser.
    Constructor,
    /// Reserved; not produced by the parser.
    Brace,
}

/// Initialization of a variable: `= expr`, `(expr)` or `{expr}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInit {
    pub kind: InitKind,
    /// `=` for assignment; opening/closing tokens for the reserved forms.
    pub ops: [Option<TokenId>; 2],
    pub value: NodeId,
}

/// A single declarator: its own type element, an optional name and an
/// optional initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub var_type: NodeId,
    pub name: Option<TokenId>,
    pub init: Option<NodeId>,
}

/// A `{}`-block owning its brace tokens and an ordered statement body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundStmt {
    pub lbrace: TokenId,
    /// Absent when the block is unterminated.
    pub rbrace: Option<TokenId>,
    pub body: Vec<NodeId>,
}

/// One or more declarators sharing a leading base type, `;`-terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclStmt {
    /// The shared base type element; owns the type-name tokens.
    pub base_type: NodeId,
    pub decls: Vec<NodeId>,
    pub commas: Vec<TokenId>,
    pub semi: TokenId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub return_tok: TokenId,
    pub body: Option<NodeId>,
    pub semi: TokenId,
}

/// `name:` — an identifier or access specifier followed by a colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStmt {
    pub name: TokenId,
    pub colon: TokenId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprLineStmt {
    pub expr: NodeId,
    pub semi: TokenId,
}

/// A function declaration or definition.
///
/// `modifier` is the fused `static`/`virtual` slot. For destructors, `name`
/// holds the `~` token and the class name is captured by `return_type` (the
/// type-shaped recognizer runs after the tilde); for constructors inside a
/// class body, `name` is absent. `trailer` owns the uninterpreted tokens
/// between `)` and `{`/`;` — member-initializer lists, attributes, trailing
/// qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub modifier: Option<TokenId>,
    pub return_type: NodeId,
    pub name: Option<TokenId>,
    pub lparen: TokenId,
    pub rparen: TokenId,
    pub params: Vec<NodeId>,
    pub commas: Vec<TokenId>,
    pub trailer: Vec<TokenId>,
    pub semi: Option<TokenId>,
    pub body: Option<NodeId>,
}

/// One entry of a base-class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseClass {
    pub access: Option<TokenId>,
    pub base: NodeId,
    pub comma: Option<TokenId>,
}

/// A class/struct/union/enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub class_key: TokenId,
    /// The class name, parsed as a type.
    pub name: NodeId,
    pub colon: Option<TokenId>,
    pub bases: Vec<BaseClass>,
    /// Tokens consumed while recovering a malformed base clause.
    pub skipped: Vec<TokenId>,
    pub lbrace: Option<TokenId>,
    pub rbrace: Option<TokenId>,
    pub body: Vec<NodeId>,
    pub semi: Option<TokenId>,
}

/// Opaque salvage node: a bounded token run consumed when no recognizer
/// matched. Always non-empty; ends at (and including) the first `;`, `{` or
/// `}`, or at end of input. Owns every token in its range, including the
/// unknown/comment tokens the cursor skipped inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsableBlock {
    pub tokens: Vec<TokenId>,
}

/// Statement lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Decl(DeclStmt),
    Return(ReturnStmt),
    Label(LabelStmt),
    ExprLine(ExprLineStmt),
    Function(FunctionDecl),
    Class(ClassDecl),
    Unparsable(UnparsableBlock),
}

/// One-token literal or keyword constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralConstant {
    pub tok: TokenId,
}

/// A (possibly qualified) name used in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclRefExpr {
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// Always a `DeclRefExpr` element.
    pub callee: NodeId,
    pub lparen: TokenId,
    pub rparen: TokenId,
    pub args: Vec<NodeId>,
    pub commas: Vec<TokenId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOperator {
    pub op: TokenId,
    pub operand: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperator {
    pub lhs: NodeId,
    pub op: TokenId,
    pub rhs: NodeId,
}

/// Parenthesized grouping. Resets template-argument `>` handling inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenExpr {
    pub lparen: TokenId,
    pub rparen: TokenId,
    pub inner: NodeId,
}

/// Expression lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(LiteralConstant),
    DeclRef(DeclRefExpr),
    Call(CallExpr),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Paren(ParenExpr),
}

/// Anything a token back-reference may point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Type(Type),
    VarInit(VarInit),
    VarDecl(VarDecl),
    Stmt(Stmt),
    Expr(Expr),
}

impl Element {
    /// The public classification tag.
    pub fn class(&self) -> ElementClass {
        match self {
            Element::Type(_) => ElementClass::Type,
            Element::VarInit(_) => ElementClass::VarInitialization,
            Element::VarDecl(_) => ElementClass::VarDecl,
            Element::Stmt(s) => match s {
                Stmt::Compound(_) => ElementClass::CompoundStmt,
                Stmt::Decl(_) => ElementClass::DeclStmt,
                Stmt::Return(_) => ElementClass::ReturnStmt,
                Stmt::Label(_) => ElementClass::LabelStmt,
                Stmt::ExprLine(_) => ElementClass::ExprLineStmt,
                Stmt::Function(_) => ElementClass::FunctionDecl,
                Stmt::Class(_) => ElementClass::ClassDecl,
                Stmt::Unparsable(_) => ElementClass::UnparsableBlock,
            },
            Element::Expr(e) => match e {
                Expr::Literal(_) => ElementClass::LiteralConstant,
                Expr::DeclRef(_) => ElementClass::DeclRefExpr,
                Expr::Call(_) => ElementClass::CallExpr,
                Expr::Unary(_) => ElementClass::UnaryOperator,
                Expr::Binary(_) => ElementClass::BinaryOperator,
                Expr::Paren(_) => ElementClass::ParenExpr,
            },
        }
    }

    pub fn as_stmt(&self) -> Option<&Stmt> {
        match self {
            Element::Stmt(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Element::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Element::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_var_decl(&self) -> Option<&VarDecl> {
        match self {
            Element::VarDecl(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_var_init(&self) -> Option<&VarInit> {
        match self {
            Element::VarInit(i) => Some(i),
            _ => None,
        }
    }
}

/// Contiguous storage for all AST elements of one parse.
///
/// Allocation order is the recognizers' construction order, so truncating to
/// a remembered length drops exactly the elements a failed speculative parse
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AstArena {
    elements: Vec<Element>,
}

impl AstArena {
    #[inline]
    pub fn new() -> Self {
        AstArena {
            elements: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Allocate an element and return its id.
    pub fn alloc(&mut self, element: Element) -> NodeId {
        let index = u32::try_from(self.elements.len())
            .unwrap_or_else(|_| panic!("arena capacity exceeded: {} elements", self.elements.len()));
        self.elements.push(element);
        NodeId(index)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    /// Drop every element allocated at or past `len`. Used by the
    /// backtracking snapshots.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (NodeId(i as u32), e))
    }
}

impl std::ops::Index<NodeId> for AstArena {
    type Output = Element;

    #[inline]
    fn index(&self, id: NodeId) -> &Element {
        &self.elements[id.index()]
    }
}

/// Root of a parse: the ordered top-level statements plus the arena that
/// owns every element of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationUnit {
    pub stmts: Vec<NodeId>,
    pub arena: AstArena,
}

impl TranslationUnit {
    /// Element lookup rooted at this unit's arena.
    #[inline]
    pub fn element(&self, id: NodeId) -> &Element {
        &self.arena[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_drops_a_failed_suffix() {
        let mut arena = AstArena::new();
        let keep = arena.alloc(Element::Stmt(Stmt::Unparsable(UnparsableBlock {
            tokens: vec![TokenId::new(0)],
        })));
        let mark = arena.len();
        arena.alloc(Element::Expr(Expr::Literal(LiteralConstant {
            tok: TokenId::new(1),
        })));
        arena.truncate(mark);
        assert_eq!(arena.len(), 1);
        assert!(arena.get(keep).is_some());
    }

    #[test]
    fn element_class_matches_variant() {
        let ty = Element::Type(Type {
            name: QualifiedName::default(),
            decorations: Vec::new(),
        });
        assert_eq!(ty.class(), ElementClass::Type);

        let lit = Element::Expr(Expr::Literal(LiteralConstant {
            tok: TokenId::new(0),
        }));
        assert_eq!(lit.class(), ElementClass::LiteralConstant);
    }

    #[test]
    fn clone_without_decorations_shares_name_only() {
        let ty = Type {
            name: QualifiedName {
                toks: vec![TokenId::new(0)],
                template: None,
            },
            decorations: vec![Decoration {
                class: DecorationClass::Pointer,
                tok: TokenId::new(1),
            }],
        };
        let clone = ty.clone_without_decorations();
        assert_eq!(clone.name, ty.name);
        assert!(clone.decorations.is_empty());
    }
}
