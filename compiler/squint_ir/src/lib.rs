//! Tokens, spans and the fuzzy AST shared by the squint front end.
//!
//! - [`span`]: compact byte-range source locations
//! - [`token`]: token kinds, annotated tokens with AST back-reference
//!   slots, and the token list handed to the parser
//! - [`ast`]: the arena-backed fuzzy AST node family
//! - [`display`]: indented tree dumps for debugging and tests

pub mod ast;
pub mod display;
pub mod span;
pub mod token;

pub use ast::{
    AstArena, BaseClass, BinaryOperator, CallExpr, ClassDecl, CompoundStmt, DeclRefExpr, DeclStmt,
    Decoration, DecorationClass, Element, ElementClass, Expr, ExprLineStmt, FunctionDecl,
    InitKind, LabelStmt, LiteralConstant, NodeId, ParenExpr, QualifiedName, ReturnStmt, Stmt,
    TemplateArgs, TranslationUnit, Type, UnaryOperator, UnparsableBlock, VarDecl, VarInit,
};
pub use span::Span;
pub use token::{Token, TokenId, TokenKind, TokenList};
