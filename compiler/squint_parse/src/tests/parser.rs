//! Grammar tests: the end-to-end scenarios and the boundary cases.

use squint_ir::{
    DecorationClass, Element, ElementClass, Expr, InitKind, NodeId, Stmt, TokenKind,
    TranslationUnit,
};

use super::{parse_checked, stmt, text};
use crate::{fuzzy_parse, Parser};

fn expr<'a>(tu: &'a TranslationUnit, id: NodeId) -> &'a Expr {
    tu.element(id).as_expr().expect("expression node")
}

#[test]
fn declaration_with_binary_initializer() {
    let src = "int x = 1 + 2;";
    let (tokens, tu) = parse_checked(src);
    assert_eq!(tu.stmts.len(), 1);

    let Stmt::Decl(decl_stmt) = stmt(&tu, 0) else {
        panic!("expected a declaration statement");
    };
    let base = tu.element(decl_stmt.base_type).as_type().unwrap();
    assert_eq!(text(&tokens, src, base.name.toks[0]), "int");

    assert_eq!(decl_stmt.decls.len(), 1);
    let decl = tu.element(decl_stmt.decls[0]).as_var_decl().unwrap();
    assert_eq!(text(&tokens, src, decl.name.unwrap()), "x");

    let init = tu.element(decl.init.unwrap()).as_var_init().unwrap();
    assert_eq!(init.kind, InitKind::Assignment);
    let Expr::Binary(add) = expr(&tu, init.value) else {
        panic!("expected a binary initializer");
    };
    assert_eq!(text(&tokens, src, add.op), "+");
    assert!(matches!(expr(&tu, add.lhs), Expr::Literal(l) if text(&tokens, src, l.tok) == "1"));
    assert!(matches!(expr(&tu, add.rhs), Expr::Literal(l) if text(&tokens, src, l.tok) == "2"));
}

#[test]
fn return_with_member_chain_call() {
    let src = "return a->b.c(1, 2);";
    let (tokens, tu) = parse_checked(src);

    let Stmt::Return(ret) = stmt(&tu, 0) else {
        panic!("expected a return statement");
    };
    // a->b.c(1, 2) folds left-associatively at the member-access level;
    // the call wraps the trailing name.
    let Expr::Binary(dot) = expr(&tu, ret.body.unwrap()) else {
        panic!("expected member access at the top");
    };
    assert_eq!(text(&tokens, src, dot.op), ".");

    let Expr::Binary(arrow) = expr(&tu, dot.lhs) else {
        panic!("expected `->` on the left");
    };
    assert_eq!(text(&tokens, src, arrow.op), "->");
    assert!(
        matches!(expr(&tu, arrow.lhs), Expr::DeclRef(d) if text(&tokens, src, d.name.toks[0]) == "a")
    );
    assert!(
        matches!(expr(&tu, arrow.rhs), Expr::DeclRef(d) if text(&tokens, src, d.name.toks[0]) == "b")
    );

    let Expr::Call(call) = expr(&tu, dot.rhs) else {
        panic!("expected a call on the right");
    };
    assert!(
        matches!(expr(&tu, call.callee), Expr::DeclRef(d) if text(&tokens, src, d.name.toks[0]) == "c")
    );
    assert_eq!(call.args.len(), 2);
    assert_eq!(call.commas.len(), 1);
}

#[test]
fn class_with_base_and_member_function() {
    let src = "struct S : public B { int f(int); };";
    let (tokens, tu) = parse_checked(src);

    let Stmt::Class(class) = stmt(&tu, 0) else {
        panic!("expected a class declaration");
    };
    assert_eq!(text(&tokens, src, class.class_key), "struct");
    let name = tu.element(class.name).as_type().unwrap();
    assert_eq!(text(&tokens, src, name.name.toks[0]), "S");

    assert_eq!(class.bases.len(), 1);
    let base = &class.bases[0];
    assert_eq!(text(&tokens, src, base.access.unwrap()), "public");
    let base_ty = tu.element(base.base).as_type().unwrap();
    assert_eq!(text(&tokens, src, base_ty.name.toks[0]), "B");

    assert_eq!(class.body.len(), 1);
    let Stmt::Function(func) = tu.element(class.body[0]).as_stmt().unwrap() else {
        panic!("expected a member function");
    };
    assert_eq!(text(&tokens, src, func.name.unwrap()), "f");
    let ret = tu.element(func.return_type).as_type().unwrap();
    assert_eq!(text(&tokens, src, ret.name.toks[0]), "int");
    assert_eq!(func.params.len(), 1);
    let param = tu.element(func.params[0]).as_var_decl().unwrap();
    assert!(param.name.is_none());
    assert!(func.semi.is_some());
    assert!(func.body.is_none());

    assert!(class.semi.is_some());
}

#[test]
fn multi_declarator_statement_shares_the_base_type() {
    let src = "T<U, V*> x, *y = &z;";
    let (tokens, tu) = parse_checked(src);

    let Stmt::Decl(decl_stmt) = stmt(&tu, 0) else {
        panic!("expected a declaration statement");
    };

    let base = tu.element(decl_stmt.base_type).as_type().unwrap();
    assert_eq!(text(&tokens, src, base.name.toks[0]), "T");
    let template = base.name.template.as_ref().unwrap();
    assert_eq!(template.args.len(), 2);
    let u = tu.element(template.args[0]).as_type().unwrap();
    assert_eq!(text(&tokens, src, u.name.toks[0]), "U");
    let v = tu.element(template.args[1]).as_type().unwrap();
    assert_eq!(text(&tokens, src, v.name.toks[0]), "V");
    assert_eq!(v.decorations.len(), 1);
    assert_eq!(v.decorations[0].class, DecorationClass::Pointer);

    assert_eq!(decl_stmt.decls.len(), 2);

    let x = tu.element(decl_stmt.decls[0]).as_var_decl().unwrap();
    assert_eq!(text(&tokens, src, x.name.unwrap()), "x");
    let x_ty = tu.element(x.var_type).as_type().unwrap();
    assert_eq!(x_ty.name, base.name, "clone replicates the shared base name");
    assert!(x_ty.decorations.is_empty());
    assert!(x.init.is_none());

    let y = tu.element(decl_stmt.decls[1]).as_var_decl().unwrap();
    assert_eq!(text(&tokens, src, y.name.unwrap()), "y");
    let y_ty = tu.element(y.var_type).as_type().unwrap();
    assert_eq!(y_ty.decorations.len(), 1);
    assert_eq!(y_ty.decorations[0].class, DecorationClass::Pointer);

    let init = tu.element(y.init.unwrap()).as_var_init().unwrap();
    let Expr::Unary(addr) = expr(&tu, init.value) else {
        panic!("expected a unary initializer");
    };
    assert_eq!(text(&tokens, src, addr.op), "&");
    assert!(
        matches!(expr(&tu, addr.operand), Expr::DeclRef(d) if text(&tokens, src, d.name.toks[0]) == "z")
    );
}

#[test]
fn destructor_inside_class_scope() {
    let src = "struct D { ~MyClass() {} };";
    let (tokens, tu) = parse_checked(src);

    let Stmt::Class(class) = stmt(&tu, 0) else {
        panic!("expected a class declaration");
    };
    let Stmt::Function(dtor) = tu.element(class.body[0]).as_stmt().unwrap() else {
        panic!("expected a member function");
    };
    assert_eq!(text(&tokens, src, dtor.name.unwrap()), "~");
    // The class name lands in the return-type slot: the type-shaped
    // recognizer runs after the tilde.
    let ret = tu.element(dtor.return_type).as_type().unwrap();
    assert_eq!(text(&tokens, src, ret.name.toks[0]), "MyClass");
    assert!(dtor.params.is_empty());
    let Stmt::Compound(body) = tu.element(dtor.body.unwrap()).as_stmt().unwrap() else {
        panic!("expected a compound body");
    };
    assert!(body.body.is_empty());
    assert!(body.rbrace.is_some());
}

#[test]
fn destructor_via_dispatcher_with_names_optional() {
    let src = "~MyClass() {}";
    let tokens = squint_lexer::lex(src);
    let mut parser = Parser::new(&tokens);
    let id = parser.parse_any(true, true).unwrap();
    let tu = parser.parse_translation_unit();
    assert!(matches!(
        tu.arena[id].class(),
        ElementClass::FunctionDecl
    ));
}

#[test]
fn garbage_is_salvaged_through_the_semicolon() {
    let src = "% @ @ ;";
    let (tokens, tu) = parse_checked(src);

    assert_eq!(tu.stmts.len(), 1);
    let Stmt::Unparsable(block) = stmt(&tu, 0) else {
        panic!("expected an unparsable block");
    };
    // The block owns the whole run: the stray `%`, both unknown tokens the
    // cursor skipped inside it, and the terminating `;`.
    let kinds: Vec<TokenKind> = block.tokens.iter().map(|&t| tokens[t].kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Percent,
            TokenKind::Unknown,
            TokenKind::Unknown,
            TokenKind::Semi,
        ]
    );
}

#[test]
fn plain_identifier_line_is_an_expression_statement() {
    let (_, tu) = parse_checked("garbage;");
    assert!(matches!(stmt(&tu, 0), Stmt::ExprLine(_)));
}

// --- Boundary cases ---

#[test]
fn empty_input_yields_empty_unit() {
    let (_, tu) = parse_checked("");
    assert!(tu.stmts.is_empty());
}

#[test]
fn trivia_only_input_yields_empty_unit() {
    let (_, tu) = parse_checked("// just a comment\n/* and another */ @");
    assert!(tu.stmts.is_empty());
}

#[test]
fn unterminated_compound_keeps_partial_body() {
    let src = "void f() { return 1;";
    let (_, tu) = parse_checked(src);

    let Stmt::Function(func) = stmt(&tu, 0) else {
        panic!("expected a function");
    };
    let Stmt::Compound(body) = tu.element(func.body.unwrap()).as_stmt().unwrap() else {
        panic!("expected a compound body");
    };
    assert!(body.rbrace.is_none());
    assert_eq!(body.body.len(), 1);
    assert!(matches!(
        tu.element(body.body[0]).as_stmt().unwrap(),
        Stmt::Return(_)
    ));
}

#[test]
fn greater_inside_parenthesized_template_argument() {
    let src = "f<(a>b)>;";
    let (tokens, tu) = parse_checked(src);

    let Stmt::ExprLine(line) = stmt(&tu, 0) else {
        panic!("expected an expression statement");
    };
    let Expr::DeclRef(dr) = expr(&tu, line.expr) else {
        panic!("expected a declaration reference");
    };
    let template = dr.name.template.as_ref().unwrap();
    assert_eq!(template.args.len(), 1);

    let Expr::Paren(paren) = expr(&tu, template.args[0]) else {
        panic!("expected a parenthesized argument");
    };
    let Expr::Binary(cmp) = expr(&tu, paren.inner) else {
        panic!("expected a comparison inside the parentheses");
    };
    assert_eq!(text(&tokens, src, cmp.op), ">");
}

#[test]
fn empty_template_argument_list_is_accepted() {
    let src = "T<> x;";
    let (_, tu) = parse_checked(src);
    let Stmt::Decl(decl_stmt) = stmt(&tu, 0) else {
        panic!("expected a declaration statement");
    };
    let base = tu.element(decl_stmt.base_type).as_type().unwrap();
    let template = base.name.template.as_ref().unwrap();
    assert!(template.args.is_empty());
    assert_eq!(template.seps.len(), 2);
}

#[test]
fn nested_template_arguments_close_cleanly() {
    let (_, tu) = parse_checked("T<U<V>> x;");
    assert!(matches!(stmt(&tu, 0), Stmt::Decl(_)));
}

#[test]
fn labels_accept_access_specifiers() {
    let src = "public: private: again:";
    let (_, tu) = parse_checked(src);
    assert_eq!(tu.stmts.len(), 3);
    for i in 0..3 {
        assert!(matches!(stmt(&tu, i), Stmt::Label(_)));
    }
}

#[test]
fn forward_declaration_keeps_its_semicolon() {
    let (_, tu) = parse_checked("int f(int a, char b);");
    let Stmt::Function(func) = stmt(&tu, 0) else {
        panic!("expected a function");
    };
    assert_eq!(func.params.len(), 2);
    assert_eq!(func.commas.len(), 1);
    assert!(func.semi.is_some());
    assert!(func.body.is_none());
}

#[test]
fn function_trailer_tokens_belong_to_the_function() {
    let src = "C() : member(0) {}";
    let tokens = squint_lexer::lex(src);
    let mut parser = Parser::new(&tokens);
    let id = parser.parse_any(true, true).unwrap();
    let tu = parser.parse_translation_unit();

    let Element::Stmt(Stmt::Function(func)) = &tu.arena[id] else {
        panic!("expected a constructor-shaped function");
    };
    assert!(func.name.is_none());
    // `: member(0)` is folded opaquely between `)` and `{`.
    assert!(!func.trailer.is_empty());
    assert!(func.body.is_some());
}

#[test]
fn malformed_base_clause_skips_to_the_body() {
    let src = "struct S : + ! { int x; };";
    let (_, tu) = parse_checked(src);
    let Stmt::Class(class) = stmt(&tu, 0) else {
        panic!("expected a class declaration");
    };
    assert!(class.bases.is_empty());
    assert!(!class.skipped.is_empty());
    assert_eq!(class.body.len(), 1);
}

#[test]
fn qualified_names_with_leading_colons() {
    let src = "return ::std::max(a, b);";
    let (tokens, tu) = parse_checked(src);
    let Stmt::Return(ret) = stmt(&tu, 0) else {
        panic!("expected a return statement");
    };
    let Expr::Call(call) = expr(&tu, ret.body.unwrap()) else {
        panic!("expected a call");
    };
    let Expr::DeclRef(dr) = expr(&tu, call.callee) else {
        panic!("expected a qualified callee");
    };
    let texts: Vec<&str> = dr.name.toks.iter().map(|&t| text(&tokens, src, t)).collect();
    assert_eq!(texts, vec!["::", "std", "::", "max"]);
}

#[test]
fn comma_operator_only_inside_parentheses() {
    let src = "f((a, b));";
    let (_, tu) = parse_checked(src);
    let Stmt::ExprLine(line) = stmt(&tu, 0) else {
        panic!("expected an expression statement");
    };
    let Expr::Call(call) = expr(&tu, line.expr) else {
        panic!("expected a call");
    };
    assert_eq!(call.args.len(), 1);
    let Expr::Paren(paren) = expr(&tu, call.args[0]) else {
        panic!("expected a parenthesized argument");
    };
    assert!(matches!(expr(&tu, paren.inner), Expr::Binary(_)));
}

#[test]
fn dump_renders_every_statement() {
    let src = "int x = 1; struct S { }; % ;";
    let (tokens, tu) = parse_checked(src);
    let rendered = squint_ir::display::dump(&tu, &tokens, src);
    assert!(rendered.contains("DeclStmt"));
    assert!(rendered.contains("ClassDecl"));
    assert!(rendered.contains("UnparsableBlock"));
}

#[test]
fn statements_after_salvage_still_parse() {
    let src = "@@@ garbage %% ; int x; return x;";
    let (_, tu) = parse_checked(src);
    assert_eq!(tu.stmts.len(), 3);
    assert!(matches!(stmt(&tu, 0), Stmt::Unparsable(_)));
    assert!(matches!(stmt(&tu, 1), Stmt::Decl(_)));
    assert!(matches!(stmt(&tu, 2), Stmt::Return(_)));
}

#[test]
fn dispatcher_without_salvage_reports_failure() {
    let tokens = squint_lexer::lex("% @@ ;");
    let mut parser = Parser::new(&tokens);
    let pos = parser.raw_pos();
    assert!(parser.parse_any(false, false).is_none());
    assert_eq!(parser.raw_pos(), pos, "failure must not consume tokens");
    assert!(parser.parse_any(true, false).is_some());
}

#[test]
fn fuzzy_parse_equals_parser_loop() {
    let src = "int x;";
    let tokens = squint_lexer::lex(src);
    let tu = fuzzy_parse(&tokens);
    assert_eq!(tu.stmts.len(), 1);
}
