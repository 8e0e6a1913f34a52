mod common;

use common::*;
use jast::ast::*;

#[test]
fn test_block_statement_kinds() {
    let stmts = parse_body(
        "int x = 1;
         ;
         { x++; }
         class Local {}
         record Pair(int a, int b) {}
         final String s = \"s\";
         x += 2;",
    )
    .expect("Failed to parse");
    assert_eq!(stmts.len(), 7);
    assert!(matches!(stmts[0], Stmt::LocalVar(_)));
    assert!(matches!(stmts[1], Stmt::Empty { .. }));
    assert!(matches!(stmts[2], Stmt::Block(_)));
    assert!(matches!(&stmts[3], Stmt::LocalClass(decl) if decl.kind == TypeDeclKind::Class));
    assert!(matches!(&stmts[4], Stmt::LocalClass(decl) if decl.kind == TypeDeclKind::Record));
    match &stmts[5] {
        Stmt::LocalVar(decl) => assert_eq!(decl.modifiers, vec![Modifier::Final]),
        other => panic!("expected a final local, got {:?}", other),
    }
    assert!(matches!(stmts[6], Stmt::Expr { expr: Expr::Assign { op: AssignOp::AddAssign, .. }, .. }));
}

#[test]
fn test_local_declarators() {
    let stmt = parse_stmt("int a = 1, b[] = {2}, c;").expect("Failed to parse");
    let Stmt::LocalVar(decl) = stmt else { panic!("expected a local variable") };
    assert_eq!(decl.declarators.len(), 3);
    assert_eq!(decl.declarators[1].dims.len(), 1);
    assert!(matches!(decl.declarators[1].init, Some(Expr::ArrayInit { .. })));
    assert!(decl.declarators[2].init.is_none());
}

#[test]
fn test_local_modifier_restrictions() {
    let err = assert_grammar_violation(parse_stmt("static int x = 1;"));
    assert!(err.to_string().contains("static"));
    assert_grammar_violation(parse_body("public int x = 1;"));
    assert_grammar_violation(parse_body("@interface Local {}"));
}

#[test]
fn test_if_else_chains_bind_to_nearest() {
    let stmt = parse_stmt("if (a) if (b) x(); else y();").expect("Failed to parse");
    match stmt {
        Stmt::If { then_branch, else_branch: None, .. } => {
            assert!(matches!(*then_branch, Stmt::If { else_branch: Some(_), .. }));
        }
        other => panic!("expected an outer if without else, got {:?}", other),
    }
}

#[test]
fn test_loops() {
    let stmts = parse_body(
        "while (running) tick();
         do { n--; } while (n > 0);
         for (int i = 0, j = 10; i < j; i++, j--) {}
         for (;;) break;
         for (i = 0, j = 1; ; ) continue;
         for (final Map.Entry<String, Integer> e : map.entrySet()) use(e);",
    )
    .expect("Failed to parse");
    assert!(matches!(stmts[0], Stmt::While { .. }));
    assert!(matches!(stmts[1], Stmt::DoWhile { .. }));
    match &stmts[2] {
        Stmt::For { init, condition: Some(_), update, .. } => {
            assert!(matches!(&init[..], [Stmt::LocalVar(decl)] if decl.declarators.len() == 2));
            assert_eq!(update.len(), 2);
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
    assert!(matches!(&stmts[3], Stmt::For { init, condition: None, update, .. } if init.is_empty() && update.is_empty()));
    assert!(matches!(&stmts[4], Stmt::For { init, .. } if init.len() == 2));
    match &stmts[5] {
        Stmt::ForEach { var, .. } => {
            assert_eq!(var.modifiers, vec![Modifier::Final]);
            assert_eq!(var.name.as_str(), "e");
        }
        other => panic!("expected an enhanced for, got {:?}", other),
    }
}

#[test]
fn test_for_update_must_be_statement_expressions() {
    assert_grammar_violation(parse_stmt("for (;; i + 1) {}"));
    assert_grammar_violation(parse_stmt("for (a; ;) {}"));
}

#[test]
fn test_jumps_and_labels() {
    let stmts = parse_body("outer: for (;;) { inner: while (true) { break outer; } } continue; return; return x;")
        .expect("Failed to parse");
    match &stmts[0] {
        Stmt::Labeled { label, body, .. } => {
            assert_eq!(label.as_str(), "outer");
            assert!(matches!(**body, Stmt::For { .. }));
        }
        other => panic!("expected a labeled statement, got {:?}", other),
    }
    assert!(matches!(&stmts[1], Stmt::Continue { label, .. } if label.is_empty()));
    assert!(matches!(stmts[2], Stmt::Return { value: None, .. }));
    assert!(matches!(stmts[3], Stmt::Return { value: Some(_), .. }));
}

#[test]
fn test_try_forms() {
    let stmts = parse_body(
        "try { a(); } catch (IOException | RuntimeException e) { log(e); } finally { close(); }
         try (var in = open(); BufferedReader r = wrap(in);) { read(r); }
         try (this.stream; out) {}
         try { run(); } finally {}",
    )
    .expect("Failed to parse");
    match &stmts[0] {
        Stmt::Try { catches, finally: Some(_), resources, .. } => {
            assert!(resources.is_empty());
            assert!(matches!(&catches[0].param.ty, Some(TypeNode::Union { types, .. }) if types.len() == 2));
        }
        other => panic!("expected try/catch/finally, got {:?}", other),
    }
    match &stmts[1] {
        Stmt::Try { resources, catches, finally: None, .. } => {
            assert_eq!(resources.len(), 2);
            assert!(resources.iter().all(|r| matches!(r, Resource::Decl(_))));
            assert!(catches.is_empty());
        }
        other => panic!("expected try-with-resources, got {:?}", other),
    }
    match &stmts[2] {
        Stmt::Try { resources, .. } => {
            assert!(matches!(resources[0], Resource::Expr(Expr::FieldAccess { .. })));
            assert!(matches!(resources[1], Resource::Expr(Expr::Name(_))));
        }
        other => panic!("expected resources by reference, got {:?}", other),
    }
    assert!(matches!(stmts[3], Stmt::Try { .. }));
}

#[test]
fn test_bare_try_is_rejected() {
    let err = assert_grammar_violation(parse_stmt("try {}"));
    assert_eq!(err.location().line, 1);
    assert_eq!(err.location().column, 1);
}

#[test]
fn test_throw_synchronized_assert() {
    let stmts = parse_body(
        "throw new IllegalStateException(\"bad\");
         synchronized (lock) { count++; }
         assert x > 0;
         assert x > 0 : \"x must be positive\";",
    )
    .expect("Failed to parse");
    assert!(matches!(stmts[0], Stmt::Throw { expr: Expr::New { .. }, .. }));
    assert!(matches!(&stmts[1], Stmt::Synchronized { body, .. } if body.stmts.len() == 1));
    assert!(matches!(stmts[2], Stmt::Assert { message: None, .. }));
    assert!(matches!(stmts[3], Stmt::Assert { message: Some(_), .. }));
}

#[test]
fn test_explicit_constructor_invocations() {
    let unit = parse_unit(
        "class A extends B {
             A() { this(1); }
             A(int x) { super(x); }
             A(Outer o) { o.super(); }
             A(String s) { <String>this(s.length()); }
         }",
    )
    .expect("Failed to parse");
    let calls: Vec<_> = first_type(&unit)
        .constructors()
        .map(|ctor| match &ctor.body.stmts[0] {
            Stmt::CtorCall { kind, qualifier, type_args, .. } => (*kind, qualifier.is_some(), type_args.len()),
            other => panic!("expected a constructor call, got {:?}", other),
        })
        .collect();
    assert_eq!(
        calls,
        vec![
            (CtorCallKind::This, false, 0),
            (CtorCallKind::Super, false, 0),
            (CtorCallKind::Super, true, 0),
            (CtorCallKind::This, false, 1),
        ]
    );
}

#[test]
fn test_expression_statements_must_have_effect() {
    for source in ["x;", "1 + 2;", "a.b;", "(x);", "a < b;", "new int[3];"] {
        let err = assert_grammar_violation(parse_stmt(source));
        assert!(err.to_string().contains("not a statement"), "{}", source);
    }
    for source in ["x = 1;", "x++;", "--x;", "f();", "new Thread(r);", "a.b().c();"] {
        assert!(parse_stmt(source).is_ok(), "{}", source);
    }
}

#[test]
fn test_misplaced_keywords() {
    assert_illegal_token(parse_stmt("else x();"));
    assert_illegal_token(parse_stmt("catch (E e) {}"));
    assert_illegal_token(parse_body("int x = 1"));
}

#[test]
fn test_statement_spans_cover_terminator() {
    let stmts = parse_body("foo();").expect("Failed to parse");
    let span = jast::parser::HasSpan::span(&stmts[0]);
    assert_eq!(span.end.offset - span.start.offset, "foo();".len());
}

#[test]
fn test_legacy_dims_on_loop_variables() {
    let stmts = parse_body("for (String s[] : rows) use(s); for (int i = 0, xs[] = {}; i < 1; i++) {}")
        .expect("Failed to parse");
    match &stmts[0] {
        Stmt::ForEach { var, .. } => {
            assert_eq!(var.name.as_str(), "s");
            assert_eq!(var.dims.len(), 1);
        }
        other => panic!("expected an enhanced for, got {:?}", other),
    }
    match &stmts[1] {
        Stmt::For { init, .. } => {
            assert!(matches!(&init[..], [Stmt::LocalVar(decl)] if decl.declarators[1].dims.len() == 1));
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
    assert_grammar_violation(parse_stmt("for (var s[] : rows) {}"));
}
