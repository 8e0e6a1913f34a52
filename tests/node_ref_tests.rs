mod common;

use common::*;
use jast::ast::*;

fn kinds(nodes: &[NodeRef<'_>]) -> Vec<NodeKind> {
    nodes.iter().map(NodeRef::kind).collect()
}

#[test]
fn test_unit_children_in_source_order() {
    let unit = parse_unit("package p; import a.B; import c.D; class X {} interface Y {}").expect("Failed to parse");
    assert_eq!(
        kinds(&unit.as_node().children()),
        vec![NodeKind::Package, NodeKind::Import, NodeKind::Import, NodeKind::ClassDecl, NodeKind::InterfaceDecl]
    );
}

#[test]
fn test_method_children() {
    let unit = parse_unit("class C { @Override public <T> T[] pick(T a, int b) throws E { return a; } }")
        .expect("Failed to parse");
    let method = &first_type(&unit).members[0];
    assert_eq!(
        kinds(&NodeRef::Member(method).children()),
        vec![
            NodeKind::Annotation,
            NodeKind::TypeParam,
            NodeKind::ArrayType,
            NodeKind::Ident,
            NodeKind::Param,
            NodeKind::Param,
            NodeKind::ClassType,
            NodeKind::Block,
        ]
    );
}

#[test]
fn test_leaf_expressions_have_no_children() {
    for source in ["x", "42", "\"s\"", "null"] {
        let expr = parse_expr(source).expect("Failed to parse");
        assert!(NodeRef::Expr(&expr).children().is_empty(), "{}", source);
    }
}

#[test]
fn test_node_categories() {
    let expr = parse_expr("a + b").expect("Failed to parse");
    let node = NodeRef::Expr(&expr);
    assert!(node.is_expression());
    assert!(!node.is_statement() && !node.is_type());

    let stmt = parse_stmt("return;").expect("Failed to parse");
    assert!(NodeRef::Stmt(&stmt).is_statement());

    let unit = parse_unit("class C { int f; }").expect("Failed to parse");
    let decl = first_type(&unit);
    assert!(NodeRef::TypeDecl(decl).is_declaration());
    assert!(NodeRef::Member(&decl.members[0]).is_member());
}

#[test]
fn test_child_spans_nest_inside_parent() {
    let unit = parse_unit("class C {\n  void f(int x) {\n    if (x > 0) { g(x); }\n  }\n}").expect("Failed to parse");
    for node in descendants(unit.as_node()) {
        for child in node.children() {
            let (outer, inner) = (node.span(), child.span());
            assert!(
                outer.start.offset <= inner.start.offset && inner.end.offset <= outer.end.offset,
                "{:?} escapes {:?}",
                child.kind(),
                node.kind()
            );
        }
    }
}

#[test]
fn test_collect_and_count_kinds() {
    let unit = parse_unit(
        "class C { void a() { f(); g(h()); } void b() { int x = 1; x++; } class Inner { void c() {} } }",
    )
    .expect("Failed to parse");
    let calls = collect_kind(unit.as_node(), NodeKind::MethodCall);
    assert_eq!(calls.len(), 3);

    let counts = KindCounter::count(unit.as_node());
    assert_eq!(counts.get(NodeKind::Method), 3);
    assert_eq!(counts.get(NodeKind::ClassDecl), 2);
    assert_eq!(counts.get(NodeKind::LocalVar), 1);
    assert_eq!(counts.get(NodeKind::Yield), 0);
    assert_eq!(counts.total(), descendants(unit.as_node()).len() + 1);
}

#[test]
fn test_find_all_with_predicate() {
    let expr = parse_expr("a + b * (c - d)").expect("Failed to parse");
    let names: Vec<String> = find_all(NodeRef::Expr(&expr), |n| n.kind() == NodeKind::Name)
        .into_iter()
        .map(|n| attributes(n).join(""))
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_visitor_can_skip_subtrees() {
    struct TopLevelCalls(usize);

    impl<'a> Visitor<'a> for TopLevelCalls {
        fn enter(&mut self, node: NodeRef<'a>) -> bool {
            if node.kind() == NodeKind::MethodCall {
                self.0 += 1;
                return false;
            }
            true
        }
    }

    let expr = parse_expr("f(g(h(1)))").expect("Failed to parse");
    let mut visitor = TopLevelCalls(0);
    walk(NodeRef::Expr(&expr), &mut visitor);
    assert_eq!(visitor.0, 1);
}

#[test]
fn test_deep_operator_chain_walks_iteratively() {
    let source = vec!["x"; 5000].join(" + ");
    let expr = parse_expr(&source).expect("Failed to parse");
    assert_eq!(collect_kind(NodeRef::Expr(&expr), NodeKind::Name).len(), 5000);
}

#[test]
fn test_absent_names_are_the_empty_singletons() {
    let expr = parse_expr("this").expect("Failed to parse");
    assert!(matches!(&expr, Expr::This { qualifier, .. } if qualifier.is_empty() && *qualifier == QualifiedName::EMPTY));
    let stmt = parse_stmt("break;").expect("Failed to parse");
    assert!(matches!(&stmt, Stmt::Break { label, .. } if *label == Ident::EMPTY));
    assert!(NodeRef::Expr(&expr).children().is_empty());
    assert!(NodeRef::Stmt(&stmt).children().is_empty());
}
