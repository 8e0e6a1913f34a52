mod common;

use common::*;
use jast::ast::*;
use pretty_assertions::assert_eq;

#[test]
fn test_print_unit_layout() {
    let unit = parse_unit(
        "package a.b; import java.util.List; @Deprecated public class C<T> extends B implements I { \
         private int x = 1, y; C() { super(); } public T get() { return null; } }",
    )
    .expect("Failed to parse");
    let expected = "\
package a.b;

import java.util.List;

@Deprecated
public class C<T> extends B implements I {
    private int x = 1, y;
    C() {
        super();
    }
    public T get() {
        return null;
    }
}
";
    assert_eq!(SourcePrinter::new().print_unit(&unit), expected);
    assert_eq!(unit.to_string(), expected);
}

#[test]
fn test_print_enum_and_empty_bodies() {
    let unit = parse_unit("enum E { A, B(1) { } ; void f() {} } interface Marker {}").expect("Failed to parse");
    let expected = "\
enum E {
    A,
    B(1) {};
    void f() {}
}

interface Marker {}
";
    assert_eq!(SourcePrinter::new().print_unit(&unit), expected);

    let unit = parse_unit("enum Plain { X, Y }").expect("Failed to parse");
    assert_eq!(SourcePrinter::new().print_unit(&unit), "enum Plain {\n    X,\n    Y\n}\n");
}

#[test]
fn test_print_switch_forms() {
    let stmt = parse_stmt("switch (x) { case 1: a(); break; default: b(); }").expect("Failed to parse");
    let expected = "\
switch (x) {
    case 1:
        a();
        break;
    default:
        b();
}
";
    assert_eq!(SourcePrinter::new().print_stmt(&stmt), expected);

    let stmt = parse_stmt("switch (x) { case 1, 2 -> a(); case 3 -> { b(); } default -> throw new E(); }")
        .expect("Failed to parse");
    let expected = "\
switch (x) {
    case 1, 2 -> a();
    case 3 -> {
        b();
    }
    default -> throw new E();
}
";
    assert_eq!(SourcePrinter::new().print_stmt(&stmt), expected);
}

#[test]
fn test_print_module() {
    let unit = parse_unit("open module m.core { requires static java.sql; exports m.api to a, b; }").expect("Failed to parse");
    let expected = "\
open module m.core {
    requires static java.sql;
    exports m.api to a, b;
}
";
    assert_eq!(unit.to_string(), expected);
}

#[test]
fn test_display_is_single_line() {
    let stmt = parse_stmt("if (a) { x(); return; } else y();").expect("Failed to parse");
    assert_eq!(stmt.to_string(), "if (a) { x(); return; } else y();");
    let ty = jast::parser::parse_type("Map<String, ? extends List<int[]>>").expect("Failed to parse");
    assert_eq!(ty.to_string(), "Map<String, ? extends List<int[]>>");
}

#[test]
fn test_expression_round_trips() {
    for source in [
        "a + b * c",
        "(a + b) * c",
        "a - (b - c)",
        "x = y = z",
        "c ? a : b ? d : e",
        "(int) -x",
        "(String) o",
        "- -x",
        "a instanceof String s && s.isEmpty()",
        "list.stream().map(x -> x + 1).collect(Collectors.toList())",
        "(a, b) -> { return a; }",
        "String[]::new",
        "new int[][] {{1}, {2, 3}}",
        "new Outer().new Inner<>()",
        "switch (k) { case 1 -> \"one\"; default -> { yield \"many\"; } }",
        "o instanceof Point(var x, int y) p",
        "List.<String>of()",
        "int.class",
    ] {
        assert_expr_round_trip(source);
    }
}

#[test]
fn test_unit_round_trip_is_literally_equal() {
    let source = "package p; import static java.lang.Math.*; \
                  @SuppressWarnings({\"a\", \"b\"}) final class K<T extends Number & Comparable<T>> { \
                  int[] xs = {1, 2}; <R> R map(final Function<? super T, R> f) throws E { \
                  for (int i = 0; i < xs.length; i++) { if (i % 2 == 0) continue; } \
                  try (var r = open()) { r.read(); } catch (A | B e) { throw e; } finally { done(); } \
                  label: while (true) break label; return f.apply(null); } }";
    let first = parse_unit(source).expect("Failed to parse");
    let printed = first.to_string();
    let second = parse_unit(&printed).unwrap_or_else(|e| panic!("reparse failed: {}\n{}", e, printed));
    assert!(literal_eq(first.as_node(), second.as_node()), "printed:\n{}", printed);
    assert_eq!(second.to_string(), printed);
}

#[test]
fn test_dump_tree_format() {
    let expr = parse_expr("a + 1").expect("Failed to parse");
    assert_eq!(
        dump_tree(NodeRef::Expr(&expr)),
        "Binary [+] @1:1\n  Name [a] @1:1\n  Literal [Int, 1] @1:5\n"
    );

    let stmt = parse_stmt("return x;").expect("Failed to parse");
    assert_eq!(dump_tree(NodeRef::Stmt(&stmt)), "Return @1:1\n  Name [x] @1:8\n");
}
