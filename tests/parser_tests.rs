mod common;

use common::*;
use jast::ast::*;
use jast::parser::{self, tokenize, HasSpan, Location, ParseError, TokenKind};
use jast::{Config, LanguageLevel};

#[test]
fn test_complete_unit() {
    let source = r#"
package com.example.service;

import java.util.*;
import java.util.function.Function;
import static java.util.Objects.requireNonNull;

/** Service facade. */
@Service
public final class UserService implements AutoCloseable {
    private final Map<Long, User> users = new HashMap<>();

    public Optional<User> find(long id) {
        return Optional.ofNullable(users.get(id));
    }

    public <R> List<R> mapAll(Function<? super User, ? extends R> f) {
        List<R> out = new ArrayList<>();
        for (User u : users.values()) {
            out.add(f.apply(u));
        }
        return out;
    }

    @Override
    public void close() {
        users.clear();
    }
}

interface Auditor {}
"#;
    let unit = parse_unit(source).expect("Failed to parse");
    assert_eq!(unit.package_name().as_deref(), Some("com.example.service"));
    assert_eq!(unit.imports.len(), 3);
    assert!(unit.imports[0].wildcard);
    assert_eq!(unit.imports[0].name.dotted(), "java.util");
    assert!(unit.imports[2].is_static);
    assert_eq!(unit.types.len(), 2);
    let service = first_type(&unit);
    assert_eq!(service.name.as_str(), "UserService");
    assert_eq!(service.methods().count(), 3);
    assert!(!unit.is_module_info());
}

#[test]
fn test_empty_and_stray_semicolons() {
    let unit = parse_unit("").expect("Failed to parse");
    assert!(unit.package.is_none() && unit.imports.is_empty() && unit.types.is_empty());

    let unit = parse_unit("package p;; import a.B;; ; class C {};").expect("Failed to parse");
    assert_eq!(unit.imports.len(), 1);
    assert_eq!(unit.types.len(), 1);
}

#[test]
fn test_comments_only() {
    let unit = parse_unit("// nothing\n/* here */\n").expect("Failed to parse");
    assert!(unit.types.is_empty());
}

#[test]
fn test_illegal_token_location_and_lexeme() {
    let err = assert_illegal_token(parse_unit("class A {\n    int x = ;\n}"));
    assert_eq!(err.location(), Location::new(2, 13, 22));
    match err {
        ParseError::IllegalToken { lexeme, .. } => assert_eq!(lexeme, ";"),
        other => panic!("expected an illegal token, got {:?}", other),
    }
}

#[test]
fn test_missing_brace_at_end_of_input() {
    let err = assert_illegal_token(parse_unit("class A {"));
    assert!(err.to_string().contains("end of input") || err.to_string().contains("'}'"));
}

#[test]
fn test_imports_after_types_are_rejected() {
    assert_illegal_token(parse_unit("class A {} import java.util.List;"));
    assert_illegal_token(parse_unit("import java.util.List"));
    assert!(parse_unit("import a.*.b;").is_err());
}

#[test]
fn test_lexical_errors_surface() {
    let err = parse_unit("class A { int # x; }").expect_err("expected a lexical error");
    assert!(matches!(err, ParseError::Lexical { .. }));
    assert_eq!(err.location().column, 15);
}

#[test]
fn test_parse_tokens_directly() {
    let tokens = tokenize("class A { void f() {} }").expect("Failed to tokenize");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    let unit = parser::parse_tokens(&tokens).expect("Failed to parse");
    assert_eq!(first_type(&unit).name.as_str(), "A");

    let unit = parser::parse_tokens_with(&tokens, Config::new(LanguageLevel::Java8), SourceId::new("A.java"))
        .expect("Failed to parse");
    assert_eq!(unit.source.as_str(), "A.java");
}

#[test]
fn test_missing_eof_is_fatal() {
    let mut tokens = tokenize("class A {}").expect("Failed to tokenize");
    tokens.pop();
    assert!(matches!(parser::parse_tokens(&tokens), Err(ParseError::Fatal { .. })));
    assert!(matches!(parser::parse_tokens(&[]), Err(ParseError::Fatal { .. })));
}

#[test]
fn test_unit_span_covers_source() {
    let source = "package p;\nclass A {}";
    let unit = parse_unit(source).expect("Failed to parse");
    assert_eq!(unit.span().start, Location::new(1, 1, 0));
    assert_eq!(unit.span().end.offset, source.len());
    let decl = first_type(&unit);
    assert_eq!(decl.span.start, Location::new(2, 1, 11));
}

#[test]
fn test_crlf_line_counting() {
    let unit = parse_unit("class A {\r\n  int x;\r\n}").expect("Failed to parse");
    let field = first_type(&unit).fields().next().expect("field");
    assert_eq!(field.span.start.line, 2);
    assert_eq!(field.span.start.column, 3);
}

#[test]
fn test_source_identity() {
    let a = parser::parse_source_with("class A {}", Config::default(), SourceId::new("A.java"))
        .expect("Failed to parse");
    let b = parser::parse_source_with("class B {}", Config::default(), SourceId::new("A.java"))
        .expect("Failed to parse");
    let c = parse_unit("class A {}").expect("Failed to parse");
    let d = parse_unit("class A {}").expect("Failed to parse");
    assert_eq!(a, b);
    assert_ne!(c, d);
    assert_ne!(SourceId::anonymous(), SourceId::anonymous());
}

#[test]
fn test_fragment_errors_name_the_fragment() {
    let err = parser::parse_expression("a +").expect_err("expected an error");
    assert!(err.to_string().contains("(context: expression)"));
    let err = parser::parse_type("List<>>").expect_err("expected an error");
    assert!(err.to_string().contains("(context: type)"));
}

#[test]
fn test_text_blocks() {
    let expr = parse_expr("\"\"\"\n    Hello\n    \"\"\"").expect("Failed to parse");
    assert!(matches!(expr, Expr::Literal(Literal { kind: LiteralKind::TextBlock, .. })));
    assert_grammar_violation(parse_expr_at("\"\"\"\n    Hello\n    \"\"\"", LanguageLevel::Java14));
}

#[test]
fn test_library_parse_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Main.java");
    std::fs::write(&path, "public class Main { public static void main(String[] args) {} }").expect("write");
    let unit = jast::parse_file(&path, Config::default()).expect("Failed to parse");
    assert_eq!(unit.source, SourceId::from_path(&path));

    let missing = jast::parse_file(dir.path().join("Nope.java"), Config::default()).expect_err("expected IO error");
    assert!(matches!(missing, jast::Error::Io(_)));

    std::fs::write(&path, "class {").expect("write");
    let err = jast::parse_file(&path, Config::default()).expect_err("expected a parse error");
    assert!(err.as_parse_error().is_some());
    assert!(err.to_string().contains("Main.java"));
}
