mod common;

use common::*;
use jast::ast::*;
use jast::LanguageLevel;

fn module_of(unit: &CompilationUnit) -> &ModuleDecl {
    unit.module.as_ref().expect("module declaration")
}

#[test]
fn test_module_with_all_directives() {
    let unit = parse_unit(
        "import com.acme.spi.Plugin;

         @Deprecated
         open module com.acme.app {
             requires java.base;
             requires static transitive com.acme.util;
             exports com.acme.api;
             exports com.acme.internal to com.acme.test, com.acme.bench;
             opens com.acme.model to jackson.databind;
             uses Plugin;
             provides Plugin with com.acme.impl.FastPlugin, com.acme.impl.SafePlugin;
         }",
    )
    .expect("Failed to parse");
    assert!(unit.is_module_info());
    assert!(unit.types.is_empty());
    assert_eq!(unit.imports.len(), 1);

    let module = module_of(&unit);
    assert!(module.open);
    assert_eq!(module.annotations.len(), 1);
    assert_eq!(module.name.dotted(), "com.acme.app");
    assert_eq!(module.directives.len(), 7);

    match &module.directives[1] {
        Directive::Requires { is_static, is_transitive, module, .. } => {
            assert!(*is_static);
            assert!(*is_transitive);
            assert_eq!(module.dotted(), "com.acme.util");
        }
        other => panic!("expected requires, got {:?}", other),
    }
    assert!(matches!(&module.directives[2], Directive::Exports { targets, .. } if targets.is_empty()));
    assert!(matches!(&module.directives[3], Directive::Exports { targets, .. } if targets.len() == 2));
    assert!(matches!(&module.directives[4], Directive::Opens { targets, .. } if targets.len() == 1));
    assert!(matches!(&module.directives[5], Directive::Uses { service, .. } if service.dotted() == "Plugin"));
    match &module.directives[6] {
        Directive::Provides { implementations, .. } => {
            let names: Vec<String> = implementations.iter().map(QualifiedName::dotted).collect();
            assert_eq!(names, vec!["com.acme.impl.FastPlugin", "com.acme.impl.SafePlugin"]);
        }
        other => panic!("expected provides, got {:?}", other),
    }
}

#[test]
fn test_restricted_words_as_module_names() {
    let unit = parse_unit("module m { requires transitive; requires transitive.core; requires static transitive; }")
        .expect("Failed to parse");
    let requires: Vec<(bool, bool, String)> = module_of(&unit)
        .directives
        .iter()
        .map(|d| match d {
            Directive::Requires { is_static, is_transitive, module, .. } => (*is_static, *is_transitive, module.dotted()),
            other => panic!("expected requires, got {:?}", other),
        })
        .collect();
    assert_eq!(
        requires,
        vec![
            (false, false, "transitive".to_string()),
            (false, false, "transitive.core".to_string()),
            (true, false, "transitive".to_string()),
        ]
    );
}

#[test]
fn test_empty_module() {
    let unit = parse_unit("module empty {}").expect("Failed to parse");
    let module = module_of(&unit);
    assert!(!module.open);
    assert!(module.directives.is_empty());
}

#[test]
fn test_module_with_package_is_rejected() {
    let err = assert_grammar_violation(parse_unit("package a; module m {}"));
    assert_eq!(err.location().line, 1);
    assert_eq!(err.location().column, 1);
}

#[test]
fn test_unknown_directive() {
    let err = assert_illegal_token(parse_unit("module m { export a; }"));
    assert!(err.to_string().contains("module directive"));
}

#[test]
fn test_nothing_after_module() {
    assert_illegal_token(parse_unit("module m {} class C {}"));
}

#[test]
fn test_module_is_a_name_elsewhere() {
    let unit = parse_unit("class module { int open; void requires(int module) {} }").expect("Failed to parse");
    assert!(!unit.is_module_info());
    assert_eq!(first_type(&unit).name.as_str(), "module");
}

#[test]
fn test_modules_need_java_9() {
    assert!(parse_unit_at("module m {}", LanguageLevel::Java9).is_ok());
    let err = assert_grammar_violation(parse_unit_at("module m {}", LanguageLevel::Java8));
    assert!(err.to_string().contains("module declarations"));
}
