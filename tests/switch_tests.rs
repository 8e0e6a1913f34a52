mod common;

use common::*;
use jast::ast::*;
use jast::LanguageLevel;

fn switch_stmt(stmt: &Stmt) -> &SwitchBlock {
    match stmt {
        Stmt::Switch(switch) => switch,
        other => panic!("expected a switch statement, got {:?}", other),
    }
}

#[test]
fn test_statement_form_groups_and_fallthrough() {
    let stmt = parse_stmt(
        "switch (day) {
             case MONDAY:
             case TUESDAY:
                 work();
                 break;
             case 1, 2:
                 rest();
             default:
                 sleep();
         }",
    )
    .expect("Failed to parse");
    let switch = switch_stmt(&stmt);
    let SwitchBody::Statements(groups) = &switch.body else { panic!("expected statement groups") };
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].labels.len(), 2);
    assert_eq!(groups[0].stmts.len(), 2);
    match &groups[1].labels[0] {
        SwitchLabel::Case { items, guard, .. } => {
            assert_eq!(items.len(), 2);
            assert!(guard.is_none());
        }
        other => panic!("expected a case label, got {:?}", other),
    }
    assert!(matches!(groups[2].labels[0], SwitchLabel::Default(_)));
}

#[test]
fn test_rule_form_bodies() {
    let stmt = parse_stmt(
        "switch (k) {
             case 1 -> log(k);
             case 2 -> { a(); b(); }
             case 3 -> throw new IllegalStateException();
             default -> {}
         }",
    )
    .expect("Failed to parse");
    let SwitchBody::Rules(rules) = &switch_stmt(&stmt).body else { panic!("expected rules") };
    assert_eq!(rules.len(), 4);
    assert!(matches!(rules[0].body, RuleBody::Expr(Expr::MethodCall { .. })));
    assert!(matches!(&rules[1].body, RuleBody::Block(block) if block.stmts.len() == 2));
    assert!(matches!(rules[2].body, RuleBody::Throw(_)));
    assert!(matches!(rules[3].label, SwitchLabel::Default(_)));
}

#[test]
fn test_empty_switch() {
    let stmt = parse_stmt("switch (x) {}").expect("Failed to parse");
    assert!(matches!(&switch_stmt(&stmt).body, SwitchBody::Statements(groups) if groups.is_empty()));
}

#[test]
fn test_mixing_forms_is_a_grammar_violation() {
    let err = assert_grammar_violation(parse_stmt("switch (x) { case 1 -> a(); case 2: b(); }"));
    assert!(err.to_string().contains("different case kinds"));
    assert_grammar_violation(parse_stmt("switch (x) { case 1: a(); case 2 -> b(); }"));
    assert_grammar_violation(parse_stmt("switch (x) { case 1: case 2 -> b(); }"));
}

#[test]
fn test_rule_statement_must_be_a_statement_expression() {
    assert_grammar_violation(parse_stmt("switch (x) { case 1 -> 42; }"));
    assert!(parse_stmt("switch (x) { case 1 -> counter++; }").is_ok());
}

#[test]
fn test_switch_expression_with_yield() {
    let stmt = parse_stmt(
        "int n = switch (s) {
             case \"a\", \"b\" -> 1;
             case \"c\" -> {
                 int t = compute();
                 yield t * 2;
             }
             default -> throw new IllegalArgumentException(s);
         };",
    )
    .expect("Failed to parse");
    let Stmt::LocalVar(decl) = stmt else { panic!("expected a local variable") };
    let Some(Expr::Switch(switch)) = &decl.declarators[0].init else { panic!("expected a switch expression") };
    let SwitchBody::Rules(rules) = &switch.body else { panic!("expected rules") };
    assert_eq!(rules.len(), 3);
    let RuleBody::Block(block) = &rules[1].body else { panic!("expected a block body") };
    assert!(matches!(block.stmts[1], Stmt::Yield { .. }));
}

#[test]
fn test_statement_form_switch_expression_yields() {
    let expr = parse_expr("switch (k) { case 1: yield \"one\"; default: { yield \"other\"; } }").expect("Failed to parse");
    let Expr::Switch(switch) = expr else { panic!("expected a switch expression") };
    let SwitchBody::Statements(groups) = &switch.body else { panic!("expected statement groups") };
    assert!(matches!(groups[0].stmts[0], Stmt::Yield { .. }));
}

#[test]
fn test_yield_remains_an_identifier_where_unambiguous() {
    let stmts = parse_body("int yield = 1; yield = 2; yield++; obj.yield();").expect("Failed to parse");
    assert!(matches!(stmts[0], Stmt::LocalVar(_)));
    assert!(matches!(stmts[1], Stmt::Expr { expr: Expr::Assign { .. }, .. }));
    assert!(matches!(stmts[2], Stmt::Expr { expr: Expr::Unary { op: UnaryOp::PostInc, .. }, .. }));
    assert!(matches!(stmts[3], Stmt::Expr { expr: Expr::MethodCall { .. }, .. }));
}

#[test]
fn test_case_label_arrow_is_not_a_lambda() {
    let stmt = parse_stmt("switch (x) { case A -> run(); }").expect("Failed to parse");
    let SwitchBody::Rules(rules) = &switch_stmt(&stmt).body else { panic!("expected rules") };
    match &rules[0].label {
        SwitchLabel::Case { items, .. } => assert!(matches!(items[0], CaseItem::Expr(Expr::Name(_)))),
        other => panic!("expected a case label, got {:?}", other),
    }
    assert!(parse_stmt("switch (x) { case A -> list.forEach(e -> use(e)); }").is_ok());
}

#[test]
fn test_pattern_labels_with_guards() {
    let stmt = parse_stmt(
        "switch (shape) {
             case Circle c when c.radius() > 10 -> big(c);
             case Circle c -> small(c);
             case Square(int side) -> square(side);
             case null, default -> other();
         }",
    )
    .expect("Failed to parse");
    let SwitchBody::Rules(rules) = &switch_stmt(&stmt).body else { panic!("expected rules") };
    match &rules[0].label {
        SwitchLabel::Case { items, guard: Some(guard), .. } => {
            assert!(matches!(items[0], CaseItem::Pattern(Pattern::Type { .. })));
            assert!(matches!(guard, Expr::Binary { op: BinaryOp::Gt, .. }));
        }
        other => panic!("expected a guarded pattern label, got {:?}", other),
    }
    match &rules[2].label {
        SwitchLabel::Case { items, .. } => assert!(matches!(items[0], CaseItem::Pattern(Pattern::Record { .. }))),
        other => panic!("expected a record pattern label, got {:?}", other),
    }
    match &rules[3].label {
        SwitchLabel::Case { items, .. } => {
            assert_eq!(items.len(), 2);
            assert!(matches!(items[1], CaseItem::Default(_)));
        }
        other => panic!("expected case null, default, got {:?}", other),
    }
}

#[test]
fn test_case_item_constraints() {
    assert_grammar_violation(parse_stmt("switch (o) { case String s, Integer i -> f(); }"));
    assert_grammar_violation(parse_stmt("switch (o) { case String s, 1 -> f(); }"));
    assert_grammar_violation(parse_stmt("switch (o) { case 1, default -> f(); }"));
    assert_grammar_violation(parse_stmt("switch (o) { case 1 when ok -> f(); }"));
}

#[test]
fn test_switch_level_gates() {
    let rules = "switch (x) { case 1 -> f(); }";
    assert!(parse_stmt_at(rules, LanguageLevel::Java14).is_ok());
    let err = assert_grammar_violation(parse_stmt_at(rules, LanguageLevel::Java11));
    assert!(err.to_string().contains("switch rules"));

    assert_grammar_violation(parse_expr_at("switch (x) { default: yield 1; }", LanguageLevel::Java11));

    let patterns = "switch (o) { case String s -> f(); }";
    assert!(parse_stmt_at(patterns, LanguageLevel::Java21).is_ok());
    assert_grammar_violation(parse_stmt_at(patterns, LanguageLevel::Java17));

    let classic = "switch (x) { case 1: f(); break; default: g(); }";
    assert!(parse_stmt_at(classic, LanguageLevel::Java8).is_ok());
}

#[test]
fn test_yield_call_before_java14() {
    let call = parse_stmt_at("yield(x);", LanguageLevel::Java11).expect("Failed to parse");
    assert!(matches!(&call, Stmt::Expr { expr: Expr::MethodCall { target: None, name, .. }, .. } if name.as_str() == "yield"));

    let stmt = parse_stmt_at("yield(x);", LanguageLevel::Java14).expect("Failed to parse");
    assert!(matches!(stmt, Stmt::Yield { value: Expr::Parenthesized { .. }, .. }));
}
