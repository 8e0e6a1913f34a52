// Common test utilities
#![allow(dead_code)]

use jast::ast::*;
use jast::config::{Config, LanguageLevel};
use jast::parser::{self, ParseError, ParseResult};

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn at(level: LanguageLevel) -> Config {
    Config::new(level)
}

pub fn parse_unit(source: &str) -> ParseResult<CompilationUnit> {
    init_logging();
    parser::parse_source(source)
}

pub fn parse_unit_at(source: &str, level: LanguageLevel) -> ParseResult<CompilationUnit> {
    init_logging();
    parser::parse_source_with(source, at(level), SourceId::anonymous())
}

pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    parser::parse_expression(source)
}

pub fn parse_expr_at(source: &str, level: LanguageLevel) -> ParseResult<Expr> {
    parser::parse_expression_with(source, at(level))
}

pub fn parse_stmt(source: &str) -> ParseResult<Stmt> {
    parser::parse_statement(source)
}

pub fn parse_stmt_at(source: &str, level: LanguageLevel) -> ParseResult<Stmt> {
    parser::parse_statement_with(source, at(level))
}

/// The statements of `body` placed inside a method of a throwaway class.
pub fn parse_body(body: &str) -> ParseResult<Vec<Stmt>> {
    let source = format!("class T {{ void m() {{ {} }} }}", body);
    let mut unit = parse_unit(&source)?;
    let decl = unit.types.remove(0);
    for member in decl.members {
        if let Member::Method(MethodDecl { body: Some(block), .. }) = member {
            return Ok(block.stmts);
        }
    }
    panic!("no method body in {}", source);
}

pub fn first_type(unit: &CompilationUnit) -> &TypeDecl {
    unit.types.first().expect("no type declarations")
}

pub fn assert_grammar_violation<T: std::fmt::Debug>(result: ParseResult<T>) -> ParseError {
    let err = result.expect_err("expected a grammar violation");
    assert!(err.is_grammar_violation(), "expected a grammar violation, got {:?}", err);
    err
}

pub fn assert_illegal_token<T: std::fmt::Debug>(result: ParseResult<T>) -> ParseError {
    let err = result.expect_err("expected an illegal token error");
    assert!(err.is_illegal_token(), "expected an illegal token error, got {:?}", err);
    err
}

/// Parse, print and re-parse an expression; both trees must be literally equal.
pub fn assert_expr_round_trip(source: &str) {
    let first = parse_expr(source).expect("Failed to parse");
    let printed = first.to_string();
    let second = parse_expr(&printed).unwrap_or_else(|e| panic!("reparse of {:?} failed: {}", printed, e));
    assert!(
        literal_eq(NodeRef::Expr(&first), NodeRef::Expr(&second)),
        "{:?} printed as {:?} reparsed differently",
        source,
        printed
    );
}
