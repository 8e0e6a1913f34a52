//! Parser module for Java source.
//!
//! This module handles lexical analysis and parsing of Java compilation
//! units into the AST. Parsing is fail-fast: the first error is returned
//! and no partial tree is built.

pub mod cursor;
pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod scan;
pub mod span;
pub mod token_sets;

mod decl;
mod expr;
mod pattern;
mod stmt;
mod types;

pub use cursor::TokenCursor;
pub use error::{ParseError, ParseResult};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use span::{HasSpan, Location, Span};

use crate::ast::{CompilationUnit, Expr, SourceId, Stmt, TypeNode};
use crate::config::Config;

/// Parse Java source text at the latest language level.
pub fn parse_source(source: &str) -> ParseResult<CompilationUnit> {
    parse_source_with(source, Config::default(), SourceId::anonymous())
}

/// Parse Java source text with an explicit configuration and source id.
pub fn parse_source_with(source: &str, config: Config, id: SourceId) -> ParseResult<CompilationUnit> {
    let tokens = tokenize(source)?;
    parse_tokens_with(&tokens, config, id)
}

/// Parse an `Eof`-terminated token stream at the latest language level.
pub fn parse_tokens(tokens: &[Token]) -> ParseResult<CompilationUnit> {
    parse_tokens_with(tokens, Config::default(), SourceId::anonymous())
}

pub fn parse_tokens_with(tokens: &[Token], config: Config, id: SourceId) -> ParseResult<CompilationUnit> {
    Parser::new(tokens, config)?.with_source(id).parse_compilation_unit()
}

/// Parse a single expression that must span the whole input.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    parse_fragment(source, Config::default(), "expression", |p| p.parse_expression())
}

pub fn parse_expression_with(source: &str, config: Config) -> ParseResult<Expr> {
    parse_fragment(source, config, "expression", |p| p.parse_expression())
}

/// Parse a single type that must span the whole input.
pub fn parse_type(source: &str) -> ParseResult<TypeNode> {
    parse_fragment(source, Config::default(), "type", |p| p.parse_type())
}

/// Parse a single block statement that must span the whole input.
pub fn parse_statement(source: &str) -> ParseResult<Stmt> {
    parse_fragment(source, Config::default(), "statement", |p| p.parse_statement())
}

pub fn parse_statement_with(source: &str, config: Config) -> ParseResult<Stmt> {
    parse_fragment(source, config, "statement", |p| p.parse_statement())
}

fn parse_fragment<T>(
    source: &str,
    config: Config,
    what: &str,
    parse: impl FnOnce(&mut Parser<'_>) -> ParseResult<T>,
) -> ParseResult<T> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, config)?;
    let node = parse(&mut parser).map_err(|e| e.with_context(what))?;
    parser.expect_end().map_err(|e| e.with_context(what))?;
    Ok(node)
}
