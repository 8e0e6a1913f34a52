//! Recursive descent parser for Java compilation units.
//!
//! The grammar is split by section: this file holds the parser state, the
//! compilation unit production and the shared name/annotation/modifier
//! productions. Types, declarations, statements, expressions and patterns
//! each add their own `impl Parser` block.

use super::cursor::TokenCursor;
use super::error::{ParseError, ParseResult};
use super::lexer::{Token, TokenKind};
use super::span::Location;
use super::token_sets::is_identifier_like;
use crate::ast::*;
use crate::config::{Config, LanguageLevel};

/// Parser for Java
pub struct Parser<'t> {
    pub(super) cursor: TokenCursor<'t>,
    pub(super) config: Config,
    source: SourceId,
    /// Cleared while parsing case labels, where `x -> ...` is a rule, not a lambda.
    pub(super) allow_lambda: bool,
}

/// Modifier keywords and annotations preceding a declaration.
#[derive(Debug, Default)]
pub(super) struct Modifiers {
    pub keywords: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    /// Start of the first modifier, if any were present.
    pub start: Option<Location>,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.annotations.is_empty()
    }
}

impl<'t> Parser<'t> {
    /// Create a parser over `tokens`, which must end with `Eof`.
    pub fn new(tokens: &'t [Token], config: Config) -> ParseResult<Self> {
        Ok(Self {
            cursor: TokenCursor::new(tokens)?,
            config,
            source: SourceId::anonymous(),
            allow_lambda: true,
        })
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    /// Parse a whole compilation unit and require the end of input.
    pub fn parse_compilation_unit(&mut self) -> ParseResult<CompilationUnit> {
        log::debug!("parsing compilation unit {}", self.source);
        let start = self.cursor.location();

        let mark = self.cursor.snapshot();
        let annotations = self.annotations()?;
        let package = if self.cursor.check(TokenKind::Package) {
            Some(self.package_declaration(annotations, start)?)
        } else {
            self.cursor.restore(mark);
            None
        };

        let mut imports = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            if !self.cursor.check(TokenKind::Import) {
                break;
            }
            imports.push(self.import_declaration()?);
        }

        let mark = self.cursor.snapshot();
        let module_start = self.cursor.location();
        let annotations = self.annotations()?;
        let mut module = None;
        let mut types = Vec::new();
        if self.is_module_ahead() {
            if let Some(package) = &package {
                return Err(ParseError::grammar(
                    "a module declaration cannot be combined with a package declaration",
                    package.span.start,
                ));
            }
            module = Some(self.module_declaration(annotations, module_start)?);
        } else {
            self.cursor.restore(mark);
            while !self.cursor.is_at_end() {
                if self.cursor.eat(TokenKind::Semicolon) {
                    continue;
                }
                types.push(self.type_declaration()?);
            }
        }
        self.expect_end()?;

        log::debug!(
            "parsed {}: {} imports, {} type declarations{}",
            self.source,
            imports.len(),
            types.len(),
            if module.is_some() { ", module" } else { "" }
        );
        Ok(CompilationUnit {
            source: self.source.clone(),
            package,
            imports,
            types,
            module,
            span: self.cursor.span_from(start),
        })
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&self) -> ParseResult<()> {
        if self.cursor.is_at_end() {
            Ok(())
        } else {
            Err(self.cursor.illegal("end of input"))
        }
    }

    fn is_module_ahead(&self) -> bool {
        match self.cursor.kind(0) {
            TokenKind::Open => self.cursor.kind(1) == TokenKind::Module,
            TokenKind::Module => is_identifier_like(self.cursor.kind(1)),
            _ => false,
        }
    }

    fn package_declaration(&mut self, annotations: Vec<Annotation>, start: Location) -> ParseResult<PackageDecl> {
        self.cursor.consume(TokenKind::Package)?;
        let name = self.qualified_name()?;
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(PackageDecl { annotations, name, span: self.cursor.span_from(start) })
    }

    fn import_declaration(&mut self) -> ParseResult<ImportDecl> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::Import)?;
        let is_static = self.cursor.eat(TokenKind::Static);
        let mut segments = vec![self.ident()?];
        let mut wildcard = false;
        while self.cursor.eat(TokenKind::Dot) {
            if self.cursor.eat(TokenKind::Star) {
                wildcard = true;
                break;
            }
            segments.push(self.ident()?);
        }
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(ImportDecl {
            is_static,
            name: QualifiedName::new(segments),
            wildcard,
            span: self.cursor.span_from(start),
        })
    }

    /// Fail with a grammar violation if `feature` needs a newer language level.
    pub(super) fn require(&self, level: LanguageLevel, feature: &str, at: Location) -> ParseResult<()> {
        if self.config.supports(level) {
            Ok(())
        } else {
            Err(ParseError::grammar(
                format!(
                    "{} are not supported at {} (use {} or later)",
                    feature, self.config.language_level, level
                ),
                at,
            ))
        }
    }

    /// Run `f` with lambda detection switched on or off, restoring it afterwards.
    pub(super) fn with_lambda<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.allow_lambda;
        self.allow_lambda = allowed;
        let result = f(self);
        self.allow_lambda = saved;
        result
    }

    // Names

    pub(super) fn ident(&mut self) -> ParseResult<Ident> {
        if is_identifier_like(self.cursor.kind(0)) {
            let token = self.cursor.advance();
            Ok(Ident::new(token.text, token.span))
        } else {
            Err(self.cursor.illegal("identifier"))
        }
    }

    pub(super) fn qualified_name(&mut self) -> ParseResult<QualifiedName> {
        let mut segments = vec![self.ident()?];
        while self.cursor.check(TokenKind::Dot) && is_identifier_like(self.cursor.kind(1)) {
            self.cursor.advance();
            segments.push(self.ident()?);
        }
        Ok(QualifiedName::new(segments))
    }

    pub(super) fn qualified_name_list(&mut self) -> ParseResult<Vec<QualifiedName>> {
        let mut names = vec![self.qualified_name()?];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(self.qualified_name()?);
        }
        Ok(names)
    }

    // Annotations

    /// Annotations up to (not including) an `@interface` keyword.
    pub(super) fn annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.cursor.check(TokenKind::At) && self.cursor.kind(1) != TokenKind::Interface {
            annotations.push(self.annotation()?);
        }
        Ok(annotations)
    }

    pub(super) fn annotation(&mut self) -> ParseResult<Annotation> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::At)?;
        let name = self.qualified_name()?;
        let mut args = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            if !self.cursor.check(TokenKind::RParen) {
                if is_identifier_like(self.cursor.kind(0)) && self.cursor.kind(1) == TokenKind::Assign {
                    loop {
                        let key = self.ident()?;
                        self.cursor.consume(TokenKind::Assign)?;
                        args.push(AnnotationArg::Named(key, self.element_value()?));
                        if !self.cursor.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                } else {
                    args.push(AnnotationArg::Value(self.element_value()?));
                }
            }
            self.cursor.consume(TokenKind::RParen)?;
        }
        Ok(Annotation { name, args, span: self.cursor.span_from(start) })
    }

    pub(super) fn element_value(&mut self) -> ParseResult<ElementValue> {
        match self.cursor.kind(0) {
            TokenKind::At => Ok(ElementValue::Annotation(Box::new(self.annotation()?))),
            TokenKind::LBrace => {
                let start = self.cursor.location();
                self.cursor.advance();
                let mut values = Vec::new();
                while !self.cursor.check(TokenKind::RBrace) {
                    values.push(self.element_value()?);
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.cursor.consume(TokenKind::RBrace)?;
                Ok(ElementValue::Array(values, self.cursor.span_from(start)))
            }
            _ => Ok(ElementValue::Expr(self.conditional_expr()?)),
        }
    }

    // Modifiers

    pub(super) fn modifiers(&mut self) -> ParseResult<Modifiers> {
        let mut modifiers = Modifiers::default();
        loop {
            let kind = self.cursor.kind(0);
            let location = self.cursor.location();
            if kind == TokenKind::At && self.cursor.kind(1) != TokenKind::Interface {
                modifiers.start.get_or_insert(location);
                modifiers.annotations.push(self.annotation()?);
                continue;
            }
            let Some(modifier) = modifier_for(kind) else {
                return Ok(modifiers);
            };
            if matches!(modifier, Modifier::Sealed | Modifier::NonSealed) {
                self.require(LanguageLevel::Java17, "sealed classes", location)?;
            }
            if modifiers.keywords.contains(&modifier) {
                return Err(ParseError::grammar(format!("repeated modifier '{}'", modifier.as_str()), location));
            }
            modifiers.start.get_or_insert(location);
            modifiers.keywords.push(modifier);
            self.cursor.advance();
        }
    }
}

fn modifier_for(kind: TokenKind) -> Option<Modifier> {
    Some(match kind {
        TokenKind::Public => Modifier::Public,
        TokenKind::Protected => Modifier::Protected,
        TokenKind::Private => Modifier::Private,
        TokenKind::Abstract => Modifier::Abstract,
        TokenKind::Static => Modifier::Static,
        TokenKind::Final => Modifier::Final,
        TokenKind::Native => Modifier::Native,
        TokenKind::Synchronized => Modifier::Synchronized,
        TokenKind::Transient => Modifier::Transient,
        TokenKind::Volatile => Modifier::Volatile,
        TokenKind::Strictfp => Modifier::Strictfp,
        TokenKind::Default => Modifier::Default,
        TokenKind::Sealed => Modifier::Sealed,
        TokenKind::NonSealed => Modifier::NonSealed,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn unit(source: &str) -> ParseResult<CompilationUnit> {
        let tokens = tokenize(source)?;
        Parser::new(&tokens, Config::default())?.parse_compilation_unit()
    }

    #[test]
    fn package_and_imports() {
        let cu = unit("package a.b; import java.util.*; import static java.lang.Math.max; class C {}")
            .expect("Failed to parse");
        assert_eq!(cu.package_name().as_deref(), Some("a.b"));
        assert_eq!(cu.imports.len(), 2);
        assert!(cu.imports[0].wildcard);
        assert!(cu.imports[1].is_static);
        assert_eq!(cu.imports[1].name.dotted(), "java.lang.Math.max");
    }

    #[test]
    fn annotated_package() {
        let cu = unit("@Deprecated package a;").expect("Failed to parse");
        assert_eq!(cu.package.unwrap().annotations.len(), 1);
    }

    #[test]
    fn annotations_before_class_stay_with_class() {
        let cu = unit("@Entity public class C {}").expect("Failed to parse");
        assert_eq!(cu.types[0].annotations.len(), 1);
        assert!(cu.types[0].has_modifier(Modifier::Public));
    }

    #[test]
    fn repeated_modifier_is_rejected() {
        let err = unit("public public class C {}").unwrap_err();
        assert!(err.is_grammar_violation());
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(unit("class C {} }").is_err());
    }
}
