//! Type declarations, members and module declarations.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenKind;
use super::parser::{Modifiers, Parser};
use super::scan::{classify_declaration, DeclarationKind};
use super::span::Location;
use super::token_sets::is_identifier_like;
use crate::ast::*;
use crate::config::LanguageLevel;

impl<'t> Parser<'t> {
    /// A class, interface, enum, record or annotation type, modifiers included.
    pub(super) fn type_declaration(&mut self) -> ParseResult<TypeDecl> {
        let start = self.cursor.location();
        let modifiers = self.modifiers()?;
        self.type_declaration_rest(modifiers, start)
    }

    fn type_declaration_rest(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<TypeDecl> {
        let keyword_at = self.cursor.location();
        let kind = match self.cursor.kind(0) {
            TokenKind::Class => TypeDeclKind::Class,
            TokenKind::Interface => TypeDeclKind::Interface,
            TokenKind::Enum => TypeDeclKind::Enum,
            TokenKind::At if self.cursor.kind(1) == TokenKind::Interface => {
                self.cursor.advance();
                TypeDeclKind::Annotation
            }
            TokenKind::Record if is_identifier_like(self.cursor.kind(1)) => {
                self.require(LanguageLevel::Java16, "records", keyword_at)?;
                TypeDeclKind::Record
            }
            _ => return Err(self.cursor.illegal("class, interface, enum or record declaration")),
        };
        self.cursor.advance();
        let name = self.ident()?;
        log::debug!("parsing {} {} at {}", kind.keyword(), name.as_str(), keyword_at);

        let type_params = if self.cursor.check(TokenKind::Lt) {
            if matches!(kind, TypeDeclKind::Enum | TypeDeclKind::Annotation) {
                return Err(self.not_allowed(kind, "type parameters"));
            }
            self.type_params()?
        } else {
            Vec::new()
        };

        let record_components = if self.cursor.check(TokenKind::LParen) {
            if kind != TypeDeclKind::Record {
                return Err(self.not_allowed(kind, "a component list"));
            }
            self.record_header()?
        } else if kind == TypeDeclKind::Record {
            return Err(ParseError::grammar(
                "a record declaration requires a component header",
                self.cursor.location(),
            ));
        } else {
            Vec::new()
        };

        let extends = if self.cursor.check(TokenKind::Extends) {
            let err = self.not_allowed(kind, "an extends clause");
            self.cursor.advance();
            match kind {
                TypeDeclKind::Class | TypeDeclKind::Record => vec![self.parse_type()?],
                TypeDeclKind::Interface => self.type_list()?,
                _ => return Err(err),
            }
        } else {
            Vec::new()
        };

        let implements = if self.cursor.check(TokenKind::Implements) {
            if matches!(kind, TypeDeclKind::Interface | TypeDeclKind::Annotation) {
                return Err(self.not_allowed(kind, "an implements clause"));
            }
            self.cursor.advance();
            self.type_list()?
        } else {
            Vec::new()
        };

        let permits = if self.cursor.check(TokenKind::Permits) {
            self.require(LanguageLevel::Java17, "sealed classes", self.cursor.location())?;
            if !matches!(kind, TypeDeclKind::Class | TypeDeclKind::Interface) {
                return Err(self.not_allowed(kind, "a permits clause"));
            }
            self.cursor.advance();
            self.type_list()?
        } else {
            Vec::new()
        };

        let (enum_constants, members) = self.class_body(kind, &name)?;
        Ok(TypeDecl {
            kind,
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            name,
            type_params,
            record_components,
            extends,
            implements,
            permits,
            enum_constants,
            members,
            span: self.cursor.span_from(start),
        })
    }

    fn not_allowed(&self, kind: TypeDeclKind, what: &str) -> ParseError {
        let article = if kind == TypeDeclKind::Interface || kind == TypeDeclKind::Enum { "an" } else { "a" };
        let noun = match kind {
            TypeDeclKind::Annotation => "annotation type",
            other => other.keyword(),
        };
        ParseError::grammar(format!("{} {} declaration cannot have {}", article, noun, what), self.cursor.location())
    }

    fn record_header(&mut self) -> ParseResult<Vec<Param>> {
        let components = self.formal_params()?;
        for component in &components {
            if let Some(modifier) = component.modifiers.first() {
                return Err(ParseError::grammar(
                    format!("record components cannot have modifier '{}'", modifier.as_str()),
                    component.span.start,
                ));
            }
        }
        Ok(components)
    }

    /// `{ [enum constants ;] members }`
    fn class_body(&mut self, kind: TypeDeclKind, owner: &Ident) -> ParseResult<(Vec<EnumConstant>, Vec<Member>)> {
        self.cursor.consume(TokenKind::LBrace)?;
        let mut constants = Vec::new();
        if kind == TypeDeclKind::Enum {
            while !self.cursor.check_any(&[TokenKind::Semicolon, TokenKind::RBrace]) {
                constants.push(self.enum_constant()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            if !self.cursor.check(TokenKind::RBrace) {
                self.cursor.consume(TokenKind::Semicolon)?;
            }
        }
        let members = self.members(kind, owner)?;
        self.cursor.consume(TokenKind::RBrace)?;
        Ok((constants, members))
    }

    /// Body of an anonymous class or enum constant.
    pub(super) fn anonymous_class_body(&mut self) -> ParseResult<Vec<Member>> {
        self.cursor.consume(TokenKind::LBrace)?;
        let members = self.with_lambda(true, |p| p.members(TypeDeclKind::Class, &Ident::EMPTY))?;
        self.cursor.consume(TokenKind::RBrace)?;
        Ok(members)
    }

    fn members(&mut self, kind: TypeDeclKind, owner: &Ident) -> ParseResult<Vec<Member>> {
        let mut members = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            if let Some(member) = self.member(kind, owner)? {
                members.push(member);
            }
        }
        Ok(members)
    }

    fn enum_constant(&mut self) -> ParseResult<EnumConstant> {
        let start = self.cursor.location();
        let annotations = self.annotations()?;
        let name = self.ident()?;
        let args = if self.cursor.check(TokenKind::LParen) { Some(self.arguments()?) } else { None };
        let body = if self.cursor.check(TokenKind::LBrace) { Some(self.anonymous_class_body()?) } else { None };
        Ok(EnumConstant { annotations, name, args, body, span: self.cursor.span_from(start) })
    }

    /// One member; `None` for a stray `;`.
    fn member(&mut self, kind: TypeDeclKind, owner: &Ident) -> ParseResult<Option<Member>> {
        let start = self.cursor.location();
        if self.cursor.eat(TokenKind::Semicolon) {
            return Ok(None);
        }
        if self.cursor.check(TokenKind::LBrace) || self.cursor.matches(&[TokenKind::Static, TokenKind::LBrace]) {
            let is_static = self.cursor.eat(TokenKind::Static);
            if kind == TypeDeclKind::Interface || kind == TypeDeclKind::Annotation {
                return Err(ParseError::grammar("interfaces cannot have initializers", start));
            }
            let body = self.block()?;
            return Ok(Some(Member::Initializer { is_static, body, span: self.cursor.span_from(start) }));
        }

        let classification = classify_declaration(&self.cursor);
        let modifiers = self.modifiers()?;
        let member = match classification {
            DeclarationKind::Type(_) => Member::Type(Box::new(self.type_declaration_rest(modifiers, start)?)),
            DeclarationKind::Method if kind == TypeDeclKind::Annotation => {
                Member::AnnotationElement(self.annotation_element(modifiers, start)?)
            }
            DeclarationKind::Method => Member::Method(self.method(modifiers, start)?),
            DeclarationKind::Constructor => {
                if kind == TypeDeclKind::Interface || kind == TypeDeclKind::Annotation {
                    return Err(ParseError::grammar("interfaces cannot have constructors", start));
                }
                Member::Constructor(self.constructor(modifiers, owner, start)?)
            }
            DeclarationKind::Variable => Member::Field(self.field(modifiers, start)?),
            DeclarationKind::None if kind == TypeDeclKind::Record && self.is_compact_constructor_ahead(owner) => {
                Member::Constructor(self.compact_constructor(modifiers, start)?)
            }
            DeclarationKind::None => return Err(self.cursor.illegal("member declaration")),
        };
        Ok(Some(member))
    }

    fn method(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<MethodDecl> {
        let type_params = self.optional_type_params()?;
        let return_type = self.parse_type()?;
        self.reject_var(&return_type)?;
        let name = self.ident()?;
        let params = self.formal_params()?;
        let dims = self.dims()?;
        let throws = self.throws_clause()?;
        let body = if self.cursor.check(TokenKind::LBrace) {
            Some(self.block()?)
        } else {
            self.cursor.consume(TokenKind::Semicolon)?;
            None
        };
        Ok(MethodDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            type_params,
            return_type,
            name,
            params,
            dims,
            throws,
            body,
            span: self.cursor.span_from(start),
        })
    }

    fn constructor(&mut self, modifiers: Modifiers, owner: &Ident, start: Location) -> ParseResult<ConstructorDecl> {
        let type_params = self.optional_type_params()?;
        let name_at = self.cursor.location();
        let name = self.ident()?;
        if name.as_str() != owner.as_str() {
            return Err(ParseError::grammar("invalid method declaration; return type required", name_at));
        }
        let params = self.formal_params()?;
        let throws = self.throws_clause()?;
        let body = self.block()?;
        Ok(ConstructorDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            type_params,
            name,
            params,
            throws,
            body,
            compact: false,
            span: self.cursor.span_from(start),
        })
    }

    fn is_compact_constructor_ahead(&self, owner: &Ident) -> bool {
        let mut ahead = self.cursor;
        if !super::scan::skip_modifiers(&mut ahead) {
            return false;
        }
        let token = ahead.peek(0);
        is_identifier_like(token.kind) && token.text == owner.as_str() && ahead.kind(1) == TokenKind::LBrace
    }

    fn compact_constructor(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<ConstructorDecl> {
        let name = self.ident()?;
        let body = self.block()?;
        Ok(ConstructorDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            type_params: Vec::new(),
            name,
            params: Vec::new(),
            throws: Vec::new(),
            body,
            compact: true,
            span: self.cursor.span_from(start),
        })
    }

    fn field(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<FieldDecl> {
        let ty = self.parse_type()?;
        self.reject_var(&ty)?;
        let mut declarators = vec![{
            let name = self.ident()?;
            self.declarator_rest(name)?
        }];
        while self.cursor.eat(TokenKind::Comma) {
            let name = self.ident()?;
            declarators.push(self.declarator_rest(name)?);
        }
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(FieldDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty,
            declarators,
            span: self.cursor.span_from(start),
        })
    }

    /// `var` is only a type for local variables and lambda parameters.
    fn reject_var(&self, ty: &TypeNode) -> ParseResult<()> {
        match ty {
            TypeNode::Var { span } => Err(ParseError::grammar("'var' is not allowed here", span.start)),
            _ => Ok(()),
        }
    }

    fn annotation_element(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<AnnotationElement> {
        let ty = self.parse_type()?;
        let name = self.ident()?;
        self.cursor.consume_seq(&[TokenKind::LParen, TokenKind::RParen])?;
        let dims = self.dims()?;
        let default = if self.cursor.eat(TokenKind::Default) { Some(self.element_value()?) } else { None };
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(AnnotationElement {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty,
            name,
            dims,
            default,
            span: self.cursor.span_from(start),
        })
    }

    fn throws_clause(&mut self) -> ParseResult<Vec<TypeNode>> {
        if self.cursor.eat(TokenKind::Throws) {
            self.type_list()
        } else {
            Ok(Vec::new())
        }
    }

    /// `( [param, ...] )`; only the last parameter may be variable arity.
    pub(super) fn formal_params(&mut self) -> ParseResult<Vec<Param>> {
        self.cursor.consume(TokenKind::LParen)?;
        let mut params: Vec<Param> = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                if let Some(previous) = params.last() {
                    if previous.varargs {
                        return Err(ParseError::grammar(
                            "a variable arity parameter must be the last parameter",
                            previous.span.start,
                        ));
                    }
                }
                params.push(self.formal_param()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.consume(TokenKind::RParen)?;
        Ok(params)
    }

    /// `[final] [@A] Type [...] name []`, or a receiver `Type [Outer.]this`.
    pub(super) fn formal_param(&mut self) -> ParseResult<Param> {
        let start = self.cursor.location();
        let modifiers = self.modifiers()?;
        if let Some(modifier) = modifiers.keywords.iter().find(|m| **m != Modifier::Final) {
            return Err(ParseError::grammar(
                format!("modifier '{}' is not allowed on a parameter", modifier.as_str()),
                modifiers.start.unwrap_or(start),
            ));
        }
        let ty = self.parse_type()?;

        let mark = self.cursor.snapshot();
        self.annotations()?;
        let varargs = self.cursor.eat(TokenKind::Ellipsis);
        if !varargs {
            self.cursor.restore(mark);
        }

        let name = if self.cursor.check(TokenKind::This) {
            let token = self.cursor.advance();
            Ident::new(token.text, token.span)
        } else {
            let name = self.ident()?;
            if self.cursor.matches(&[TokenKind::Dot, TokenKind::This]) {
                self.cursor.consume_seq(&[TokenKind::Dot, TokenKind::This])?;
                let span = name.span.merge(self.cursor.span_from(name.span.start));
                Ident::new(format!("{}.this", name.as_str()), span)
            } else {
                name
            }
        };
        let dims = self.dims()?;
        Ok(Param {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty: Some(ty),
            varargs,
            name,
            dims,
            span: self.cursor.span_from(start),
        })
    }

    // Modules

    pub(super) fn module_declaration(&mut self, annotations: Vec<Annotation>, start: Location) -> ParseResult<ModuleDecl> {
        self.require(LanguageLevel::Java9, "module declarations", self.cursor.location())?;
        let open = self.cursor.eat(TokenKind::Open);
        self.cursor.consume(TokenKind::Module)?;
        let name = self.qualified_name()?;
        log::debug!("parsing module {}", name.dotted());
        self.cursor.consume(TokenKind::LBrace)?;
        let mut directives = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            directives.push(self.directive()?);
        }
        self.cursor.consume(TokenKind::RBrace)?;
        Ok(ModuleDecl { annotations, open, name, directives, span: self.cursor.span_from(start) })
    }

    fn directive(&mut self) -> ParseResult<Directive> {
        let start = self.cursor.location();
        let keyword = self.cursor.kind(0);
        let directive = match keyword {
            TokenKind::Requires => {
                self.cursor.advance();
                let mut is_static = false;
                let mut is_transitive = false;
                loop {
                    if self.cursor.check(TokenKind::Static) && !is_static {
                        is_static = true;
                    } else if self.cursor.check(TokenKind::Transitive)
                        && !is_transitive
                        && !matches!(self.cursor.kind(1), TokenKind::Semicolon | TokenKind::Dot)
                    {
                        is_transitive = true;
                    } else {
                        break;
                    }
                    self.cursor.advance();
                }
                let module = self.qualified_name()?;
                self.cursor.consume(TokenKind::Semicolon)?;
                Directive::Requires { is_static, is_transitive, module, span: self.cursor.span_from(start) }
            }
            TokenKind::Exports | TokenKind::Opens => {
                self.cursor.advance();
                let package = self.qualified_name()?;
                let targets = if self.cursor.eat(TokenKind::To) { self.qualified_name_list()? } else { Vec::new() };
                self.cursor.consume(TokenKind::Semicolon)?;
                let span = self.cursor.span_from(start);
                if keyword == TokenKind::Exports {
                    Directive::Exports { package, targets, span }
                } else {
                    Directive::Opens { package, targets, span }
                }
            }
            TokenKind::Uses => {
                self.cursor.advance();
                let service = self.qualified_name()?;
                self.cursor.consume(TokenKind::Semicolon)?;
                Directive::Uses { service, span: self.cursor.span_from(start) }
            }
            TokenKind::Provides => {
                self.cursor.advance();
                let service = self.qualified_name()?;
                self.cursor.consume(TokenKind::With)?;
                let implementations = self.qualified_name_list()?;
                self.cursor.consume(TokenKind::Semicolon)?;
                Directive::Provides { service, implementations, span: self.cursor.span_from(start) }
            }
            _ => return Err(self.cursor.illegal("module directive")),
        };
        Ok(directive)
    }
}
