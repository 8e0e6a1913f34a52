//! Types, type arguments and type parameters.
//!
//! Type arguments are parsed with committed recursion; every nesting level
//! closes itself through `split_closing_angle`, so `>>` and `>>>` close two
//! and three levels respectively.

use super::error::ParseResult;
use super::lexer::TokenKind;
use super::parser::Parser;
use super::span::Location;
use super::token_sets::is_identifier_like;
use crate::ast::*;
use crate::config::LanguageLevel;

pub(super) fn primitive_kind(kind: TokenKind) -> Option<PrimitiveKind> {
    Some(match kind {
        TokenKind::Boolean => PrimitiveKind::Boolean,
        TokenKind::Byte => PrimitiveKind::Byte,
        TokenKind::Short => PrimitiveKind::Short,
        TokenKind::Int => PrimitiveKind::Int,
        TokenKind::Long => PrimitiveKind::Long,
        TokenKind::Char => PrimitiveKind::Char,
        TokenKind::Float => PrimitiveKind::Float,
        TokenKind::Double => PrimitiveKind::Double,
        _ => return None,
    })
}

impl<'t> Parser<'t> {
    /// A full type, array dimensions included.
    pub fn parse_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.cursor.location();
        let annotations = self.annotations()?;
        self.type_with_annotations(annotations, start)
    }

    /// A type whose leading annotations have already been consumed.
    pub(super) fn type_with_annotations(
        &mut self,
        annotations: Vec<Annotation>,
        start: Location,
    ) -> ParseResult<TypeNode> {
        let kind = self.cursor.kind(0);
        let base = if let Some(primitive) = primitive_kind(kind) {
            self.cursor.advance();
            TypeNode::Primitive { annotations, kind: primitive, span: self.cursor.span_from(start) }
        } else if kind == TokenKind::Void {
            self.cursor.advance();
            return Ok(TypeNode::Void { span: self.cursor.span_from(start) });
        } else if kind == TokenKind::Var && self.is_var_type_ahead() {
            self.cursor.advance();
            TypeNode::Var { span: self.cursor.span_from(start) }
        } else if is_identifier_like(kind) {
            TypeNode::Class(self.class_type_with(annotations, start)?)
        } else {
            return Err(self.cursor.illegal("type"));
        };
        let dims = self.dims()?;
        Ok(base.with_dims(dims))
    }

    /// `var` names the inferred type when a variable name follows it.
    /// Before Java 10 it is an ordinary type name.
    fn is_var_type_ahead(&self) -> bool {
        self.config.supports(LanguageLevel::Java10) && is_identifier_like(self.cursor.kind(1))
    }

    /// A class or interface type such as `java.util.Map.Entry<K, V>`.
    pub(super) fn class_type(&mut self) -> ParseResult<ClassType> {
        let start = self.cursor.location();
        let annotations = self.annotations()?;
        self.class_type_with(annotations, start)
    }

    pub(super) fn class_type_with(&mut self, annotations: Vec<Annotation>, start: Location) -> ParseResult<ClassType> {
        let name = self.ident()?;
        let type_args = self.optional_type_arguments()?;
        let mut class = ClassType { scope: None, annotations, name, type_args, span: self.cursor.span_from(start) };
        while self.cursor.check(TokenKind::Dot)
            && (is_identifier_like(self.cursor.kind(1)) || self.cursor.kind(1) == TokenKind::At)
        {
            self.cursor.advance();
            let annotations = self.annotations()?;
            let name = self.ident()?;
            let type_args = self.optional_type_arguments()?;
            class = ClassType {
                scope: Some(Box::new(class)),
                annotations,
                name,
                type_args,
                span: self.cursor.span_from(start),
            };
        }
        Ok(class)
    }

    fn optional_type_arguments(&mut self) -> ParseResult<Option<Vec<TypeNode>>> {
        if self.cursor.check(TokenKind::Lt) {
            Ok(Some(self.type_arguments()?))
        } else {
            Ok(None)
        }
    }

    /// `<A, B>`; an empty list is the diamond `<>`.
    pub(super) fn type_arguments(&mut self) -> ParseResult<Vec<TypeNode>> {
        self.cursor.consume(TokenKind::Lt)?;
        let mut args = Vec::new();
        if !self.cursor.at_closing_angle() {
            loop {
                args.push(self.type_argument()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.split_closing_angle()?;
        Ok(args)
    }

    fn type_argument(&mut self) -> ParseResult<TypeNode> {
        let start = self.cursor.location();
        let annotations = self.annotations()?;
        if !self.cursor.eat(TokenKind::Question) {
            return self.type_with_annotations(annotations, start);
        }
        let bound = match self.cursor.kind(0) {
            TokenKind::Extends => Some(BoundKind::Extends),
            TokenKind::Super => Some(BoundKind::Super),
            _ => None,
        };
        let bound = match bound {
            Some(kind) => {
                self.cursor.advance();
                Some((kind, Box::new(self.parse_type()?)))
            }
            None => None,
        };
        Ok(TypeNode::Wildcard { annotations, bound, span: self.cursor.span_from(start) })
    }

    /// `<T, U extends Comparable<U> & Serializable>`
    pub(super) fn type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        self.cursor.consume(TokenKind::Lt)?;
        let mut params = Vec::new();
        loop {
            let start = self.cursor.location();
            let annotations = self.annotations()?;
            let name = self.ident()?;
            let mut bounds = Vec::new();
            if self.cursor.eat(TokenKind::Extends) {
                bounds.push(self.parse_type()?);
                while self.cursor.eat(TokenKind::Amp) {
                    bounds.push(self.parse_type()?);
                }
            }
            params.push(TypeParam { annotations, name, bounds, span: self.cursor.span_from(start) });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.split_closing_angle()?;
        Ok(params)
    }

    pub(super) fn optional_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        if self.cursor.check(TokenKind::Lt) {
            self.type_params()
        } else {
            Ok(Vec::new())
        }
    }

    /// Zero or more `[]` pairs, each with optional type annotations.
    pub(super) fn dims(&mut self) -> ParseResult<Vec<ArrayDim>> {
        let mut dims = Vec::new();
        loop {
            let mark = self.cursor.snapshot();
            let start = self.cursor.location();
            let annotations = self.annotations()?;
            if !self.cursor.matches(&[TokenKind::LBracket, TokenKind::RBracket]) {
                self.cursor.restore(mark);
                return Ok(dims);
            }
            self.cursor.consume_seq(&[TokenKind::LBracket, TokenKind::RBracket])?;
            dims.push(ArrayDim { annotations, span: self.cursor.span_from(start) });
        }
    }

    /// Comma separated types, as in `implements`, `throws` and `permits`.
    pub(super) fn type_list(&mut self) -> ParseResult<Vec<TypeNode>> {
        let mut types = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }
}
