//! Expressions.
//!
//! Assignment and the conditional operator are parsed by hand; binary
//! operators go through a precedence chain where each level owns its
//! operator tokens and defers to the next, tighter-binding level. Every
//! binary level is left-associative.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenKind;
use super::parser::Parser;
use super::scan::{is_cast_ahead, is_generic_method_ref_ahead, is_lambda_ahead, is_pattern_ahead};
use super::span::Location;
use super::token_sets::{is_identifier_like, is_primitive};
use crate::ast::*;
use crate::config::LanguageLevel;

/// Binary operator levels, loosest first.
const BINARY_LEVELS: &[&[(TokenKind, BinaryOp)]] = &[
    &[(TokenKind::PipePipe, BinaryOp::Or)],
    &[(TokenKind::AndAnd, BinaryOp::And)],
    &[(TokenKind::Pipe, BinaryOp::BitOr)],
    &[(TokenKind::Caret, BinaryOp::BitXor)],
    &[(TokenKind::Amp, BinaryOp::BitAnd)],
    &[(TokenKind::Eq, BinaryOp::Eq), (TokenKind::Ne, BinaryOp::Ne)],
    &[
        (TokenKind::Lt, BinaryOp::Lt),
        (TokenKind::Gt, BinaryOp::Gt),
        (TokenKind::Le, BinaryOp::Le),
        (TokenKind::Ge, BinaryOp::Ge),
    ],
    &[
        (TokenKind::LShift, BinaryOp::LShift),
        (TokenKind::RShift, BinaryOp::RShift),
        (TokenKind::URShift, BinaryOp::URShift),
    ],
    &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
    &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div), (TokenKind::Percent, BinaryOp::Mod)],
];

/// The level that also accepts `instanceof`.
const RELATIONAL_LEVEL: usize = 6;

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::AddAssign => AssignOp::AddAssign,
        TokenKind::SubAssign => AssignOp::SubAssign,
        TokenKind::MulAssign => AssignOp::MulAssign,
        TokenKind::DivAssign => AssignOp::DivAssign,
        TokenKind::ModAssign => AssignOp::ModAssign,
        TokenKind::AndAssign => AssignOp::AndAssign,
        TokenKind::OrAssign => AssignOp::OrAssign,
        TokenKind::XorAssign => AssignOp::XorAssign,
        TokenKind::LShiftAssign => AssignOp::LShiftAssign,
        TokenKind::RShiftAssign => AssignOp::RShiftAssign,
        TokenKind::URShiftAssign => AssignOp::URShiftAssign,
        _ => return None,
    })
}

fn literal_kind(kind: TokenKind) -> Option<LiteralKind> {
    Some(match kind {
        TokenKind::IntLiteral => LiteralKind::Int,
        TokenKind::LongLiteral => LiteralKind::Long,
        TokenKind::FloatLiteral => LiteralKind::Float,
        TokenKind::DoubleLiteral => LiteralKind::Double,
        TokenKind::CharLiteral => LiteralKind::Char,
        TokenKind::StringLiteral => LiteralKind::String,
        TokenKind::TextBlock => LiteralKind::TextBlock,
        TokenKind::True | TokenKind::False => LiteralKind::Boolean,
        TokenKind::Null => LiteralKind::Null,
        _ => return None,
    })
}

/// The identifiers of a `a.b.c` name chain, or `None` for anything else.
fn name_chain(expr: &Expr) -> Option<Vec<Ident>> {
    match expr {
        Expr::Name(ident) => Some(vec![ident.clone()]),
        Expr::FieldAccess { target, name, .. } => {
            let mut chain = name_chain(target)?;
            chain.push(name.clone());
            Some(chain)
        }
        _ => None,
    }
}

/// Nested class type for a dotted name, outermost segment first.
fn class_type_of(segments: Vec<Ident>) -> Option<ClassType> {
    let mut segments = segments.into_iter();
    let mut class = ClassType::simple(segments.next()?);
    for name in segments {
        let span = class.span.merge(name.span);
        class = ClassType { scope: Some(Box::new(class)), annotations: Vec::new(), name, type_args: None, span };
    }
    Some(class)
}

/// Expressions allowed as statements: assignments, increments and
/// decrements, method calls and instance creation.
pub(super) fn is_statement_expression(expr: &Expr) -> bool {
    match expr {
        Expr::Assign { .. } | Expr::MethodCall { .. } | Expr::New { .. } => true,
        Expr::Unary { op, .. } => {
            matches!(op, UnaryOp::PreInc | UnaryOp::PreDec | UnaryOp::PostInc | UnaryOp::PostDec)
        }
        _ => false,
    }
}

impl<'t> Parser<'t> {
    /// A full expression, lambdas and assignments included.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.expression()
    }

    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        if self.allow_lambda && is_lambda_ahead(&self.cursor) {
            return self.lambda();
        }
        let start = self.cursor.location();
        let target = self.conditional_expr()?;
        let Some(op) = assign_op(self.cursor.kind(0)) else {
            return Ok(target);
        };
        if !target.is_assignable() {
            return Err(ParseError::grammar(
                format!("invalid target for '{}'; expected a variable, field or array element", op.as_str()),
                start,
            ));
        }
        self.cursor.advance();
        let value = self.expression()?;
        Ok(Expr::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
            span: self.cursor.span_from(start),
        })
    }

    /// `cond ? a : b`; right-associative, without assignment at the top.
    pub(super) fn conditional_expr(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        let condition = self.binary(0)?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(condition);
        }
        let then_expr = self.with_lambda(true, |p| p.expression())?;
        self.cursor.consume(TokenKind::Colon)?;
        let else_expr = if self.allow_lambda && is_lambda_ahead(&self.cursor) {
            self.lambda()?
        } else {
            self.conditional_expr()?
        };
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            span: self.cursor.span_from(start),
        })
    }

    fn binary(&mut self, level: usize) -> ParseResult<Expr> {
        let Some(operators) = BINARY_LEVELS.get(level) else {
            return self.unary();
        };
        let start = self.cursor.location();
        let mut left = self.binary(level + 1)?;
        loop {
            let kind = self.cursor.kind(0);
            if level == RELATIONAL_LEVEL && kind == TokenKind::InstanceOf {
                left = self.instance_of(left, start)?;
                continue;
            }
            let Some(&(_, op)) = operators.iter().find(|(token, _)| *token == kind) else {
                return Ok(left);
            };
            self.cursor.advance();
            let right = self.binary(level + 1)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span: self.cursor.span_from(start),
            };
        }
    }

    fn instance_of(&mut self, expr: Expr, start: Location) -> ParseResult<Expr> {
        let at = self.cursor.location();
        self.cursor.consume(TokenKind::InstanceOf)?;
        let target = if is_pattern_ahead(&self.cursor) {
            self.require(LanguageLevel::Java16, "patterns in instanceof", at)?;
            InstanceOfTarget::Pattern(self.pattern()?)
        } else {
            InstanceOfTarget::Type(self.parse_type()?)
        };
        Ok(Expr::InstanceOf { expr: Box::new(expr), target: Box::new(target), span: self.cursor.span_from(start) })
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        let prefix = match self.cursor.kind(0) {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Inc => Some(UnaryOp::PreInc),
            TokenKind::Dec => Some(UnaryOp::PreDec),
            _ => None,
        };
        if let Some(op) = prefix {
            self.cursor.advance();
            let operand = self.unary()?;
            return Ok(Expr::Unary { op, operand: Box::new(operand), span: self.cursor.span_from(start) });
        }
        if is_cast_ahead(&self.cursor) {
            return self.cast();
        }
        let mut expr = self.primary()?;
        loop {
            let op = match self.cursor.kind(0) {
                TokenKind::Inc => UnaryOp::PostInc,
                TokenKind::Dec => UnaryOp::PostDec,
                _ => return Ok(expr),
            };
            self.cursor.advance();
            expr = Expr::Unary { op, operand: Box::new(expr), span: self.cursor.span_from(start) };
        }
    }

    fn cast(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::LParen)?;
        let type_start = self.cursor.location();
        let first = self.parse_type()?;
        let ty = if self.cursor.check(TokenKind::Amp) {
            let mut types = vec![first];
            while self.cursor.eat(TokenKind::Amp) {
                types.push(self.parse_type()?);
            }
            TypeNode::Intersection { types, span: self.cursor.span_from(type_start) }
        } else {
            first
        };
        self.cursor.consume(TokenKind::RParen)?;
        let operand = if self.allow_lambda && is_lambda_ahead(&self.cursor) { self.lambda()? } else { self.unary()? };
        Ok(Expr::Cast { ty, expr: Box::new(operand), span: self.cursor.span_from(start) })
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        let kind = self.cursor.kind(0);
        let expr = match kind {
            _ if literal_kind(kind).is_some() => self.literal()?,
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.with_lambda(true, |p| p.expression())?;
                self.cursor.consume(TokenKind::RParen)?;
                Expr::Parenthesized { expr: Box::new(inner), span: self.cursor.span_from(start) }
            }
            TokenKind::This => {
                self.cursor.advance();
                Expr::This { qualifier: QualifiedName::EMPTY, span: self.cursor.span_from(start) }
            }
            TokenKind::Super => {
                self.cursor.advance();
                if !self.cursor.check_any(&[TokenKind::Dot, TokenKind::DoubleColon]) {
                    return Err(self.cursor.illegal("'.' or '::' after 'super'"));
                }
                Expr::Super { qualifier: QualifiedName::EMPTY, span: self.cursor.span_from(start) }
            }
            TokenKind::New => self.creation(None, start)?,
            TokenKind::Switch => {
                self.require(LanguageLevel::Java14, "switch expressions", start)?;
                Expr::Switch(Box::new(self.switch_block(true)?))
            }
            TokenKind::Void => self.type_operand()?,
            _ if is_primitive(kind) => self.type_operand()?,
            _ if is_identifier_like(kind) => {
                if is_generic_method_ref_ahead(&self.cursor) {
                    let ty = self.parse_type()?;
                    self.method_ref(MethodRefTarget::Type(ty), start)?
                } else if self.cursor.kind(1) == TokenKind::LParen {
                    let name = self.ident()?;
                    let args = self.arguments()?;
                    Expr::MethodCall { target: None, type_args: Vec::new(), name, args, span: self.cursor.span_from(start) }
                } else {
                    Expr::Name(self.ident()?)
                }
            }
            _ => return Err(self.cursor.illegal("expression")),
        };
        self.selectors(expr, start)
    }

    fn literal(&mut self) -> ParseResult<Expr> {
        let token = self.cursor.peek(0);
        let Some(kind) = literal_kind(token.kind) else {
            return Err(self.cursor.illegal("literal"));
        };
        if kind == LiteralKind::TextBlock {
            self.require(LanguageLevel::Java15, "text blocks", token.location())?;
        }
        self.cursor.advance();
        Ok(Expr::Literal(Literal { kind, text: token.text.to_string(), span: token.span }))
    }

    /// `int.class`, `void.class`, `int[].class` or `int[]::new`.
    fn type_operand(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        let ty = self.parse_type()?;
        if self.cursor.check(TokenKind::DoubleColon) {
            return self.method_ref(MethodRefTarget::Type(ty), start);
        }
        self.cursor.consume_seq(&[TokenKind::Dot, TokenKind::Class])?;
        Ok(Expr::ClassLiteral { ty, span: self.cursor.span_from(start) })
    }

    /// Member accesses, calls, indexing and method references after a primary.
    fn selectors(&mut self, mut expr: Expr, start: Location) -> ParseResult<Expr> {
        loop {
            expr = match self.cursor.kind(0) {
                TokenKind::Dot => {
                    self.cursor.advance();
                    self.member_selector(expr, start)?
                }
                TokenKind::LBracket if self.cursor.kind(1) == TokenKind::RBracket => self.array_type_operand(expr, start)?,
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.with_lambda(true, |p| p.expression())?;
                    self.cursor.consume(TokenKind::RBracket)?;
                    Expr::ArrayAccess { array: Box::new(expr), index: Box::new(index), span: self.cursor.span_from(start) }
                }
                TokenKind::DoubleColon => self.method_ref(MethodRefTarget::Expr(Box::new(expr)), start)?,
                _ => return Ok(expr),
            };
        }
    }

    /// Whatever follows a `.` in a selector chain.
    fn member_selector(&mut self, expr: Expr, start: Location) -> ParseResult<Expr> {
        let at = self.cursor.location();
        match self.cursor.kind(0) {
            TokenKind::Lt => {
                let type_args = self.type_arguments()?;
                let name = self.ident()?;
                let args = self.arguments()?;
                Ok(Expr::MethodCall { target: Some(Box::new(expr)), type_args, name, args, span: self.cursor.span_from(start) })
            }
            TokenKind::New => self.creation(Some(expr), start),
            TokenKind::This | TokenKind::Super => {
                let is_this = self.cursor.check(TokenKind::This);
                let Some(segments) = name_chain(&expr) else {
                    return Err(ParseError::grammar("a qualified 'this' or 'super' needs a type name", at));
                };
                self.cursor.advance();
                let qualifier = QualifiedName::new(segments);
                let span = self.cursor.span_from(start);
                if is_this {
                    Ok(Expr::This { qualifier, span })
                } else {
                    if !self.cursor.check_any(&[TokenKind::Dot, TokenKind::DoubleColon]) {
                        return Err(self.cursor.illegal("'.' or '::' after 'super'"));
                    }
                    Ok(Expr::Super { qualifier, span })
                }
            }
            TokenKind::Class => {
                let Some(class) = name_chain(&expr).and_then(class_type_of) else {
                    return Err(ParseError::grammar("'.class' needs a type name", at));
                };
                self.cursor.advance();
                Ok(Expr::ClassLiteral { ty: TypeNode::Class(class), span: self.cursor.span_from(start) })
            }
            kind if is_identifier_like(kind) => {
                let name = self.ident()?;
                if self.cursor.check(TokenKind::LParen) {
                    let args = self.arguments()?;
                    Ok(Expr::MethodCall {
                        target: Some(Box::new(expr)),
                        type_args: Vec::new(),
                        name,
                        args,
                        span: self.cursor.span_from(start),
                    })
                } else {
                    Ok(Expr::FieldAccess { target: Box::new(expr), name, span: self.cursor.span_from(start) })
                }
            }
            _ => Err(self.cursor.illegal("identifier")),
        }
    }

    /// `Name[]...` followed by `.class` or `::`.
    fn array_type_operand(&mut self, expr: Expr, start: Location) -> ParseResult<Expr> {
        let at = self.cursor.location();
        let Some(class) = name_chain(&expr).and_then(class_type_of) else {
            return Err(ParseError::grammar("array type expected before '[]'", at));
        };
        let dims = self.dims()?;
        let ty = TypeNode::Class(class).with_dims(dims);
        if self.cursor.check(TokenKind::DoubleColon) {
            return self.method_ref(MethodRefTarget::Type(ty), start);
        }
        self.cursor.consume_seq(&[TokenKind::Dot, TokenKind::Class])?;
        Ok(Expr::ClassLiteral { ty, span: self.cursor.span_from(start) })
    }

    fn method_ref(&mut self, target: MethodRefTarget, start: Location) -> ParseResult<Expr> {
        let at = self.cursor.location();
        self.require(LanguageLevel::Java8, "method references", at)?;
        self.cursor.consume(TokenKind::DoubleColon)?;
        let type_args = if self.cursor.check(TokenKind::Lt) { self.type_arguments()? } else { Vec::new() };
        let name = if self.cursor.check(TokenKind::New) {
            MethodRefName::New(self.cursor.advance().span)
        } else {
            MethodRefName::Ident(self.ident()?)
        };
        Ok(Expr::MethodRef { target, type_args, name, span: self.cursor.span_from(start) })
    }

    /// `( args )`
    pub(super) fn arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.cursor.consume(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                args.push(self.with_lambda(true, |p| p.expression())?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.consume(TokenKind::RParen)?;
        Ok(args)
    }

    /// Instance or array creation; `start` is where the whole expression begins.
    fn creation(&mut self, outer: Option<Expr>, start: Location) -> ParseResult<Expr> {
        let new_at = self.cursor.location();
        self.cursor.consume(TokenKind::New)?;
        let type_args = if self.cursor.check(TokenKind::Lt) { self.type_arguments()? } else { Vec::new() };
        let type_start = self.cursor.location();
        let annotations = self.annotations()?;

        let element = if is_primitive(self.cursor.kind(0)) {
            let kind = self.cursor.kind(0);
            let token = self.cursor.advance();
            let Some(kind) = super::types::primitive_kind(kind) else {
                return Err(ParseError::fatal("primitive token without a primitive kind", token.location()));
            };
            TypeNode::Primitive { annotations, kind, span: self.cursor.span_from(type_start) }
        } else {
            let ty = self.class_type_with(annotations, type_start)?;
            if !self.is_array_dim_ahead() {
                let args = self.arguments()?;
                let body = if self.cursor.check(TokenKind::LBrace) {
                    Some(self.anonymous_class_body()?)
                } else {
                    None
                };
                return Ok(Expr::New {
                    outer: outer.map(Box::new),
                    type_args,
                    ty,
                    args,
                    body,
                    span: self.cursor.span_from(start),
                });
            }
            TypeNode::Class(ty)
        };

        if outer.is_some() {
            return Err(ParseError::grammar("an array creation expression cannot be qualified", new_at));
        }
        if !type_args.is_empty() {
            return Err(ParseError::grammar("an array creation expression cannot have type arguments", new_at));
        }
        self.array_creation(element, start)
    }

    fn is_array_dim_ahead(&self) -> bool {
        let mut ahead = self.cursor;
        super::scan::skip_annotations(&mut ahead) && ahead.check(TokenKind::LBracket)
    }

    fn array_creation(&mut self, element: TypeNode, start: Location) -> ParseResult<Expr> {
        let mut dim_exprs = Vec::new();
        loop {
            let mark = self.cursor.snapshot();
            self.annotations()?;
            if self.cursor.check(TokenKind::LBracket) && self.cursor.kind(1) != TokenKind::RBracket {
                self.cursor.advance();
                dim_exprs.push(self.with_lambda(true, |p| p.expression())?);
                self.cursor.consume(TokenKind::RBracket)?;
            } else {
                self.cursor.restore(mark);
                break;
            }
        }
        let extra_dims = self.dims()?;
        let init = if self.cursor.check(TokenKind::LBrace) {
            if !dim_exprs.is_empty() {
                return Err(ParseError::grammar(
                    "an array creation expression cannot have both dimension expressions and an initializer",
                    self.cursor.location(),
                ));
            }
            Some(Box::new(self.array_initializer()?))
        } else {
            None
        };
        if dim_exprs.is_empty() && init.is_none() {
            return Err(self.cursor.illegal("array dimension or initializer"));
        }
        Ok(Expr::NewArray { element, dim_exprs, extra_dims, init, span: self.cursor.span_from(start) })
    }

    /// `{ a, {b, c}, }`
    pub(super) fn array_initializer(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::LBrace)?;
        let mut elements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            elements.push(self.variable_initializer()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.consume(TokenKind::RBrace)?;
        Ok(Expr::ArrayInit { elements, span: self.cursor.span_from(start) })
    }

    pub(super) fn variable_initializer(&mut self) -> ParseResult<Expr> {
        if self.cursor.check(TokenKind::LBrace) {
            self.array_initializer()
        } else {
            self.with_lambda(true, |p| p.expression())
        }
    }

    fn lambda(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.location();
        self.require(LanguageLevel::Java8, "lambda expressions", start)?;
        let params = if is_identifier_like(self.cursor.kind(0)) {
            let name = self.ident()?;
            vec![inferred_param(name)]
        } else {
            self.cursor.consume(TokenKind::LParen)?;
            let params = if self.cursor.check(TokenKind::RParen) {
                Vec::new()
            } else if is_identifier_like(self.cursor.kind(0))
                && matches!(self.cursor.kind(1), TokenKind::Comma | TokenKind::RParen)
            {
                let mut params = vec![inferred_param(self.ident()?)];
                while self.cursor.eat(TokenKind::Comma) {
                    params.push(inferred_param(self.ident()?));
                }
                params
            } else {
                let mut params = vec![self.formal_param()?];
                while self.cursor.eat(TokenKind::Comma) {
                    params.push(self.formal_param()?);
                }
                params
            };
            self.cursor.consume(TokenKind::RParen)?;
            params
        };
        self.cursor.consume(TokenKind::Arrow)?;
        let body = self.with_lambda(true, |p| {
            if p.cursor.check(TokenKind::LBrace) {
                Ok(LambdaBody::Block(p.block()?))
            } else {
                Ok(LambdaBody::Expr(Box::new(p.expression()?)))
            }
        })?;
        Ok(Expr::Lambda { params, body, span: self.cursor.span_from(start) })
    }
}

fn inferred_param(name: Ident) -> Param {
    let span = name.span;
    Param {
        modifiers: Vec::new(),
        annotations: Vec::new(),
        ty: None,
        varargs: false,
        name,
        dims: Vec::new(),
        span,
    }
}
