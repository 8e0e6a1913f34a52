//! Blocks, statements and switch bodies.

use super::error::{ParseError, ParseResult};
use super::expr::is_statement_expression;
use super::lexer::TokenKind;
use super::parser::{Modifiers, Parser};
use super::scan::{classify_declaration, is_pattern_ahead, skip_qualified_name, DeclarationKind};
use super::span::{HasSpan, Location, Span};
use super::token_sets::is_identifier_like;
use crate::ast::*;
use crate::config::LanguageLevel;

impl<'t> Parser<'t> {
    /// A single block statement: a declaration or a statement.
    pub fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.block_statement()
    }

    pub(super) fn block(&mut self) -> ParseResult<Block> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::LBrace)?;
        let stmts = self.block_statements(&[TokenKind::RBrace])?;
        self.cursor.consume(TokenKind::RBrace)?;
        Ok(Block { stmts, span: self.cursor.span_from(start) })
    }

    /// Block statements up to, not including, one of `terminators`.
    fn block_statements(&mut self, terminators: &[TokenKind]) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.cursor.check_any(terminators) && !self.cursor.is_at_end() {
            stmts.push(self.block_statement()?);
        }
        Ok(stmts)
    }

    fn block_statement(&mut self) -> ParseResult<Stmt> {
        if self.is_yield_ahead() {
            return self.statement();
        }
        match classify_declaration(&self.cursor) {
            DeclarationKind::Type(TypeDeclKind::Annotation) => Err(ParseError::grammar(
                "annotation types cannot be declared locally",
                self.cursor.location(),
            )),
            DeclarationKind::Type(_) => Ok(Stmt::LocalClass(Box::new(self.type_declaration()?))),
            DeclarationKind::Variable => {
                let start = self.cursor.location();
                let modifiers = self.modifiers()?;
                let decl = self.local_var_decl(modifiers, start)?;
                self.cursor.consume(TokenKind::Semicolon)?;
                Ok(Stmt::LocalVar(LocalVarDecl { span: self.cursor.span_from(start), ..decl }))
            }
            _ => self.statement(),
        }
    }

    /// `Type name [= init], ...` after the modifiers, without the semicolon.
    fn local_var_decl(&mut self, modifiers: Modifiers, start: Location) -> ParseResult<LocalVarDecl> {
        self.local_var_modifiers_ok(&modifiers, start)?;
        let ty = self.parse_type()?;
        let first = self.ident()?;
        self.local_var_rest(modifiers, ty, first, start)
    }

    fn local_var_modifiers_ok(&self, modifiers: &Modifiers, start: Location) -> ParseResult<()> {
        match modifiers.keywords.iter().find(|m| **m != Modifier::Final) {
            Some(modifier) => Err(ParseError::grammar(
                format!("modifier '{}' is not allowed on a local variable", modifier.as_str()),
                modifiers.start.unwrap_or(start),
            )),
            None => Ok(()),
        }
    }

    /// Declarators of a local variable whose first name is already consumed.
    fn local_var_rest(
        &mut self,
        modifiers: Modifiers,
        ty: TypeNode,
        first: Ident,
        start: Location,
    ) -> ParseResult<LocalVarDecl> {
        let mut declarators = vec![self.declarator_rest(first)?];
        while self.cursor.eat(TokenKind::Comma) {
            let name = self.ident()?;
            declarators.push(self.declarator_rest(name)?);
        }
        if matches!(ty, TypeNode::Var { .. }) {
            if declarators.len() > 1 {
                return Err(ParseError::grammar("'var' is not allowed in a compound declaration", start));
            }
            if declarators.iter().any(|d| !d.dims.is_empty()) {
                return Err(ParseError::grammar("'var' is not allowed as an element type of an array", start));
            }
            if declarators.iter().any(|d| d.init.is_none()) {
                return Err(ParseError::grammar("cannot infer type for a 'var' variable without initializer", start));
            }
            if matches!(declarators[0].init, Some(Expr::ArrayInit { .. })) {
                return Err(ParseError::grammar("an array initializer needs an explicit target type", start));
            }
        }
        Ok(LocalVarDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty,
            declarators,
            span: self.cursor.span_from(start),
        })
    }

    /// `[] ... [= init]` after a declarator name.
    pub(super) fn declarator_rest(&mut self, name: Ident) -> ParseResult<Declarator> {
        let start = name.span.start;
        let dims = self.dims()?;
        let init = if self.cursor.eat(TokenKind::Assign) { Some(self.variable_initializer()?) } else { None };
        Ok(Declarator { name, dims, init, span: self.cursor.span_from(start) })
    }

    /// `yield` starts a yield statement unless it is used as a name.
    /// Before Java 14 it is always a name, so `yield(x);` is a call.
    fn is_yield_ahead(&self) -> bool {
        self.config.supports(LanguageLevel::Java14)
            && self.cursor.check(TokenKind::Yield)
            && !matches!(
                self.cursor.kind(1),
                TokenKind::Assign
                    | TokenKind::AddAssign
                    | TokenKind::SubAssign
                    | TokenKind::MulAssign
                    | TokenKind::DivAssign
                    | TokenKind::ModAssign
                    | TokenKind::AndAssign
                    | TokenKind::OrAssign
                    | TokenKind::XorAssign
                    | TokenKind::LShiftAssign
                    | TokenKind::RShiftAssign
                    | TokenKind::URShiftAssign
                    | TokenKind::Dot
                    | TokenKind::LBracket
                    | TokenKind::Semicolon
                    | TokenKind::Arrow
                    | TokenKind::DoubleColon
                    | TokenKind::Colon
                    | TokenKind::Inc
                    | TokenKind::Dec
            )
    }

    /// A statement that is not a declaration.
    pub(super) fn statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        let kind = self.cursor.kind(0);
        if self.is_yield_ahead() {
            self.cursor.advance();
            let value = self.expression()?;
            self.cursor.consume(TokenKind::Semicolon)?;
            return Ok(Stmt::Yield { value, span: self.cursor.span_from(start) });
        }
        if is_identifier_like(kind) && self.cursor.kind(1) == TokenKind::Colon {
            let label = self.ident()?;
            self.cursor.advance();
            let body = self.statement()?;
            return Ok(Stmt::Labeled { label, body: Box::new(body), span: self.cursor.span_from(start) });
        }
        match kind {
            TokenKind::LBrace => Ok(Stmt::Block(self.block()?)),
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(Stmt::Empty { span: self.cursor.span_from(start) })
            }
            TokenKind::If => self.if_statement(),
            TokenKind::While => {
                self.cursor.advance();
                let condition = self.paren_expression()?;
                let body = self.statement()?;
                Ok(Stmt::While { condition, body: Box::new(body), span: self.cursor.span_from(start) })
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.statement()?;
                self.cursor.consume(TokenKind::While)?;
                let condition = self.paren_expression()?;
                self.cursor.consume(TokenKind::Semicolon)?;
                Ok(Stmt::DoWhile { body: Box::new(body), condition, span: self.cursor.span_from(start) })
            }
            TokenKind::For => self.for_statement(),
            TokenKind::Switch => Ok(Stmt::Switch(self.switch_block(false)?)),
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.cursor.check(TokenKind::Semicolon) { None } else { Some(self.expression()?) };
                self.cursor.consume(TokenKind::Semicolon)?;
                Ok(Stmt::Return { value, span: self.cursor.span_from(start) })
            }
            TokenKind::Break | TokenKind::Continue => {
                self.cursor.advance();
                let label = if is_identifier_like(self.cursor.kind(0)) { self.ident()? } else { Ident::EMPTY };
                self.cursor.consume(TokenKind::Semicolon)?;
                let span = self.cursor.span_from(start);
                Ok(if kind == TokenKind::Break { Stmt::Break { label, span } } else { Stmt::Continue { label, span } })
            }
            TokenKind::Throw => self.throw_statement(),
            TokenKind::Try => self.try_statement(),
            TokenKind::Synchronized => {
                self.cursor.advance();
                let lock = self.paren_expression()?;
                let body = self.block()?;
                Ok(Stmt::Synchronized { lock, body, span: self.cursor.span_from(start) })
            }
            TokenKind::Assert => {
                self.cursor.advance();
                let condition = self.expression()?;
                let message = if self.cursor.eat(TokenKind::Colon) { Some(self.expression()?) } else { None };
                self.cursor.consume(TokenKind::Semicolon)?;
                Ok(Stmt::Assert { condition, message, span: self.cursor.span_from(start) })
            }
            TokenKind::Case | TokenKind::Default | TokenKind::Else | TokenKind::Catch | TokenKind::Finally => {
                Err(self.cursor.illegal("statement"))
            }
            _ => {
                if let Some(stmt) = self.constructor_call()? {
                    return Ok(stmt);
                }
                self.expression_statement()
            }
        }
    }

    fn paren_expression(&mut self) -> ParseResult<Expr> {
        self.cursor.consume(TokenKind::LParen)?;
        let expr = self.with_lambda(true, |p| p.expression())?;
        self.cursor.consume(TokenKind::RParen)?;
        Ok(expr)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        let expr = self.expression()?;
        if !is_statement_expression(&expr) {
            return Err(ParseError::grammar("not a statement", start));
        }
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(Stmt::Expr { expr, span: self.cursor.span_from(start) })
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::If)?;
        let condition = self.paren_expression()?;
        let then_branch = self.statement()?;
        let else_branch = if self.cursor.eat(TokenKind::Else) { Some(Box::new(self.statement()?)) } else { None };
        Ok(Stmt::If { condition, then_branch: Box::new(then_branch), else_branch, span: self.cursor.span_from(start) })
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        self.cursor.consume_seq(&[TokenKind::For, TokenKind::LParen])?;

        let mut init = Vec::new();
        if classify_declaration(&self.cursor) == DeclarationKind::Variable {
            let var_start = self.cursor.location();
            let modifiers = self.modifiers()?;
            self.local_var_modifiers_ok(&modifiers, var_start)?;
            let ty = self.parse_type()?;
            let name = self.ident()?;
            let before_dims = self.cursor.snapshot();
            let dims = self.dims()?;
            if self.cursor.eat(TokenKind::Colon) {
                if matches!(ty, TypeNode::Var { .. }) && !dims.is_empty() {
                    return Err(ParseError::grammar("'var' is not allowed as an element type of an array", var_start));
                }
                let var = Param {
                    modifiers: modifiers.keywords,
                    annotations: modifiers.annotations,
                    ty: Some(ty),
                    varargs: false,
                    name,
                    dims,
                    span: self.cursor.span_from(var_start),
                };
                let iterable = self.expression()?;
                self.cursor.consume(TokenKind::RParen)?;
                let body = self.statement()?;
                return Ok(Stmt::ForEach { var, iterable, body: Box::new(body), span: self.cursor.span_from(start) });
            }
            self.cursor.restore(before_dims);
            let decl = self.local_var_rest(modifiers, ty, name, var_start)?;
            init.push(Stmt::LocalVar(decl));
        } else if !self.cursor.check(TokenKind::Semicolon) {
            init = self.statement_expressions()?.into_iter().map(|(expr, span)| Stmt::Expr { expr, span }).collect();
        }
        self.cursor.consume(TokenKind::Semicolon)?;

        let condition = if self.cursor.check(TokenKind::Semicolon) { None } else { Some(self.expression()?) };
        self.cursor.consume(TokenKind::Semicolon)?;
        let update = if self.cursor.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.statement_expressions()?.into_iter().map(|(expr, _)| expr).collect()
        };
        self.cursor.consume(TokenKind::RParen)?;
        let body = self.statement()?;
        Ok(Stmt::For { init, condition, update, body: Box::new(body), span: self.cursor.span_from(start) })
    }

    fn statement_expressions(&mut self) -> ParseResult<Vec<(Expr, Span)>> {
        let mut exprs = Vec::new();
        loop {
            let start = self.cursor.location();
            let expr = self.expression()?;
            if !is_statement_expression(&expr) {
                return Err(ParseError::grammar("not a statement", start));
            }
            exprs.push((expr, self.cursor.span_from(start)));
            if !self.cursor.eat(TokenKind::Comma) {
                return Ok(exprs);
            }
        }
    }

    fn throw_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::Throw)?;
        let expr = self.expression()?;
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(Stmt::Throw { expr, span: self.cursor.span_from(start) })
    }

    fn try_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::Try)?;
        let mut resources = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            while !self.cursor.check(TokenKind::RParen) {
                resources.push(self.resource()?);
                if !self.cursor.eat(TokenKind::Semicolon) {
                    break;
                }
            }
            self.cursor.consume(TokenKind::RParen)?;
        }
        let body = self.block()?;
        let mut catches = Vec::new();
        while self.cursor.check(TokenKind::Catch) {
            catches.push(self.catch_clause()?);
        }
        let finally = if self.cursor.eat(TokenKind::Finally) { Some(self.block()?) } else { None };
        if resources.is_empty() && catches.is_empty() && finally.is_none() {
            return Err(ParseError::grammar("'try' without 'catch', 'finally' or resource declarations", start));
        }
        Ok(Stmt::Try { resources, body, catches, finally, span: self.cursor.span_from(start) })
    }

    fn resource(&mut self) -> ParseResult<Resource> {
        let start = self.cursor.location();
        if classify_declaration(&self.cursor) != DeclarationKind::Variable {
            return Ok(Resource::Expr(self.expression()?));
        }
        let modifiers = self.modifiers()?;
        self.local_var_modifiers_ok(&modifiers, start)?;
        let ty = self.parse_type()?;
        let name = self.ident()?;
        let name_start = name.span.start;
        self.cursor.consume(TokenKind::Assign)?;
        let init = self.expression()?;
        let declarator = Declarator { name, dims: Vec::new(), init: Some(init), span: self.cursor.span_from(name_start) };
        Ok(Resource::Decl(LocalVarDecl {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty,
            declarators: vec![declarator],
            span: self.cursor.span_from(start),
        }))
    }

    fn catch_clause(&mut self) -> ParseResult<CatchClause> {
        let start = self.cursor.location();
        self.cursor.consume_seq(&[TokenKind::Catch, TokenKind::LParen])?;
        let param_start = self.cursor.location();
        let modifiers = self.modifiers()?;
        self.local_var_modifiers_ok(&modifiers, param_start)?;
        let type_start = self.cursor.location();
        let first = self.parse_type()?;
        let ty = if self.cursor.check(TokenKind::Pipe) {
            let mut types = vec![first];
            while self.cursor.eat(TokenKind::Pipe) {
                types.push(self.parse_type()?);
            }
            TypeNode::Union { types, span: self.cursor.span_from(type_start) }
        } else {
            first
        };
        let name = self.ident()?;
        let param = Param {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty: Some(ty),
            varargs: false,
            name,
            dims: Vec::new(),
            span: self.cursor.span_from(param_start),
        };
        self.cursor.consume(TokenKind::RParen)?;
        let body = self.block()?;
        Ok(CatchClause { param, body, span: self.cursor.span_from(start) })
    }

    /// `this(...)`, `super(...)`, `<T>this(...)` or `outer.super(...)`.
    fn constructor_call(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.cursor.location();
        let mark = self.cursor.snapshot();

        let mut qualifier = None;
        if is_identifier_like(self.cursor.kind(0)) {
            let mut ahead = self.cursor;
            if !(skip_qualified_name(&mut ahead) && ahead.matches(&[TokenKind::Dot, TokenKind::Super, TokenKind::LParen]))
            {
                return Ok(None);
            }
            let name = self.qualified_name()?;
            qualifier = Some(qualified_name_expr(name));
            self.cursor.consume(TokenKind::Dot)?;
        }

        let type_args = if self.cursor.check(TokenKind::Lt) { self.type_arguments()? } else { Vec::new() };
        let kind = match self.cursor.kind(0) {
            TokenKind::This if qualifier.is_none() => CtorCallKind::This,
            TokenKind::Super => CtorCallKind::Super,
            _ => {
                self.cursor.restore(mark);
                return Ok(None);
            }
        };
        if self.cursor.kind(1) != TokenKind::LParen {
            self.cursor.restore(mark);
            return Ok(None);
        }
        self.cursor.advance();
        let args = self.arguments()?;
        self.cursor.consume(TokenKind::Semicolon)?;
        Ok(Some(Stmt::CtorCall { kind, qualifier, type_args, args, span: self.cursor.span_from(start) }))
    }

    // Switch

    /// `switch (selector) { ... }`, as a statement or an expression.
    pub(super) fn switch_block(&mut self, is_expression: bool) -> ParseResult<SwitchBlock> {
        let start = self.cursor.location();
        self.cursor.consume(TokenKind::Switch)?;
        let selector = self.paren_expression()?;
        self.cursor.consume(TokenKind::LBrace)?;

        let body = if self.cursor.check(TokenKind::RBrace) {
            SwitchBody::Statements(Vec::new())
        } else {
            let first = self.switch_label()?;
            if self.cursor.check(TokenKind::Arrow) {
                SwitchBody::Rules(self.switch_rules(first, is_expression)?)
            } else {
                SwitchBody::Statements(self.switch_groups(first)?)
            }
        };
        self.cursor.consume(TokenKind::RBrace)?;
        log::trace!("parsed switch at {} ({} form)", start, if body.is_rules() { "rule" } else { "statement" });
        Ok(SwitchBlock { selector, body, span: self.cursor.span_from(start) })
    }

    fn switch_rules(&mut self, first: SwitchLabel, is_expression: bool) -> ParseResult<Vec<SwitchRule>> {
        self.require(LanguageLevel::Java14, "switch rules", self.cursor.location())?;
        let mut rules = Vec::new();
        let mut label = first;
        loop {
            let start = label.span().start;
            if !self.cursor.check(TokenKind::Arrow) {
                return Err(self.mixed_switch_error());
            }
            self.cursor.advance();
            let body = match self.cursor.kind(0) {
                TokenKind::LBrace => RuleBody::Block(self.block()?),
                TokenKind::Throw => RuleBody::Throw(Box::new(self.throw_statement()?)),
                _ => {
                    let expr_start = self.cursor.location();
                    let expr = self.expression()?;
                    if !is_expression && !is_statement_expression(&expr) {
                        return Err(ParseError::grammar("not a statement", expr_start));
                    }
                    self.cursor.consume(TokenKind::Semicolon)?;
                    RuleBody::Expr(expr)
                }
            };
            rules.push(SwitchRule { label, body, span: self.cursor.span_from(start) });
            if self.cursor.check(TokenKind::RBrace) {
                return Ok(rules);
            }
            label = self.switch_label()?;
        }
    }

    fn switch_groups(&mut self, first: SwitchLabel) -> ParseResult<Vec<SwitchGroup>> {
        let mut groups = Vec::new();
        let mut next = Some(first);
        while let Some(label) = next.take() {
            let start = label.span().start;
            let mut labels = vec![label];
            self.expect_group_colon()?;
            while self.cursor.check_any(&[TokenKind::Case, TokenKind::Default]) {
                labels.push(self.switch_label()?);
                self.expect_group_colon()?;
            }
            let stmts = self.block_statements(&[TokenKind::Case, TokenKind::Default, TokenKind::RBrace])?;
            groups.push(SwitchGroup { labels, stmts, span: self.cursor.span_from(start) });
            if !self.cursor.check(TokenKind::RBrace) {
                next = Some(self.switch_label()?);
            }
        }
        Ok(groups)
    }

    fn expect_group_colon(&mut self) -> ParseResult<()> {
        if self.cursor.check(TokenKind::Arrow) {
            return Err(self.mixed_switch_error());
        }
        self.cursor.consume(TokenKind::Colon).map(|_| ())
    }

    fn mixed_switch_error(&self) -> ParseError {
        if self.cursor.check_any(&[TokenKind::Arrow, TokenKind::Colon]) {
            ParseError::grammar("different case kinds used in the switch", self.cursor.location())
        } else {
            self.cursor.illegal("'->'")
        }
    }

    /// `default` or `case item, item [when guard]`, without the `:` or `->`.
    fn switch_label(&mut self) -> ParseResult<SwitchLabel> {
        let start = self.cursor.location();
        if self.cursor.eat(TokenKind::Default) {
            return Ok(SwitchLabel::Default(self.cursor.span_from(start)));
        }
        self.cursor.consume(TokenKind::Case)?;
        let (items, guard) = self.with_lambda(false, |p| {
            let mut items = Vec::new();
            loop {
                items.push(p.case_item()?);
                if !p.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            let guard = if p.cursor.check(TokenKind::When) {
                let at = p.cursor.location();
                p.require(LanguageLevel::Java21, "guarded case labels", at)?;
                if !items.iter().any(|item| matches!(item, CaseItem::Pattern(_))) {
                    return Err(ParseError::grammar("a guard is only allowed after a pattern label", at));
                }
                p.cursor.advance();
                Some(p.expression()?)
            } else {
                None
            };
            Ok((items, guard))
        })?;
        self.check_case_items(&items, start)?;
        Ok(SwitchLabel::Case { items, guard, span: self.cursor.span_from(start) })
    }

    fn case_item(&mut self) -> ParseResult<CaseItem> {
        let start = self.cursor.location();
        if self.cursor.eat(TokenKind::Default) {
            return Ok(CaseItem::Default(self.cursor.span_from(start)));
        }
        if is_pattern_ahead(&self.cursor) {
            self.require(LanguageLevel::Java21, "patterns in switch", start)?;
            return Ok(CaseItem::Pattern(self.pattern()?));
        }
        Ok(CaseItem::Expr(self.conditional_expr()?))
    }

    /// Patterns stand alone; `default` may only follow `null`.
    fn check_case_items(&self, items: &[CaseItem], start: Location) -> ParseResult<()> {
        let patterns = items.iter().filter(|item| matches!(item, CaseItem::Pattern(_))).count();
        if patterns > 1 {
            return Err(ParseError::grammar("only one pattern is allowed per case label", start));
        }
        if patterns == 1 && items.len() > 1 {
            return Err(ParseError::grammar("a pattern label cannot be combined with other case items", start));
        }
        for (i, item) in items.iter().enumerate() {
            if let CaseItem::Default(span) = item {
                let after_null = i == 1
                    && matches!(&items[0], CaseItem::Expr(Expr::Literal(Literal { kind: LiteralKind::Null, .. })));
                if !after_null || items.len() != 2 {
                    return Err(ParseError::grammar("'default' in a case label must follow 'null'", span.start));
                }
            }
        }
        Ok(())
    }
}

fn qualified_name_expr(name: QualifiedName) -> Expr {
    let mut segments = name.segments.into_iter();
    let mut expr = match segments.next() {
        Some(first) => Expr::Name(first),
        None => return Expr::Name(Ident::EMPTY),
    };
    for segment in segments {
        let span = expr.span().merge(segment.span);
        expr = Expr::FieldAccess { target: Box::new(expr), name: segment, span };
    }
    expr
}
