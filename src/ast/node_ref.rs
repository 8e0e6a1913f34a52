use super::nodes::*;
use super::CompilationUnit;
use crate::parser::span::{HasSpan, Span};

/// Borrowed reference to any AST node.
///
/// Wrapper enums that only select between node families (lambda bodies,
/// case items, method reference targets, ...) are not nodes themselves;
/// their content is referenced directly.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    CompilationUnit(&'a CompilationUnit),
    Package(&'a PackageDecl),
    Import(&'a ImportDecl),
    Module(&'a ModuleDecl),
    Directive(&'a Directive),
    TypeDecl(&'a TypeDecl),
    EnumConstant(&'a EnumConstant),
    Member(&'a Member),
    TypeParam(&'a TypeParam),
    Param(&'a Param),
    LocalVar(&'a LocalVarDecl),
    Declarator(&'a Declarator),
    Annotation(&'a Annotation),
    /// `key = value` inside an annotation.
    NamedArg(&'a Ident, &'a ElementValue),
    /// `{v1, v2}` element value array.
    ElementArray(&'a [ElementValue], Span),
    Type(&'a TypeNode),
    ClassType(&'a ClassType),
    ArrayDim(&'a ArrayDim),
    Expr(&'a Expr),
    Pattern(&'a Pattern),
    Stmt(&'a Stmt),
    Block(&'a Block),
    CatchClause(&'a CatchClause),
    SwitchGroup(&'a SwitchGroup),
    SwitchRule(&'a SwitchRule),
    SwitchLabel(&'a SwitchLabel),
    /// `default` as a case item (`case null, default`).
    DefaultItem(Span),
    Ident(&'a Ident),
    QualifiedName(&'a QualifiedName),
}

/// Tag of a node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Package,
    Import,
    Module,
    Requires,
    Exports,
    Opens,
    Uses,
    Provides,
    ClassDecl,
    InterfaceDecl,
    EnumDecl,
    RecordDecl,
    AnnotationDecl,
    EnumConstant,
    Field,
    Method,
    Constructor,
    Initializer,
    AnnotationElement,
    TypeParam,
    Param,
    LocalVar,
    Declarator,
    Annotation,
    NamedArg,
    ElementArray,
    PrimitiveType,
    VoidType,
    VarType,
    ClassType,
    ArrayType,
    WildcardType,
    IntersectionType,
    UnionType,
    ArrayDim,
    Literal,
    Name,
    FieldAccess,
    ArrayAccess,
    MethodCall,
    MethodRef,
    New,
    NewArray,
    ArrayInit,
    Unary,
    Binary,
    Assign,
    Conditional,
    Cast,
    InstanceOf,
    Lambda,
    SwitchExpr,
    This,
    Super,
    ClassLiteral,
    Parenthesized,
    TypePattern,
    RecordPattern,
    Block,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    LocalClass,
    If,
    While,
    DoWhile,
    For,
    ForEach,
    SwitchStmt,
    Return,
    Break,
    Continue,
    Throw,
    Try,
    Synchronized,
    Assert,
    Yield,
    CtorCall,
    CatchClause,
    SwitchGroup,
    SwitchRule,
    DefaultLabel,
    CaseLabel,
    DefaultItem,
    Ident,
    QualifiedName,
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::CompilationUnit(_) => NodeKind::CompilationUnit,
            NodeRef::Package(_) => NodeKind::Package,
            NodeRef::Import(_) => NodeKind::Import,
            NodeRef::Module(_) => NodeKind::Module,
            NodeRef::Directive(d) => match d {
                Directive::Requires { .. } => NodeKind::Requires,
                Directive::Exports { .. } => NodeKind::Exports,
                Directive::Opens { .. } => NodeKind::Opens,
                Directive::Uses { .. } => NodeKind::Uses,
                Directive::Provides { .. } => NodeKind::Provides,
            },
            NodeRef::TypeDecl(t) => match t.kind {
                TypeDeclKind::Class => NodeKind::ClassDecl,
                TypeDeclKind::Interface => NodeKind::InterfaceDecl,
                TypeDeclKind::Enum => NodeKind::EnumDecl,
                TypeDeclKind::Record => NodeKind::RecordDecl,
                TypeDeclKind::Annotation => NodeKind::AnnotationDecl,
            },
            NodeRef::EnumConstant(_) => NodeKind::EnumConstant,
            NodeRef::Member(m) => match m {
                Member::Field(_) => NodeKind::Field,
                Member::Method(_) => NodeKind::Method,
                Member::Constructor(_) => NodeKind::Constructor,
                Member::Initializer { .. } => NodeKind::Initializer,
                Member::Type(t) => NodeRef::TypeDecl(t).kind(),
                Member::AnnotationElement(_) => NodeKind::AnnotationElement,
            },
            NodeRef::TypeParam(_) => NodeKind::TypeParam,
            NodeRef::Param(_) => NodeKind::Param,
            NodeRef::LocalVar(_) => NodeKind::LocalVar,
            NodeRef::Declarator(_) => NodeKind::Declarator,
            NodeRef::Annotation(_) => NodeKind::Annotation,
            NodeRef::NamedArg(..) => NodeKind::NamedArg,
            NodeRef::ElementArray(..) => NodeKind::ElementArray,
            NodeRef::Type(t) => match t {
                TypeNode::Primitive { .. } => NodeKind::PrimitiveType,
                TypeNode::Void { .. } => NodeKind::VoidType,
                TypeNode::Var { .. } => NodeKind::VarType,
                TypeNode::Class(_) => NodeKind::ClassType,
                TypeNode::Array { .. } => NodeKind::ArrayType,
                TypeNode::Wildcard { .. } => NodeKind::WildcardType,
                TypeNode::Intersection { .. } => NodeKind::IntersectionType,
                TypeNode::Union { .. } => NodeKind::UnionType,
            },
            NodeRef::ClassType(_) => NodeKind::ClassType,
            NodeRef::ArrayDim(_) => NodeKind::ArrayDim,
            NodeRef::Expr(e) => match e {
                Expr::Literal(_) => NodeKind::Literal,
                Expr::Name(_) => NodeKind::Name,
                Expr::FieldAccess { .. } => NodeKind::FieldAccess,
                Expr::ArrayAccess { .. } => NodeKind::ArrayAccess,
                Expr::MethodCall { .. } => NodeKind::MethodCall,
                Expr::MethodRef { .. } => NodeKind::MethodRef,
                Expr::New { .. } => NodeKind::New,
                Expr::NewArray { .. } => NodeKind::NewArray,
                Expr::ArrayInit { .. } => NodeKind::ArrayInit,
                Expr::Unary { .. } => NodeKind::Unary,
                Expr::Binary { .. } => NodeKind::Binary,
                Expr::Assign { .. } => NodeKind::Assign,
                Expr::Conditional { .. } => NodeKind::Conditional,
                Expr::Cast { .. } => NodeKind::Cast,
                Expr::InstanceOf { .. } => NodeKind::InstanceOf,
                Expr::Lambda { .. } => NodeKind::Lambda,
                Expr::Switch(_) => NodeKind::SwitchExpr,
                Expr::This { .. } => NodeKind::This,
                Expr::Super { .. } => NodeKind::Super,
                Expr::ClassLiteral { .. } => NodeKind::ClassLiteral,
                Expr::Parenthesized { .. } => NodeKind::Parenthesized,
            },
            NodeRef::Pattern(p) => match p {
                Pattern::Type { .. } => NodeKind::TypePattern,
                Pattern::Record { .. } => NodeKind::RecordPattern,
            },
            NodeRef::Stmt(s) => match s {
                Stmt::Block(_) => NodeKind::Block,
                Stmt::Empty { .. } => NodeKind::EmptyStmt,
                Stmt::Labeled { .. } => NodeKind::LabeledStmt,
                Stmt::Expr { .. } => NodeKind::ExprStmt,
                Stmt::LocalVar(_) => NodeKind::LocalVar,
                Stmt::LocalClass(_) => NodeKind::LocalClass,
                Stmt::If { .. } => NodeKind::If,
                Stmt::While { .. } => NodeKind::While,
                Stmt::DoWhile { .. } => NodeKind::DoWhile,
                Stmt::For { .. } => NodeKind::For,
                Stmt::ForEach { .. } => NodeKind::ForEach,
                Stmt::Switch(_) => NodeKind::SwitchStmt,
                Stmt::Return { .. } => NodeKind::Return,
                Stmt::Break { .. } => NodeKind::Break,
                Stmt::Continue { .. } => NodeKind::Continue,
                Stmt::Throw { .. } => NodeKind::Throw,
                Stmt::Try { .. } => NodeKind::Try,
                Stmt::Synchronized { .. } => NodeKind::Synchronized,
                Stmt::Assert { .. } => NodeKind::Assert,
                Stmt::Yield { .. } => NodeKind::Yield,
                Stmt::CtorCall { .. } => NodeKind::CtorCall,
            },
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::CatchClause(_) => NodeKind::CatchClause,
            NodeRef::SwitchGroup(_) => NodeKind::SwitchGroup,
            NodeRef::SwitchRule(_) => NodeKind::SwitchRule,
            NodeRef::SwitchLabel(l) => match l {
                SwitchLabel::Default(_) => NodeKind::DefaultLabel,
                SwitchLabel::Case { .. } => NodeKind::CaseLabel,
            },
            NodeRef::DefaultItem(_) => NodeKind::DefaultItem,
            NodeRef::Ident(_) => NodeKind::Ident,
            NodeRef::QualifiedName(_) => NodeKind::QualifiedName,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, NodeRef::Expr(_))
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, NodeRef::Stmt(_) | NodeRef::Block(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, NodeRef::Type(_) | NodeRef::ClassType(_))
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, NodeRef::Pattern(_))
    }

    pub fn is_directive(&self) -> bool {
        matches!(self, NodeRef::Directive(_))
    }

    pub fn is_member(&self) -> bool {
        matches!(self, NodeRef::Member(_) | NodeRef::EnumConstant(_))
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, NodeRef::TypeDecl(_) | NodeRef::Module(_)) || self.is_member()
    }

    /// Whether the node can qualify a member access (`q.x`, `q.this`, `q.new`).
    pub fn is_qualifier(&self) -> bool {
        match self {
            NodeRef::Ident(_) | NodeRef::QualifiedName(_) | NodeRef::ClassType(_) => true,
            NodeRef::Type(t) => matches!(t, TypeNode::Class(_)),
            NodeRef::Expr(e) => matches!(
                e,
                Expr::Name(_)
                    | Expr::FieldAccess { .. }
                    | Expr::MethodCall { .. }
                    | Expr::This { .. }
                    | Expr::Super { .. }
                    | Expr::New { .. }
            ),
            _ => false,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::CompilationUnit(n) => n.span,
            NodeRef::Package(n) => n.span,
            NodeRef::Import(n) => n.span,
            NodeRef::Module(n) => n.span,
            NodeRef::Directive(n) => n.span(),
            NodeRef::TypeDecl(n) => n.span,
            NodeRef::EnumConstant(n) => n.span,
            NodeRef::Member(n) => n.span(),
            NodeRef::TypeParam(n) => n.span,
            NodeRef::Param(n) => n.span,
            NodeRef::LocalVar(n) => n.span,
            NodeRef::Declarator(n) => n.span,
            NodeRef::Annotation(n) => n.span,
            NodeRef::NamedArg(key, value) => key.span.merge(value.span()),
            NodeRef::ElementArray(_, span) | NodeRef::DefaultItem(span) => *span,
            NodeRef::Type(n) => n.span(),
            NodeRef::ClassType(n) => n.span,
            NodeRef::ArrayDim(n) => n.span,
            NodeRef::Expr(n) => n.span(),
            NodeRef::Pattern(n) => n.span(),
            NodeRef::Stmt(n) => n.span(),
            NodeRef::Block(n) => n.span,
            NodeRef::CatchClause(n) => n.span,
            NodeRef::SwitchGroup(n) => n.span,
            NodeRef::SwitchRule(n) => n.span,
            NodeRef::SwitchLabel(n) => n.span(),
            NodeRef::Ident(n) => n.span,
            NodeRef::QualifiedName(n) => n.span,
        }
    }

    /// Direct children in source order. Absent optional parts and the empty
    /// name singletons are omitted.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Children::default();
        match *self {
            NodeRef::CompilationUnit(unit) => {
                if let Some(package) = &unit.package {
                    out.push(NodeRef::Package(package));
                }
                out.extend(unit.imports.iter().map(NodeRef::Import));
                if let Some(module) = &unit.module {
                    out.push(NodeRef::Module(module));
                }
                out.extend(unit.types.iter().map(NodeRef::TypeDecl));
            }
            NodeRef::Package(package) => {
                out.annotations(&package.annotations);
                out.qualified(&package.name);
            }
            NodeRef::Import(import) => out.qualified(&import.name),
            NodeRef::Module(module) => {
                out.annotations(&module.annotations);
                out.qualified(&module.name);
                out.extend(module.directives.iter().map(NodeRef::Directive));
            }
            NodeRef::Directive(directive) => match directive {
                Directive::Requires { module, .. } => out.qualified(module),
                Directive::Exports { package, targets, .. } | Directive::Opens { package, targets, .. } => {
                    out.qualified(package);
                    out.extend(targets.iter().map(NodeRef::QualifiedName));
                }
                Directive::Uses { service, .. } => out.qualified(service),
                Directive::Provides { service, implementations, .. } => {
                    out.qualified(service);
                    out.extend(implementations.iter().map(NodeRef::QualifiedName));
                }
            },
            NodeRef::TypeDecl(decl) => {
                out.annotations(&decl.annotations);
                out.ident(&decl.name);
                out.extend(decl.type_params.iter().map(NodeRef::TypeParam));
                out.extend(decl.record_components.iter().map(NodeRef::Param));
                out.types(&decl.extends);
                out.types(&decl.implements);
                out.types(&decl.permits);
                out.extend(decl.enum_constants.iter().map(NodeRef::EnumConstant));
                out.members(&decl.members);
            }
            NodeRef::EnumConstant(constant) => {
                out.annotations(&constant.annotations);
                out.ident(&constant.name);
                if let Some(args) = &constant.args {
                    out.exprs(args);
                }
                if let Some(body) = &constant.body {
                    out.members(body);
                }
            }
            NodeRef::Member(member) => match member {
                Member::Field(field) => {
                    out.annotations(&field.annotations);
                    out.push(NodeRef::Type(&field.ty));
                    out.extend(field.declarators.iter().map(NodeRef::Declarator));
                }
                Member::Method(method) => {
                    out.annotations(&method.annotations);
                    out.extend(method.type_params.iter().map(NodeRef::TypeParam));
                    out.push(NodeRef::Type(&method.return_type));
                    out.ident(&method.name);
                    out.extend(method.params.iter().map(NodeRef::Param));
                    out.dims(&method.dims);
                    out.types(&method.throws);
                    if let Some(body) = &method.body {
                        out.push(NodeRef::Block(body));
                    }
                }
                Member::Constructor(ctor) => {
                    out.annotations(&ctor.annotations);
                    out.extend(ctor.type_params.iter().map(NodeRef::TypeParam));
                    out.ident(&ctor.name);
                    out.extend(ctor.params.iter().map(NodeRef::Param));
                    out.types(&ctor.throws);
                    out.push(NodeRef::Block(&ctor.body));
                }
                Member::Initializer { body, .. } => out.push(NodeRef::Block(body)),
                Member::Type(decl) => return NodeRef::TypeDecl(decl).children(),
                Member::AnnotationElement(element) => {
                    out.annotations(&element.annotations);
                    out.push(NodeRef::Type(&element.ty));
                    out.ident(&element.name);
                    out.dims(&element.dims);
                    if let Some(default) = &element.default {
                        out.push(element_value(default));
                    }
                }
            },
            NodeRef::TypeParam(param) => {
                out.annotations(&param.annotations);
                out.ident(&param.name);
                out.types(&param.bounds);
            }
            NodeRef::Param(param) => {
                out.annotations(&param.annotations);
                if let Some(ty) = &param.ty {
                    out.push(NodeRef::Type(ty));
                }
                out.ident(&param.name);
                out.dims(&param.dims);
            }
            NodeRef::LocalVar(decl) => local_var(&mut out, decl),
            NodeRef::Declarator(declarator) => {
                out.ident(&declarator.name);
                out.dims(&declarator.dims);
                out.opt_expr(declarator.init.as_ref());
            }
            NodeRef::Annotation(annotation) => {
                out.qualified(&annotation.name);
                for arg in &annotation.args {
                    match arg {
                        AnnotationArg::Value(value) => out.push(element_value(value)),
                        AnnotationArg::Named(key, value) => out.push(NodeRef::NamedArg(key, value)),
                    }
                }
            }
            NodeRef::NamedArg(key, value) => {
                out.ident(key);
                out.push(element_value(value));
            }
            NodeRef::ElementArray(values, _) => out.extend(values.iter().map(element_value)),
            NodeRef::Type(ty) => match ty {
                TypeNode::Primitive { annotations, .. } => out.annotations(annotations),
                TypeNode::Void { .. } | TypeNode::Var { .. } => {}
                TypeNode::Class(class) => return NodeRef::ClassType(class).children(),
                TypeNode::Array { element, dims, .. } => {
                    out.push(NodeRef::Type(element));
                    out.dims(dims);
                }
                TypeNode::Wildcard { annotations, bound, .. } => {
                    out.annotations(annotations);
                    if let Some((_, bound)) = bound {
                        out.push(NodeRef::Type(bound));
                    }
                }
                TypeNode::Intersection { types, .. } | TypeNode::Union { types, .. } => out.types(types),
            },
            NodeRef::ClassType(class) => {
                if let Some(scope) = &class.scope {
                    out.push(NodeRef::ClassType(scope));
                }
                out.annotations(&class.annotations);
                out.ident(&class.name);
                if let Some(args) = &class.type_args {
                    out.types(args);
                }
            }
            NodeRef::ArrayDim(dim) => out.annotations(&dim.annotations),
            NodeRef::Expr(expr) => expr_children(&mut out, expr),
            NodeRef::Pattern(pattern) => match pattern {
                Pattern::Type { annotations, ty, name, .. } => {
                    out.annotations(annotations);
                    out.push(NodeRef::Type(ty));
                    out.ident(name);
                }
                Pattern::Record { ty, components, binding, .. } => {
                    out.push(NodeRef::Type(ty));
                    out.extend(components.iter().map(NodeRef::Pattern));
                    if let Some(binding) = binding {
                        out.ident(binding);
                    }
                }
            },
            NodeRef::Stmt(stmt) => stmt_children(&mut out, stmt),
            NodeRef::Block(block) => out.extend(block.stmts.iter().map(NodeRef::Stmt)),
            NodeRef::CatchClause(clause) => {
                out.push(NodeRef::Param(&clause.param));
                out.push(NodeRef::Block(&clause.body));
            }
            NodeRef::SwitchGroup(group) => {
                out.extend(group.labels.iter().map(NodeRef::SwitchLabel));
                out.extend(group.stmts.iter().map(NodeRef::Stmt));
            }
            NodeRef::SwitchRule(rule) => {
                out.push(NodeRef::SwitchLabel(&rule.label));
                out.push(match &rule.body {
                    RuleBody::Expr(expr) => NodeRef::Expr(expr),
                    RuleBody::Block(block) => NodeRef::Block(block),
                    RuleBody::Throw(stmt) => NodeRef::Stmt(stmt),
                });
            }
            NodeRef::SwitchLabel(label) => {
                if let SwitchLabel::Case { items, guard, .. } = label {
                    for item in items {
                        out.push(match item {
                            CaseItem::Expr(expr) => NodeRef::Expr(expr),
                            CaseItem::Pattern(pattern) => NodeRef::Pattern(pattern),
                            CaseItem::Default(span) => NodeRef::DefaultItem(*span),
                        });
                    }
                    out.opt_expr(guard.as_ref());
                }
            }
            NodeRef::DefaultItem(_) | NodeRef::Ident(_) => {}
            NodeRef::QualifiedName(name) => out.extend(name.segments.iter().map(NodeRef::Ident)),
        }
        out.0
    }
}

impl HasSpan for NodeRef<'_> {
    fn span(&self) -> Span {
        NodeRef::span(self)
    }
}

fn element_value(value: &ElementValue) -> NodeRef<'_> {
    match value {
        ElementValue::Expr(expr) => NodeRef::Expr(expr),
        ElementValue::Annotation(annotation) => NodeRef::Annotation(annotation),
        ElementValue::Array(values, span) => NodeRef::ElementArray(values, *span),
    }
}

fn local_var<'a>(out: &mut Children<'a>, decl: &'a LocalVarDecl) {
    out.annotations(&decl.annotations);
    out.push(NodeRef::Type(&decl.ty));
    out.extend(decl.declarators.iter().map(NodeRef::Declarator));
}

fn switch_block<'a>(out: &mut Children<'a>, switch: &'a SwitchBlock) {
    out.push(NodeRef::Expr(&switch.selector));
    match &switch.body {
        SwitchBody::Statements(groups) => out.extend(groups.iter().map(NodeRef::SwitchGroup)),
        SwitchBody::Rules(rules) => out.extend(rules.iter().map(NodeRef::SwitchRule)),
    }
}

fn expr_children<'a>(out: &mut Children<'a>, expr: &'a Expr) {
    match expr {
        Expr::Literal(_) | Expr::Name(_) => {}
        Expr::FieldAccess { target, name, .. } => {
            out.push(NodeRef::Expr(target));
            out.ident(name);
        }
        Expr::ArrayAccess { array, index, .. } => {
            out.push(NodeRef::Expr(array));
            out.push(NodeRef::Expr(index));
        }
        Expr::MethodCall { target, type_args, name, args, .. } => {
            if let Some(target) = target {
                out.push(NodeRef::Expr(target));
            }
            out.types(type_args);
            out.ident(name);
            out.exprs(args);
        }
        Expr::MethodRef { target, type_args, name, .. } => {
            out.push(match target {
                MethodRefTarget::Expr(expr) => NodeRef::Expr(expr),
                MethodRefTarget::Type(ty) => NodeRef::Type(ty),
            });
            out.types(type_args);
            if let MethodRefName::Ident(name) = name {
                out.ident(name);
            }
        }
        Expr::New { outer, type_args, ty, args, body, .. } => {
            if let Some(outer) = outer {
                out.push(NodeRef::Expr(outer));
            }
            out.types(type_args);
            out.push(NodeRef::ClassType(ty));
            out.exprs(args);
            if let Some(body) = body {
                out.members(body);
            }
        }
        Expr::NewArray { element, dim_exprs, extra_dims, init, .. } => {
            out.push(NodeRef::Type(element));
            out.exprs(dim_exprs);
            out.dims(extra_dims);
            if let Some(init) = init {
                out.push(NodeRef::Expr(init));
            }
        }
        Expr::ArrayInit { elements, .. } => out.exprs(elements),
        Expr::Unary { operand, .. } => out.push(NodeRef::Expr(operand)),
        Expr::Binary { left, right, .. } => {
            out.push(NodeRef::Expr(left));
            out.push(NodeRef::Expr(right));
        }
        Expr::Assign { target, value, .. } => {
            out.push(NodeRef::Expr(target));
            out.push(NodeRef::Expr(value));
        }
        Expr::Conditional { condition, then_expr, else_expr, .. } => {
            out.push(NodeRef::Expr(condition));
            out.push(NodeRef::Expr(then_expr));
            out.push(NodeRef::Expr(else_expr));
        }
        Expr::Cast { ty, expr, .. } => {
            out.push(NodeRef::Type(ty));
            out.push(NodeRef::Expr(expr));
        }
        Expr::InstanceOf { expr, target, .. } => {
            out.push(NodeRef::Expr(expr));
            out.push(match &**target {
                InstanceOfTarget::Type(ty) => NodeRef::Type(ty),
                InstanceOfTarget::Pattern(pattern) => NodeRef::Pattern(pattern),
            });
        }
        Expr::Lambda { params, body, .. } => {
            out.extend(params.iter().map(NodeRef::Param));
            out.push(match body {
                LambdaBody::Expr(expr) => NodeRef::Expr(expr),
                LambdaBody::Block(block) => NodeRef::Block(block),
            });
        }
        Expr::Switch(switch) => switch_block(out, switch),
        Expr::This { qualifier, .. } | Expr::Super { qualifier, .. } => out.qualified(qualifier),
        Expr::ClassLiteral { ty, .. } => out.push(NodeRef::Type(ty)),
        Expr::Parenthesized { expr, .. } => out.push(NodeRef::Expr(expr)),
    }
}

fn stmt_children<'a>(out: &mut Children<'a>, stmt: &'a Stmt) {
    match stmt {
        Stmt::Block(block) => out.extend(block.stmts.iter().map(NodeRef::Stmt)),
        Stmt::Empty { .. } => {}
        Stmt::Labeled { label, body, .. } => {
            out.ident(label);
            out.push(NodeRef::Stmt(body));
        }
        Stmt::Expr { expr, .. } | Stmt::Throw { expr, .. } | Stmt::Yield { value: expr, .. } => {
            out.push(NodeRef::Expr(expr))
        }
        Stmt::LocalVar(decl) => local_var(out, decl),
        Stmt::LocalClass(decl) => out.push(NodeRef::TypeDecl(decl)),
        Stmt::If { condition, then_branch, else_branch, .. } => {
            out.push(NodeRef::Expr(condition));
            out.push(NodeRef::Stmt(then_branch));
            if let Some(else_branch) = else_branch {
                out.push(NodeRef::Stmt(else_branch));
            }
        }
        Stmt::While { condition, body, .. } => {
            out.push(NodeRef::Expr(condition));
            out.push(NodeRef::Stmt(body));
        }
        Stmt::DoWhile { body, condition, .. } => {
            out.push(NodeRef::Stmt(body));
            out.push(NodeRef::Expr(condition));
        }
        Stmt::For { init, condition, update, body, .. } => {
            out.extend(init.iter().map(NodeRef::Stmt));
            out.opt_expr(condition.as_ref());
            out.exprs(update);
            out.push(NodeRef::Stmt(body));
        }
        Stmt::ForEach { var, iterable, body, .. } => {
            out.push(NodeRef::Param(var));
            out.push(NodeRef::Expr(iterable));
            out.push(NodeRef::Stmt(body));
        }
        Stmt::Switch(switch) => switch_block(out, switch),
        Stmt::Return { value, .. } => out.opt_expr(value.as_ref()),
        Stmt::Break { label, .. } | Stmt::Continue { label, .. } => out.ident(label),
        Stmt::Try { resources, body, catches, finally, .. } => {
            for resource in resources {
                out.push(match resource {
                    Resource::Decl(decl) => NodeRef::LocalVar(decl),
                    Resource::Expr(expr) => NodeRef::Expr(expr),
                });
            }
            out.push(NodeRef::Block(body));
            out.extend(catches.iter().map(NodeRef::CatchClause));
            if let Some(finally) = finally {
                out.push(NodeRef::Block(finally));
            }
        }
        Stmt::Synchronized { lock, body, .. } => {
            out.push(NodeRef::Expr(lock));
            out.push(NodeRef::Block(body));
        }
        Stmt::Assert { condition, message, .. } => {
            out.push(NodeRef::Expr(condition));
            out.opt_expr(message.as_ref());
        }
        Stmt::CtorCall { qualifier, type_args, args, .. } => {
            out.opt_expr(qualifier.as_ref());
            out.types(type_args);
            out.exprs(args);
        }
    }
}

#[derive(Default)]
struct Children<'a>(Vec<NodeRef<'a>>);

impl<'a> Children<'a> {
    fn push(&mut self, node: NodeRef<'a>) {
        self.0.push(node);
    }

    fn extend(&mut self, nodes: impl Iterator<Item = NodeRef<'a>>) {
        self.0.extend(nodes);
    }

    fn ident(&mut self, ident: &'a Ident) {
        if !ident.is_empty() {
            self.0.push(NodeRef::Ident(ident));
        }
    }

    fn qualified(&mut self, name: &'a QualifiedName) {
        if !name.is_empty() {
            self.0.push(NodeRef::QualifiedName(name));
        }
    }

    fn annotations(&mut self, annotations: &'a [Annotation]) {
        self.extend(annotations.iter().map(NodeRef::Annotation));
    }

    fn types(&mut self, types: &'a [TypeNode]) {
        self.extend(types.iter().map(NodeRef::Type));
    }

    fn exprs(&mut self, exprs: &'a [Expr]) {
        self.extend(exprs.iter().map(NodeRef::Expr));
    }

    fn opt_expr(&mut self, expr: Option<&'a Expr>) {
        if let Some(expr) = expr {
            self.0.push(NodeRef::Expr(expr));
        }
    }

    fn dims(&mut self, dims: &'a [ArrayDim]) {
        self.extend(dims.iter().map(NodeRef::ArrayDim));
    }

    fn members(&mut self, members: &'a [Member]) {
        self.extend(members.iter().map(|m| match m {
            Member::Type(decl) => NodeRef::TypeDecl(decl),
            other => NodeRef::Member(other),
        }));
    }
}
