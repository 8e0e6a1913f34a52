use std::borrow::Cow;

use crate::parser::span::{HasSpan, Span};

// Names

/// A single identifier (or contextual keyword used as one).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: Cow<'static, str>,
    pub span: Span,
}

impl Ident {
    /// Shared "no name" value: absent labels, unqualified `this`/`super`.
    /// Recognized with [`Ident::is_empty`], a length check; it is compared by
    /// value, not by address.
    pub const EMPTY: Ident = Ident { name: Cow::Borrowed(""), span: Span::DUMMY };

    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: Cow::Owned(name.into()), span }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Dotted name such as a package, import or module name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl QualifiedName {
    /// Absent qualifier; like [`Ident::EMPTY`] it is recognized with `is_empty`.
    pub const EMPTY: QualifiedName = QualifiedName { segments: Vec::new(), span: Span::DUMMY };

    pub fn new(segments: Vec<Ident>) -> Self {
        let span = segments
            .iter()
            .fold(Span::DUMMY, |acc, segment| acc.merge(segment.span));
        Self { segments, span }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }

    /// Dotted text, e.g. `java.util.List`.
    pub fn dotted(&self) -> String {
        self.segments.iter().map(Ident::as_str).collect::<Vec<_>>().join(".")
    }
}

// Modifiers and annotations

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    // Interface default methods
    Default,
    Sealed,
    NonSealed,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: QualifiedName,
    pub args: Vec<AnnotationArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationArg {
    /// `@A(value)`
    Value(ElementValue),
    /// `@A(key = value)`
    Named(Ident, ElementValue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Expr(Expr),
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>, Span),
}

// Types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Extends,
    Super,
}

/// One `[]` of an array type, with its type annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDim {
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// Class or interface type, possibly qualified by an outer type or package.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassType {
    pub scope: Option<Box<ClassType>>,
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    /// `None`: raw or non-generic. `Some(empty)`: diamond `<>`.
    pub type_args: Option<Vec<TypeNode>>,
    pub span: Span,
}

impl ClassType {
    pub fn simple(name: Ident) -> Self {
        let span = name.span;
        Self { scope: None, annotations: Vec::new(), name, type_args: None, span }
    }

    pub fn is_diamond(&self) -> bool {
        matches!(&self.type_args, Some(args) if args.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Primitive {
        annotations: Vec<Annotation>,
        kind: PrimitiveKind,
        span: Span,
    },
    Void {
        span: Span,
    },
    /// Inferred local variable type `var`.
    Var {
        span: Span,
    },
    Class(ClassType),
    Array {
        element: Box<TypeNode>,
        dims: Vec<ArrayDim>,
        span: Span,
    },
    Wildcard {
        annotations: Vec<Annotation>,
        bound: Option<(BoundKind, Box<TypeNode>)>,
        span: Span,
    },
    /// `A & B`, in casts and type parameter bounds.
    Intersection {
        types: Vec<TypeNode>,
        span: Span,
    },
    /// `A | B`, in multi-catch parameters.
    Union {
        types: Vec<TypeNode>,
        span: Span,
    },
}

impl TypeNode {
    /// Wrap `self` in `dims` array dimensions; no-op for an empty list.
    pub fn with_dims(self, dims: Vec<ArrayDim>) -> TypeNode {
        if dims.is_empty() {
            return self;
        }
        let span = dims.iter().fold(self.span(), |acc, d| acc.merge(d.span));
        match self {
            TypeNode::Array { element, dims: mut inner, .. } => {
                inner.extend(dims);
                TypeNode::Array { element, dims: inner, span }
            }
            other => TypeNode::Array { element: Box::new(other), dims, span },
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeNode::Primitive { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub bounds: Vec<TypeNode>,
    pub span: Span,
}

// Expressions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    TextBlock,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text of the literal, quotes and suffixes included.
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    LShift,
    RShift,
    URShift,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::URShift => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 10,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::LShift | BinaryOp::RShift | BinaryOp::URShift => 8,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 7,
            BinaryOp::Eq | BinaryOp::Ne => 6,
            BinaryOp::BitAnd => 5,
            BinaryOp::BitXor => 4,
            BinaryOp::BitOr => 3,
            BinaryOp::And => 2,
            BinaryOp::Or => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    LShiftAssign,
    RShiftAssign,
    URShiftAssign,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::LShiftAssign => "<<=",
            AssignOp::RShiftAssign => ">>=",
            AssignOp::URShiftAssign => ">>>=",
        }
    }

    pub fn is_compound(&self) -> bool {
        !matches!(self, AssignOp::Assign)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodRefTarget {
    Expr(Box<Expr>),
    Type(TypeNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodRefName {
    Ident(Ident),
    /// Constructor reference `X::new`.
    New(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOfTarget {
    Type(TypeNode),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Name(Ident),
    FieldAccess {
        target: Box<Expr>,
        name: Ident,
        span: Span,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    MethodCall {
        target: Option<Box<Expr>>,
        type_args: Vec<TypeNode>,
        name: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    MethodRef {
        target: MethodRefTarget,
        type_args: Vec<TypeNode>,
        name: MethodRefName,
        span: Span,
    },
    /// Class instance creation, optionally qualified (`outer.new Inner()`).
    New {
        outer: Option<Box<Expr>>,
        type_args: Vec<TypeNode>,
        ty: ClassType,
        args: Vec<Expr>,
        body: Option<Vec<Member>>,
        span: Span,
    },
    NewArray {
        element: TypeNode,
        dim_exprs: Vec<Expr>,
        /// Trailing `[]` after the sized dimensions.
        extra_dims: Vec<ArrayDim>,
        init: Option<Box<Expr>>,
        span: Span,
    },
    ArrayInit {
        elements: Vec<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
    },
    Cast {
        ty: TypeNode,
        expr: Box<Expr>,
        span: Span,
    },
    InstanceOf {
        expr: Box<Expr>,
        target: Box<InstanceOfTarget>,
        span: Span,
    },
    Lambda {
        params: Vec<Param>,
        body: LambdaBody,
        span: Span,
    },
    Switch(Box<SwitchBlock>),
    /// `this` or `Outer.this`; the qualifier is `QualifiedName::EMPTY` when absent.
    This {
        qualifier: QualifiedName,
        span: Span,
    },
    /// `super` or `Outer.super`, only as a field access or method call target.
    Super {
        qualifier: QualifiedName,
        span: Span,
    },
    ClassLiteral {
        ty: TypeNode,
        span: Span,
    },
    Parenthesized {
        expr: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Parenthesized { expr: inner, .. } = expr {
            expr = inner;
        }
        expr
    }

    /// Whether this expression may appear on the left of an assignment.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.unparenthesized(),
            Expr::Name(_) | Expr::FieldAccess { .. } | Expr::ArrayAccess { .. }
        )
    }
}

// Patterns

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `Type name`, with optional `final` and annotations.
    Type {
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
        ty: TypeNode,
        name: Ident,
        span: Span,
    },
    /// `Type(p1, p2, ...)`, optionally followed by a binding.
    Record {
        ty: TypeNode,
        components: Vec<Pattern>,
        binding: Option<Ident>,
        span: Span,
    },
}

// Statements

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// One variable in a comma-separated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    pub dims: Vec<ArrayDim>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVarDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub ty: TypeNode,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

/// Formal parameter of a method, constructor, lambda, catch clause,
/// enhanced for, or record header.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    /// `None` only for implicitly typed lambda parameters.
    pub ty: Option<TypeNode>,
    pub varargs: bool,
    pub name: Ident,
    pub dims: Vec<ArrayDim>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Param,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Decl(LocalVarDecl),
    /// Effectively final variable or field access.
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtorCallKind {
    This,
    Super,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseItem {
    Expr(Expr),
    Pattern(Pattern),
    /// `default` inside `case null, default`.
    Default(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Default(Span),
    Case {
        items: Vec<CaseItem>,
        guard: Option<Expr>,
        span: Span,
    },
}

/// Labels sharing a statement list in a `case ...:` switch.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchGroup {
    pub labels: Vec<SwitchLabel>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleBody {
    Expr(Expr),
    Block(Block),
    Throw(Box<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchRule {
    pub label: SwitchLabel,
    pub body: RuleBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchBody {
    /// `case ...:` groups with fallthrough.
    Statements(Vec<SwitchGroup>),
    /// `case ... ->` rules.
    Rules(Vec<SwitchRule>),
}

impl SwitchBody {
    pub fn is_rules(&self) -> bool {
        matches!(self, SwitchBody::Rules(_))
    }
}

/// Selector plus body, shared by switch statements and switch expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBlock {
    pub selector: Expr,
    pub body: SwitchBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Block),
    Empty {
        span: Span,
    },
    Labeled {
        label: Ident,
        body: Box<Stmt>,
        span: Span,
    },
    Expr {
        expr: Expr,
        span: Span,
    },
    LocalVar(LocalVarDecl),
    LocalClass(Box<TypeDecl>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
        span: Span,
    },
    For {
        init: Vec<Stmt>,
        condition: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
        span: Span,
    },
    ForEach {
        var: Param,
        iterable: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    Switch(SwitchBlock),
    Return {
        value: Option<Expr>,
        span: Span,
    },
    /// The label is `Ident::EMPTY` when absent.
    Break {
        label: Ident,
        span: Span,
    },
    Continue {
        label: Ident,
        span: Span,
    },
    Throw {
        expr: Expr,
        span: Span,
    },
    Try {
        resources: Vec<Resource>,
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
        span: Span,
    },
    Synchronized {
        lock: Expr,
        body: Block,
        span: Span,
    },
    Assert {
        condition: Expr,
        message: Option<Expr>,
        span: Span,
    },
    Yield {
        value: Expr,
        span: Span,
    },
    /// Explicit constructor invocation `this(...)`, `super(...)`, `outer.super(...)`.
    CtorCall {
        kind: CtorCallKind,
        qualifier: Option<Expr>,
        type_args: Vec<TypeNode>,
        args: Vec<Expr>,
        span: Span,
    },
}

// Declarations

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeDeclKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDeclKind::Class => "class",
            TypeDeclKind::Interface => "interface",
            TypeDeclKind::Enum => "enum",
            TypeDeclKind::Record => "record",
            TypeDeclKind::Annotation => "@interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub args: Option<Vec<Expr>>,
    pub body: Option<Vec<Member>>,
    pub span: Span,
}

/// Class, interface, enum, record or annotation type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeDeclKind,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    /// Record header; empty for every other kind.
    pub record_components: Vec<Param>,
    pub extends: Vec<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub permits: Vec<TypeNode>,
    pub enum_constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl TypeDecl {
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }

    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Type(decl) => Some(decl.as_ref()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub ty: TypeNode,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub return_type: TypeNode,
    pub name: Ident,
    pub params: Vec<Param>,
    /// Legacy `int m()[]` dimensions.
    pub dims: Vec<ArrayDim>,
    pub throws: Vec<TypeNode>,
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub name: Ident,
    pub params: Vec<Param>,
    pub throws: Vec<TypeNode>,
    pub body: Block,
    /// Compact canonical record constructor (no parameter list).
    pub compact: bool,
    pub span: Span,
}

/// Element of an annotation type, `int value() default 0;`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElement {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub ty: TypeNode,
    pub name: Ident,
    pub dims: Vec<ArrayDim>,
    pub default: Option<ElementValue>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer {
        is_static: bool,
        body: Block,
        span: Span,
    },
    Type(Box<TypeDecl>),
    AnnotationElement(AnnotationElement),
}

// Compilation unit level

#[derive(Debug, Clone, PartialEq)]
pub struct PackageDecl {
    pub annotations: Vec<Annotation>,
    pub name: QualifiedName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub is_static: bool,
    pub name: QualifiedName,
    /// `import a.b.*;`
    pub wildcard: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Requires {
        is_static: bool,
        is_transitive: bool,
        module: QualifiedName,
        span: Span,
    },
    Exports {
        package: QualifiedName,
        targets: Vec<QualifiedName>,
        span: Span,
    },
    Opens {
        package: QualifiedName,
        targets: Vec<QualifiedName>,
        span: Span,
    },
    Uses {
        service: QualifiedName,
        span: Span,
    },
    Provides {
        service: QualifiedName,
        implementations: Vec<QualifiedName>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub annotations: Vec<Annotation>,
    pub open: bool,
    pub name: QualifiedName,
    pub directives: Vec<Directive>,
    pub span: Span,
}

// Spans

impl HasSpan for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for QualifiedName {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for Annotation {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for ElementValue {
    fn span(&self) -> Span {
        match self {
            ElementValue::Expr(e) => e.span(),
            ElementValue::Annotation(a) => a.span,
            ElementValue::Array(_, span) => *span,
        }
    }
}

impl HasSpan for ClassType {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for TypeNode {
    fn span(&self) -> Span {
        match self {
            TypeNode::Primitive { span, .. }
            | TypeNode::Void { span }
            | TypeNode::Var { span }
            | TypeNode::Array { span, .. }
            | TypeNode::Wildcard { span, .. }
            | TypeNode::Intersection { span, .. }
            | TypeNode::Union { span, .. } => *span,
            TypeNode::Class(c) => c.span,
        }
    }
}

impl HasSpan for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Name(ident) => ident.span,
            Expr::Switch(switch) => switch.span,
            Expr::FieldAccess { span, .. }
            | Expr::ArrayAccess { span, .. }
            | Expr::MethodCall { span, .. }
            | Expr::MethodRef { span, .. }
            | Expr::New { span, .. }
            | Expr::NewArray { span, .. }
            | Expr::ArrayInit { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Conditional { span, .. }
            | Expr::Cast { span, .. }
            | Expr::InstanceOf { span, .. }
            | Expr::Lambda { span, .. }
            | Expr::This { span, .. }
            | Expr::Super { span, .. }
            | Expr::ClassLiteral { span, .. }
            | Expr::Parenthesized { span, .. } => *span,
        }
    }
}

impl HasSpan for Pattern {
    fn span(&self) -> Span {
        match self {
            Pattern::Type { span, .. } | Pattern::Record { span, .. } => *span,
        }
    }
}

impl HasSpan for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Block(block) => block.span,
            Stmt::LocalVar(decl) => decl.span,
            Stmt::LocalClass(decl) => decl.span,
            Stmt::Switch(switch) => switch.span,
            Stmt::Empty { span }
            | Stmt::Labeled { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::DoWhile { span, .. }
            | Stmt::For { span, .. }
            | Stmt::ForEach { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Break { span, .. }
            | Stmt::Continue { span, .. }
            | Stmt::Throw { span, .. }
            | Stmt::Try { span, .. }
            | Stmt::Synchronized { span, .. }
            | Stmt::Assert { span, .. }
            | Stmt::Yield { span, .. }
            | Stmt::CtorCall { span, .. } => *span,
        }
    }
}

impl HasSpan for Member {
    fn span(&self) -> Span {
        match self {
            Member::Field(f) => f.span,
            Member::Method(m) => m.span,
            Member::Constructor(c) => c.span,
            Member::Initializer { span, .. } => *span,
            Member::Type(t) => t.span,
            Member::AnnotationElement(e) => e.span,
        }
    }
}

impl HasSpan for Directive {
    fn span(&self) -> Span {
        match self {
            Directive::Requires { span, .. }
            | Directive::Exports { span, .. }
            | Directive::Opens { span, .. }
            | Directive::Uses { span, .. }
            | Directive::Provides { span, .. } => *span,
        }
    }
}

impl HasSpan for SwitchLabel {
    fn span(&self) -> Span {
        match self {
            SwitchLabel::Default(span) | SwitchLabel::Case { span, .. } => *span,
        }
    }
}

impl HasSpan for TypeDecl {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for Block {
    fn span(&self) -> Span {
        self.span
    }
}
