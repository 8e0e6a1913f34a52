use std::fmt;

use super::equality::attributes;
use super::node_ref::NodeRef;
use super::nodes::*;
use super::visitor::{walk, Visitor};
use super::CompilationUnit;

/// Reconstructs source-like text from the AST.
///
/// Output is normalized (spacing, one statement per line, modifiers after
/// annotations) and is not byte-identical to the original. Expressions, types
/// and patterns re-parse to literally equal trees.
pub struct SourcePrinter {
    indent_level: usize,
    output: String,
    at_line_start: bool,
    /// Single-line mode used by the `Display` impls.
    inline: bool,
}

impl Default for SourcePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourcePrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
            at_line_start: true,
            inline: false,
        }
    }

    fn inline() -> Self {
        Self { inline: true, ..Self::new() }
    }

    pub fn print_unit(&mut self, unit: &CompilationUnit) -> String {
        self.reset();
        self.unit(unit);
        self.finish()
    }

    pub fn print_type_decl(&mut self, decl: &TypeDecl) -> String {
        self.reset();
        self.type_decl(decl);
        self.finish()
    }

    pub fn print_member(&mut self, member: &Member) -> String {
        self.reset();
        self.member(member);
        self.finish()
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        self.reset();
        self.stmt(stmt);
        self.finish()
    }

    fn reset(&mut self) {
        self.output.clear();
        self.indent_level = 0;
        self.at_line_start = true;
    }

    fn finish(&mut self) -> String {
        let mut out = std::mem::take(&mut self.output);
        if !self.inline && !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    fn indent(&mut self) {
        self.indent_level += 4;
    }

    fn dedent(&mut self) {
        if self.indent_level >= 4 {
            self.indent_level -= 4;
        }
    }

    fn write(&mut self, s: &str) {
        if self.at_line_start && !self.inline {
            for _ in 0..self.indent_level {
                self.output.push(' ');
            }
        }
        self.at_line_start = false;
        self.output.push_str(s);
    }

    fn line_break(&mut self) {
        if self.inline {
            self.output.push(' ');
        } else {
            self.output.push('\n');
            self.at_line_start = true;
        }
    }

    fn list<T>(&mut self, items: &[T], separator: &str, mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            each(self, item);
        }
    }

    // Names and annotations

    fn ident(&mut self, ident: &Ident) {
        self.write(ident.as_str());
    }

    fn qualified(&mut self, name: &QualifiedName) {
        self.write(&name.dotted());
    }

    fn annotation(&mut self, annotation: &Annotation) {
        self.write("@");
        self.qualified(&annotation.name);
        if !annotation.args.is_empty() {
            self.write("(");
            self.list(&annotation.args, ", ", |p, arg| match arg {
                AnnotationArg::Value(value) => p.element_value(value),
                AnnotationArg::Named(key, value) => {
                    p.ident(key);
                    p.write(" = ");
                    p.element_value(value);
                }
            });
            self.write(")");
        }
    }

    fn element_value(&mut self, value: &ElementValue) {
        match value {
            ElementValue::Expr(expr) => self.expr(expr),
            ElementValue::Annotation(annotation) => self.annotation(annotation),
            ElementValue::Array(values, _) => {
                self.write("{");
                self.list(values, ", ", Self::element_value);
                self.write("}");
            }
        }
    }

    /// Annotations followed by a space each, on the same line.
    fn inline_annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.annotation(annotation);
            self.write(" ");
        }
    }

    /// Declaration annotations, one per line.
    fn decl_annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.annotation(annotation);
            self.line_break();
        }
    }

    fn modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.write(modifier.as_str());
            self.write(" ");
        }
    }

    // Types

    fn ty(&mut self, ty: &TypeNode) {
        match ty {
            TypeNode::Primitive { annotations, kind, .. } => {
                self.inline_annotations(annotations);
                self.write(kind.as_str());
            }
            TypeNode::Void { .. } => self.write("void"),
            TypeNode::Var { .. } => self.write("var"),
            TypeNode::Class(class) => self.class_type(class),
            TypeNode::Array { element, dims, .. } => {
                self.ty(element);
                self.dims(dims);
            }
            TypeNode::Wildcard { annotations, bound, .. } => {
                self.inline_annotations(annotations);
                self.write("?");
                match bound {
                    Some((BoundKind::Extends, bound)) => {
                        self.write(" extends ");
                        self.ty(bound);
                    }
                    Some((BoundKind::Super, bound)) => {
                        self.write(" super ");
                        self.ty(bound);
                    }
                    None => {}
                }
            }
            TypeNode::Intersection { types, .. } => self.list(types, " & ", Self::ty),
            TypeNode::Union { types, .. } => self.list(types, " | ", Self::ty),
        }
    }

    fn class_type(&mut self, class: &ClassType) {
        if let Some(scope) = &class.scope {
            self.class_type(scope);
            self.write(".");
        }
        self.inline_annotations(&class.annotations);
        self.ident(&class.name);
        if let Some(args) = &class.type_args {
            self.type_args(args);
        }
    }

    fn type_args(&mut self, args: &[TypeNode]) {
        self.write("<");
        self.list(args, ", ", Self::ty);
        self.write(">");
    }

    fn dims(&mut self, dims: &[ArrayDim]) {
        for dim in dims {
            if !dim.annotations.is_empty() {
                self.write(" ");
                self.list(&dim.annotations, " ", Self::annotation);
                self.write(" ");
            }
            self.write("[]");
        }
    }

    fn type_params(&mut self, params: &[TypeParam]) {
        if params.is_empty() {
            return;
        }
        self.write("<");
        self.list(params, ", ", Self::type_param);
        self.write(">");
    }

    fn type_param(&mut self, param: &TypeParam) {
        self.inline_annotations(&param.annotations);
        self.ident(&param.name);
        if !param.bounds.is_empty() {
            self.write(" extends ");
            self.list(&param.bounds, " & ", Self::ty);
        }
    }

    // Patterns and parameters

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Type { modifiers, annotations, ty, name, .. } => {
                self.inline_annotations(annotations);
                self.modifiers(modifiers);
                self.ty(ty);
                self.write(" ");
                self.ident(name);
            }
            Pattern::Record { ty, components, binding, .. } => {
                self.ty(ty);
                self.write("(");
                self.list(components, ", ", Self::pattern);
                self.write(")");
                if let Some(binding) = binding {
                    self.write(" ");
                    self.ident(binding);
                }
            }
        }
    }

    fn param(&mut self, param: &Param) {
        self.inline_annotations(&param.annotations);
        self.modifiers(&param.modifiers);
        if let Some(ty) = &param.ty {
            self.ty(ty);
            if param.varargs {
                self.write("...");
            }
            self.write(" ");
        }
        self.ident(&param.name);
        self.dims(&param.dims);
    }

    fn params(&mut self, params: &[Param]) {
        self.write("(");
        self.list(params, ", ", Self::param);
        self.write(")");
    }

    // Expressions

    fn args(&mut self, args: &[Expr]) {
        self.write("(");
        self.list(args, ", ", Self::expr);
        self.write(")");
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => self.write(&literal.text),
            Expr::Name(ident) => self.ident(ident),
            Expr::FieldAccess { target, name, .. } => {
                self.expr(target);
                self.write(".");
                self.ident(name);
            }
            Expr::ArrayAccess { array, index, .. } => {
                self.expr(array);
                self.write("[");
                self.expr(index);
                self.write("]");
            }
            Expr::MethodCall { target, type_args, name, args, .. } => {
                if let Some(target) = target {
                    self.expr(target);
                    self.write(".");
                }
                if !type_args.is_empty() {
                    self.type_args(type_args);
                }
                self.ident(name);
                self.args(args);
            }
            Expr::MethodRef { target, type_args, name, .. } => {
                match target {
                    MethodRefTarget::Expr(expr) => self.expr(expr),
                    MethodRefTarget::Type(ty) => self.ty(ty),
                }
                self.write("::");
                if !type_args.is_empty() {
                    self.type_args(type_args);
                }
                match name {
                    MethodRefName::Ident(ident) => self.ident(ident),
                    MethodRefName::New(_) => self.write("new"),
                }
            }
            Expr::New { outer, type_args, ty, args, body, .. } => {
                if let Some(outer) = outer {
                    self.expr(outer);
                    self.write(".");
                }
                self.write("new ");
                if !type_args.is_empty() {
                    self.type_args(type_args);
                    self.write(" ");
                }
                self.class_type(ty);
                self.args(args);
                if let Some(body) = body {
                    self.write(" ");
                    self.class_body(&[], body);
                }
            }
            Expr::NewArray { element, dim_exprs, extra_dims, init, .. } => {
                self.write("new ");
                self.ty(element);
                for dim in dim_exprs {
                    self.write("[");
                    self.expr(dim);
                    self.write("]");
                }
                self.dims(extra_dims);
                if let Some(init) = init {
                    self.write(" ");
                    self.expr(init);
                }
            }
            Expr::ArrayInit { elements, .. } => {
                self.write("{");
                self.list(elements, ", ", Self::expr);
                self.write("}");
            }
            Expr::Unary { op, operand, .. } => {
                if op.is_postfix() {
                    self.expr(operand);
                    self.write(op.as_str());
                } else {
                    self.write(op.as_str());
                    if starts_with_sign_of(op, operand) {
                        self.write(" ");
                    }
                    self.expr(operand);
                }
            }
            Expr::Binary { op, left, right, .. } => {
                self.expr(left);
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.expr(right);
            }
            Expr::Assign { op, target, value, .. } => {
                self.expr(target);
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.expr(value);
            }
            Expr::Conditional { condition, then_expr, else_expr, .. } => {
                self.expr(condition);
                self.write(" ? ");
                self.expr(then_expr);
                self.write(" : ");
                self.expr(else_expr);
            }
            Expr::Cast { ty, expr, .. } => {
                self.write("(");
                self.ty(ty);
                self.write(") ");
                self.expr(expr);
            }
            Expr::InstanceOf { expr, target, .. } => {
                self.expr(expr);
                self.write(" instanceof ");
                match &**target {
                    InstanceOfTarget::Type(ty) => self.ty(ty),
                    InstanceOfTarget::Pattern(pattern) => self.pattern(pattern),
                }
            }
            Expr::Lambda { params, body, .. } => {
                self.params(params);
                self.write(" -> ");
                match body {
                    LambdaBody::Expr(expr) => self.expr(expr),
                    LambdaBody::Block(block) => self.block(block),
                }
            }
            Expr::Switch(switch) => self.switch(switch),
            Expr::This { qualifier, .. } => {
                if !qualifier.is_empty() {
                    self.qualified(qualifier);
                    self.write(".");
                }
                self.write("this");
            }
            Expr::Super { qualifier, .. } => {
                if !qualifier.is_empty() {
                    self.qualified(qualifier);
                    self.write(".");
                }
                self.write("super");
            }
            Expr::ClassLiteral { ty, .. } => {
                self.ty(ty);
                self.write(".class");
            }
            Expr::Parenthesized { expr, .. } => {
                self.write("(");
                self.expr(expr);
                self.write(")");
            }
        }
    }

    // Statements

    fn block(&mut self, block: &Block) {
        self.write("{");
        if block.stmts.is_empty() {
            self.write("}");
            return;
        }
        self.indent();
        for stmt in &block.stmts {
            self.line_break();
            self.stmt(stmt);
        }
        self.dedent();
        self.line_break();
        self.write("}");
    }

    fn local_var(&mut self, decl: &LocalVarDecl) {
        self.inline_annotations(&decl.annotations);
        self.modifiers(&decl.modifiers);
        self.ty(&decl.ty);
        self.write(" ");
        self.list(&decl.declarators, ", ", Self::declarator);
    }

    fn declarator(&mut self, declarator: &Declarator) {
        self.ident(&declarator.name);
        self.dims(&declarator.dims);
        if let Some(init) = &declarator.init {
            self.write(" = ");
            self.expr(init);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Empty { .. } => self.write(";"),
            Stmt::Labeled { label, body, .. } => {
                self.ident(label);
                self.write(": ");
                self.stmt(body);
            }
            Stmt::Expr { expr, .. } => {
                self.expr(expr);
                self.write(";");
            }
            Stmt::LocalVar(decl) => {
                self.local_var(decl);
                self.write(";");
            }
            Stmt::LocalClass(decl) => self.type_decl(decl),
            Stmt::If { condition, then_branch, else_branch, .. } => {
                self.write("if (");
                self.expr(condition);
                self.write(") ");
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.write(" else ");
                    self.stmt(else_branch);
                }
            }
            Stmt::While { condition, body, .. } => {
                self.write("while (");
                self.expr(condition);
                self.write(") ");
                self.stmt(body);
            }
            Stmt::DoWhile { body, condition, .. } => {
                self.write("do ");
                self.stmt(body);
                self.write(" while (");
                self.expr(condition);
                self.write(");");
            }
            Stmt::For { init, condition, update, body, .. } => {
                self.write("for (");
                self.list(init, ", ", |p, s| match s {
                    Stmt::LocalVar(decl) => p.local_var(decl),
                    Stmt::Expr { expr, .. } => p.expr(expr),
                    other => p.stmt(other),
                });
                self.write(";");
                if let Some(condition) = condition {
                    self.write(" ");
                    self.expr(condition);
                }
                self.write(";");
                if !update.is_empty() {
                    self.write(" ");
                    self.list(update, ", ", Self::expr);
                }
                self.write(") ");
                self.stmt(body);
            }
            Stmt::ForEach { var, iterable, body, .. } => {
                self.write("for (");
                self.param(var);
                self.write(" : ");
                self.expr(iterable);
                self.write(") ");
                self.stmt(body);
            }
            Stmt::Switch(switch) => self.switch(switch),
            Stmt::Return { value, .. } => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.expr(value);
                }
                self.write(";");
            }
            Stmt::Break { label, .. } | Stmt::Continue { label, .. } => {
                self.write(if matches!(stmt, Stmt::Break { .. }) { "break" } else { "continue" });
                if !label.is_empty() {
                    self.write(" ");
                    self.ident(label);
                }
                self.write(";");
            }
            Stmt::Throw { expr, .. } => {
                self.write("throw ");
                self.expr(expr);
                self.write(";");
            }
            Stmt::Try { resources, body, catches, finally, .. } => {
                self.write("try ");
                if !resources.is_empty() {
                    self.write("(");
                    self.list(resources, "; ", |p, r| match r {
                        Resource::Decl(decl) => p.local_var(decl),
                        Resource::Expr(expr) => p.expr(expr),
                    });
                    self.write(") ");
                }
                self.block(body);
                for clause in catches {
                    self.write(" catch (");
                    self.param(&clause.param);
                    self.write(") ");
                    self.block(&clause.body);
                }
                if let Some(finally) = finally {
                    self.write(" finally ");
                    self.block(finally);
                }
            }
            Stmt::Synchronized { lock, body, .. } => {
                self.write("synchronized (");
                self.expr(lock);
                self.write(") ");
                self.block(body);
            }
            Stmt::Assert { condition, message, .. } => {
                self.write("assert ");
                self.expr(condition);
                if let Some(message) = message {
                    self.write(" : ");
                    self.expr(message);
                }
                self.write(";");
            }
            Stmt::Yield { value, .. } => {
                self.write("yield ");
                self.expr(value);
                self.write(";");
            }
            Stmt::CtorCall { kind, qualifier, type_args, args, .. } => {
                if let Some(qualifier) = qualifier {
                    self.expr(qualifier);
                    self.write(".");
                }
                if !type_args.is_empty() {
                    self.type_args(type_args);
                }
                self.write(match kind {
                    CtorCallKind::This => "this",
                    CtorCallKind::Super => "super",
                });
                self.args(args);
                self.write(";");
            }
        }
    }

    fn switch(&mut self, switch: &SwitchBlock) {
        self.write("switch (");
        self.expr(&switch.selector);
        self.write(") {");
        self.indent();
        match &switch.body {
            SwitchBody::Statements(groups) => {
                for group in groups {
                    for label in &group.labels {
                        self.line_break();
                        self.switch_label(label);
                        self.write(":");
                    }
                    self.indent();
                    for stmt in &group.stmts {
                        self.line_break();
                        self.stmt(stmt);
                    }
                    self.dedent();
                }
            }
            SwitchBody::Rules(rules) => {
                for rule in rules {
                    self.line_break();
                    self.switch_label(&rule.label);
                    self.write(" -> ");
                    match &rule.body {
                        RuleBody::Expr(expr) => {
                            self.expr(expr);
                            self.write(";");
                        }
                        RuleBody::Block(block) => self.block(block),
                        RuleBody::Throw(stmt) => self.stmt(stmt),
                    }
                }
            }
        }
        self.dedent();
        self.line_break();
        self.write("}");
    }

    fn switch_label(&mut self, label: &SwitchLabel) {
        match label {
            SwitchLabel::Default(_) => self.write("default"),
            SwitchLabel::Case { items, guard, .. } => {
                self.write("case ");
                self.list(items, ", ", |p, item| match item {
                    CaseItem::Expr(expr) => p.expr(expr),
                    CaseItem::Pattern(pattern) => p.pattern(pattern),
                    CaseItem::Default(_) => p.write("default"),
                });
                if let Some(guard) = guard {
                    self.write(" when ");
                    self.expr(guard);
                }
            }
        }
    }

    // Declarations

    fn unit(&mut self, unit: &CompilationUnit) {
        let mut first = true;
        if let Some(package) = &unit.package {
            self.decl_annotations(&package.annotations);
            self.write("package ");
            self.qualified(&package.name);
            self.write(";");
            self.line_break();
            first = false;
        }
        if !unit.imports.is_empty() {
            if !first {
                self.line_break();
            }
            for import in &unit.imports {
                self.write("import ");
                if import.is_static {
                    self.write("static ");
                }
                self.qualified(&import.name);
                if import.wildcard {
                    self.write(".*");
                }
                self.write(";");
                self.line_break();
            }
            first = false;
        }
        if let Some(module) = &unit.module {
            if !first {
                self.line_break();
            }
            self.module(module);
            self.line_break();
        }
        for decl in &unit.types {
            if !first {
                self.line_break();
            }
            self.type_decl(decl);
            self.line_break();
            first = false;
        }
    }

    fn module(&mut self, module: &ModuleDecl) {
        self.decl_annotations(&module.annotations);
        if module.open {
            self.write("open ");
        }
        self.write("module ");
        self.qualified(&module.name);
        self.write(" {");
        self.indent();
        for directive in &module.directives {
            self.line_break();
            self.directive(directive);
        }
        self.dedent();
        self.line_break();
        self.write("}");
    }

    fn directive(&mut self, directive: &Directive) {
        match directive {
            Directive::Requires { is_static, is_transitive, module, .. } => {
                self.write("requires ");
                if *is_static {
                    self.write("static ");
                }
                if *is_transitive {
                    self.write("transitive ");
                }
                self.qualified(module);
            }
            Directive::Exports { package, targets, .. } | Directive::Opens { package, targets, .. } => {
                self.write(if matches!(directive, Directive::Exports { .. }) { "exports " } else { "opens " });
                self.qualified(package);
                if !targets.is_empty() {
                    self.write(" to ");
                    self.list(targets, ", ", Self::qualified);
                }
            }
            Directive::Uses { service, .. } => {
                self.write("uses ");
                self.qualified(service);
            }
            Directive::Provides { service, implementations, .. } => {
                self.write("provides ");
                self.qualified(service);
                self.write(" with ");
                self.list(implementations, ", ", Self::qualified);
            }
        }
        self.write(";");
    }

    fn type_decl(&mut self, decl: &TypeDecl) {
        self.decl_annotations(&decl.annotations);
        self.modifiers(&decl.modifiers);
        self.write(decl.kind.keyword());
        self.write(" ");
        self.ident(&decl.name);
        self.type_params(&decl.type_params);
        if decl.kind == TypeDeclKind::Record {
            self.params(&decl.record_components);
        }
        if !decl.extends.is_empty() {
            self.write(" extends ");
            self.list(&decl.extends, ", ", Self::ty);
        }
        if !decl.implements.is_empty() {
            self.write(" implements ");
            self.list(&decl.implements, ", ", Self::ty);
        }
        if !decl.permits.is_empty() {
            self.write(" permits ");
            self.list(&decl.permits, ", ", Self::ty);
        }
        self.write(" ");
        self.class_body(&decl.enum_constants, &decl.members);
    }

    fn class_body(&mut self, constants: &[EnumConstant], members: &[Member]) {
        self.write("{");
        if constants.is_empty() && members.is_empty() {
            self.write("}");
            return;
        }
        self.indent();
        for (i, constant) in constants.iter().enumerate() {
            self.line_break();
            self.enum_constant(constant);
            if i + 1 < constants.len() {
                self.write(",");
            } else if !members.is_empty() {
                self.write(";");
            }
        }
        for member in members {
            self.line_break();
            self.member(member);
        }
        self.dedent();
        self.line_break();
        self.write("}");
    }

    fn enum_constant(&mut self, constant: &EnumConstant) {
        self.inline_annotations(&constant.annotations);
        self.ident(&constant.name);
        if let Some(args) = &constant.args {
            self.args(args);
        }
        if let Some(body) = &constant.body {
            self.write(" ");
            self.class_body(&[], body);
        }
    }

    fn throws(&mut self, throws: &[TypeNode]) {
        if !throws.is_empty() {
            self.write(" throws ");
            self.list(throws, ", ", Self::ty);
        }
    }

    fn member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => {
                self.decl_annotations(&field.annotations);
                self.modifiers(&field.modifiers);
                self.ty(&field.ty);
                self.write(" ");
                self.list(&field.declarators, ", ", Self::declarator);
                self.write(";");
            }
            Member::Method(method) => {
                self.decl_annotations(&method.annotations);
                self.modifiers(&method.modifiers);
                if !method.type_params.is_empty() {
                    self.type_params(&method.type_params);
                    self.write(" ");
                }
                self.ty(&method.return_type);
                self.write(" ");
                self.ident(&method.name);
                self.params(&method.params);
                self.dims(&method.dims);
                self.throws(&method.throws);
                match &method.body {
                    Some(body) => {
                        self.write(" ");
                        self.block(body);
                    }
                    None => self.write(";"),
                }
            }
            Member::Constructor(ctor) => {
                self.decl_annotations(&ctor.annotations);
                self.modifiers(&ctor.modifiers);
                if !ctor.type_params.is_empty() {
                    self.type_params(&ctor.type_params);
                    self.write(" ");
                }
                self.ident(&ctor.name);
                if !ctor.compact {
                    self.params(&ctor.params);
                }
                self.throws(&ctor.throws);
                self.write(" ");
                self.block(&ctor.body);
            }
            Member::Initializer { is_static, body, .. } => {
                if *is_static {
                    self.write("static ");
                }
                self.block(body);
            }
            Member::Type(decl) => self.type_decl(decl),
            Member::AnnotationElement(element) => {
                self.decl_annotations(&element.annotations);
                self.modifiers(&element.modifiers);
                self.ty(&element.ty);
                self.write(" ");
                self.ident(&element.name);
                self.write("()");
                self.dims(&element.dims);
                if let Some(default) = &element.default {
                    self.write(" default ");
                    self.element_value(default);
                }
                self.write(";");
            }
        }
    }
}

/// `- -x` must not print as `--x`.
fn starts_with_sign_of(op: &UnaryOp, operand: &Expr) -> bool {
    let sign = op.as_str().as_bytes()[0];
    match operand {
        Expr::Unary { op: inner, .. } if !inner.is_postfix() => inner.as_str().as_bytes()[0] == sign,
        _ => false,
    }
}

fn inline_text(f: impl FnOnce(&mut SourcePrinter)) -> String {
    let mut printer = SourcePrinter::inline();
    f(&mut printer);
    printer.output
}

macro_rules! display_via_printer {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&inline_text(|p| p.$method(self)))
                }
            }
        )*
    };
}

display_via_printer! {
    Ident => ident,
    QualifiedName => qualified,
    Annotation => annotation,
    ElementValue => element_value,
    TypeNode => ty,
    ClassType => class_type,
    TypeParam => type_param,
    Param => param,
    Pattern => pattern,
    Expr => expr,
    Stmt => stmt,
    Block => block,
    SwitchLabel => switch_label,
    Directive => directive,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.name)
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SourcePrinter::new().print_unit(self))
    }
}

/// Indented outline of node kinds and attributes, one node per line.
pub fn dump_tree(root: NodeRef<'_>) -> String {
    struct Dumper {
        depth: usize,
        output: String,
    }

    impl<'a> Visitor<'a> for Dumper {
        fn enter(&mut self, node: NodeRef<'a>) -> bool {
            for _ in 0..self.depth {
                self.output.push_str("  ");
            }
            self.output.push_str(&format!("{:?}", node.kind()));
            let attrs = attributes(node);
            if !attrs.is_empty() {
                self.output.push_str(" [");
                self.output.push_str(&attrs.join(", "));
                self.output.push(']');
            }
            self.output.push_str(&format!(" @{}\n", node.span().start));
            self.depth += 1;
            true
        }

        fn leave(&mut self, _node: NodeRef<'a>) {
            self.depth -= 1;
        }
    }

    let mut dumper = Dumper { depth: 0, output: String::new() };
    walk(root, &mut dumper);
    dumper.output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::span::Span;

    fn name(text: &str) -> Expr {
        Expr::Name(Ident::new(text, Span::DUMMY))
    }

    #[test]
    fn nested_negation_keeps_space() {
        let expr = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Expr::Unary { op: UnaryOp::Minus, operand: Box::new(name("x")), span: Span::DUMMY }),
            span: Span::DUMMY,
        };
        assert_eq!(expr.to_string(), "- -x");
    }

    #[test]
    fn block_prints_inline_in_display() {
        let block = Block {
            stmts: vec![
                Stmt::Expr { expr: name("a"), span: Span::DUMMY },
                Stmt::Return { value: None, span: Span::DUMMY },
            ],
            span: Span::DUMMY,
        };
        assert_eq!(block.to_string(), "{ a; return; }");
    }

    #[test]
    fn statement_printer_indents() {
        let stmt = Stmt::While {
            condition: name("running"),
            body: Box::new(Stmt::Block(Block {
                stmts: vec![Stmt::Break { label: Ident::EMPTY, span: Span::DUMMY }],
                span: Span::DUMMY,
            })),
            span: Span::DUMMY,
        };
        assert_eq!(SourcePrinter::new().print_stmt(&stmt), "while (running) {\n    break;\n}\n");
    }
}
