//! Deep structural ("literal") equality.
//!
//! Spans are ignored. Two nodes are literally equal when they have the same
//! kind, the same node-local attributes and pairwise literally equal children.

use super::node_ref::NodeRef;
use super::nodes::*;

/// Deep structural comparison of two nodes. Never fails; any mismatch is `false`.
pub fn literal_eq(a: NodeRef<'_>, b: NodeRef<'_>) -> bool {
    if a.kind() != b.kind() || attributes(a) != attributes(b) {
        return false;
    }
    let left = a.children();
    let right = b.children();
    left.len() == right.len() && left.into_iter().zip(right).all(|(l, r)| literal_eq(l, r))
}

/// Node-local attributes that children do not capture: names, operators,
/// literal text, modifiers and flags for optional parts.
pub fn attributes(node: NodeRef<'_>) -> Vec<String> {
    let mut attrs = Vec::new();
    match node {
        NodeRef::CompilationUnit(unit) => {
            attrs.push(flag("package", unit.package.is_some()));
        }
        NodeRef::Import(import) => {
            attrs.push(flag("static", import.is_static));
            attrs.push(flag("wildcard", import.wildcard));
        }
        NodeRef::Module(module) => attrs.push(flag("open", module.open)),
        NodeRef::Directive(Directive::Requires { is_static, is_transitive, .. }) => {
            attrs.push(flag("static", *is_static));
            attrs.push(flag("transitive", *is_transitive));
        }
        NodeRef::TypeDecl(decl) => {
            modifiers(&mut attrs, &decl.modifiers);
            attrs.push(format!("extends:{}", decl.extends.len()));
            attrs.push(format!("implements:{}", decl.implements.len()));
            attrs.push(format!("permits:{}", decl.permits.len()));
        }
        NodeRef::EnumConstant(constant) => {
            attrs.push(flag("args", constant.args.is_some()));
            attrs.push(flag("body", constant.body.is_some()));
        }
        NodeRef::Member(member) => match member {
            Member::Field(field) => modifiers(&mut attrs, &field.modifiers),
            Member::Method(method) => {
                modifiers(&mut attrs, &method.modifiers);
                attrs.push(format!("throws:{}", method.throws.len()));
                attrs.push(flag("body", method.body.is_some()));
            }
            Member::Constructor(ctor) => {
                modifiers(&mut attrs, &ctor.modifiers);
                attrs.push(format!("throws:{}", ctor.throws.len()));
                attrs.push(flag("compact", ctor.compact));
            }
            Member::Initializer { is_static, .. } => attrs.push(flag("static", *is_static)),
            Member::Type(decl) => return attributes(NodeRef::TypeDecl(decl)),
            Member::AnnotationElement(element) => {
                modifiers(&mut attrs, &element.modifiers);
                attrs.push(flag("default", element.default.is_some()));
            }
        },
        NodeRef::Param(param) => {
            modifiers(&mut attrs, &param.modifiers);
            attrs.push(flag("varargs", param.varargs));
        }
        NodeRef::LocalVar(decl) => modifiers(&mut attrs, &decl.modifiers),
        NodeRef::Type(TypeNode::Primitive { kind, .. }) => attrs.push(kind.as_str().to_string()),
        NodeRef::Type(TypeNode::Wildcard { bound, .. }) => attrs.push(match bound {
            None => "unbounded".to_string(),
            Some((BoundKind::Extends, _)) => "extends".to_string(),
            Some((BoundKind::Super, _)) => "super".to_string(),
        }),
        NodeRef::Type(TypeNode::Class(class)) => attrs.push(type_args_shape(class)),
        NodeRef::ClassType(class) => attrs.push(type_args_shape(class)),
        NodeRef::Expr(expr) => expr_attributes(&mut attrs, expr),
        NodeRef::Pattern(Pattern::Type { modifiers: mods, .. }) => modifiers(&mut attrs, mods),
        NodeRef::Pattern(Pattern::Record { binding, .. }) => attrs.push(flag("binding", binding.is_some())),
        NodeRef::Stmt(stmt) => match stmt {
            Stmt::LocalVar(decl) => modifiers(&mut attrs, &decl.modifiers),
            Stmt::If { else_branch, .. } => attrs.push(flag("else", else_branch.is_some())),
            Stmt::For { init, condition, update, .. } => {
                attrs.push(format!("init:{}", init.len()));
                attrs.push(flag("condition", condition.is_some()));
                attrs.push(format!("update:{}", update.len()));
            }
            Stmt::Break { label, .. } | Stmt::Continue { label, .. } => attrs.push(label.as_str().to_string()),
            Stmt::Assert { message, .. } => attrs.push(flag("message", message.is_some())),
            Stmt::Try { resources, finally, .. } => {
                attrs.push(format!("resources:{}", resources.len()));
                attrs.push(flag("finally", finally.is_some()));
            }
            Stmt::Switch(switch) => attrs.push(flag("rules", switch.body.is_rules())),
            Stmt::CtorCall { kind, qualifier, .. } => {
                attrs.push(format!("{:?}", kind));
                attrs.push(flag("qualified", qualifier.is_some()));
            }
            _ => {}
        },
        NodeRef::SwitchLabel(SwitchLabel::Case { guard, .. }) => attrs.push(flag("guard", guard.is_some())),
        NodeRef::Ident(ident) => attrs.push(ident.as_str().to_string()),
        _ => {}
    }
    attrs
}

fn expr_attributes(attrs: &mut Vec<String>, expr: &Expr) {
    match expr {
        Expr::Literal(literal) => {
            attrs.push(format!("{:?}", literal.kind));
            attrs.push(literal.text.clone());
        }
        Expr::Name(ident) => attrs.push(ident.as_str().to_string()),
        Expr::MethodCall { target, type_args, .. } => {
            attrs.push(flag("target", target.is_some()));
            attrs.push(format!("type_args:{}", type_args.len()));
        }
        Expr::MethodRef { target, name, .. } => {
            attrs.push(match target {
                MethodRefTarget::Expr(_) => "expr".to_string(),
                MethodRefTarget::Type(_) => "type".to_string(),
            });
            attrs.push(flag("new", matches!(name, MethodRefName::New(_))));
        }
        Expr::New { outer, type_args, args, body, .. } => {
            attrs.push(flag("outer", outer.is_some()));
            attrs.push(format!("type_args:{}", type_args.len()));
            attrs.push(format!("args:{}", args.len()));
            attrs.push(flag("body", body.is_some()));
        }
        Expr::NewArray { dim_exprs, init, .. } => {
            attrs.push(format!("dims:{}", dim_exprs.len()));
            attrs.push(flag("init", init.is_some()));
        }
        Expr::Unary { op, .. } => attrs.push(format!("{:?}", op)),
        Expr::Binary { op, .. } => attrs.push(op.as_str().to_string()),
        Expr::Assign { op, .. } => attrs.push(op.as_str().to_string()),
        Expr::InstanceOf { target, .. } => {
            attrs.push(flag("pattern", matches!(**target, InstanceOfTarget::Pattern(_))));
        }
        Expr::Lambda { body, .. } => attrs.push(flag("block", matches!(body, LambdaBody::Block(_)))),
        Expr::Switch(switch) => attrs.push(flag("rules", switch.body.is_rules())),
        _ => {}
    }
}

fn type_args_shape(class: &ClassType) -> String {
    match &class.type_args {
        None => "raw".to_string(),
        Some(args) if args.is_empty() => "diamond".to_string(),
        Some(args) => format!("args:{}", args.len()),
    }
}

fn modifiers(attrs: &mut Vec<String>, modifiers: &[Modifier]) {
    attrs.extend(modifiers.iter().map(|m| m.as_str().to_string()));
}

fn flag(name: &str, value: bool) -> String {
    format!("{}={}", name, value)
}
