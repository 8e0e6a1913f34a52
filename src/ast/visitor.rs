use std::collections::HashMap;

use super::node_ref::{NodeKind, NodeRef};

/// Whole-tree traversal hooks.
pub trait Visitor<'a> {
    /// Called before a node's children; returning `false` skips them.
    fn enter(&mut self, _node: NodeRef<'a>) -> bool {
        true
    }

    /// Called after a node's children (or right after `enter` if they were skipped).
    fn leave(&mut self, _node: NodeRef<'a>) {}
}

/// Depth-first, source-order traversal of `root` and everything below it.
///
/// Uses an explicit stack, so long left-nested operator chains do not
/// exhaust the call stack.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(root: NodeRef<'a>, visitor: &mut V) {
    enum Step<'a> {
        Enter(NodeRef<'a>),
        Leave(NodeRef<'a>),
    }

    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                stack.push(Step::Leave(node));
                if visitor.enter(node) {
                    stack.extend(node.children().into_iter().rev().map(Step::Enter));
                }
            }
            Step::Leave(node) => visitor.leave(node),
        }
    }
}

struct Collector<'a, F> {
    predicate: F,
    found: Vec<NodeRef<'a>>,
}

impl<'a, F: FnMut(&NodeRef<'a>) -> bool> Visitor<'a> for Collector<'a, F> {
    fn enter(&mut self, node: NodeRef<'a>) -> bool {
        if (self.predicate)(&node) {
            self.found.push(node);
        }
        true
    }
}

/// Every node below `root` in pre-order, `root` itself excluded.
pub fn descendants(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let mut all = find_all(root, |_| true);
    all.remove(0);
    all
}

/// Nodes at or below `root` satisfying `predicate`, in pre-order.
pub fn find_all<'a>(root: NodeRef<'a>, predicate: impl FnMut(&NodeRef<'a>) -> bool) -> Vec<NodeRef<'a>> {
    let mut collector = Collector { predicate, found: Vec::new() };
    walk(root, &mut collector);
    collector.found
}

/// Nodes at or below `root` of the given kind.
pub fn collect_kind(root: NodeRef<'_>, kind: NodeKind) -> Vec<NodeRef<'_>> {
    find_all(root, |node| node.kind() == kind)
}

/// Histogram of node kinds.
#[derive(Debug, Default)]
pub struct KindCounter {
    pub counts: HashMap<NodeKind, usize>,
}

impl KindCounter {
    pub fn count(root: NodeRef<'_>) -> Self {
        let mut counter = Self::default();
        walk(root, &mut counter);
        counter
    }

    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<'a> Visitor<'a> for KindCounter {
    fn enter(&mut self, node: NodeRef<'a>) -> bool {
        *self.counts.entry(node.kind()).or_insert(0) += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::parser::span::Span;

    fn name(text: &str) -> Expr {
        Expr::Name(Ident::new(text, Span::DUMMY))
    }

    fn add(left: Expr, right: Expr) -> Expr {
        Expr::Binary { op: BinaryOp::Add, left: Box::new(left), right: Box::new(right), span: Span::DUMMY }
    }

    struct Order(Vec<String>);

    impl<'a> Visitor<'a> for Order {
        fn enter(&mut self, node: NodeRef<'a>) -> bool {
            if let NodeRef::Expr(Expr::Name(ident)) = node {
                self.0.push(format!("+{}", ident.as_str()));
            }
            true
        }

        fn leave(&mut self, node: NodeRef<'a>) {
            if let NodeRef::Expr(Expr::Binary { .. }) = node {
                self.0.push("-bin".to_string());
            }
        }
    }

    #[test]
    fn walk_is_source_ordered() {
        let expr = add(add(name("a"), name("b")), name("c"));
        let mut order = Order(Vec::new());
        walk(NodeRef::Expr(&expr), &mut order);
        assert_eq!(order.0, vec!["+a", "+b", "-bin", "+c", "-bin"]);
    }

    #[test]
    fn descendants_excludes_root() {
        let expr = add(name("a"), name("b"));
        let nodes = descendants(NodeRef::Expr(&expr));
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.kind() == NodeKind::Name));
    }

    #[test]
    fn deep_chains_do_not_overflow() {
        let mut expr = name("x0");
        for i in 1..20_000 {
            expr = add(expr, name(&format!("x{}", i)));
        }
        let counter = KindCounter::count(NodeRef::Expr(&expr));
        assert_eq!(counter.get(NodeKind::Name), 20_000);
        assert_eq!(counter.get(NodeKind::Binary), 19_999);
        // Dropping a deeply nested Box chain recurses; leak it instead.
        std::mem::forget(expr);
    }
}
