//! Abstract syntax tree for Java compilation units.
//!
//! Nodes are immutable values built bottom-up by the parser. Generic traversal
//! goes through [`NodeRef`], which borrows any node and lists its children in
//! source order.

mod equality;
mod node_ref;
mod nodes;
mod printer;
mod visitor;

pub use equality::*;
pub use node_ref::*;
pub use nodes::*;
pub use printer::*;
pub use visitor::*;

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::parser::span::{HasSpan, Span};

/// Identity of the source a compilation unit was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(Arc<str>);

static ANONYMOUS_SOURCES: AtomicUsize = AtomicUsize::new(0);

impl SourceId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }

    /// A fresh identity distinct from every other source.
    pub fn anonymous() -> Self {
        let n = ANONYMOUS_SOURCES.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("<anonymous#{}>", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of a parsed file.
///
/// Equality is source identity; use [`literal_eq`] to compare content.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub source: SourceId,
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    pub module: Option<ModuleDecl>,
    pub span: Span,
}

impl CompilationUnit {
    pub fn package_name(&self) -> Option<String> {
        self.package.as_ref().map(|p| p.name.dotted())
    }

    pub fn is_module_info(&self) -> bool {
        self.module.is_some()
    }

    /// Top-level and nested type declarations keyed by dotted name, outermost first.
    pub fn type_declarations(&self) -> Vec<(String, &TypeDecl)> {
        fn collect<'a>(prefix: &str, decl: &'a TypeDecl, out: &mut Vec<(String, &'a TypeDecl)>) {
            let name = if prefix.is_empty() {
                decl.name.as_str().to_string()
            } else {
                format!("{}.{}", prefix, decl.name.as_str())
            };
            out.push((name.clone(), decl));
            for nested in decl.nested_types() {
                collect(&name, nested, out);
            }
        }

        let prefix = self.package_name().unwrap_or_default();
        let mut out = Vec::new();
        for decl in &self.types {
            collect(&prefix, decl, &mut out);
        }
        out
    }

    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef::CompilationUnit(self)
    }
}

impl PartialEq for CompilationUnit {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CompilationUnit {}

impl HasSpan for CompilationUnit {
    fn span(&self) -> Span {
        self.span
    }
}
