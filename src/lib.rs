//! jast: a Java source parser
//!
//! Turns Java source (or an already tokenized stream) into an immutable
//! syntax tree for one compilation unit.
//!
//! ## Architecture
//!
//! - **parser**: lexer, token cursor, lookahead scanners and the recursive
//!   descent grammar
//! - **ast**: node types, generic node views, structural equality, the
//!   source printer and tree walking
//! - **config**: language level selection
//! - **batch**: parallel parsing of whole source trees
//! - **bin**: command-line interface
//!
//! ## Parsing Flow
//!
//! ```text
//! Java Source → Lexer → Tokens → Parser → CompilationUnit
//!                                  ↑
//!                    cursor snapshots for speculative scans
//! ```

pub mod ast;
pub mod batch;
pub mod config;
pub mod error;
pub mod parser;

pub use ast::CompilationUnit;
pub use config::{Config, LanguageLevel};
pub use error::{Error, Result};
pub use parser::{parse_source, parse_tokens, ParseError};

/// Read and parse a Java source file.
pub fn parse_file(path: impl AsRef<std::path::Path>, config: Config) -> Result<CompilationUnit> {
    batch::parse_file(path.as_ref(), config)
}
