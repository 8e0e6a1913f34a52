//! Type patterns and record patterns.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenKind;
use super::parser::Parser;
use crate::ast::*;
use crate::config::LanguageLevel;

impl<'t> Parser<'t> {
    /// A top-level pattern, as after `instanceof` or in a case label.
    pub(super) fn pattern(&mut self) -> ParseResult<Pattern> {
        self.pattern_at(false)
    }

    /// `nested` patterns are record components, where `var x` is allowed.
    fn pattern_at(&mut self, nested: bool) -> ParseResult<Pattern> {
        let start = self.cursor.location();
        let modifiers = self.modifiers()?;
        if let Some(modifier) = modifiers.keywords.iter().find(|m| **m != Modifier::Final) {
            return Err(ParseError::grammar(
                format!("modifier '{}' is not allowed in a pattern", modifier.as_str()),
                modifiers.start.unwrap_or(start),
            ));
        }
        let ty = self.parse_type()?;

        if self.cursor.check(TokenKind::LParen) {
            self.require(LanguageLevel::Java21, "record patterns", start)?;
            if !modifiers.is_empty() {
                return Err(ParseError::grammar("a record pattern cannot have modifiers", start));
            }
            if matches!(ty, TypeNode::Var { .. }) {
                return Err(ParseError::grammar("'var' is not allowed as a record pattern type", start));
            }
            self.cursor.advance();
            let mut components = Vec::new();
            if !self.cursor.check(TokenKind::RParen) {
                loop {
                    components.push(self.pattern_at(true)?);
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.cursor.consume(TokenKind::RParen)?;
            let binding = if self.is_binding_ahead() { Some(self.ident()?) } else { None };
            return Ok(Pattern::Record { ty, components, binding, span: self.cursor.span_from(start) });
        }

        if !nested && matches!(ty, TypeNode::Var { .. }) {
            return Err(ParseError::grammar("'var' is only allowed in nested patterns", start));
        }
        let name = self.ident()?;
        Ok(Pattern::Type {
            modifiers: modifiers.keywords,
            annotations: modifiers.annotations,
            ty,
            name,
            span: self.cursor.span_from(start),
        })
    }

    /// An identifier after a record pattern, unless it is a `when` guard.
    fn is_binding_ahead(&self) -> bool {
        let kind = self.cursor.kind(0);
        super::token_sets::is_identifier_like(kind) && kind != TokenKind::When
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::lexer::tokenize;

    fn pattern_at(source: &str, config: Config) -> ParseResult<Pattern> {
        let tokens = tokenize(source)?;
        let mut parser = Parser::new(&tokens, config)?;
        let pattern = parser.pattern()?;
        parser.expect_end()?;
        Ok(pattern)
    }

    fn pattern(source: &str) -> ParseResult<Pattern> {
        pattern_at(source, Config::default())
    }

    #[test]
    fn type_pattern_with_final() {
        match pattern("final String s").expect("Failed to parse") {
            Pattern::Type { modifiers, name, .. } => {
                assert_eq!(modifiers, vec![Modifier::Final]);
                assert_eq!(name.as_str(), "s");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn nested_record_pattern() {
        match pattern("Line(Point(var x, var y), Point end)").expect("Failed to parse") {
            Pattern::Record { components, binding, .. } => {
                assert_eq!(components.len(), 2);
                assert!(matches!(components[0], Pattern::Record { .. }));
                assert!(binding.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn record_pattern_requires_java_21() {
        let err = pattern_at("Point(int x, int y)", Config::new(LanguageLevel::Java17)).unwrap_err();
        assert!(err.is_grammar_violation());
    }

    #[test]
    fn top_level_var_pattern_is_rejected() {
        assert!(pattern("var x").unwrap_err().is_grammar_violation());
    }

    #[test]
    fn static_in_pattern_is_rejected() {
        assert!(pattern("static String s").unwrap_err().is_grammar_violation());
    }
}
