use super::span::Location;

/// Failure of a single parse.
///
/// The parser is fail-fast: the first error unwinds to the top-level call and
/// no partial tree is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A production required a token kind other than the one found
    #[error("Parse error at {location}: expected {expected}, found {found}")]
    IllegalToken {
        expected: String,
        found: String,
        lexeme: String,
        location: Location,
    },

    /// The construct was recognized but a finer grammar constraint failed
    #[error("Parse error at {location}: {message}")]
    GrammarViolation { message: String, location: Location },

    /// The parser's own calling convention was violated
    #[error("Internal parser error at {location}: {message}")]
    Fatal { message: String, location: Location },

    /// The source text could not be tokenized
    #[error("Lexical error at {location}: {message}")]
    Lexical { message: String, location: Location },
}

impl ParseError {
    /// Create a grammar violation error
    pub fn grammar(message: impl Into<String>, location: Location) -> Self {
        ParseError::GrammarViolation { message: message.into(), location }
    }

    /// Create a fatal error
    pub fn fatal(message: impl Into<String>, location: Location) -> Self {
        ParseError::Fatal { message: message.into(), location }
    }

    /// Get the location of the error
    pub fn location(&self) -> Location {
        match self {
            ParseError::IllegalToken { location, .. }
            | ParseError::GrammarViolation { location, .. }
            | ParseError::Fatal { location, .. }
            | ParseError::Lexical { location, .. } => *location,
        }
    }

    /// Add context to an error message
    pub fn with_context(self, context: &str) -> Self {
        match self {
            ParseError::IllegalToken { expected, found, lexeme, location } => ParseError::IllegalToken {
                expected: format!("{} (context: {})", expected, context),
                found,
                lexeme,
                location,
            },
            ParseError::GrammarViolation { message, location } => ParseError::GrammarViolation {
                message: format!("{} (context: {})", message, context),
                location,
            },
            ParseError::Fatal { message, location } => ParseError::Fatal {
                message: format!("{} (context: {})", message, context),
                location,
            },
            ParseError::Lexical { message, location } => ParseError::Lexical {
                message: format!("{} (context: {})", message, context),
                location,
            },
        }
    }

    pub fn is_grammar_violation(&self) -> bool {
        matches!(self, ParseError::GrammarViolation { .. })
    }

    pub fn is_illegal_token(&self) -> bool {
        matches!(self, ParseError::IllegalToken { .. })
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location() {
        let err = ParseError::grammar("record declaration requires a component list", Location::new(3, 7, 40));
        assert_eq!(err.to_string(), "Parse error at 3:7: record declaration requires a component list");
    }

    #[test]
    fn with_context_keeps_kind_and_location() {
        let err = ParseError::IllegalToken {
            expected: "';'".to_string(),
            found: "identifier".to_string(),
            lexeme: "x".to_string(),
            location: Location::new(1, 2, 1),
        }
        .with_context("field declaration");
        assert!(err.is_illegal_token());
        assert_eq!(err.location(), Location::new(1, 2, 1));
        assert!(err.to_string().contains("(context: field declaration)"));
    }
}
