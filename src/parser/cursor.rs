//! Token cursor for navigating the token stream.
//!
//! The cursor borrows a token buffer that must end with `Eof`. Its position is a
//! plain `Copy` value, so speculative scans clone the cursor (or take a snapshot)
//! and throw it away without touching the committed position.

use super::error::{ParseError, ParseResult};
use super::lexer::{Token, TokenKind};
use super::span::{Location, Span};

/// Borrowed view of a token. For a partially consumed `>`-family token this is
/// the synthesized remainder, not the original lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRef<'t> {
    pub kind: TokenKind,
    pub text: &'t str,
    pub span: Span,
}

impl<'t> TokenRef<'t> {
    pub fn location(&self) -> Location {
        self.span.start
    }
}

/// Position in the token stream.
///
/// `split` counts the leading characters of the token at `index` that were
/// already consumed as closing angle brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    index: usize,
    split: usize,
    last_end: Location,
}

impl Position {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the current token has been partially consumed.
    pub fn is_split(&self) -> bool {
        self.split > 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: Position,
}

impl<'t> TokenCursor<'t> {
    /// Create a cursor at the start of `tokens`, which must be terminated by `Eof`.
    pub fn new(tokens: &'t [Token]) -> ParseResult<Self> {
        match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => {}
            Some(last) => {
                return Err(ParseError::fatal("token stream is not terminated by end of input", last.span.end))
            }
            None => return Err(ParseError::fatal("empty token stream", Location::start())),
        }
        let start = tokens[0].span.start;
        Ok(Self {
            tokens,
            pos: Position { index: 0, split: 0, last_end: start },
        })
    }

    pub fn snapshot(&self) -> Position {
        self.pos
    }

    pub fn restore(&mut self, position: Position) {
        debug_assert!(position.index < self.tokens.len(), "cursor position out of bounds");
        self.pos = position;
    }

    /// The token `k` positions ahead; saturates at `Eof`.
    pub fn peek(&self, k: usize) -> TokenRef<'t> {
        if k == 0 && self.pos.split > 0 {
            return self.remainder();
        }
        let last = self.tokens.len() - 1;
        let token = &self.tokens[(self.pos.index + k).min(last)];
        TokenRef { kind: token.kind, text: &token.lexeme, span: token.span }
    }

    fn remainder(&self) -> TokenRef<'t> {
        let token = &self.tokens[self.pos.index];
        let text = &token.lexeme[self.pos.split..];
        let kind = TokenKind::from_angle_remainder(text).unwrap_or(token.kind);
        TokenRef {
            kind,
            text,
            span: Span::new(token.span.start.shifted(self.pos.split), token.span.end),
        }
    }

    #[inline]
    pub fn kind(&self, k: usize) -> TokenKind {
        self.peek(k).kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.kind(0) == kind
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind(0))
    }

    /// Whether the next tokens are exactly `kinds`, in order.
    pub fn matches(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().enumerate().all(|(k, kind)| self.kind(k) == *kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Start of the next token.
    pub fn location(&self) -> Location {
        self.peek(0).span.start
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Location {
        self.pos.last_end
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Location) -> Span {
        Span::new(start, self.pos.last_end.max(start))
    }

    /// Consume the next token (or the remainder of a split one).
    pub fn advance(&mut self) -> TokenRef<'t> {
        let token = self.peek(0);
        if token.kind != TokenKind::Eof {
            self.pos.index += 1;
            self.pos.split = 0;
        }
        self.pos.last_end = token.span.end;
        token
    }

    /// Consume the next token if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume(&mut self, kind: TokenKind) -> ParseResult<TokenRef<'t>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.illegal(kind.describe()))
        }
    }

    /// Consume the exact sequence `kinds`.
    pub fn consume_seq(&mut self, kinds: &[TokenKind]) -> ParseResult<()> {
        for kind in kinds {
            self.consume(*kind)?;
        }
        Ok(())
    }

    /// Consume one token whose kind is any of `kinds`.
    pub fn consume_any(&mut self, kinds: &[TokenKind], expected: &str) -> ParseResult<TokenRef<'t>> {
        if self.check_any(kinds) {
            Ok(self.advance())
        } else {
            Err(self.illegal(expected))
        }
    }

    /// Whether the next token starts with a closing angle bracket.
    pub fn at_closing_angle(&self) -> bool {
        self.kind(0).angle_count() > 0
    }

    /// Consume exactly one `>` from the next token.
    ///
    /// A plain `>` is consumed whole. A compound token (`>>`, `>>>`, `>=`, `>>=`,
    /// `>>>=`) is split: the returned token is a synthesized `>` at the start of
    /// the lexeme and the remaining characters are re-offered by `peek(0)` as a
    /// token of their own.
    pub fn split_closing_angle(&mut self) -> ParseResult<TokenRef<'t>> {
        let token = self.peek(0);
        match token.kind {
            TokenKind::Gt => Ok(self.advance()),
            kind if kind.angle_count() > 0 => {
                let start = token.span.start;
                let end = start.shifted(1);
                self.pos.split += 1;
                self.pos.last_end = end;
                log::trace!("split {:?} at {}, remainder {:?}", token.text, start, self.peek(0).text);
                Ok(TokenRef { kind: TokenKind::Gt, text: &token.text[..1], span: Span::new(start, end) })
            }
            _ => Err(self.illegal("'>'")),
        }
    }

    /// Consume `count` closing angle brackets, splitting compound tokens as needed.
    pub fn consume_angle_chars(&mut self, count: usize) -> ParseResult<()> {
        for _ in 0..count {
            self.split_closing_angle()?;
        }
        Ok(())
    }

    /// Build an IllegalToken error for the next token.
    pub fn illegal(&self, expected: &str) -> ParseError {
        let token = self.peek(0);
        ParseError::IllegalToken {
            expected: expected.to_string(),
            found: token.kind.describe().to_string(),
            lexeme: token.text.to_string(),
            location: token.span.start,
        }
    }
}
