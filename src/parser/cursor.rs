use super::ParseError;
use crate::lexer::{Position, Scanner, Token, TokenKind};

/// One token of lookahead over a [`Scanner`], plus the diagnostics collected
/// while parsing.
pub struct Cursor<'a> {
    scanner: Scanner<'a>,
    lookahead: Token,
    errors: Vec<ParseError>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let lookahead = scanner.scan();
        Self {
            scanner,
            lookahead,
            errors: Vec::new(),
        }
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.lookahead.kind
    }

    pub fn pos(&self) -> Position {
        self.lookahead.pos
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.lookahead.is(kind)
    }

    /// Consumes the lookahead unconditionally and returns it.
    pub fn bump(&mut self) -> Token {
        let next = self.scanner.scan();
        std::mem::replace(&mut self.lookahead, next)
    }

    /// Consumes the lookahead if its kind is one of `kinds`.
    pub fn next_if(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.contains(&self.lookahead.kind).then(|| self.bump())
    }

    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        self.expect_any(&[kind], &[kind.as_str()])
    }

    /// Like [`next_if`](Cursor::next_if), but a mismatch is reported against
    /// the lookahead, which stays unconsumed.
    pub fn expect_any(&mut self, kinds: &[TokenKind], expected: &[&'static str]) -> Option<Token> {
        let token = self.next_if(kinds);
        if token.is_none() {
            self.unexpected(expected);
        }
        token
    }

    pub fn unexpected(&mut self, expected: &[&'static str]) {
        let err = ParseError::expected(expected, &self.lookahead);
        self.add_error(err);
    }

    /// Records `err` unless a diagnostic at the same position already exists.
    pub fn add_error(&mut self, err: ParseError) {
        if self.errors.iter().any(|e| e.pos == err.pos) {
            tracing::trace!(%err, "duplicate diagnostic dropped");
            return;
        }
        self.errors.push(err);
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}
