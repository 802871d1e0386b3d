//! Token cursor for the parser.
//!
//! Wraps a [`TokenList`] with a position. The list always ends in `Eof`, and
//! lookahead past the end keeps returning it.

use fml_diagnostic::ErrorCode;
use fml_ir::{OperationType, Span, Token, TokenKind, TokenList};

use crate::ParseError;

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position, for backtracking.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos < self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len()
        );
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens.get(self.pos - 1).span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> &'a TokenKind {
        &self.tokens.get(self.pos + n).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Compare against a fieldless kind (punctuation, keywords).
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    #[inline]
    pub fn check_op(&self, op: OperationType) -> bool {
        self.current_kind().is_op(op)
    }

    /// Advance and return the consumed token. Stays on `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tracing::trace!(token = ?token.kind, "advance");
        token
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected {}, found {}",
                kind.describe(),
                self.current_kind().describe()
            ),
            self.current_span(),
        )
    }
}

#[cfg(test)]
mod tests;
