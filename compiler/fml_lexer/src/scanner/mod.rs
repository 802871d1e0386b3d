//! Hand-written scanner over one statement.
//!
//! Dispatch is on the first byte. Operators are matched longest-first
//! against the operator table, so `<<=` wins over `<<` and `<`.

use std::sync::Arc;

use fml_ir::{Name, OperationType, Span, Token, TokenKind};

use crate::cursor::Cursor;
use crate::LexError;

pub(crate) struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, span: Span) -> Self {
        Scanner {
            source,
            cursor: Cursor::new(source, span.start as usize, span.end as usize),
        }
    }

    pub(crate) fn scan_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.cursor.pos())
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.cursor
            .eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
        if self.cursor.is_eof() {
            return Ok(None);
        }
        let start = self.cursor.pos();
        let kind = match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start)?,
            q @ (b'"' | b'\'') => self.string(start, q)?,
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'.' => self.single(TokenKind::Dot),
            b',' => self.single(TokenKind::Comma),
            b'?' => self.single(TokenKind::Question),
            b':' => self.single(TokenKind::Colon),
            b if b >= 0x80 => self.unicode(start)?,
            _ => self.operator(start)?,
        };
        Ok(Some(Token::new(kind, self.span_from(start))))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn identifier(&mut self, start: usize) -> TokenKind {
        let text = &self.source[start..self.cursor.end()];
        let len = text
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
            .map_or(text.len(), |(i, _)| i);
        self.cursor.advance_n(len);
        let end = start + len;
        match &self.source[start..end] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            ident => TokenKind::Ident(Name::new(ident)),
        }
    }

    /// An identifier starting with a non-ASCII letter, or an invalid
    /// character.
    fn unicode(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        if ch.is_alphabetic() {
            return Ok(self.identifier(start));
        }
        self.cursor.advance_n(ch.len_utf8());
        Err(LexError::invalid_character(self.span_from(start), ch))
    }

    /// Digits, with a `.` taken only when a digit follows it. `5.ToString()`
    /// stays an integer followed by a member access.
    fn number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut dots = 0;
        loop {
            match self.cursor.current() {
                b'0'..=b'9' => self.cursor.advance(),
                b'.' if self.cursor.peek(1).is_ascii_digit() => {
                    dots += 1;
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        let text = &self.source[start..self.cursor.pos()];
        let span = self.span_from(start);
        match dots {
            0 => text
                .parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| LexError::integer_overflow(span)),
            1 => text
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| LexError::malformed_number(span)),
            _ => Err(LexError::malformed_number(span)),
        }
    }

    /// Quoted literal; contents are verbatim, there are no escapes.
    fn string(&mut self, start: usize, quote: u8) -> Result<TokenKind, LexError> {
        self.cursor.advance();
        match memchr::memchr(quote, self.cursor.rest()) {
            Some(len) => {
                let body_start = self.cursor.pos();
                self.cursor.advance_n(len + 1);
                let body = &self.source[body_start..body_start + len];
                Ok(TokenKind::Str(Arc::from(body)))
            }
            None => {
                let span = Span::from_range(start..start + 1);
                self.cursor.advance_n(self.cursor.rest().len());
                Err(LexError::unterminated_string(span, char::from(quote)))
            }
        }
    }

    fn operator(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let rest = self.cursor.rest();
        for len in (1..=OperationType::MAX_SYMBOL_LEN.min(rest.len())).rev() {
            let Ok(symbol) = std::str::from_utf8(&rest[..len]) else {
                continue;
            };
            if let Some(op) = OperationType::from_symbol(symbol) {
                self.cursor.advance_n(len);
                return Ok(TokenKind::Op(op));
            }
        }
        let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        self.cursor.advance_n(ch.len_utf8().max(1));
        Err(LexError::invalid_character(self.span_from(start), ch))
    }
}
