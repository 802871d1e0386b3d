//! Token types produced by the lexer.

use std::fmt;
use std::sync::Arc;

use crate::{Name, OperationType, Span};

/// Token kinds.
///
/// `<` and `>` are always lexed as operators; the parser decides whether a
/// `<` opens a generic argument list.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    True,
    False,
    Null,

    Ident(Name),
    Op(OperationType),

    // Punctuation
    LParen,
    RParen,
    Dot,
    Comma,
    Question,
    Colon,

    Eof,
}

impl TokenKind {
    /// Short human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(x) => format!("float `{x:?}`"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::True => "`true`".to_string(),
            TokenKind::False => "`false`".to_string(),
            TokenKind::Null => "`null`".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Op(op) => format!("`{op}`"),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Question => "`?`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::Eof => "end of statement".to_string(),
        }
    }

    #[inline]
    pub fn is_op(&self, op: OperationType) -> bool {
        matches!(self, TokenKind::Op(o) if *o == op)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Float(x) => write!(f, "{x:?}"),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            TokenKind::Null => f.write_str("null"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Op(op) => write!(f, "{op}"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Question => f.write_str("?"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Eof => f.write_str("<eof>"),
        }
    }
}

/// A token with its span in the formula.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Tokens of one statement.
///
/// Invariant: the last token is always `Eof`, so the parser can look at the
/// current token without bounds checks.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Build a list, appending `Eof` at `end` if missing.
    pub fn new(mut tokens: Vec<Token>, end: u32) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        TokenList { tokens }
    }

    /// Number of tokens, including the trailing `Eof`.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the statement holds only `Eof`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Token at `index`, clamped to the trailing `Eof`.
    #[inline]
    pub fn get(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind.clone()).collect()
    }
}

#[cfg(test)]
mod tests;
