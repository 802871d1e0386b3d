//! Recursive-descent grammar.
//!
//! ```text
//! statement  := assignment EOF
//! assignment := ternary (('=' | compound-op) assignment)?
//! ternary    := binary ('?' assignment ':' assignment)?
//! binary     := unary (binary-op unary)*        precedence climbing
//! unary      := '-' unary | '!' unary | '~' unary | postfix
//! postfix    := primary ('.' ident (generic-args? '(' args ')')?)*
//! primary    := literal | ident | '(' assignment ')'
//! ```
//!
//! Desugaring happens while building the tree, so the arena never holds a
//! prefix operator or a compound assignment.

mod expr;
mod postfix;

use fml_ir::{ExprArena, ExprId, ExprKind, Span, TokenKind, TokenList};

use crate::cursor::Cursor;
use crate::{ParseError, ParseOptions};

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, options: &'a ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
            options,
        }
    }

    /// Parse one whole statement.
    pub fn parse_statement(mut self) -> Result<(ExprArena, ExprId), ParseError> {
        let root = self.parse_assignment()?;
        match self.cursor.current_kind() {
            TokenKind::Eof => Ok((self.arena, root)),
            TokenKind::RParen => Err(ParseError::unmatched_close(self.cursor.current_span())),
            other => Err(ParseError::unexpected_token(other, self.cursor.current_span())
                .with_context("expected an operator or end of statement")),
        }
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc(kind, span)
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.span(id)
    }
}
