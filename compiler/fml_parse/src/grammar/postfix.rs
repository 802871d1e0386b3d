//! Primary expressions and member chains.

use fml_ir::{ExprId, ExprKind, Literal, OperationType, Span, TokenKind, TypeArg};
use fml_stack::IterationGuard;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `primary ('.' ident (generic-args? '(' args ')')?)*`
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut receiver = self.parse_primary()?;
        let mut hops = IterationGuard::new(self.options.max_chain_hops);

        while self.cursor.check(&TokenKind::Dot) {
            let dot_span = self.cursor.advance().span;
            if hops.tick().is_err() {
                return Err(ParseError::chain_too_long(
                    hops.limit(),
                    self.span_of(receiver).merge(dot_span),
                ));
            }

            let name_token = self.cursor.current();
            let TokenKind::Ident(name) = &name_token.kind else {
                return Err(ParseError::unexpected_token(&name_token.kind, name_token.span)
                    .with_context("expected a member name after `.`"));
            };
            self.cursor.advance();

            let type_args = self.try_parse_generic_args();
            if type_args.is_some() || self.cursor.check(&TokenKind::LParen) {
                let args = self.parse_call_args()?;
                let span = self.span_of(receiver).merge(self.cursor.previous_span());
                receiver = self.alloc(
                    ExprKind::Call {
                        receiver,
                        method: name.clone(),
                        type_args: type_args.unwrap_or_default(),
                        args,
                    },
                    span,
                );
            } else {
                let span = self.span_of(receiver).merge(name_token.span);
                receiver = self.alloc(
                    ExprKind::Member {
                        receiver,
                        name: name.clone(),
                    },
                    span,
                );
            }
        }
        Ok(receiver)
    }

    /// `'<' ident (',' ident)* '>'` immediately followed by `(`.
    ///
    /// Speculative: on any mismatch the cursor is restored and `<` is left
    /// for the binary level as less-than.
    fn try_parse_generic_args(&mut self) -> Option<Vec<TypeArg>> {
        if !self.cursor.check_op(OperationType::Less) {
            return None;
        }
        let mark = self.cursor.position();
        self.cursor.advance();

        let mut args = Vec::new();
        loop {
            let token = self.cursor.current();
            let TokenKind::Ident(name) = &token.kind else {
                self.cursor.set_position(mark);
                return None;
            };
            args.push(TypeArg {
                name: name.clone(),
                span: token.span,
            });
            self.cursor.advance();
            if self.cursor.check(&TokenKind::Comma) {
                self.cursor.advance();
                continue;
            }
            break;
        }

        if self.cursor.check_op(OperationType::Greater)
            && matches!(self.cursor.peek_kind_at(1), TokenKind::LParen)
        {
            self.cursor.advance();
            Some(args)
        } else {
            self.cursor.set_position(mark);
            None
        }
    }

    /// `'(' (assignment (',' assignment)*)? ')'`
    fn parse_call_args(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen)?.span;
        let mut args = Vec::new();
        if self.cursor.check(&TokenKind::RParen) {
            self.cursor.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_assignment()?);
            match self.cursor.current_kind() {
                TokenKind::Comma => {
                    self.cursor.advance();
                }
                TokenKind::RParen => {
                    self.cursor.advance();
                    return Ok(args);
                }
                other => {
                    return Err(ParseError::unclosed_paren(
                        open,
                        other,
                        self.cursor.current_span(),
                    ))
                }
            }
        }
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let literal = match &token.kind {
            TokenKind::Int(n) => Literal::Int(*n),
            TokenKind::Float(x) => Literal::Float(*x),
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Ident(name) => {
                self.cursor.advance();
                return Ok(self.alloc(ExprKind::Ident(name.clone()), token.span));
            }
            TokenKind::LParen => return self.parse_group(token.span),
            TokenKind::RParen => return Err(ParseError::unmatched_close(token.span)),
            kind @ (TokenKind::Op(_) | TokenKind::Eof) => {
                return Err(ParseError::expected_expression(kind, token.span))
            }
            kind => return Err(ParseError::unexpected_token(kind, token.span)),
        };
        self.cursor.advance();
        Ok(self.alloc(ExprKind::Literal(literal), token.span))
    }

    /// `'(' assignment ')'`. Grouping leaves no node behind.
    fn parse_group(&mut self, open: Span) -> Result<ExprId, ParseError> {
        self.cursor.advance();
        let inner = self.parse_assignment()?;
        if !self.cursor.check(&TokenKind::RParen) {
            return Err(ParseError::unclosed_paren(
                open,
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }
        self.cursor.advance();
        Ok(inner)
    }
}
