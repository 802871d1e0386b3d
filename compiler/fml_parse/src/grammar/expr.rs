//! Assignment, ternary, binary and unary levels.

use fml_ir::{ExprId, ExprKind, Literal, OperationType, TokenKind};
use fml_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an assignment-level expression (the loosest level).
    ///
    /// Every nested expression enters here, so this is where the stack is
    /// grown for deeply nested input.
    pub(crate) fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_ternary()?;

        let TokenKind::Op(op) = self.cursor.current_kind() else {
            return Ok(target);
        };
        let op = *op;
        if !op.is_assignment() {
            return Ok(target);
        }
        if !matches!(
            self.arena.get(target).kind,
            ExprKind::Ident(_) | ExprKind::Member { .. }
        ) {
            return Err(ParseError::invalid_assignment_target(self.span_of(target)));
        }
        self.cursor.advance();

        let rhs = self.parse_assignment()?;
        let span = self.span_of(target).merge(self.span_of(rhs));
        let value = match op.compound_base() {
            // `x op= y` is `x = x op (y)`: the whole right side is one operand.
            Some(base) => self.alloc(
                ExprKind::Binary {
                    op: base,
                    left: target,
                    right: rhs,
                },
                span,
            ),
            None => rhs,
        };
        Ok(self.alloc(ExprKind::Assign { target, value }, span))
    }

    fn parse_ternary(&mut self) -> Result<ExprId, ParseError> {
        let cond = self.parse_binary(1)?;
        if !self.cursor.check(&TokenKind::Question) {
            return Ok(cond);
        }
        self.cursor.advance();
        let then_branch = self.parse_assignment()?;
        self.cursor.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_assignment()?;
        let span = self.span_of(cond).merge(self.span_of(else_branch));
        Ok(self.alloc(
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// The binary operator at the cursor and its precedence class.
    fn current_binary_op(&self) -> Option<(OperationType, u8)> {
        match self.cursor.current_kind() {
            TokenKind::Op(op) if op.is_binary() => op.precedence().map(|prec| (*op, prec)),
            _ => None,
        }
    }

    /// Precedence climbing; every class is left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some((op, prec)) = self.current_binary_op() {
            if prec < min_prec {
                break;
            }
            self.cursor.advance();
            let right = ensure_sufficient_stack(|| self.parse_binary(prec + 1))?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    /// Prefix operators, desugared:
    /// `-x` to `-1 * x`, `!x` to `x == false`, `~x` to `x ^ -1`.
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Op(op @ (OperationType::Sub | OperationType::Not | OperationType::BitwiseNot)) => *op,
            _ => return self.parse_postfix(),
        };
        let op_span = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = op_span.merge(self.span_of(operand));

        let (binary, left, right) = match op {
            OperationType::Sub => {
                let minus_one = self.alloc(ExprKind::Literal(Literal::Int(-1)), op_span);
                (OperationType::Mul, minus_one, operand)
            }
            OperationType::Not => {
                let f = self.alloc(ExprKind::Literal(Literal::Bool(false)), op_span);
                (OperationType::Equal, operand, f)
            }
            _ => {
                let all_ones = self.alloc(ExprKind::Literal(Literal::Int(-1)), op_span);
                (OperationType::Xor, operand, all_ones)
            }
        };
        Ok(self.alloc(
            ExprKind::Binary {
                op: binary,
                left,
                right,
            },
            span,
        ))
    }
}
