//! Flat expression tree produced by the parser.
//!
//! Nodes live in an [`ExprArena`] and refer to each other by [`ExprId`].
//! The parser desugars as it builds: unary minus, `!`, `~` and compound
//! assignment never appear here, so lowering only sees the primitive forms.
//! A node may be referenced more than once (the target of `x += 1` is both
//! the assignment place and the left operand of the addition).

use std::fmt;

use crate::{Literal, Name, OperationType, Span};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// A generic type argument as written, resolved during lowering.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeArg {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// A bare identifier: a binding, or a static type root when followed by `.`.
    Ident(Name),
    Binary {
        op: OperationType,
        left: ExprId,
        right: ExprId,
    },
    /// `target = value`. Compound forms arrive here already expanded.
    Assign { target: ExprId, value: ExprId },
    Ternary {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    /// `receiver.name`
    Member { receiver: ExprId, name: Name },
    /// `receiver.method<T..>(args..)`
    Call {
        receiver: ExprId,
        method: Name,
        type_args: Vec<TypeArg>,
        args: Vec<ExprId>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Storage for the expressions of one statement.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::new(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(Expr { kind, span });
        id
    }

    /// # Panics
    /// Panics if `id` was allocated by a different arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Render `id` as a fully parenthesized expression.
    ///
    /// Used by parser tests and the `compile` dump to show how a formula
    /// was grouped.
    pub fn render(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    fn render_into(&self, id: ExprId, out: &mut String) {
        use std::fmt::Write;

        match &self.get(id).kind {
            ExprKind::Literal(lit) => {
                let _ = write!(out, "{lit}");
            }
            ExprKind::Ident(name) => out.push_str(name.as_str()),
            ExprKind::Binary { op, left, right } => {
                out.push('(');
                self.render_into(*left, out);
                let _ = write!(out, " {op} ");
                self.render_into(*right, out);
                out.push(')');
            }
            ExprKind::Assign { target, value } => {
                out.push('(');
                self.render_into(*target, out);
                out.push_str(" = ");
                self.render_into(*value, out);
                out.push(')');
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push('(');
                self.render_into(*cond, out);
                out.push_str(" ? ");
                self.render_into(*then_branch, out);
                out.push_str(" : ");
                self.render_into(*else_branch, out);
                out.push(')');
            }
            ExprKind::Member { receiver, name } => {
                self.render_into(*receiver, out);
                out.push('.');
                out.push_str(name.as_str());
            }
            ExprKind::Call {
                receiver,
                method,
                type_args,
                args,
            } => {
                self.render_into(*receiver, out);
                out.push('.');
                out.push_str(method.as_str());
                if !type_args.is_empty() {
                    out.push('<');
                    for (i, arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(arg.name.as_str());
                    }
                    out.push('>');
                }
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render_into(*arg, out);
                }
                out.push(')');
            }
        }
    }
}
