//! Lowering: name resolution and postfix emission.
//!
//! Walks a parsed statement and produces a [`Program`]. Identifiers are
//! resolved here, against the caller's bindings and host types:
//!
//! - a binding name becomes a `Load`
//! - a non-binding that is the receiver of `.` and names a type becomes a
//!   static type root (`LoadType`)
//! - anything else is an unknown-variable error
//!
//! Ternary branches, method arguments and assignment values become nested
//! programs.

use fml_ir::{
    AccessKind, AccessorCall, Assignment, ExprArena, ExprId, ExprKind, Instr, Place, Program,
    TernaryCall, TypeTag,
};
use fml_stack::ensure_sufficient_stack;

use crate::ParseError;

/// Answers the two questions lowering needs about names.
pub trait NameResolver {
    /// Whether `name` is one of the current bindings.
    fn is_variable(&self, name: &str) -> bool;

    /// Resolve a type name: a primitive spelling or a registered host type.
    fn resolve_type(&self, name: &str) -> Option<TypeTag>;
}

/// Lower the statement rooted at `root`.
pub fn lower(
    arena: &ExprArena,
    root: ExprId,
    resolver: &dyn NameResolver,
) -> Result<Program, ParseError> {
    let lowerer = Lowerer { arena, resolver };
    let mut program = Program::new();
    lowerer.lower_into(root, &mut program)?;
    Ok(program)
}

struct Lowerer<'a> {
    arena: &'a ExprArena,
    resolver: &'a dyn NameResolver,
}

impl Lowerer<'_> {
    fn lower_into(&self, id: ExprId, out: &mut Program) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.lower_inner(id, out))
    }

    fn lower_program(&self, id: ExprId) -> Result<Program, ParseError> {
        let mut program = Program::new();
        self.lower_into(id, &mut program)?;
        Ok(program)
    }

    fn lower_inner(&self, id: ExprId, out: &mut Program) -> Result<(), ParseError> {
        let expr = self.arena.get(id);
        match &expr.kind {
            ExprKind::Literal(lit) => out.push(Instr::Push(lit.clone()), expr.span),
            ExprKind::Ident(name) => {
                if !self.resolver.is_variable(name.as_str()) {
                    return Err(ParseError::unknown_variable(name.as_str(), expr.span));
                }
                out.push(Instr::Load(name.clone()), expr.span);
            }
            ExprKind::Binary { op, left, right } => {
                self.lower_into(*left, out)?;
                self.lower_into(*right, out)?;
                out.push(Instr::Binary(*op), expr.span);
            }
            ExprKind::Assign { target, value } => {
                let place = self.lower_place(*target)?;
                let value = self.lower_program(*value)?;
                out.push(Instr::Assign(Box::new(Assignment { place, value })), expr.span);
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                let call = TernaryCall {
                    condition: self.lower_program(*cond)?,
                    if_true: self.lower_program(*then_branch)?,
                    if_false: self.lower_program(*else_branch)?,
                };
                out.push(Instr::Ternary(Box::new(call)), expr.span);
            }
            ExprKind::Member { receiver, name } => {
                self.lower_receiver(*receiver, out)?;
                let call = AccessorCall {
                    member: name.clone(),
                    kind: AccessKind::Property,
                };
                out.push(Instr::Access(Box::new(call)), expr.span);
            }
            ExprKind::Call {
                receiver,
                method,
                type_args,
                args,
            } => {
                self.lower_receiver(*receiver, out)?;
                let type_args = type_args
                    .iter()
                    .map(|arg| {
                        self.resolver
                            .resolve_type(arg.name.as_str())
                            .ok_or_else(|| ParseError::unknown_type(arg.name.as_str(), arg.span))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let args = args
                    .iter()
                    .map(|arg| self.lower_program(*arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let call = AccessorCall {
                    member: method.clone(),
                    kind: AccessKind::Method { args, type_args },
                };
                out.push(Instr::Access(Box::new(call)), expr.span);
            }
        }
        Ok(())
    }

    /// The receiver of `.`: a binding, or else a static type root.
    fn lower_receiver(&self, id: ExprId, out: &mut Program) -> Result<(), ParseError> {
        let expr = self.arena.get(id);
        if let ExprKind::Ident(name) = &expr.kind {
            if !self.resolver.is_variable(name.as_str()) {
                let tag = self
                    .resolver
                    .resolve_type(name.as_str())
                    .ok_or_else(|| ParseError::unknown_variable(name.as_str(), expr.span))?;
                out.push(Instr::LoadType(tag), expr.span);
                return Ok(());
            }
        }
        self.lower_into(id, out)
    }

    /// An assignment target. The parser only lets identifiers and member
    /// accesses through.
    fn lower_place(&self, id: ExprId) -> Result<Place, ParseError> {
        let expr = self.arena.get(id);
        match &expr.kind {
            ExprKind::Ident(name) => {
                if self.resolver.is_variable(name.as_str()) {
                    Ok(Place::Variable(name.clone()))
                } else {
                    Err(ParseError::unknown_variable(name.as_str(), expr.span))
                }
            }
            ExprKind::Member { receiver, name } => Ok(Place::Member {
                owner: Box::new(self.lower_owner(*receiver)?),
                member: name.clone(),
                span: expr.span,
            }),
            _ => Err(ParseError::invalid_assignment_target(expr.span)),
        }
    }

    /// The owner of an assigned member. Owners that are places themselves
    /// get value-type write-back; anything else is a temporary.
    fn lower_owner(&self, id: ExprId) -> Result<Place, ParseError> {
        let expr = self.arena.get(id);
        match &expr.kind {
            ExprKind::Ident(name) if !self.resolver.is_variable(name.as_str()) => self
                .resolver
                .resolve_type(name.as_str())
                .map(Place::Static)
                .ok_or_else(|| ParseError::unknown_variable(name.as_str(), expr.span)),
            ExprKind::Ident(_) | ExprKind::Member { .. } => {
                ensure_sufficient_stack(|| self.lower_place(id))
            }
            _ => Ok(Place::Temp(self.lower_program(id)?)),
        }
    }
}

#[cfg(test)]
mod tests;
