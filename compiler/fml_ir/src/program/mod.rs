//! Compiled postfix programs.
//!
//! A [`Program`] is what the evaluator runs: a flat instruction sequence over
//! a value stack. Sub-expressions that must run conditionally or
//! independently (ternary branches, method arguments, assignment values) are
//! nested programs rather than jumps. Programs hold no host state and are
//! shared through the formula cache.

use std::fmt;

use crate::{Literal, Name, OperationType, Span, TypeTag};

/// One step of a postfix program.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    /// Push a constant.
    Push(Literal),
    /// Push the current value of a binding.
    Load(Name),
    /// Push a static type root (`Math` in `Math.PI`).
    LoadType(TypeTag),
    /// Pop two operands, push the result. Never an assignment or prefix
    /// operator.
    Binary(OperationType),
    /// Pop a receiver, push the member or method result.
    Access(Box<AccessorCall>),
    /// Run the condition, then exactly one branch; push its result.
    Ternary(Box<TernaryCall>),
    /// Run the value program, convert and store it, push the stored value.
    Assign(Box<Assignment>),
}

/// A single `.member` or `.method(..)` hop.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessorCall {
    pub member: Name,
    pub kind: AccessKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AccessKind {
    Property,
    Method {
        args: Vec<Program>,
        type_args: Vec<TypeTag>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TernaryCall {
    pub condition: Program,
    pub if_true: Program,
    pub if_false: Program,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub place: Place,
    pub value: Program,
}

/// Something that can be written.
#[derive(Clone, Debug, PartialEq)]
pub enum Place {
    /// A binding.
    Variable(Name),
    /// A field or property on the value of `owner`. When the owner holds a
    /// value type, the modified copy is stored back into `owner`.
    Member {
        owner: Box<Place>,
        member: Name,
        span: Span,
    },
    /// A static property (`Settings.Level = 3`).
    Static(TypeTag),
    /// A computed owner such as a method result. Writes go to the object it
    /// produces; nothing is written back.
    Temp(Program),
}

impl Place {
    /// The binding at the root of this place, if any.
    pub fn root_variable(&self) -> Option<&Name> {
        match self {
            Place::Variable(name) => Some(name),
            Place::Member { owner, .. } => owner.root_variable(),
            Place::Static(_) | Place::Temp(_) => None,
        }
    }
}

/// A postfix instruction sequence with a source span per instruction.
#[derive(Clone, Default, PartialEq)]
pub struct Program {
    instrs: Vec<Instr>,
    spans: Vec<Span>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    #[inline]
    pub fn push(&mut self, instr: Instr, span: Span) {
        self.instrs.push(instr);
        self.spans.push(span);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Instructions paired with their spans.
    pub fn iter(&self) -> impl Iterator<Item = (&Instr, Span)> {
        self.instrs.iter().zip(self.spans.iter().copied())
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for instr in &self.instrs {
            write!(f, "{:width$}", "", width = depth * 2)?;
            match instr {
                Instr::Push(lit) => writeln!(f, "push {lit}")?,
                Instr::Load(name) => writeln!(f, "load {name}")?,
                Instr::LoadType(tag) => writeln!(f, "type {tag}")?,
                Instr::Binary(op) => writeln!(f, "op {op}")?,
                Instr::Access(call) => match &call.kind {
                    AccessKind::Property => writeln!(f, "get .{}", call.member)?,
                    AccessKind::Method { args, type_args } => {
                        write!(f, "call .{}", call.member)?;
                        if !type_args.is_empty() {
                            let names: Vec<&str> = type_args.iter().map(TypeTag::name).collect();
                            write!(f, "<{}>", names.join(", "))?;
                        }
                        writeln!(f, "/{}", args.len())?;
                        for (i, arg) in args.iter().enumerate() {
                            write!(f, "{:width$}", "", width = depth * 2 + 2)?;
                            writeln!(f, "arg {i}:")?;
                            arg.write_indented(f, depth + 2)?;
                        }
                    }
                },
                Instr::Ternary(t) => {
                    writeln!(f, "ternary")?;
                    for (label, branch) in [
                        ("cond", &t.condition),
                        ("then", &t.if_true),
                        ("else", &t.if_false),
                    ] {
                        write!(f, "{:width$}", "", width = depth * 2 + 2)?;
                        writeln!(f, "{label}:")?;
                        branch.write_indented(f, depth + 2)?;
                    }
                }
                Instr::Assign(assign) => {
                    writeln!(f, "assign {}", PlaceDisplay(&assign.place))?;
                    assign.value.write_indented(f, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

struct PlaceDisplay<'a>(&'a Place);

impl fmt::Display for PlaceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Place::Variable(name) => write!(f, "{name}"),
            Place::Member { owner, member, .. } => {
                write!(f, "{}.{member}", PlaceDisplay(owner))
            }
            Place::Static(tag) => write!(f, "{tag}"),
            Place::Temp(_) => f.write_str("<temp>"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.instrs.iter()).finish()
    }
}
