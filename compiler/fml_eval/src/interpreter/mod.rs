//! Postfix program execution.
//!
//! [`Interpreter::run`] executes one [`Program`] over a value stack against
//! a registry and a binding list. Nested programs (ternary branches, method
//! arguments, assignment values) run recursively under
//! [`ensure_sufficient_stack`].

use fml_ir::{AccessKind, AccessorCall, Assignment, Instr, Name, Place, Program, TernaryCall};
use fml_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::convert::convert_to;
use crate::errors::{
    host_failure, internal, non_boolean_condition, not_writable, undefined_member,
    undefined_variable, EvalResult,
};
use crate::operators::evaluate_binary;
use crate::registry::{CallArgs, HostType, MemberDescriptor};
use crate::{Bindings, TypeRegistry, Value};

type Stack = SmallVec<[Value; 8]>;

pub struct Interpreter<'a> {
    registry: &'a TypeRegistry,
    bindings: &'a mut Bindings,
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a TypeRegistry, bindings: &'a mut Bindings) -> Self {
        Interpreter { registry, bindings }
    }

    /// Run a program to its single result.
    pub fn run(&mut self, program: &Program) -> EvalResult {
        ensure_sufficient_stack(|| self.run_program(program))
    }

    fn run_program(&mut self, program: &Program) -> EvalResult {
        let mut stack = Stack::new();
        for (instr, span) in program.iter() {
            let value = self.step(instr, &mut stack).map_err(|e| e.or_span(span))?;
            stack.push(value);
        }
        let result = stack.pop().ok_or_else(|| internal("empty program"))?;
        if stack.is_empty() {
            Ok(result)
        } else {
            Err(internal(format!("{} values left on the stack", stack.len())))
        }
    }

    fn step(&mut self, instr: &Instr, stack: &mut Stack) -> EvalResult {
        match instr {
            Instr::Push(literal) => Ok(Value::from_literal(literal)),
            Instr::Load(name) => self.load(name),
            Instr::LoadType(tag) => Ok(Value::Type(tag.clone())),
            Instr::Binary(op) => {
                let right = pop(stack)?;
                let left = pop(stack)?;
                evaluate_binary(left, right, *op)
            }
            Instr::Access(call) => {
                let receiver = pop(stack)?;
                self.access(receiver, call)
            }
            Instr::Ternary(ternary) => self.ternary(ternary),
            Instr::Assign(assignment) => self.assign(assignment),
        }
    }

    fn load(&self, name: &Name) -> EvalResult {
        let value = self
            .bindings
            .get(name.as_str())
            .ok_or_else(|| undefined_variable(name.as_str()))?
            .get();
        self.registry.check_allowed(&value)?;
        self.registry.copy_on_load(value)
    }

    fn ternary(&mut self, ternary: &TernaryCall) -> EvalResult {
        match self.run(&ternary.condition)? {
            Value::Bool(true) => self.run(&ternary.if_true),
            Value::Bool(false) => self.run(&ternary.if_false),
            other => Err(non_boolean_condition(&other.type_name())),
        }
    }

    // Member access

    #[tracing::instrument(level = "trace", skip_all, fields(member = %call.member))]
    fn access(&mut self, receiver: Value, call: &AccessorCall) -> EvalResult {
        let member = call.member.as_str();
        if receiver.is_null() {
            return Err(host_failure(format!("cannot access `{member}` on null")));
        }
        let registry = self.registry;
        let is_static = matches!(receiver, Value::Type(_));
        let ty = registry.for_value(&receiver)?;
        let owner = ty.type_tag().name();

        let result = match &call.kind {
            AccessKind::Property => {
                let descriptor = resolve_member(ty, member, is_static)?;
                descriptor.get(&receiver, owner)?
            }
            AccessKind::Method { args, type_args } => {
                let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(args.len());
                for arg in args {
                    let value = self.run(arg)?;
                    registry.check_allowed(&value)?;
                    values.push(value);
                }
                let overloads = if is_static {
                    ty.resolve_static_method(member)
                } else {
                    ty.resolve_method(member)
                };
                let method =
                    registry.select_overload(owner, member, overloads, &mut values, type_args)?;
                tracing::trace!(signature = %method.signature(), "dispatch");
                let result = method.invoke(&CallArgs {
                    receiver: &receiver,
                    args: &values,
                    type_args,
                    registry,
                })?;
                if method.returns_void {
                    receiver
                } else {
                    result
                }
            }
        };
        registry.check_allowed(&result)?;
        Ok(result)
    }

    // Assignment

    fn assign(&mut self, assignment: &Assignment) -> EvalResult {
        let value = self.run(&assignment.value)?;
        match &assignment.place {
            Place::Variable(name) => {
                let var = self
                    .bindings
                    .get_mut(name.as_str())
                    .ok_or_else(|| undefined_variable(name.as_str()))?;
                let converted = convert_to(value, var.ty(), self.registry)?;
                var.set(converted.clone());
                Ok(converted)
            }
            Place::Member {
                owner,
                member,
                span,
            } => self
                .assign_member(owner, member, value)
                .map_err(|e| e.or_span(*span)),
            Place::Static(_) | Place::Temp(_) => Err(internal("assignment to a non-place")),
        }
    }

    /// Convert `value` to the member's current runtime type and store it.
    fn assign_member(&mut self, owner: &Place, member: &Name, value: Value) -> EvalResult {
        let registry = self.registry;
        let owner_value = self.read_place(owner)?;
        let ty = registry.for_value(&owner_value)?;
        let is_static = matches!(owner_value, Value::Type(_));
        let descriptor = resolve_member(ty, member.as_str(), is_static)?;
        let owner_name = ty.type_tag().name();
        if !descriptor.is_writable() {
            return Err(not_writable(member.as_str(), owner_name));
        }

        let converted = if descriptor.is_readable() {
            let current = descriptor.get(&owner_value, owner_name)?;
            convert_to(value, &current.type_tag(), registry)?
        } else {
            value
        };
        registry.check_allowed(&converted)?;
        descriptor.set(&owner_value, converted.clone(), owner_name)?;
        self.write_back(owner, owner_value)?;
        Ok(converted)
    }

    /// The current value of a place. Value-type objects come back as copies.
    fn read_place(&mut self, place: &Place) -> EvalResult {
        match place {
            Place::Variable(name) => self.load(name),
            Place::Member { owner, member, .. } => {
                let owner_value = self.read_place(owner)?;
                let ty = self.registry.for_value(&owner_value)?;
                let is_static = matches!(owner_value, Value::Type(_));
                resolve_member(ty, member.as_str(), is_static)?
                    .get(&owner_value, ty.type_tag().name())
            }
            Place::Static(tag) => Ok(Value::Type(tag.clone())),
            Place::Temp(program) => self.run(program),
        }
    }

    /// Store a modified value-type owner back where it was read from.
    /// Reference types were modified in place and need nothing.
    fn write_back(&mut self, place: &Place, value: Value) -> EvalResult<()> {
        if !self.registry.is_value_type(&value) {
            return Ok(());
        }
        match place {
            Place::Variable(name) => {
                let var = self
                    .bindings
                    .get_mut(name.as_str())
                    .ok_or_else(|| undefined_variable(name.as_str()))?;
                var.set(value);
                Ok(())
            }
            Place::Member { owner, member, .. } => {
                let owner_value = self.read_place(owner)?;
                let ty = self.registry.for_value(&owner_value)?;
                let is_static = matches!(owner_value, Value::Type(_));
                let owner_name = ty.type_tag().name();
                resolve_member(ty, member.as_str(), is_static)?.set(
                    &owner_value,
                    value,
                    owner_name,
                )?;
                self.write_back(owner, owner_value)
            }
            Place::Static(_) | Place::Temp(_) => Ok(()),
        }
    }
}

fn pop(stack: &mut Stack) -> EvalResult {
    stack.pop().ok_or_else(|| internal("value stack underflow"))
}

fn resolve_member<'t>(
    ty: &'t dyn HostType,
    member: &str,
    is_static: bool,
) -> EvalResult<&'t MemberDescriptor> {
    let found = if is_static {
        ty.resolve_static_member(member)
    } else {
        ty.resolve_member(member)
    };
    found.ok_or_else(|| undefined_member(member, ty.type_tag().name()))
}
