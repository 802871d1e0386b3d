//! Member and method descriptors.
//!
//! Descriptors are what a [`HostType`](super::HostType) hands back when the
//! interpreter resolves a name. They carry type-erased closures, so a
//! registry built once at startup can serve every evaluation.

use std::fmt;
use std::sync::Arc;

use fml_ir::{Name, TypeTag};

use crate::errors::{internal, not_readable, not_writable, EvalResult};
use crate::{TypeRegistry, Value};

/// Reads a member from a receiver.
pub type Getter = Arc<dyn Fn(&Value) -> EvalResult + Send + Sync>;
/// Writes a member on a receiver.
pub type Setter = Arc<dyn Fn(&Value, Value) -> EvalResult<()> + Send + Sync>;
/// Runs a method.
pub type Invoker = Arc<dyn Fn(&CallArgs<'_>) -> EvalResult + Send + Sync>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// A readable and/or writable member.
#[derive(Clone)]
pub struct MemberDescriptor {
    pub name: Name,
    pub kind: MemberKind,
    pub(crate) getter: Option<Getter>,
    pub(crate) setter: Option<Setter>,
}

impl MemberDescriptor {
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the member from `receiver`.
    pub fn get(&self, receiver: &Value, owner: &str) -> EvalResult {
        match &self.getter {
            Some(getter) => getter(receiver),
            None => Err(not_readable(self.name.as_str(), owner)),
        }
    }

    /// Write `value` into the member of `receiver`.
    pub fn set(&self, receiver: &Value, value: Value, owner: &str) -> EvalResult<()> {
        match &self.setter {
            Some(setter) => setter(receiver, value),
            None => Err(not_writable(self.name.as_str(), owner)),
        }
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Declared type of a method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamType {
    /// The argument's runtime type must be exactly this tag. An enum tag
    /// also accepts a string naming one of its variants.
    Exact(TypeTag),
    /// Any value.
    Any,
}

impl ParamType {
    pub const INT: ParamType = ParamType::Exact(TypeTag::Int);
    pub const FLOAT: ParamType = ParamType::Exact(TypeTag::Float);
    pub const BOOL: ParamType = ParamType::Exact(TypeTag::Bool);
    pub const STR: ParamType = ParamType::Exact(TypeTag::Str);
    pub const ANY: ParamType = ParamType::Any;
}

impl From<TypeTag> for ParamType {
    fn from(tag: TypeTag) -> Self {
        ParamType::Exact(tag)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Exact(tag) => write!(f, "{tag}"),
            ParamType::Any => f.write_str("any"),
        }
    }
}

/// One overload of a method.
#[derive(Clone)]
pub struct MethodDescriptor {
    pub name: Name,
    pub params: Vec<ParamType>,
    /// Number of generic type arguments the method takes.
    pub generic_arity: usize,
    /// A void method yields its receiver.
    pub returns_void: bool,
    pub(crate) invoke: Invoker,
}

impl MethodDescriptor {
    pub fn invoke(&self, args: &CallArgs<'_>) -> EvalResult {
        (self.invoke)(args)
    }

    /// Signature text for diagnostics, e.g. `Max(int, int)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("signature", &self.signature())
            .field("generic_arity", &self.generic_arity)
            .field("returns_void", &self.returns_void)
            .finish()
    }
}

/// Everything a method body can see.
pub struct CallArgs<'a> {
    pub receiver: &'a Value,
    pub args: &'a [Value],
    pub type_args: &'a [TypeTag],
    pub registry: &'a TypeRegistry,
}

impl CallArgs<'_> {
    pub fn arg(&self, index: usize) -> EvalResult<&Value> {
        self.args
            .get(index)
            .ok_or_else(|| internal(format!("missing argument {index}")))
    }

    pub fn int(&self, index: usize) -> EvalResult<i64> {
        let value = self.arg(index)?;
        value
            .as_int()
            .ok_or_else(|| internal(format!("argument {index} is not an int")))
    }

    pub fn float(&self, index: usize) -> EvalResult<f64> {
        let value = self.arg(index)?;
        value
            .as_float()
            .ok_or_else(|| internal(format!("argument {index} is not numeric")))
    }

    pub fn str(&self, index: usize) -> EvalResult<&str> {
        let value = self.arg(index)?;
        value
            .as_str()
            .ok_or_else(|| internal(format!("argument {index} is not a string")))
    }

    pub fn type_arg(&self, index: usize) -> EvalResult<&TypeTag> {
        self.type_args
            .get(index)
            .ok_or_else(|| internal(format!("missing type argument {index}")))
    }

    pub fn receiver_str(&self) -> EvalResult<&str> {
        self.receiver
            .as_str()
            .ok_or_else(|| internal("receiver is not a string"))
    }

    /// Borrow the receiver object as a `T`.
    pub fn with_receiver<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> EvalResult<R> {
        self.receiver
            .as_object()
            .ok_or_else(|| internal("receiver is not an object"))?
            .with(f)
    }

    /// Mutably borrow the receiver object as a `T`.
    pub fn with_receiver_mut<T: 'static, R>(
        &self,
        f: impl FnOnce(&mut T) -> R,
    ) -> EvalResult<R> {
        self.receiver
            .as_object()
            .ok_or_else(|| internal("receiver is not an object"))?
            .with_mut(f)
    }
}
