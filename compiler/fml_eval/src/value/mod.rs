//! Runtime values.
//!
//! [`Value`] is a closed set of variants matched exhaustively by the
//! operators, the converter and the interpreter. Host objects are held
//! behind [`ObjectRef`], a shared handle to a type-erased cell. Whether an
//! object behaves as a reference or a value type is a property of its
//! registered type, not of the handle: the interpreter asks the registry to
//! copy value-type objects when they are loaded.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use fml_ir::{Literal, Name, TypeTag};

use crate::errors::{host_failure, EvalResult};

/// Type name of the built-in list object.
pub const LIST_TYPE: &str = "List";

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Enum(EnumValue),
    Object(ObjectRef),
    /// A static type root, the receiver of `Math.PI`.
    Type(TypeTag),
}

/// A variant of a registered enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub ty: Name,
    pub variant: Name,
    pub ordinal: i64,
}

impl Value {
    pub fn from_literal(literal: &Literal) -> Value {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(Arc::clone(s)),
        }
    }

    pub fn string(text: &str) -> Value {
        Value::Str(Arc::from(text))
    }

    /// A new host object of the given registered type.
    pub fn object<T: Any>(type_name: &str, value: T) -> Value {
        Value::Object(ObjectRef::new(Name::new(type_name), value))
    }

    /// A new built-in list.
    pub fn list(items: Vec<Value>) -> Value {
        Value::object(LIST_TYPE, items)
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::Str,
            Value::Enum(e) => TypeTag::Enum(e.ty.clone()),
            Value::Object(obj) => TypeTag::Object(obj.type_name().clone()),
            Value::Type(tag) => tag.clone(),
        }
    }

    /// Name of the value's type as written in formulas.
    pub fn type_name(&self) -> String {
        match self {
            Value::Type(tag) => format!("type {tag}"),
            other => other.type_tag().name().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float; ints widen.
    #[allow(clippy::cast_precision_loss, reason = "int to float promotion")]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Debug-ish rendering used in diagnostics: strings are quoted.
    pub fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{s}\""),
            other => format!("{other} ({})", other.type_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Enum(e) => f.write_str(e.variant.as_str()),
            Value::Object(obj) => write!(f, "{obj}"),
            Value::Type(tag) => write!(f, "{tag}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

/// Shared handle to a host object.
///
/// Equality is identity: two handles are equal when they point at the same
/// cell.
#[derive(Clone)]
pub struct ObjectRef {
    type_name: Name,
    cell: Rc<RefCell<Box<dyn Any>>>,
}

impl ObjectRef {
    pub fn new<T: Any>(type_name: Name, value: T) -> Self {
        ObjectRef {
            type_name,
            cell: Rc::new(RefCell::new(Box::new(value))),
        }
    }

    pub fn type_name(&self) -> &Name {
        &self.type_name
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Whether the object holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.cell
            .try_borrow()
            .is_ok_and(|inner| inner.downcast_ref::<T>().is_some())
    }

    /// Borrow the object as a `T`.
    pub fn with<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> EvalResult<R> {
        let inner = self
            .cell
            .try_borrow()
            .map_err(|_| host_failure(format!("`{}` is already being modified", self.type_name)))?;
        let value = inner.downcast_ref::<T>().ok_or_else(|| self.wrong_type())?;
        Ok(f(value))
    }

    /// Mutably borrow the object as a `T`.
    pub fn with_mut<T: Any, R>(&self, f: impl FnOnce(&mut T) -> R) -> EvalResult<R> {
        let mut inner = self
            .cell
            .try_borrow_mut()
            .map_err(|_| host_failure(format!("`{}` is already borrowed", self.type_name)))?;
        let value = inner.downcast_mut::<T>().ok_or_else(|| self.wrong_type())?;
        Ok(f(value))
    }

    /// A new handle holding a clone of this object's `T`.
    pub fn deep_clone<T: Any + Clone>(&self) -> EvalResult<ObjectRef> {
        let copy = self.with(|value: &T| value.clone())?;
        Ok(ObjectRef::new(self.type_name.clone(), copy))
    }

    fn borrow_list(&self) -> Option<Ref<'_, Vec<Value>>> {
        let inner = self.cell.try_borrow().ok()?;
        Ref::filter_map(inner, |b| b.downcast_ref::<Vec<Value>>()).ok()
    }

    #[cold]
    fn wrong_type(&self) -> crate::EvalError {
        host_failure(format!(
            "object of type `{}` does not hold the expected host type",
            self.type_name
        ))
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.type_name)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

/// Cells of the lists currently being rendered, outermost first.
type OpenLists = Vec<*const RefCell<Box<dyn Any>>>;

impl ObjectRef {
    /// Lists render their items; a list that is already open renders as
    /// `[...]`.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut OpenLists) -> fmt::Result {
        let cell = Rc::as_ptr(&self.cell);
        if open.contains(&cell) {
            return f.write_str("[...]");
        }
        let Some(items) = self.borrow_list() else {
            return f.write_str(self.type_name.as_str());
        };
        open.push(cell);
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match item {
                Value::Object(obj) => obj.fmt_nested(f, open)?,
                other => write!(f, "{other}")?,
            }
        }
        open.pop();
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests;
