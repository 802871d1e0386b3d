//! Runtime type tags.
//!
//! A `TypeTag` names the runtime type of a value. Tags drive method overload
//! matching, generic arguments, assignment conversion and the binding type
//! signature used as part of the formula cache key.

use std::fmt;

use crate::Name;

/// Runtime type of a value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// A registered enum type.
    Enum(Name),
    /// A registered host object type (reference or value type).
    Object(Name),
}

impl TypeTag {
    /// Resolve one of the built-in primitive spellings.
    ///
    /// Used for generic type arguments such as `Convert.To<int>(x)`.
    pub fn primitive(name: &str) -> Option<TypeTag> {
        match name {
            "int" => Some(TypeTag::Int),
            "float" => Some(TypeTag::Float),
            "bool" => Some(TypeTag::Bool),
            "string" => Some(TypeTag::Str),
            _ => None,
        }
    }

    /// The spelling used in formulas and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "string",
            TypeTag::Enum(name) | TypeTag::Object(name) => name.as_str(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
