//! Host type registry.
//!
//! Formulas can only touch types the host has registered: a receiver,
//! argument or result of any other type is rejected. [`HostType`] is the
//! capability interface the interpreter resolves names through;
//! [`TypeDef`] and [`EnumType`] are the table-driven implementations the
//! builder API produces. Hosts with unusual needs may implement the trait
//! directly.

mod builtins;
mod descriptor;
mod enums;
mod typedef;

pub use descriptor::{
    CallArgs, Getter, Invoker, MemberDescriptor, MemberKind, MethodDescriptor, ParamType, Setter,
};
pub use enums::EnumType;
pub use typedef::{FromValue, IntoValue, TypeDef};

use fml_ir::{Name, TypeTag};
use rustc_hash::FxHashMap;

use crate::errors::{
    no_matching_overload, undefined_method, unknown_variant, unregistered_type, EvalError,
    EvalResult,
};
use crate::value::EnumValue;
use crate::{ObjectRef, Value};

/// Name resolution for one registered type.
pub trait HostType: Send + Sync {
    fn type_tag(&self) -> &TypeTag;

    /// Instance field or property. Fields shadow properties of the same name.
    fn resolve_member(&self, name: &str) -> Option<&MemberDescriptor>;

    /// Instance method overloads.
    fn resolve_method(&self, name: &str) -> Option<&[MethodDescriptor]>;

    fn resolve_static_member(&self, name: &str) -> Option<&MemberDescriptor>;

    fn resolve_static_method(&self, name: &str) -> Option<&[MethodDescriptor]>;

    fn is_value_type(&self) -> bool {
        false
    }

    /// Copy an instance of a value type. `None` for reference types.
    fn copy_value(&self, _object: &ObjectRef) -> Option<EvalResult<ObjectRef>> {
        None
    }

    /// Look up an enum variant by name.
    fn variant(&self, _name: &str) -> Option<EnumValue> {
        None
    }

    /// Look up an enum variant by ordinal.
    fn variant_at(&self, _ordinal: i64) -> Option<EnumValue> {
        None
    }
}

/// The allow-list of host types.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<Name, Box<dyn HostType>>,
}

impl TypeRegistry {
    /// An empty registry. Primitive values have no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the primitive types, `List`, `Math` and `Convert`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }

    /// Register a type, replacing any type of the same name.
    pub fn register(&mut self, ty: impl HostType + 'static) {
        let name = Name::new(ty.type_tag().name());
        tracing::debug!(%name, "registered host type");
        self.types.insert(name, Box::new(ty));
    }

    pub fn register_enum(&mut self, name: &str, variants: &[&str]) {
        self.register(EnumType::new(name, variants));
    }

    pub fn get(&self, name: &str) -> Option<&dyn HostType> {
        self.types.get(name).map(AsRef::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(Name::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a type name written in a formula: a primitive spelling or a
    /// registered type.
    pub fn resolve_type(&self, name: &str) -> Option<TypeTag> {
        TypeTag::primitive(name).or_else(|| self.get(name).map(|ty| ty.type_tag().clone()))
    }

    pub fn for_tag(&self, tag: &TypeTag) -> EvalResult<&dyn HostType> {
        self.get(tag.name())
            .ok_or_else(|| unregistered_type(tag.name()))
    }

    /// The type that resolves members of `value`.
    pub fn for_value(&self, value: &Value) -> EvalResult<&dyn HostType> {
        self.for_tag(&value.type_tag())
    }

    /// Reject objects and enums of unregistered types.
    pub fn check_allowed(&self, value: &Value) -> EvalResult<()> {
        match value {
            Value::Object(obj) if !self.contains(obj.type_name().as_str()) => {
                Err(unregistered_type(obj.type_name().as_str()))
            }
            Value::Enum(e) if !self.contains(e.ty.as_str()) => {
                Err(unregistered_type(e.ty.as_str()))
            }
            _ => Ok(()),
        }
    }

    pub fn is_value_type(&self, value: &Value) -> bool {
        match value {
            Value::Object(obj) => self
                .get(obj.type_name().as_str())
                .is_some_and(|ty| ty.is_value_type()),
            _ => false,
        }
    }

    /// Copy value-type objects; everything else passes through.
    pub fn copy_on_load(&self, value: Value) -> EvalResult {
        if let Value::Object(obj) = &value {
            if let Some(copy) = self
                .get(obj.type_name().as_str())
                .and_then(|ty| ty.copy_value(obj))
            {
                return copy.map(Value::Object);
            }
        }
        Ok(value)
    }

    /// Parse an enum variant name.
    pub fn enum_variant(&self, enum_name: &str, variant: &str) -> EvalResult<EnumValue> {
        let ty = self
            .get(enum_name)
            .ok_or_else(|| unregistered_type(enum_name))?;
        ty.variant(variant)
            .ok_or_else(|| unknown_variant(enum_name, variant))
    }

    /// Pick the overload of `method` that accepts `args`.
    ///
    /// Arguments must match parameter tags exactly, except that an enum
    /// parameter accepts a string naming one of its variants; such strings
    /// are replaced by the enum value in `args`.
    pub fn select_overload<'m>(
        &self,
        owner: &str,
        method: &str,
        overloads: Option<&'m [MethodDescriptor]>,
        args: &mut [Value],
        type_args: &[TypeTag],
    ) -> EvalResult<&'m MethodDescriptor> {
        let overloads = overloads.ok_or_else(|| undefined_method(method, owner))?;
        let mut variant_error: Option<EvalError> = None;

        for candidate in overloads {
            if candidate.params.len() != args.len()
                || candidate.generic_arity != type_args.len()
            {
                continue;
            }
            match self.match_params(candidate, args) {
                Ok(Some(converted)) => {
                    for (index, value) in converted {
                        args[index] = value;
                    }
                    return Ok(candidate);
                }
                Ok(None) => {}
                Err(e) => {
                    variant_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = variant_error {
            return Err(e);
        }
        let arg_types: Vec<String> = args.iter().map(Value::type_name).collect();
        Err(no_matching_overload(method, owner, &arg_types.join(", ")))
    }

    /// `Ok(Some(conversions))` when every argument fits.
    fn match_params(
        &self,
        candidate: &MethodDescriptor,
        args: &[Value],
    ) -> EvalResult<Option<Vec<(usize, Value)>>> {
        let mut converted = Vec::new();
        for (index, (param, arg)) in candidate.params.iter().zip(args).enumerate() {
            match param {
                ParamType::Any => {}
                ParamType::Exact(tag) if *tag == arg.type_tag() => {}
                ParamType::Exact(TypeTag::Enum(enum_name)) => match arg {
                    Value::Str(text) => {
                        let value = self.enum_variant(enum_name.as_str(), text)?;
                        converted.push((index, Value::Enum(value)));
                    }
                    _ => return Ok(None),
                },
                ParamType::Exact(_) => return Ok(None),
            }
        }
        Ok(Some(converted))
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
