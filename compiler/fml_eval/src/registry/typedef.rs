//! Typed registration of host types.
//!
//! A [`TypeDef<T>`] describes how formulas see a Rust type `T`: its fields,
//! properties and methods, plus any static members reached through the type
//! name. Closures are written against `&T`/`&mut T`; the builder wraps them
//! into type-erased descriptors.
//!
//! ```ignore
//! registry.register(
//!     TypeDef::<Point>::value("Point")
//!         .field("X", |p: &Point| p.x, |p: &mut Point, x| p.x = x)
//!         .property("Length", |p: &Point| p.length()),
//! );
//! ```

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use fml_ir::{Name, TypeTag};
use rustc_hash::FxHashMap;

use super::descriptor::{
    CallArgs, Getter, Invoker, MemberDescriptor, MemberKind, MethodDescriptor, ParamType, Setter,
};
use super::HostType;
use crate::errors::{conversion_failed, internal, EvalResult};
use crate::{ObjectRef, Value};

/// Conversion from a Rust value into a formula value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Conversion from a formula value into a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> EvalResult<Self>;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> EvalResult<Self> {
        Ok(value.clone())
    }
}

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident, $tag:literal;)*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> EvalResult<Self> {
                    match value {
                        Value::$variant(inner) => Ok(inner.clone()),
                        other => Err(conversion_failed(&other.describe(), $tag)),
                    }
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool, "bool";
    i64 => Int, "int";
    Arc<str> => Str, "string";
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> EvalResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| conversion_failed(&value.describe(), "string"))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> EvalResult<Self> {
        value
            .as_float()
            .ok_or_else(|| conversion_failed(&value.describe(), "float"))
    }
}

type Copier = fn(&ObjectRef) -> EvalResult<ObjectRef>;

/// Name tables of one host type. Shared by [`TypeDef`] and enums.
pub(crate) struct MemberTable {
    pub(crate) tag: TypeTag,
    pub(crate) copier: Option<Copier>,
    pub(crate) fields: FxHashMap<Name, MemberDescriptor>,
    pub(crate) properties: FxHashMap<Name, MemberDescriptor>,
    pub(crate) methods: FxHashMap<Name, Vec<MethodDescriptor>>,
    pub(crate) static_members: FxHashMap<Name, MemberDescriptor>,
    pub(crate) static_methods: FxHashMap<Name, Vec<MethodDescriptor>>,
}

impl MemberTable {
    pub(crate) fn new(tag: TypeTag) -> Self {
        MemberTable {
            tag,
            copier: None,
            fields: FxHashMap::default(),
            properties: FxHashMap::default(),
            methods: FxHashMap::default(),
            static_members: FxHashMap::default(),
            static_methods: FxHashMap::default(),
        }
    }

    pub(crate) fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.fields.get(name).or_else(|| self.properties.get(name))
    }

    pub(crate) fn add_property(
        &mut self,
        name: &str,
        kind: MemberKind,
        getter: Option<Getter>,
        setter: Option<Setter>,
    ) {
        let descriptor = MemberDescriptor {
            name: Name::new(name),
            kind,
            getter,
            setter,
        };
        let table = match kind {
            MemberKind::Field => &mut self.fields,
            MemberKind::Property => &mut self.properties,
        };
        table.insert(descriptor.name.clone(), descriptor);
    }

    pub(crate) fn add_static(&mut self, name: &str, getter: Option<Getter>, setter: Option<Setter>) {
        self.static_members.insert(
            Name::new(name),
            MemberDescriptor {
                name: Name::new(name),
                kind: MemberKind::Property,
                getter,
                setter,
            },
        );
    }

    pub(crate) fn add_method(&mut self, is_static: bool, method: MethodDescriptor) {
        let table = if is_static {
            &mut self.static_methods
        } else {
            &mut self.methods
        };
        table.entry(method.name.clone()).or_default().push(method);
    }
}

fn method(
    name: &str,
    params: &[ParamType],
    generic_arity: usize,
    returns_void: bool,
    invoke: Invoker,
) -> MethodDescriptor {
    MethodDescriptor {
        name: Name::new(name),
        params: params.to_vec(),
        generic_arity,
        returns_void,
        invoke,
    }
}

fn typed_getter<T: Any, F: IntoValue>(get: impl Fn(&T) -> F + Send + Sync + 'static) -> Getter {
    Arc::new(move |receiver: &Value| {
        let obj = receiver
            .as_object()
            .ok_or_else(|| internal("member read on a non-object"))?;
        obj.with(|value: &T| get(value).into_value())
    })
}

fn typed_setter<T: Any, F: FromValue>(
    set: impl Fn(&mut T, F) + Send + Sync + 'static,
) -> Setter {
    Arc::new(move |receiver: &Value, value: Value| {
        let obj = receiver
            .as_object()
            .ok_or_else(|| internal("member write on a non-object"))?;
        let converted = F::from_value(&value)?;
        obj.with_mut(|target: &mut T| set(target, converted))
    })
}

/// Builder and registration table for the host type `T`.
pub struct TypeDef<T> {
    table: MemberTable,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDef<T> {
    fn with_table(table: MemberTable) -> Self {
        TypeDef {
            table,
            _marker: PhantomData,
        }
    }

    /// A reference type: every load shares the same object.
    pub fn reference(name: &str) -> Self {
        Self::with_table(MemberTable::new(TypeTag::Object(Name::new(name))))
    }

    /// A value type: loads from bindings hand out copies, and writes through
    /// a member chain are stored back into the owner.
    pub fn value(name: &str) -> Self
    where
        T: Clone,
    {
        let mut table = MemberTable::new(TypeTag::Object(Name::new(name)));
        table.copier = Some(ObjectRef::deep_clone::<T>);
        Self::with_table(table)
    }

    /// A readable and writable field.
    #[must_use]
    pub fn field<F: IntoValue + FromValue>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> F + Send + Sync + 'static,
        set: impl Fn(&mut T, F) + Send + Sync + 'static,
    ) -> Self {
        self.table.add_property(
            name,
            MemberKind::Field,
            Some(typed_getter(get)),
            Some(typed_setter(set)),
        );
        self
    }

    /// A read-only property.
    #[must_use]
    pub fn property<F: IntoValue>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> F + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_property(name, MemberKind::Property, Some(typed_getter(get)), None);
        self
    }

    #[must_use]
    pub fn property_rw<F: IntoValue + FromValue>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> F + Send + Sync + 'static,
        set: impl Fn(&mut T, F) + Send + Sync + 'static,
    ) -> Self {
        self.table.add_property(
            name,
            MemberKind::Property,
            Some(typed_getter(get)),
            Some(typed_setter(set)),
        );
        self
    }

    /// A property with a setter and no getter.
    #[must_use]
    pub fn write_only<F: FromValue>(
        mut self,
        name: &str,
        set: impl Fn(&mut T, F) + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_property(name, MemberKind::Property, None, Some(typed_setter(set)));
        self
    }
}

impl<T> TypeDef<T> {
    /// A property computed from the raw receiver value.
    #[must_use]
    pub fn raw_property(
        mut self,
        name: &str,
        get: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_property(name, MemberKind::Property, Some(Arc::new(get)), None);
        self
    }

    #[must_use]
    pub fn method(
        mut self,
        name: &str,
        params: &[ParamType],
        body: impl Fn(&CallArgs<'_>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_method(false, method(name, params, 0, false, Arc::new(body)));
        self
    }

    /// A method without a result; the call yields the receiver.
    #[must_use]
    pub fn void_method(
        mut self,
        name: &str,
        params: &[ParamType],
        body: impl Fn(&CallArgs<'_>) -> EvalResult<()> + Send + Sync + 'static,
    ) -> Self {
        let invoke: Invoker = Arc::new(move |args: &CallArgs<'_>| {
            body(args)?;
            Ok(Value::Null)
        });
        self.table
            .add_method(false, method(name, params, 0, true, invoke));
        self
    }

    #[must_use]
    pub fn generic_method(
        mut self,
        name: &str,
        generic_arity: usize,
        params: &[ParamType],
        body: impl Fn(&CallArgs<'_>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table.add_method(
            false,
            method(name, params, generic_arity, false, Arc::new(body)),
        );
        self
    }

    #[must_use]
    pub fn static_property(
        mut self,
        name: &str,
        get: impl Fn() -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_static(name, Some(Arc::new(move |_: &Value| get())), None);
        self
    }

    #[must_use]
    pub fn static_property_rw(
        mut self,
        name: &str,
        get: impl Fn() -> EvalResult + Send + Sync + 'static,
        set: impl Fn(Value) -> EvalResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.table.add_static(
            name,
            Some(Arc::new(move |_: &Value| get())),
            Some(Arc::new(move |_: &Value, value: Value| set(value))),
        );
        self
    }

    #[must_use]
    pub fn static_method(
        mut self,
        name: &str,
        params: &[ParamType],
        body: impl Fn(&CallArgs<'_>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table
            .add_method(true, method(name, params, 0, false, Arc::new(body)));
        self
    }

    #[must_use]
    pub fn static_generic_method(
        mut self,
        name: &str,
        generic_arity: usize,
        params: &[ParamType],
        body: impl Fn(&CallArgs<'_>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.table.add_method(
            true,
            method(name, params, generic_arity, false, Arc::new(body)),
        );
        self
    }
}

impl TypeDef<()> {
    /// A type with only static members, such as `Math`.
    pub fn statics(name: &str) -> Self {
        Self::with_table(MemberTable::new(TypeTag::Object(Name::new(name))))
    }

    /// Members of a primitive type (`string`, `int`, ...).
    pub(crate) fn primitive(tag: TypeTag) -> Self {
        Self::with_table(MemberTable::new(tag))
    }
}

impl<T> HostType for TypeDef<T> {
    fn type_tag(&self) -> &TypeTag {
        &self.table.tag
    }

    fn resolve_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.table.member(name)
    }

    fn resolve_method(&self, name: &str) -> Option<&[MethodDescriptor]> {
        self.table.methods.get(name).map(Vec::as_slice)
    }

    fn resolve_static_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.table.static_members.get(name)
    }

    fn resolve_static_method(&self, name: &str) -> Option<&[MethodDescriptor]> {
        self.table.static_methods.get(name).map(Vec::as_slice)
    }

    fn is_value_type(&self) -> bool {
        self.table.copier.is_some()
    }

    fn copy_value(&self, object: &ObjectRef) -> Option<EvalResult<ObjectRef>> {
        self.table.copier.map(|copy| copy(object))
    }
}
