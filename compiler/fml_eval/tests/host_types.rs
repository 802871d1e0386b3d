//! Host integration: registering types, value-type write-back, enums,
//! backing stores and hand-written `HostType` implementations.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::RefCell;
use std::rc::Rc;

use fml_eval::errors::internal;
use fml_eval::registry::{MemberDescriptor, MethodDescriptor};
use fml_eval::{
    BackingStore, Bindings, Engine, ErrorCode, EvalResult, FromValue, HostType, IntoValue, Name,
    ParamType, TypeDef, TypeRegistry, TypeTag, Value, Variable,
};
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, PartialEq)]
struct Vec2 {
    x: f64,
    y: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Transform {
    position: Vec2,
    layer: i64,
}

#[derive(Debug, Default)]
struct Inventory {
    items: Vec<String>,
    slot: Option<Value>,
}

impl IntoValue for Vec2 {
    fn into_value(self) -> Value {
        Value::object("Vec2", self)
    }
}

impl FromValue for Vec2 {
    fn from_value(value: &Value) -> EvalResult<Self> {
        value
            .as_object()
            .ok_or_else(|| internal("not a Vec2"))?
            .with(|v: &Vec2| v.clone())
    }
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    registry.register_enum("Axis", &["X", "Y"]);
    registry.register(
        TypeDef::<Vec2>::value("Vec2")
            .field("X", |v: &Vec2| v.x, |v: &mut Vec2, x: f64| v.x = x)
            .field("Y", |v: &Vec2| v.y, |v: &mut Vec2, y: f64| v.y = y)
            .property("Length", |v: &Vec2| v.x.hypot(v.y))
            .method(
                "Component",
                &[ParamType::Exact(TypeTag::Enum(Name::new("Axis")))],
                |args| {
                    let axis = args.arg(0)?.to_string();
                    args.with_receiver(|v: &Vec2| Value::Float(if axis == "X" { v.x } else { v.y }))
                },
            )
            .static_method("Zero", &[], |_| Ok(Vec2 { x: 0.0, y: 0.0 }.into_value())),
    );
    registry.register(
        TypeDef::<Transform>::value("Transform")
            .field(
                "Position",
                |t: &Transform| t.position.clone(),
                |t: &mut Transform, p: Vec2| t.position = p,
            )
            .field("Layer", |t: &Transform| t.layer, |t: &mut Transform, l: i64| t.layer = l),
    );
    registry.register(
        TypeDef::<Inventory>::reference("Inventory")
            .property("Count", |inv: &Inventory| {
                i64::try_from(inv.items.len()).unwrap_or(i64::MAX)
            })
            .property_rw(
                "Slot",
                |inv: &Inventory| inv.slot.clone().unwrap_or(Value::Null),
                |inv: &mut Inventory, v: Value| inv.slot = Some(v),
            )
            .void_method("Give", &[ParamType::STR], |args| {
                let item = args.str(0)?.to_string();
                args.with_receiver_mut(|inv: &mut Inventory| inv.items.push(item))
            })
            .method("Has", &[ParamType::STR], |args| {
                let item = args.str(0)?;
                args.with_receiver(|inv: &Inventory| Value::Bool(inv.items.iter().any(|i| i == item)))
            }),
    );
    registry
}

fn transform(x: f64) -> Value {
    Value::object(
        "Transform",
        Transform {
            position: Vec2 { x, y: 0.0 },
            layer: 0,
        },
    )
}

fn engine() -> Engine {
    Engine::builder().registry(registry()).build()
}

// === Value types ===

#[test]
fn nested_value_type_write_back() {
    let engine = engine();
    let mut bindings = Bindings::new().with("t", transform(1.0));
    let results = engine
        .evaluate(
            "site",
            "t.Position.X = 3; t.Position.Y += 4; t.Position.Length",
            &mut bindings,
        )
        .unwrap();
    assert_eq!(
        results,
        vec![Value::Float(3.0), Value::Float(4.0), Value::Float(5.0)]
    );
    let position = bindings
        .value("t")
        .unwrap()
        .as_object()
        .unwrap()
        .with(|t: &Transform| t.position.clone())
        .unwrap();
    assert_eq!(position, Vec2 { x: 3.0, y: 4.0 });
}

#[test]
fn whole_value_assignment_to_a_member() {
    let engine = engine();
    let mut bindings = Bindings::new().with("t", transform(9.0));
    engine
        .evaluate("site", "t.Position = Vec2.Zero(); t.Layer = '2'", &mut bindings)
        .unwrap();
    let t = bindings.value("t").unwrap();
    let (x, layer) = t
        .as_object()
        .unwrap()
        .with(|t: &Transform| (t.position.x, t.layer))
        .unwrap();
    assert_eq!((x, layer), (0.0, 2));
}

#[test]
fn member_assignment_that_cannot_convert_is_soft() {
    let engine = engine();
    let mut bindings = Bindings::new().with("t", transform(1.0));
    let evaluation = engine
        .evaluate_detailed("site", "t.Position = 5; t.Layer", &mut bindings)
        .unwrap();
    assert_eq!(evaluation.results, vec![Value::Null, Value::Int(0)]);
    assert_eq!(evaluation.diagnostics[0].code, ErrorCode::E3004);
}

// === Enums ===

#[test]
fn enum_arguments_from_strings_and_statics() {
    let engine = engine();
    let mut bindings = Bindings::new().with("v", Vec2 { x: 1.5, y: 2.5 }.into_value());
    let results = engine
        .evaluate(
            "site",
            "v.Component('Y'); v.Component(Axis.X); Axis.Y.Name; Axis.Y.Ordinal",
            &mut bindings,
        )
        .unwrap();
    assert_eq!(
        results,
        vec![
            Value::Float(2.5),
            Value::Float(1.5),
            Value::string("Y"),
            Value::Int(1),
        ]
    );

    let evaluation = engine
        .evaluate_detailed("site", "v.Component('Z')", &mut bindings)
        .unwrap();
    assert_eq!(evaluation.diagnostics[0].code, ErrorCode::E2005);
}

#[test]
fn enum_typed_bindings_convert_names() {
    let engine = engine();
    let mut bindings = Bindings::new();
    bindings.insert(Variable::new(
        "axis",
        TypeTag::Enum(Name::new("Axis")),
        Value::Null,
    ));
    let results = engine
        .evaluate("site", "axis = 'Y'; axis == 'Y'; axis.Ordinal", &mut bindings)
        .unwrap();
    assert_eq!(results[1], Value::Bool(true));
    assert_eq!(results[2], Value::Int(1));
}

// === Reference types ===

#[test]
fn reference_types_mutate_in_place() {
    let engine = engine();
    let bag = Value::object("Inventory", Inventory::default());
    let mut bindings = Bindings::new().with("bag", bag.clone());
    let results = engine
        .evaluate(
            "site",
            "bag.Give('key').Give('map').Count; bag.Has('map'); bag.Slot = 3; bag.Slot",
            &mut bindings,
        )
        .unwrap();
    assert_eq!(
        results,
        vec![Value::Int(2), Value::Bool(true), Value::Int(3), Value::Int(3)]
    );
    let items = bag
        .as_object()
        .unwrap()
        .with(|inv: &Inventory| inv.items.clone())
        .unwrap();
    assert_eq!(items, vec!["key".to_string(), "map".to_string()]);
}

#[test]
fn unregistered_types_are_rejected() {
    let engine = Engine::new();
    let mut bindings = Bindings::new().with("t", transform(1.0));
    let evaluation = engine
        .evaluate_detailed("site", "t.Layer", &mut bindings)
        .unwrap();
    assert_eq!(evaluation.results, vec![Value::Null]);
    assert_eq!(evaluation.diagnostics[0].code, ErrorCode::E2006);
}

#[test]
fn unregistered_bindings_cannot_be_loaded_or_passed_as_arguments() {
    let engine = Engine::new();
    let mut bindings = Bindings::new()
        .with("lst", Value::list(Vec::new()))
        .with("secret", Value::object("Secret", 5_u8));
    let evaluation = engine
        .evaluate_detailed("site", "lst.Add(secret).Count; secret; lst.Count", &mut bindings)
        .unwrap();
    assert_eq!(
        evaluation.results,
        vec![Value::Null, Value::Null, Value::Int(0)]
    );
    assert_eq!(evaluation.diagnostics.len(), 2);
    assert!(evaluation
        .diagnostics
        .iter()
        .all(|diag| diag.code == ErrorCode::E2006));
}

// === Backing stores ===

struct Shared(Rc<RefCell<Value>>);

impl BackingStore for Shared {
    fn load(&self) -> Value {
        self.0.borrow().clone()
    }

    fn store(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }
}

#[test]
fn backed_variables_write_through() {
    let engine = engine();
    let cell = Rc::new(RefCell::new(Value::Int(10)));
    let mut bindings = Bindings::new();
    bindings.insert(Variable::backed(
        "hp",
        TypeTag::Int,
        Rc::new(Shared(Rc::clone(&cell))),
    ));
    engine.evaluate("site", "hp -= 2.6", &mut bindings).unwrap();
    assert_eq!(*cell.borrow(), Value::Int(7));
}

// === Custom HostType ===

/// A type whose members are computed from their names.
struct Echo {
    tag: TypeTag,
}

impl HostType for Echo {
    fn type_tag(&self) -> &TypeTag {
        &self.tag
    }

    fn resolve_member(&self, _name: &str) -> Option<&MemberDescriptor> {
        None
    }

    fn resolve_method(&self, _name: &str) -> Option<&[MethodDescriptor]> {
        None
    }

    fn resolve_static_member(&self, _name: &str) -> Option<&MemberDescriptor> {
        None
    }

    fn resolve_static_method(&self, _name: &str) -> Option<&[MethodDescriptor]> {
        None
    }
}

#[test]
fn custom_host_types_participate_in_lookup() {
    let mut registry = registry();
    registry.register(Echo {
        tag: TypeTag::Object(Name::new("Echo")),
    });
    let engine = Engine::builder().registry(registry).build();
    let evaluation = engine
        .evaluate_detailed("site", "Echo.Anything", &mut Bindings::new())
        .unwrap();
    assert_eq!(evaluation.diagnostics[0].code, ErrorCode::E2003);
}
