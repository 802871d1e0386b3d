//! Host types shared by unit tests.

use fml_ir::{Name, TypeTag};
use fml_parse::{compile, ParseOptions};

use crate::errors::internal;
use crate::{
    Bindings, CompileScope, EvalResult, FromValue, Interpreter, IntoValue, ParamType, TypeDef,
    TypeRegistry, Value,
};

/// A value type.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: i64,
    pub y: f64,
}

/// A value type holding another value type.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub label: String,
}

/// A reference type.
#[derive(Debug, Default)]
pub struct Counter {
    pub hits: i64,
    pub secret: i64,
}

impl IntoValue for Point {
    fn into_value(self) -> Value {
        Value::object("Point", self)
    }
}

impl FromValue for Point {
    fn from_value(value: &Value) -> EvalResult<Self> {
        value
            .as_object()
            .ok_or_else(|| internal("not a Point"))?
            .with(|p: &Point| p.clone())
    }
}

pub fn point(x: i64, y: f64) -> Value {
    Point { x, y }.into_value()
}

pub fn rect(x: i64) -> Value {
    Value::object(
        "Rect",
        Rect {
            origin: Point { x, y: 0.0 },
            label: "r".to_string(),
        },
    )
}

pub fn counter() -> Value {
    Value::object("Counter", Counter::default())
}

pub fn mode() -> TypeTag {
    TypeTag::Enum(Name::new("Mode"))
}

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    registry.register_enum("Mode", &["Idle", "Run"]);
    registry.register(
        TypeDef::<Point>::value("Point")
            .field("X", |p: &Point| p.x, |p: &mut Point, x: i64| p.x = x)
            .field("Y", |p: &Point| p.y, |p: &mut Point, y: f64| p.y = y)
            .method("Scaled", &[ParamType::INT], |args| {
                let k = args.int(0)?;
                args.with_receiver(|p: &Point| point(p.x * k, p.y))
            })
            .void_method("Reset", &[], |args| {
                args.with_receiver_mut(|p: &mut Point| *p = Point { x: 0, y: 0.0 })
            }),
    );
    registry.register(
        TypeDef::<Rect>::value("Rect")
            .field(
                "Origin",
                |r: &Rect| r.origin.clone(),
                |r: &mut Rect, p: Point| r.origin = p,
            )
            .property_rw(
                "Label",
                |r: &Rect| r.label.clone(),
                |r: &mut Rect, label: String| r.label = label,
            ),
    );
    registry.register(
        TypeDef::<Counter>::reference("Counter")
            .field("Hits", |c: &Counter| c.hits, |c: &mut Counter, n: i64| c.hits = n)
            .property("Id", |_: &Counter| 7_i64)
            .write_only("Secret", |c: &mut Counter, n: i64| c.secret = n)
            .void_method("Bump", &[], |args| {
                args.with_receiver_mut(|c: &mut Counter| c.hits += 1)
            })
            .method("SetMode", &[ParamType::Exact(mode())], |args| {
                Ok(args.arg(0)?.clone())
            })
            .method("Ghost", &[], |_| Ok(Value::object("Ghost", 0_i64))),
    );
    registry
}

/// Compile `formula` against `bindings` and run every statement.
///
/// Panics on compile errors; the interpreter is what is under test.
#[allow(clippy::panic, reason = "test helper")]
pub fn run_all(registry: &TypeRegistry, formula: &str, bindings: &mut Bindings) -> Vec<EvalResult> {
    let compiled = compile(
        formula,
        &CompileScope::new(bindings, registry),
        &ParseOptions::default(),
    );
    compiled
        .statements()
        .iter()
        .map(|statement| match &statement.outcome {
            Ok(program) => Interpreter::new(registry, bindings).run(program),
            Err(diag) => panic!("`{formula}` failed to compile: {diag}"),
        })
        .collect()
}

/// Result of the last statement.
#[allow(clippy::panic, reason = "test helper")]
pub fn run(registry: &TypeRegistry, formula: &str, bindings: &mut Bindings) -> EvalResult {
    match run_all(registry, formula, bindings).pop() {
        Some(result) => result,
        None => panic!("`{formula}` has no statements"),
    }
}
