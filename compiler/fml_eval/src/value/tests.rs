#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, PartialEq)]
struct Point {
    x: i64,
}

#[test]
fn display_forms() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Float(3.0).to_string(), "3");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(
        Value::list(vec![Value::Int(1), Value::string("a")]).to_string(),
        "[1, a]"
    );
    assert_eq!(Value::object("Point", Point { x: 1 }).to_string(), "Point");
}

#[test]
fn type_tags() {
    assert_eq!(Value::Int(1).type_tag(), TypeTag::Int);
    assert_eq!(
        Value::list(vec![]).type_tag(),
        TypeTag::Object(Name::new("List"))
    );
    let axis = Value::Enum(EnumValue {
        ty: Name::new("Axis"),
        variant: Name::new("Y"),
        ordinal: 1,
    });
    assert_eq!(axis.type_tag(), TypeTag::Enum(Name::new("Axis")));
    assert_eq!(axis.to_string(), "Y");
}

#[test]
fn objects_compare_by_identity() {
    let a = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    let b = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn with_mut_is_visible_through_every_handle() {
    let a = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    let alias = a.clone();
    alias.with_mut(|p: &mut Point| p.x = 9).unwrap();
    assert_eq!(a.with(|p: &Point| p.x).unwrap(), 9);
}

#[test]
fn deep_clone_detaches() {
    let a = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    let copy = a.deep_clone::<Point>().unwrap();
    copy.with_mut(|p: &mut Point| p.x = 5).unwrap();
    assert_eq!(a.with(|p: &Point| p.x).unwrap(), 1);
    assert_ne!(a, copy);
}

#[test]
fn wrong_downcast_is_an_error() {
    let a = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    assert!(!a.is::<Vec<Value>>());
    let err = a.with(|_: &Vec<Value>| ()).unwrap_err();
    assert_eq!(err.code().as_str(), "E6005");
}

#[test]
fn nested_borrow_conflict_is_an_error() {
    let a = ObjectRef::new(Name::new("Point"), Point { x: 1 });
    let inner = a
        .with(|_: &Point| a.with_mut(|p: &mut Point| p.x = 2))
        .unwrap();
    assert!(inner.is_err());
}

#[test]
fn self_containing_list_displays_once() {
    let list = Value::list(vec![Value::Int(1)]);
    let obj = list.as_object().unwrap();
    obj.with_mut(|items: &mut Vec<Value>| items.push(list.clone()))
        .unwrap();
    assert_eq!(list.to_string(), "[1, [...]]");

    // Break the cycle so the cell is freed.
    obj.with_mut(|items: &mut Vec<Value>| items.clear()).unwrap();
}

#[test]
fn shared_sibling_lists_are_not_cycles() {
    let inner = Value::list(vec![Value::Int(2)]);
    let outer = Value::list(vec![inner.clone(), inner]);
    assert_eq!(outer.to_string(), "[[2], [2]]");
}
