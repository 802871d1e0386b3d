#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;
use fml_eval::TypeTag;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

// === Values ===

#[test]
fn scalars() {
    assert_eq!(parse_value("null"), Value::Null);
    assert_eq!(parse_value("true"), Value::Bool(true));
    assert_eq!(parse_value(" 42 "), Value::Int(42));
    assert_eq!(parse_value("-7"), Value::Int(-7));
    assert_eq!(parse_value("2.5"), Value::Float(2.5));
    assert_eq!(parse_value(".5"), Value::Float(0.5));
}

#[test]
fn strings_stay_strings() {
    assert_eq!(parse_value("hello"), Value::from("hello"));
    assert_eq!(parse_value("'42'"), Value::from("42"));
    assert_eq!(parse_value("\"true\""), Value::from("true"));
    assert_eq!(parse_value("inf"), Value::from("inf"));
    assert_eq!(parse_value("NaN"), Value::from("NaN"));
    assert_eq!(parse_value("-"), Value::from("-"));
}

#[test]
fn lists() {
    let list = parse_value("[1, two, 3.5]");
    assert_eq!(list.to_string(), "[1, two, 3.5]");
    assert_eq!(list.type_name(), "List");
    assert_eq!(parse_value("[]").to_string(), "[]");
}

// === Bindings ===

#[test]
fn untyped_binding_infers() {
    let registry = TypeRegistry::with_builtins();
    let var = BindingArg::parse("x=3").unwrap().to_variable(&registry).unwrap();
    assert_eq!(var.ty(), &TypeTag::Int);
    assert_eq!(var.get(), Value::Int(3));
}

#[test]
fn typed_binding_converts() {
    let registry = TypeRegistry::with_builtins();
    let var = BindingArg::parse("r:float=3")
        .unwrap()
        .to_variable(&registry)
        .unwrap();
    assert_eq!(var.ty(), &TypeTag::Float);
    assert_eq!(var.get(), Value::Float(3.0));
}

#[test]
fn typed_binding_rejects_unknown_type() {
    let registry = TypeRegistry::with_builtins();
    let err = BindingArg::parse("r:Nope=3")
        .unwrap()
        .to_variable(&registry)
        .unwrap_err();
    assert_eq!(
        err,
        UsageError::UnknownType {
            name: "r".into(),
            ty: "Nope".into()
        }
    );
}

#[test]
fn typed_binding_reports_failed_conversion() {
    let registry = TypeRegistry::with_builtins();
    let err = BindingArg::parse("n:int=abc")
        .unwrap()
        .to_variable(&registry)
        .unwrap_err();
    assert!(matches!(err, UsageError::Conversion { name, .. } if name == "n"));
}

#[test]
fn malformed_bindings() {
    assert_eq!(
        BindingArg::parse("x").unwrap_err(),
        UsageError::MalformedBinding("x".into())
    );
    assert_eq!(
        BindingArg::parse("1x=2").unwrap_err(),
        UsageError::InvalidName("1x".into())
    );
}

// === Invocation ===

#[test]
fn formula_then_bindings() {
    let inv = parse_invocation(&strings(&["x + y", "x=1", "y=2", "--uid", "site"])).unwrap();
    assert_eq!(inv.formula, "x + y");
    assert_eq!(inv.uid, "site");
    assert_eq!(inv.bindings.len(), 2);
    assert!(inv.config.cache_enabled);
}

#[test]
fn leading_minus_is_a_formula() {
    let inv = parse_invocation(&strings(&["-3+2"])).unwrap();
    assert_eq!(inv.formula, "-3+2");
}

#[test]
fn options() {
    let inv = parse_invocation(&strings(&["--no-cache", "--max-hops", "5", "a.b"])).unwrap();
    assert!(!inv.config.cache_enabled);
    assert_eq!(inv.config.max_chain_hops, 5);
}

#[test]
fn option_errors() {
    assert_eq!(
        parse_invocation(&strings(&["1", "--max-hops"])).unwrap_err(),
        UsageError::MissingFlagValue("--max-hops")
    );
    assert_eq!(
        parse_invocation(&strings(&["1", "--max-hops", "many"])).unwrap_err(),
        UsageError::InvalidNumber {
            flag: "--max-hops",
            value: "many".into()
        }
    );
    assert_eq!(
        parse_invocation(&strings(&["1", "--fast"])).unwrap_err(),
        UsageError::UnknownFlag("--fast".into())
    );
    assert_eq!(
        parse_invocation(&[]).unwrap_err(),
        UsageError::MissingFormula
    );
}
