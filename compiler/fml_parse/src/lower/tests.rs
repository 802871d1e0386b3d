#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;
use crate::tests::TestScope;
use crate::{parse_statement, ParseOptions};
use fml_ir::{Name, Span};

fn lower_source(source: &str, scope: &TestScope) -> Result<Program, ParseError> {
    let parsed = parse_statement(
        source,
        Span::from_range(0..source.len()),
        &ParseOptions::default(),
    )
    .unwrap();
    lower(&parsed.arena, parsed.root, scope)
}

fn dump(source: &str, scope: &TestScope) -> String {
    lower_source(source, scope).unwrap().to_string()
}

fn single_assignment(program: &Program) -> &Assignment {
    match program.instrs() {
        [Instr::Assign(assign)] => assign,
        other => panic!("expected a single assignment, got {other:?}"),
    }
}

// === Loads and type roots ===

#[test]
fn bindings_become_loads() {
    let scope = TestScope::new(&["x"], &[]);
    assert_eq!(dump("x + 1", &scope), "load x\npush 1\nop +\n");
}

#[test]
fn type_roots_need_a_member() {
    let scope = TestScope::new(&[], &["Math"]);
    assert_eq!(dump("Math.PI", &scope), "type Math\nget .PI\n");
    let err = lower_source("Math", &scope).unwrap_err();
    assert_eq!(err.code.as_str(), "E2001");
}

#[test]
fn bindings_shadow_types() {
    let scope = TestScope::new(&["Math"], &["Math"]);
    assert_eq!(dump("Math.PI", &scope), "load Math\nget .PI\n");
}

#[test]
fn unknown_names() {
    let scope = TestScope::new(&["x"], &[]);
    let err = lower_source("x + y", &scope).unwrap_err();
    assert_eq!(err.code.as_str(), "E2001");
    assert_eq!(err.span, Span::new(4, 5));

    let err = lower_source("Nope.Thing", &scope).unwrap_err();
    assert_eq!(err.code.as_str(), "E2001");
}

#[test]
fn generic_arguments_resolve_to_tags() {
    let scope = TestScope::new(&["x"], &["Convert", "List"]);
    let program = lower_source("Convert.To<int>(x)", &scope).unwrap();
    let Instr::Access(call) = &program.instrs()[1] else {
        panic!("expected an accessor");
    };
    let AccessKind::Method { args, type_args } = &call.kind else {
        panic!("expected a method call");
    };
    assert_eq!(type_args, &vec![TypeTag::Int]);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].to_string(), "load x\n");

    assert_eq!(dump("Convert.To<List>(x)", &scope).lines().nth(1), Some("call .To<List>/1"));

    let err = lower_source("Convert.To<integer>(x)", &scope).unwrap_err();
    assert_eq!(err.code.as_str(), "E2002");
}

// === Ternary ===

#[test]
fn ternary_branches_are_sub_programs() {
    let scope = TestScope::new(&["hit"], &[]);
    assert_eq!(
        dump("true ? 1 : (hit = 1)", &scope),
        "\
ternary
  cond:
    push true
  then:
    push 1
  else:
    assign hit
      push 1
"
    );
}

// === Places ===

#[test]
fn variable_place() {
    let scope = TestScope::new(&["x"], &[]);
    let program = lower_source("x += 5", &scope).unwrap();
    let assign = single_assignment(&program);
    assert_eq!(assign.place, Place::Variable(Name::new("x")));
    assert_eq!(assign.value.to_string(), "load x\npush 5\nop +\n");
}

#[test]
fn nested_member_place_keeps_its_owner_chain() {
    let scope = TestScope::new(&["outer"], &[]);
    let program = lower_source("outer.Inner.X = 3", &scope).unwrap();
    let assign = single_assignment(&program);
    assert_eq!(assign.place.root_variable().map(Name::as_str), Some("outer"));
    let Place::Member { owner, member, .. } = &assign.place else {
        panic!("expected a member place");
    };
    assert_eq!(member.as_str(), "X");
    assert!(matches!(owner.as_ref(), Place::Member { member, .. } if member.as_str() == "Inner"));
}

#[test]
fn static_and_temporary_owners() {
    let scope = TestScope::new(&["lst"], &["Settings"]);
    let program = lower_source("Settings.Level = 2", &scope).unwrap();
    let Place::Member { owner, .. } = &single_assignment(&program).place else {
        panic!("expected a member place");
    };
    assert_eq!(
        owner.as_ref(),
        &Place::Static(TypeTag::Object(Name::new("Settings")))
    );

    let program = lower_source("lst.Get(0).X = 2", &scope).unwrap();
    let Place::Member { owner, .. } = &single_assignment(&program).place else {
        panic!("expected a member place");
    };
    assert!(matches!(owner.as_ref(), Place::Temp(_)));
}

#[test]
fn unknown_assignment_root() {
    let scope = TestScope::new(&[], &[]);
    let err = lower_source("y = 1", &scope).unwrap_err();
    assert_eq!(err.code.as_str(), "E2001");
}
