use pretty_assertions::assert_eq;

use super::TestScope;
use crate::{compile, ParseOptions};

#[test]
fn statements_compile_independently() {
    let scope = TestScope::new(&["x"], &[]);
    let compiled = compile("x = 1; A +* B; x", &scope, &ParseOptions::default());

    let statements = compiled.statements();
    assert_eq!(statements.len(), 3);
    assert!(statements[0].outcome.is_ok());
    assert!(statements[2].outcome.is_ok());

    let diag = statements[1].outcome.as_ref().unwrap_err();
    assert_eq!(diag.code.as_str(), "E1002");
    assert!(diag.notes.iter().any(|n| n == "in statement `A +* B`"));
    assert_eq!(compiled.statement_text(&statements[1]), "A +* B");
    assert_eq!(compiled.diagnostics().count(), 1);
}

#[test]
fn empty_statements_are_skipped() {
    let scope = TestScope::new(&[], &[]);
    let compiled = compile(" ; ;", &scope, &ParseOptions::default());
    assert!(compiled.statements().is_empty());
    assert_eq!(compiled.source(), " ; ;");
}

#[test]
fn unresolved_names_fail_only_their_statement() {
    let scope = TestScope::new(&["a"], &[]);
    let compiled = compile("a + 1; b + 1", &scope, &ParseOptions::default());
    let codes: Vec<Option<&str>> = compiled
        .statements()
        .iter()
        .map(|s| s.outcome.as_ref().err().map(|d| d.code.as_str()))
        .collect();
    assert_eq!(codes, vec![None, Some("E2001")]);
}

#[test]
fn spans_point_into_the_full_formula() {
    let scope = TestScope::new(&[], &[]);
    let compiled = compile("1; 2 +", &scope, &ParseOptions::default());
    let diag = compiled.diagnostics().next().unwrap();
    assert_eq!(diag.primary_span(), Some(fml_ir::Span::point(6)));
}

#[test]
fn program_dump_for_a_mixed_formula() {
    let scope = TestScope::new(&["lst", "x"], &["Math"]);
    let compiled = compile(
        "x = Math.Max(lst.Count, 2) * -1",
        &scope,
        &ParseOptions::default(),
    );
    let program = compiled.statements()[0].outcome.as_ref().unwrap();
    assert_eq!(
        program.to_string(),
        "\
assign x
  type Math
  call .Max/2
    arg 0:
      load lst
      get .Count
    arg 1:
      push 2
  push -1
  push 1
  op *
  op *
"
    );
}
