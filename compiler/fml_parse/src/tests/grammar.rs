use pretty_assertions::assert_eq;

use super::{parse_error_code, render};
use crate::ParseOptions;

// === Precedence ===

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(render("2+3*4"), "(2 + (3 * 4))");
    assert_eq!(render("(2+3)*4"), "((2 + 3) * 4)");
}

#[test]
fn binary_classes_are_left_associative() {
    assert_eq!(render("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(render("8 / 4 / 2"), "((8 / 4) / 2)");
    assert_eq!(render("a == b != c"), "((a == b) != c)");
}

#[test]
fn bitwise_classes_bind_tighter_than_arithmetic() {
    assert_eq!(render("1 + 2 & 3"), "(1 + (2 & 3))");
    assert_eq!(render("1 | 2 & 3"), "(1 | (2 & 3))");
    assert_eq!(render("1 & 2 ^ 3"), "(1 & (2 ^ 3))");
    assert_eq!(render("1 * 2 << 3"), "(1 * (2 << 3))");
    assert_eq!(render("1 << 2 | 3"), "(1 << (2 | 3))");
}

#[test]
fn logical_and_relational_levels() {
    assert_eq!(render("a || b && c"), "(a || (b && c))");
    assert_eq!(render("a && b == c"), "(a && (b == c))");
    assert_eq!(render("a == b < c"), "(a == (b < c))");
    assert_eq!(render("a < b + c"), "(a < (b + c))");
}

// === Prefix desugaring ===

#[test]
fn unary_minus_takes_the_next_unary() {
    assert_eq!(render("-3+2"), "((-1 * 3) + 2)");
    assert_eq!(render("--x"), "(-1 * (-1 * x))");
    assert_eq!(render("-a.B"), "(-1 * a.B)");
    assert_eq!(render("2 * -x"), "(2 * (-1 * x))");
}

#[test]
fn logical_not_compares_with_false() {
    assert_eq!(render("!true"), "(true == false)");
    assert_eq!(render("!(a && b)"), "((a && b) == false)");
}

#[test]
fn bitwise_not_is_xor_with_all_ones() {
    assert_eq!(render("~x"), "(x ^ -1)");
}

// === Assignment ===

#[test]
fn compound_assignment_expands() {
    assert_eq!(render("x += 5"), "(x = (x + 5))");
    assert_eq!(render("x *= 2 + 3"), "(x = (x * (2 + 3)))");
    assert_eq!(render("x <<= 1"), "(x = (x << 1))");
    assert_eq!(render("x &= y"), "(x = (x & y))");
    assert_eq!(render("p.X -= 1"), "(p.X = (p.X - 1))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(render("a = b = 1"), "(a = (b = 1))");
    assert_eq!(render("a += b -= 1"), "(a = (a + (b = (b - 1))))");
}

// === Ternary ===

#[test]
fn ternary_nests_to_the_right() {
    assert_eq!(render("c ? a : d ? e : f"), "(c ? a : (d ? e : f))");
    assert_eq!(render("a > b ? a : b"), "((a > b) ? a : b)");
}

#[test]
fn ternary_branches_take_assignments() {
    assert_eq!(render("true ? 1 : (hit = 1)"), "(true ? 1 : (hit = 1))");
    assert_eq!(render("c ? x -= -1 : x"), "(c ? (x = (x - (-1 * 1))) : x)");
    assert_eq!(render("c ? x : x = 1"), "(c ? x : (x = 1))");
}

#[test]
fn ternary_result_can_be_assigned_to_variable() {
    assert_eq!(render("y = c ? 1 : 2"), "(y = (c ? 1 : 2))");
}

// === Member chains ===

#[test]
fn chains_and_calls() {
    assert_eq!(render("lst.Add(1).Count"), "lst.Add(1).Count");
    assert_eq!(render("x.M(1, y + 2)"), "x.M(1, (y + 2))");
    assert_eq!(render("s.Trim().ToUpper()"), "s.Trim().ToUpper()");
    assert_eq!(render("(a + b).ToString()"), "(a + b).ToString()");
}

#[test]
fn generic_arguments() {
    assert_eq!(render("Convert.To<int>(x)"), "Convert.To<int>(x)");
    assert_eq!(render("a.Pair<int, string>(1, \"b\")"), "a.Pair<int, string>(1, \"b\")");
}

#[test]
fn less_than_after_member_is_comparison() {
    assert_eq!(render("x.F < y"), "(x.F < y)");
    assert_eq!(render("x.F < y > z"), "((x.F < y) > z)");
    assert_eq!(render("x.F < 3"), "(x.F < 3)");
}

#[test]
fn arguments_can_nest_chains_and_ternaries() {
    assert_eq!(
        render("Math.Max(a.B, c ? 1 : 2)"),
        "Math.Max(a.B, (c ? 1 : 2))"
    );
}

// === Errors ===

#[test]
fn adjacent_operators_are_a_parse_error() {
    assert_eq!(parse_error_code("A +* B", &ParseOptions::default()), "E1002");
    assert_eq!(parse_error_code("x = ", &ParseOptions::default()), "E1002");
}

#[test]
fn delimiter_errors() {
    let options = ParseOptions::default();
    assert_eq!(parse_error_code("(1 + 2", &options), "E1003");
    assert_eq!(parse_error_code("f.M(1, 2", &options), "E1003");
    assert_eq!(parse_error_code("1 + 2)", &options), "E1006");
    assert_eq!(parse_error_code(")", &options), "E1006");
}

#[test]
fn unexpected_tokens() {
    let options = ParseOptions::default();
    assert_eq!(parse_error_code("1 2", &options), "E1001");
    assert_eq!(parse_error_code("x.", &options), "E1001");
    assert_eq!(parse_error_code("x.1", &options), "E1001");
    assert_eq!(parse_error_code("a ? b", &options), "E1001");
    assert_eq!(parse_error_code(", x", &options), "E1001");
}

#[test]
fn invalid_assignment_targets() {
    let options = ParseOptions::default();
    assert_eq!(parse_error_code("1 = x", &options), "E1005");
    assert_eq!(parse_error_code("x.M() = 3", &options), "E1005");
    assert_eq!(parse_error_code("a + b = 3", &options), "E1005");
    assert_eq!(parse_error_code("-x = 3", &options), "E1005");
}

#[test]
fn lexer_errors_surface_through_parse() {
    assert_eq!(parse_error_code("x $ 1", &ParseOptions::default()), "E0002");
}

// === Chain guard ===

fn chain(hops: usize) -> String {
    let mut source = String::from("a");
    for _ in 0..hops {
        source.push_str(".b");
    }
    source
}

#[test]
fn chain_at_the_limit_parses() {
    let rendered = render(&chain(100));
    assert_eq!(rendered.matches('.').count(), 100);
}

#[test]
fn chain_over_the_limit_is_rejected() {
    assert_eq!(parse_error_code(&chain(101), &ParseOptions::default()), "E1004");
}

#[test]
fn chain_limit_is_configurable() {
    let options = ParseOptions { max_chain_hops: 2 };
    assert_eq!(parse_error_code("a.b.c.d", &options), "E1004");
    // Each argument starts its own chain.
    let source = "a.b(c.d.e).f";
    assert!(crate::parse_statement(source, fml_ir::Span::from_range(0..source.len()), &options).is_ok());
}

// === Deep nesting ===

#[test]
fn deeply_nested_parentheses() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(render(&source), "1");
}

#[test]
fn deeply_nested_ternaries() {
    let mut source = String::new();
    for _ in 0..2_000 {
        source.push_str("c ? 1 : ");
    }
    source.push('0');
    assert!(render(&source).starts_with("(c ? 1 : (c ? 1 :"));
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_parser {
    use proptest::prelude::*;

    use crate::{parse_statement, ParseOptions};
    use fml_ir::Span;

    fn token_soup() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just("x"),
                Just("1"),
                Just("2.5"),
                Just("\"s\""),
                Just("+"),
                Just("-"),
                Just("*"),
                Just("!"),
                Just("~"),
                Just("=="),
                Just("+="),
                Just("="),
                Just("?"),
                Just(":"),
                Just("("),
                Just(")"),
                Just("."),
                Just(","),
                Just("<"),
                Just(">"),
                Just("M"),
            ],
            0..24,
        )
        .prop_map(|parts| parts.join(" "))
    }

    proptest! {
        #[test]
        fn parser_never_panics(source in token_soup()) {
            let _ = parse_statement(&source, Span::from_range(0..source.len()), &ParseOptions::default());
        }

        #[test]
        fn integer_sums_render_left_nested(values in proptest::collection::vec(0i64..1000, 2..8)) {
            let source = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" + ");
            let rendered = super::render(&source);
            prop_assert_eq!(rendered.matches('(').count(), values.len() - 1);
            let expected_prefix = "(".repeat(values.len() - 1);
            prop_assert!(rendered.starts_with(&expected_prefix));
        }
    }
}
