use super::*;
use pretty_assertions::assert_eq;

#[test]
fn factories_pick_codes_and_categories() {
    let cases = [
        (undefined_member("count", "List"), "E2003", ErrorCategory::Lookup),
        (not_writable("Count", "List"), "E3003", ErrorCategory::Type),
        (division_by_zero(), "E6001", ErrorCategory::Runtime),
        (no_matching_overload("Sqrt", "Math", "int"), "E6004", ErrorCategory::Runtime),
        (internal("stack underflow"), "E9001", ErrorCategory::Internal),
    ];
    for (err, code, category) in cases {
        assert_eq!(err.code().as_str(), code);
        assert_eq!(err.category(), category);
    }
}

#[test]
fn messages() {
    assert_eq!(modulo_by_zero().to_string(), "modulo by zero");
    assert_eq!(
        invalid_operands(OperationType::Sub, "string", "int").to_string(),
        "operator `-` cannot be applied to `string` and `int`"
    );
    assert_eq!(
        shift_out_of_range(64).to_string(),
        "shift amount 64 out of range (0-63)"
    );
    assert_eq!(
        index_out_of_range(3, 2).to_string(),
        "index 3 out of range for length 2"
    );
}

#[test]
fn innermost_span_wins() {
    let err = division_by_zero()
        .or_span(Span::new(4, 5))
        .or_span(Span::new(0, 9));
    assert_eq!(err.span, Some(Span::new(4, 5)));
}

#[test]
fn diagnostic_carries_span_and_statement() {
    let diag = division_by_zero()
        .or_span(Span::new(2, 7))
        .in_statement("x / 0")
        .to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E6001);
    assert_eq!(diag.message, "division by zero");
    assert_eq!(diag.primary_span(), Some(Span::new(2, 7)));
    assert_eq!(diag.notes, vec!["in statement `x / 0`".to_string()]);
}
