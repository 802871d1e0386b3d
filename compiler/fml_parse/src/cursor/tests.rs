#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use fml_ir::Name;

fn tokens(source: &str) -> TokenList {
    fml_lexer::tokenize(source, Span::from_range(0..source.len())).unwrap()
}

#[test]
fn advance_stops_at_eof() {
    let list = tokens("a");
    let mut cursor = Cursor::new(&list);
    assert_eq!(cursor.advance().kind, TokenKind::Ident(Name::new("a")));
    assert!(cursor.is_at_end());
    assert_eq!(cursor.advance().kind, TokenKind::Eof);
    assert!(cursor.is_at_end());
}

#[test]
fn check_ignores_payload() {
    let list = tokens("x");
    let cursor = Cursor::new(&list);
    assert!(cursor.check(&TokenKind::Ident(Name::new("other"))));
    assert!(!cursor.check(&TokenKind::LParen));
}

#[test]
fn peek_past_end_is_eof() {
    let list = tokens("a . b");
    let cursor = Cursor::new(&list);
    assert_eq!(cursor.peek_kind_at(1), &TokenKind::Dot);
    assert_eq!(cursor.peek_kind_at(10), &TokenKind::Eof);
}

#[test]
fn expect_reports_found_token() {
    let list = tokens("1 )");
    let mut cursor = Cursor::new(&list);
    cursor.advance();
    let err = cursor.expect(&TokenKind::Comma).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `,`, found `)`");
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn backtracking() {
    let list = tokens("a < b");
    let mut cursor = Cursor::new(&list);
    cursor.advance();
    let mark = cursor.position();
    cursor.advance();
    cursor.advance();
    cursor.set_position(mark);
    assert!(cursor.check_op(OperationType::Less));
    assert_eq!(cursor.previous_span(), Span::new(0, 1));
}
