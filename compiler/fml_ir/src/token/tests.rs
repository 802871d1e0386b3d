use super::*;
use pretty_assertions::assert_eq;

#[test]
fn eof_is_appended_once() {
    let list = TokenList::new(vec![Token::new(TokenKind::Int(1), Span::new(0, 1))], 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(1).kind, TokenKind::Eof);

    let again = TokenList::new(list.iter().cloned().collect(), 1);
    assert_eq!(again.len(), 2);
}

#[test]
fn get_clamps_to_eof() {
    let list = TokenList::new(Vec::new(), 7);
    assert!(list.is_empty());
    assert_eq!(list.get(99).kind, TokenKind::Eof);
    assert_eq!(list.get(99).span, Span::point(7));
}

#[test]
fn describe_names_operators_and_identifiers() {
    assert_eq!(TokenKind::Op(OperationType::AddAssign).describe(), "`+=`");
    assert_eq!(TokenKind::Ident(Name::new("lst")).describe(), "identifier `lst`");
    assert_eq!(TokenKind::Eof.describe(), "end of statement");
}

#[test]
fn is_op_matches_exact_operator() {
    let kind = TokenKind::Op(OperationType::Less);
    assert!(kind.is_op(OperationType::Less));
    assert!(!kind.is_op(OperationType::LessEqual));
    assert!(!TokenKind::LParen.is_op(OperationType::Less));
}
