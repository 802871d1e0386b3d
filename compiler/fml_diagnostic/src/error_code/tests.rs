use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E2001.as_str(), "E2001");
}

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let expected = match &code.as_str()[..2] {
            "E0" | "E1" => ErrorCategory::Parse,
            "E2" => ErrorCategory::Lookup,
            "E3" => ErrorCategory::Type,
            "E6" => ErrorCategory::Runtime,
            "E9" => ErrorCategory::Internal,
            other => panic!("unclassified prefix {other}"),
        };
        assert_eq!(code.category(), expected, "{code}");
    }
}

#[test]
fn test_soft_categories() {
    assert!(ErrorCode::E1001.category().is_soft());
    assert!(ErrorCode::E2003.category().is_soft());
    assert!(ErrorCode::E3001.category().is_soft());
    assert!(!ErrorCode::E6001.category().is_soft());
    assert!(!ErrorCode::E9001.category().is_soft());
}

#[test]
fn test_predicate_exclusivity() {
    assert!(ErrorCode::E0002.is_lexer_error());
    assert!(!ErrorCode::E0002.is_parser_error());
    assert!(ErrorCode::E1004.is_parser_error());
    assert!(!ErrorCode::E1004.is_lexer_error());
    assert!(!ErrorCode::E6002.is_lexer_error());
}

#[test]
fn test_from_str_round_trip() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e6001".parse::<ErrorCode>(), Ok(ErrorCode::E6001));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_summary_from_docs() {
    assert_eq!(ErrorCode::E6001.summary(), "Division or modulo by zero");
    for code in ErrorCode::ALL {
        assert!(!code.summary().is_empty(), "{code} has no summary");
    }
}
