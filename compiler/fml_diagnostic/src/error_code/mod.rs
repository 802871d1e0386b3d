//! Error codes for all formula diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that reports it. Used for `fml explain` lookups.

use std::fmt;

/// Error codes for all formula diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Lookup errors (names, members, types)
/// - E3xxx: Type errors
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in formula
    E0002,
    /// Invalid number literal
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Member chain too long
    E1004,
    /// Invalid assignment target
    E1005,
    /// Unmatched closing parenthesis
    E1006,

    // Lookup Errors (E2xxx)
    /// Unknown variable
    E2001,
    /// Unknown type name
    E2002,
    /// Unknown field or property
    E2003,
    /// Unknown method
    E2004,
    /// Unknown enum variant
    E2005,
    /// Type is not registered with the host
    E2006,

    // Type Errors (E3xxx)
    /// Ternary condition is not a boolean
    E3001,
    /// Member is not readable
    E3002,
    /// Member is not writable
    E3003,
    /// Value cannot be converted to the target type
    E3004,

    // Runtime Errors (E6xxx)
    /// Division or modulo by zero
    E6001,
    /// Integer overflow
    E6002,
    /// Invalid operands for operator
    E6003,
    /// No overload matches the argument types
    E6004,
    /// Host member failed
    E6005,
    /// Shift amount out of range
    E6006,
    /// Loop iteration limit exceeded
    E6007,
    /// Assertion failed
    E6008,

    // Internal Errors (E9xxx)
    /// Malformed compiled program
    E9001,
}

/// How a failure affects the evaluate call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    Parse,
    Lookup,
    Type,
    Runtime,
    Internal,
}

impl ErrorCategory {
    /// Soft failures are logged and the statement yields `null`; the rest
    /// fail the whole evaluate call.
    pub fn is_soft(self) -> bool {
        matches!(
            self,
            ErrorCategory::Parse | ErrorCategory::Lookup | ErrorCategory::Type
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Parse => "parse",
            ErrorCategory::Lookup => "lookup",
            ErrorCategory::Type => "type",
            ErrorCategory::Runtime => "runtime",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// The category is fixed by the phase digit.
    pub fn category(&self) -> ErrorCategory {
        match self.as_str().as_bytes().get(1) {
            Some(b'0' | b'1') => ErrorCategory::Parse,
            Some(b'2') => ErrorCategory::Lookup,
            Some(b'3') => ErrorCategory::Type,
            Some(b'6') => ErrorCategory::Runtime,
            _ => ErrorCategory::Internal,
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// One-line summary, taken from the first line of the long description.
    pub fn summary(&self) -> &'static str {
        crate::ErrorDocs::get(*self)
            .and_then(|doc| doc.lines().next())
            .map_or("", |line| line.trim_start_matches("# ").trim())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
