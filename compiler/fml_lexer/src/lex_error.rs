//! Lexer error types.

use fml_diagnostic::{Diagnostic, ErrorCode};
use fml_ir::Span;

/// A lexer error: where it happened and what went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing quote; carries the opening quote character.
    UnterminatedString { quote: char },
    /// A character that starts no token.
    InvalidCharacter(char),
    /// More than one `.` in a number.
    MalformedNumber,
    /// Integer literal outside the `i64` range.
    IntegerOverflow,
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span, quote: char) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedString { quote },
        }
    }

    #[cold]
    pub fn invalid_character(span: Span, ch: char) -> Self {
        LexError {
            span,
            kind: LexErrorKind::InvalidCharacter(ch),
        }
    }

    #[cold]
    pub fn malformed_number(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::MalformedNumber,
        }
    }

    #[cold]
    pub fn integer_overflow(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::IntegerOverflow,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::MalformedNumber | LexErrorKind::IntegerOverflow => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match &self.kind {
            LexErrorKind::UnterminatedString { quote } => diag
                .with_message("unterminated string literal")
                .with_label(self.span, "string starts here")
                .with_suggestion(format!("add a closing `{quote}`")),
            LexErrorKind::InvalidCharacter(ch) => diag
                .with_message(format!("invalid character `{}`", ch.escape_debug()))
                .with_label(self.span, "not part of any token"),
            LexErrorKind::MalformedNumber => diag
                .with_message("invalid number literal")
                .with_label(self.span, "a number may contain at most one `.`"),
            LexErrorKind::IntegerOverflow => diag
                .with_message("integer literal is too large")
                .with_label(self.span, "does not fit in a 64-bit integer")
                .with_suggestion("add a decimal point to make it a float"),
        }
    }
}
