//! Evaluation errors.
//!
//! [`EvalErrorKind`] enumerates everything that can go wrong while a
//! compiled statement runs. Each kind has an error code, and the code's
//! category decides how the engine reacts: lookup and type errors are soft
//! (logged, the statement yields `null`), runtime errors abort the call.
//!
//! Construct errors through the factory functions below rather than by
//! naming variants at the call site.

use fml_diagnostic::{Diagnostic, ErrorCategory, ErrorCode};
use fml_ir::{OperationType, Span};

/// Result of evaluating an expression.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Lookup
    #[error("unknown variable `{name}`")]
    UndefinedVariable { name: String },
    #[error("unknown type `{name}`")]
    UnknownType { name: String },
    #[error("`{type_name}` has no field or property `{member}`")]
    UndefinedMember { member: String, type_name: String },
    #[error("`{type_name}` has no method `{method}`")]
    UndefinedMethod { method: String, type_name: String },
    #[error("`{enum_name}` has no variant `{variant}`")]
    UnknownVariant { enum_name: String, variant: String },
    #[error("type `{type_name}` is not registered with the host")]
    UnregisteredType { type_name: String },

    // Type
    #[error("ternary condition must be a bool, found `{found}`")]
    NonBooleanCondition { found: String },
    #[error("`{type_name}.{member}` is not readable")]
    NotReadable { member: String, type_name: String },
    #[error("`{type_name}.{member}` is not writable")]
    NotWritable { member: String, type_name: String },
    #[error("cannot convert {value} to `{target}`")]
    ConversionFailed { value: String, target: String },

    // Runtime
    #[error("{operation} by zero")]
    DivisionByZero { operation: &'static str },
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("operator `{op}` cannot be applied to `{left}` and `{right}`")]
    InvalidOperands {
        op: OperationType,
        left: String,
        right: String,
    },
    #[error("no overload of `{type_name}.{method}` accepts ({args})")]
    NoMatchingOverload {
        method: String,
        type_name: String,
        args: String,
    },
    #[error("{message}")]
    HostFailure { message: String },
    #[error("shift amount {amount} out of range (0-63)")]
    ShiftOutOfRange { amount: i64 },
    #[error("loop exceeded {limit} iterations")]
    LoopLimitExceeded { limit: usize },
    #[error("assertion failed: `{statement}` produced {found}")]
    AssertionFailed { statement: String, found: String },

    // Internal
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::E2001,
            Self::UnknownType { .. } => ErrorCode::E2002,
            Self::UndefinedMember { .. } => ErrorCode::E2003,
            Self::UndefinedMethod { .. } => ErrorCode::E2004,
            Self::UnknownVariant { .. } => ErrorCode::E2005,
            Self::UnregisteredType { .. } => ErrorCode::E2006,
            Self::NonBooleanCondition { .. } => ErrorCode::E3001,
            Self::NotReadable { .. } => ErrorCode::E3002,
            Self::NotWritable { .. } => ErrorCode::E3003,
            Self::ConversionFailed { .. } => ErrorCode::E3004,
            Self::DivisionByZero { .. } => ErrorCode::E6001,
            Self::IntegerOverflow { .. } => ErrorCode::E6002,
            Self::InvalidOperands { .. } => ErrorCode::E6003,
            Self::NoMatchingOverload { .. } => ErrorCode::E6004,
            Self::HostFailure { .. } => ErrorCode::E6005,
            Self::ShiftOutOfRange { .. } => ErrorCode::E6006,
            Self::LoopLimitExceeded { .. } => ErrorCode::E6007,
            Self::AssertionFailed { .. } => ErrorCode::E6008,
            Self::Internal { .. } => ErrorCode::E9001,
        }
    }
}

/// An evaluation error with its location in the formula, when known.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    /// Text of the statement being evaluated.
    pub statement: Option<String>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            statement: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Attach a span unless one is already set; the innermost span wins.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn in_statement(mut self, text: &str) -> Self {
        if self.statement.is_none() {
            self.statement = Some(text.to_string());
        }
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.code().summary().to_lowercase());
        }
        if let Some(text) = &self.statement {
            diag = diag.with_note(format!("in statement `{text}`"));
        }
        diag
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn unknown_type(name: &str) -> EvalError {
    EvalErrorKind::UnknownType {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn undefined_member(member: &str, type_name: &str) -> EvalError {
    EvalErrorKind::UndefinedMember {
        member: member.to_string(),
        type_name: type_name.to_string(),
    }
    .into()
}

#[cold]
pub fn undefined_method(method: &str, type_name: &str) -> EvalError {
    EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    }
    .into()
}

#[cold]
pub fn unknown_variant(enum_name: &str, variant: &str) -> EvalError {
    EvalErrorKind::UnknownVariant {
        enum_name: enum_name.to_string(),
        variant: variant.to_string(),
    }
    .into()
}

#[cold]
pub fn unregistered_type(type_name: &str) -> EvalError {
    EvalErrorKind::UnregisteredType {
        type_name: type_name.to_string(),
    }
    .into()
}

#[cold]
pub fn non_boolean_condition(found: &str) -> EvalError {
    EvalErrorKind::NonBooleanCondition {
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn not_readable(member: &str, type_name: &str) -> EvalError {
    EvalErrorKind::NotReadable {
        member: member.to_string(),
        type_name: type_name.to_string(),
    }
    .into()
}

#[cold]
pub fn not_writable(member: &str, type_name: &str) -> EvalError {
    EvalErrorKind::NotWritable {
        member: member.to_string(),
        type_name: type_name.to_string(),
    }
    .into()
}

#[cold]
pub fn conversion_failed(value: &str, target: &str) -> EvalError {
    EvalErrorKind::ConversionFailed {
        value: value.to_string(),
        target: target.to_string(),
    }
    .into()
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero {
        operation: "division",
    }
    .into()
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero {
        operation: "modulo",
    }
    .into()
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}

#[cold]
pub fn invalid_operands(op: OperationType, left: &str, right: &str) -> EvalError {
    EvalErrorKind::InvalidOperands {
        op,
        left: left.to_string(),
        right: right.to_string(),
    }
    .into()
}

#[cold]
pub fn no_matching_overload(method: &str, type_name: &str, args: &str) -> EvalError {
    EvalErrorKind::NoMatchingOverload {
        method: method.to_string(),
        type_name: type_name.to_string(),
        args: args.to_string(),
    }
    .into()
}

#[cold]
pub fn host_failure(message: impl Into<String>) -> EvalError {
    EvalErrorKind::HostFailure {
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    host_failure(format!("index {index} out of range for length {len}"))
}

#[cold]
pub fn shift_out_of_range(amount: i64) -> EvalError {
    EvalErrorKind::ShiftOutOfRange { amount }.into()
}

#[cold]
pub fn loop_limit_exceeded(limit: usize) -> EvalError {
    EvalErrorKind::LoopLimitExceeded { limit }.into()
}

#[cold]
pub fn assertion_failed(statement: &str, found: &str) -> EvalError {
    EvalErrorKind::AssertionFailed {
        statement: statement.to_string(),
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn internal(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Internal {
        message: message.into(),
    }
    .into()
}

#[cfg(test)]
mod tests;
