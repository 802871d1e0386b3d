//! Parse errors.
//!
//! Syntax problems carry `E1xxx` codes; name-resolution problems found while
//! lowering carry `E2xxx` codes. Both convert into a [`Diagnostic`].

use fml_diagnostic::{Diagnostic, ErrorCode};
use fml_ir::{Span, TokenKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
    /// Label text at `span`.
    pub context: Option<String>,
    /// Related location, such as the `(` an unclosed-delimiter error refers to.
    pub related: Option<(Span, String)>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            related: None,
            help: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some((span, message.into()));
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    #[cold]
    pub fn unexpected_token(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("unexpected {}", found.describe()),
            span,
        )
    }

    #[cold]
    pub fn expected_expression(found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", found.describe()),
            span,
        )
        .with_context("expected an operand here")
    }

    #[cold]
    pub fn unclosed_paren(open: Span, found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed `(`: expected `)`, found {}", found.describe()),
            span,
        )
        .with_related(open, "`(` opened here")
    }

    #[cold]
    pub fn unmatched_close(span: Span) -> Self {
        ParseError::new(ErrorCode::E1006, "unmatched `)`", span)
            .with_context("no `(` to close")
    }

    #[cold]
    pub fn chain_too_long(limit: usize, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("member chain exceeds {limit} hops"),
            span,
        )
        .with_help("the chain is treated as malformed or cyclic")
    }

    #[cold]
    pub fn invalid_assignment_target(span: Span) -> Self {
        ParseError::new(ErrorCode::E1005, "invalid assignment target", span)
            .with_context("only a variable or a field/property can be assigned")
    }

    #[cold]
    pub fn unknown_variable(name: &str, span: Span) -> Self {
        ParseError::new(ErrorCode::E2001, format!("unknown variable `{name}`"), span)
            .with_context("not a binding")
    }

    #[cold]
    pub fn unknown_type(name: &str, span: Span) -> Self {
        ParseError::new(ErrorCode::E2002, format!("unknown type `{name}`"), span)
            .with_context("not a primitive or registered type")
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"));
        if let Some((span, message)) = &self.related {
            diag = diag.with_secondary_label(*span, message);
        }
        for help in &self.help {
            diag = diag.with_note(help);
        }
        diag
    }
}
