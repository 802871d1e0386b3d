//! Parser and compiler for formulas.
//!
//! [`compile`] turns formula text into a [`CompiledFormula`]: one entry per
//! non-empty statement, each either a postfix [`Program`] or the diagnostic
//! that stopped it. Compilation never touches binding values; it only asks a
//! [`NameResolver`] which names are bindings and which are types.
//!
//! Errors are per statement. A statement that fails to lex, parse or resolve
//! does not affect its siblings.

mod cursor;
mod error;
mod grammar;
mod lower;

pub use error::ParseError;
pub use grammar::Parser;
pub use lower::{lower, NameResolver};

use std::sync::Arc;

use fml_diagnostic::Diagnostic;
use fml_ir::{ExprArena, ExprId, Program, Span};
use fml_stack::DEFAULT_MAX_CHAIN_HOPS;

/// Parser configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum `.` hops in a single member chain.
    pub max_chain_hops: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_chain_hops: DEFAULT_MAX_CHAIN_HOPS,
        }
    }
}

/// The expression tree of one statement.
#[derive(Clone, Debug)]
pub struct ParsedStatement {
    pub span: Span,
    pub arena: ExprArena,
    pub root: ExprId,
}

/// Lex and parse the statement at `span` of `source`.
pub fn parse_statement(
    source: &str,
    span: Span,
    options: &ParseOptions,
) -> Result<ParsedStatement, Diagnostic> {
    let tokens = fml_lexer::tokenize(source, span).map_err(|e| e.to_diagnostic())?;
    let (arena, root) = Parser::new(&tokens, options)
        .parse_statement()
        .map_err(|e| e.to_diagnostic())?;
    Ok(ParsedStatement { span, arena, root })
}

/// One compiled statement.
#[derive(Clone, Debug)]
pub struct CompiledStatement {
    pub span: Span,
    /// The program, or the diagnostic explaining why there is none.
    pub outcome: Result<Program, Diagnostic>,
}

/// A compiled formula. Immutable once built; shared through the cache.
#[derive(Clone, Debug)]
pub struct CompiledFormula {
    source: Arc<str>,
    statements: Vec<CompiledStatement>,
}

impl CompiledFormula {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[CompiledStatement] {
        &self.statements
    }

    /// Text of a statement of this formula.
    pub fn statement_text(&self, statement: &CompiledStatement) -> &str {
        statement.span.slice(&self.source)
    }

    /// Diagnostics of statements that failed to compile.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.statements.iter().filter_map(|s| s.outcome.as_ref().err())
    }
}

/// Compile every statement of `source`.
#[tracing::instrument(level = "debug", skip(resolver, options))]
pub fn compile(
    source: &str,
    resolver: &dyn NameResolver,
    options: &ParseOptions,
) -> CompiledFormula {
    let statements: Vec<CompiledStatement> = fml_lexer::split_statements(source)
        .into_iter()
        .map(|span| {
            let outcome = compile_statement(source, span, resolver, options).map_err(|diag| {
                diag.with_note(format!("in statement `{}`", span.slice(source)))
            });
            if let Err(diag) = &outcome {
                tracing::trace!(%span, code = %diag.code, "statement failed to compile");
            }
            CompiledStatement { span, outcome }
        })
        .collect();
    tracing::debug!(statements = statements.len(), "compiled formula");
    CompiledFormula {
        source: Arc::from(source),
        statements,
    }
}

fn compile_statement(
    source: &str,
    span: Span,
    resolver: &dyn NameResolver,
    options: &ParseOptions,
) -> Result<Program, Diagnostic> {
    let parsed = parse_statement(source, span, options)?;
    lower(&parsed.arena, parsed.root, resolver).map_err(|e| e.to_diagnostic())
}

#[cfg(test)]
mod tests;
