//! Lexer for formulas.
//!
//! A formula is first split into `;`-separated statements
//! ([`split_statements`]), then each statement is tokenized on its own
//! ([`tokenize`]). A lexer error therefore only affects its own statement.
//!
//! All spans are byte offsets into the full formula.

mod cursor;
mod lex_error;
mod scanner;
mod split;

pub use lex_error::{LexError, LexErrorKind};
pub use split::split_statements;

use fml_ir::{Span, TokenList};

/// Tokenize the statement at `span` inside `source`.
///
/// The returned list always ends with `Eof` at `span.end`.
pub fn tokenize(source: &str, span: Span) -> Result<TokenList, LexError> {
    let tokens = scanner::Scanner::new(source, span).scan_all()?;
    tracing::trace!(count = tokens.len(), %span, "lexed statement");
    Ok(TokenList::new(tokens, span.end))
}

/// Split and tokenize every statement of `source`.
pub fn lex(source: &str) -> Vec<(Span, Result<TokenList, LexError>)> {
    split_statements(source)
        .into_iter()
        .map(|span| (span, tokenize(source, span)))
        .collect()
}
