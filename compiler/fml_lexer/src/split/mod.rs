//! Statement splitting.
//!
//! A formula holds one or more statements separated by `;`. Separators
//! inside quoted literals do not split. An unterminated quote runs to the
//! end of the formula, leaving the error to the scanner.

use fml_ir::Span;
use memchr::{memchr, memchr3};

/// Spans of the non-empty statements of `source`, in order.
///
/// Each span is trimmed of surrounding whitespace; whitespace-only
/// statements are dropped.
pub fn split_statements(source: &str) -> Vec<Span> {
    let bytes = source.as_bytes();
    let mut statements = Vec::new();
    let mut stmt_start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr3(b';', b'"', b'\'', &bytes[pos..]) {
        let at = pos + offset;
        match bytes[at] {
            b';' => {
                push_trimmed(source, stmt_start, at, &mut statements);
                stmt_start = at + 1;
                pos = at + 1;
            }
            quote => match memchr(quote, &bytes[at + 1..]) {
                Some(close) => pos = at + 1 + close + 1,
                None => break,
            },
        }
    }

    push_trimmed(source, stmt_start, bytes.len(), &mut statements);
    statements
}

fn push_trimmed(source: &str, start: usize, end: usize, out: &mut Vec<Span>) {
    let text = &source[start..end];
    let trimmed = text.trim_start();
    let lead = text.len() - trimmed.len();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        return;
    }
    let begin = start + lead;
    out.push(Span::from_range(begin..begin + trimmed.len()));
}
